//! cherrypicker - port commits from main onto a release branch
//!
//! Finds the commits on the head branch that a release branch is missing,
//! optionally filtered by a label on their originating pull request, and
//! replays them onto a fresh branch with sequential cherry-picks.

pub mod auth;
pub mod cancel;
pub mod cherry_pick;
pub mod config;
pub mod error;
pub mod git;
pub mod plan;
pub mod platform;
pub mod resolve;
pub mod telemetry;
pub mod types;
