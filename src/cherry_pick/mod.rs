//! Cherry-pick engine
//!
//! Two-phase pattern:
//! 1. Steps - describe the run (pure, testable, used for dry runs)
//! 2. Execute - drive the working copy through the state machine (effectful)

mod execute;
mod progress;
mod steps;

pub use execute::{
    CherryPickOutcome, CherryPickState, CherryPickStatus, ExecuteOptions,
    execute_cherry_pick_plan,
};
pub use progress::{NoopProgress, ProgressCallback};
pub use steps::{
    CherryPickStep, DEFAULT_BRANCH_PREFIX, DEFAULT_REMOTE, plan_steps, short_sha,
    working_branch_name,
};
