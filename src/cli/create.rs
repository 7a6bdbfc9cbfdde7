//! Create command - replay a plan onto a fresh branch off the release branch

use crate::cli::CliProgress;
use crate::cli::style::{CHECK, Stylize, arrow, cross};
use anstream::{eprintln, println};
use chrono::Local;
use cherrypicker::cancel::CancellationFlag;
use cherrypicker::cherry_pick::{
    CherryPickStatus, ExecuteOptions, execute_cherry_pick_plan, plan_steps, short_sha,
    working_branch_name,
};
use cherrypicker::config::load_config;
use cherrypicker::error::{Error, Result};
use cherrypicker::git::GitCli;
use cherrypicker::plan::{CherryPickPlan, load_plan};
use dialoguer::Confirm;
use std::path::PathBuf;

/// Options for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Plan file written by `list -o yaml`
    pub file: PathBuf,
    /// Working copy to run git in
    pub path: PathBuf,
    /// Remote override
    pub remote: Option<String>,
    /// Working branch prefix override
    pub branch_prefix: Option<String>,
    /// Show the steps without touching the working copy
    pub dry_run: bool,
    /// Preview the steps and prompt before running them
    pub confirm: bool,
}

/// Run the create command
pub fn run_create(options: CreateOptions, cancel: &CancellationFlag) -> Result<()> {
    let config = load_config()?;
    let plan = load_plan(&options.file)?;
    plan.validate()?;

    eprintln!("Repo:           {}", plan.repo);
    eprintln!("Release branch: {}", plan.release_branch.accent());
    eprintln!("Commits:        {}", plan.len());

    let remote = options.remote.unwrap_or(config.remote);
    let prefix = options.branch_prefix.unwrap_or(config.branch_prefix);
    let branch_name = working_branch_name(&prefix, &Local::now());

    if options.dry_run {
        print_steps(&plan, &remote, &branch_name);
        println!("{}", "Dry run complete".muted());
        return Ok(());
    }

    if options.confirm {
        print_steps(&plan, &remote, &branch_name);
        if !Confirm::new()
            .with_prompt("Proceed with cherry-pick?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
    }
    eprintln!();

    let mut git = GitCli::new(&options.path);
    let progress = CliProgress::new(&plan.release_branch, &branch_name);
    let execute_options = ExecuteOptions {
        remote,
        branch_name,
    };

    let outcome =
        execute_cherry_pick_plan(&plan, &mut git, &execute_options, &progress, cancel)?;

    eprintln!();
    match &outcome.status {
        CherryPickStatus::Done => {
            eprintln!(
                "{} {} commit(s) cherry-picked onto branch {}",
                format!("{CHECK} Done.").success(),
                outcome.applied.len(),
                outcome.branch.accent()
            );
        }
        CherryPickStatus::Failed { position, sha, .. } => {
            eprintln!(
                "{} Stopped at [{position}/{}] {}; {} commit(s) applied on {}",
                cross(),
                outcome.total,
                short_sha(sha).emphasis(),
                outcome.applied.len(),
                outcome.branch.accent()
            );
        }
        CherryPickStatus::Cancelled { position } => {
            eprintln!(
                "{} Cancelled before [{position}/{}]; {} commit(s) applied on {}",
                "!".warn(),
                outcome.total,
                outcome.applied.len(),
                outcome.branch.accent()
            );
        }
    }

    outcome.into_result().map(|_| ())
}

/// Print the steps a run would take
fn print_steps(plan: &CherryPickPlan, remote: &str, branch_name: &str) {
    println!("{}:", "Cherry-pick plan".emphasis());
    println!();
    for step in plan_steps(plan, remote, branch_name) {
        println!("  {} {step}", arrow());
    }
    println!();
}
