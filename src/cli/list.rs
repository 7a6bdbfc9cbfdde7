//! List command - show commits on the head branch missing from a release branch

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::{eprintln, print, println};
use cherrypicker::cancel::CancellationFlag;
use cherrypicker::error::Result;
use cherrypicker::plan::{CherryPickPlan, save_plan};
use cherrypicker::resolve::{LabelIndexOptions, ResolveOptions, resolve_missing_commits};
use cherrypicker::types::{FilterMode, MissingCommit};
use clap::ValueEnum;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Duration;

/// Output format for `list`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for reading
    #[default]
    Table,
    /// Plan document accepted by `create -f`
    Yaml,
}

/// Options for the list command
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Repository reference (`owner/repo` or URL)
    pub repo: String,
    /// Release branch to compare against
    pub release_branch: String,
    /// Which missing commits to keep
    pub mode: FilterMode,
    /// Output format
    pub output: OutputFormat,
    /// Head branch override
    pub head: Option<String>,
    /// Also write the plan to this file
    pub save: Option<PathBuf>,
}

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const COLUMN_GAP: usize = 2;

/// Run the list command
pub async fn run_list(options: ListOptions, cancel: &CancellationFlag) -> Result<()> {
    let ctx = CommandContext::new(&options.repo).await?;

    let resolve_options = ResolveOptions {
        head_branch: options
            .head
            .clone()
            .unwrap_or_else(|| ctx.config.head_branch.clone()),
        label_index: LabelIndexOptions {
            detail_concurrency: ctx.config.detail_concurrency,
        },
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(fetch_message(&options, &resolve_options.head_branch));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let resolved = resolve_missing_commits(
        ctx.platform.as_ref(),
        &options.release_branch,
        &options.mode,
        &resolve_options,
        cancel,
    )
    .await;
    spinner.finish_and_clear();
    let commits = resolved?;

    if commits.is_empty() {
        println!("No missing commits found.");
        return Ok(());
    }

    let plan = CherryPickPlan::from_missing_commits(
        &ctx.platform_config,
        &options.release_branch,
        &options.mode,
        &commits,
    );

    if let Some(path) = &options.save {
        save_plan(path, &plan)?;
        eprintln!(
            "{} Saved {} commit(s) to {}",
            check(),
            plan.len().accent(),
            path.display().emphasis()
        );
    }

    match options.output {
        OutputFormat::Yaml => print!("{}", plan.to_yaml()?),
        OutputFormat::Table => {
            let show_pr = matches!(options.mode, FilterMode::WithLabel(_));
            print!("{}", render_table(&commits, show_pr));
            eprintln!();
            eprintln!("Total: {} missing commits", commits.len());
        }
    }

    Ok(())
}

fn fetch_message(options: &ListOptions, head: &str) -> String {
    let range = format!("{}...{head}", options.release_branch);
    match &options.mode {
        FilterMode::All => format!("Fetching commits in {}...", range.accent()),
        FilterMode::WithLabel(label) => {
            format!("Fetching commits in {} with label {label:?}...", range.accent())
        }
        FilterMode::WithoutLabel(label) => {
            format!("Fetching commits in {} without label {label:?}...", range.accent())
        }
    }
}

/// Render missing commits as aligned columns
///
/// Columns are SHA (12 chars), DATE, AUTHOR, PR (only when `show_pr`) and
/// MESSAGE. Messages are truncated to keep rows on one line.
pub fn render_table(commits: &[MissingCommit], show_pr: bool) -> String {
    let message_width = if show_pr { 72 } else { 80 };

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(commits.len() + 1);
    let mut header = vec!["SHA", "DATE", "AUTHOR"];
    if show_pr {
        header.push("PR");
    }
    header.push("MESSAGE");
    rows.push(header.into_iter().map(String::from).collect());

    for missing in commits {
        let commit = &missing.commit;
        let mut row = vec![
            commit.sha.chars().take(12).collect(),
            commit.date.format(DATE_FORMAT).to_string(),
            commit.author.clone(),
        ];
        if show_pr {
            row.push(
                missing
                    .pr_number()
                    .map(|n| format!("#{n}"))
                    .unwrap_or_default(),
            );
        }
        row.push(truncate(&commit.message, message_width));
        rows.push(row);
    }

    let columns = rows[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in &rows {
        let mut line = String::new();
        for (col, cell) in row.iter().enumerate() {
            if col + 1 == columns {
                line.push_str(cell);
            } else {
                let pad = widths[col] - cell.chars().count() + COLUMN_GAP;
                line.push_str(cell);
                line.extend(std::iter::repeat_n(' ', pad));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Shorten `s` to at most `max` characters, ending in `...` when cut
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
