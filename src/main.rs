//! cherrypicker CLI

mod cli;

use clap::{Parser, Subcommand};
use cherrypicker::cancel::CancellationFlag;
use cherrypicker::error::Error;
use cherrypicker::telemetry::init_tracing;
use cherrypicker::types::FilterMode;
use cli::style::Stylize;
use cli::{CreateOptions, ListOptions, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cherrypicker")]
#[command(about = "Find commits missing from a release branch and cherry-pick them onto a new branch")]
#[command(version)]
struct Cli {
    /// Log API and git activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List commits on the head branch that the release branch is missing
    List {
        /// Repository as owner/repo or a GitHub URL
        repo: String,

        /// Release branch to compare against
        release_branch: String,

        /// Only commits whose PR has this label
        #[arg(long, conflicts_with = "without_label")]
        with_label: Option<String>,

        /// Only commits whose PR does not have this label
        #[arg(long)]
        without_label: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// Branch commits are ported from (default: main)
        #[arg(long)]
        head: Option<String>,

        /// Also write the plan to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Cherry-pick the commits in a plan file onto a new branch
    Create {
        /// Plan file written by `list -o yaml`
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the git working copy
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Remote the release branch is tracked from (default: origin)
        #[arg(long)]
        remote: Option<String>,

        /// Prefix for the new branch name (default: cherrypick)
        #[arg(long)]
        branch_prefix: Option<String>,

        /// Show the steps without running them
        #[arg(long)]
        dry_run: bool,

        /// Preview the steps and prompt before running them
        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cancel = CancellationFlag::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let result = match cli.command {
        Commands::List {
            repo,
            release_branch,
            with_label,
            without_label,
            output,
            head,
            save,
        } => {
            let options = ListOptions {
                repo,
                release_branch,
                mode: FilterMode::from_flags(with_label, without_label),
                output,
                head,
                save,
            };
            cli::run_list(options, &cancel).await
        }
        Commands::Create {
            file,
            path,
            remote,
            branch_prefix,
            dry_run,
            confirm,
        } => {
            let options = CreateOptions {
                file,
                path,
                remote,
                branch_prefix,
                dry_run,
                confirm,
            };
            cli::run_create(options, &cancel)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if matches!(e.root(), Error::Cancelled) => {
            anstream::eprintln!("{}", "Cancelled".warn());
            ExitCode::from(130)
        }
        Err(e) => {
            anstream::eprintln!("{} {e}", "error:".error());
            ExitCode::FAILURE
        }
    }
}
