//! Command-line interface definitions
//!
//! Arguments are grouped by the component that consumes them.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use crate::permissions::check_file_permissions;

/// Change permissions recursively, parents before their contents
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Mode and target path
    #[command(flatten)]
    pub target: TargetConfig,

    /// Output and logging configuration
    #[command(flatten)]
    pub output: OutputConfig,
}

// ============================================================================
// FUNCTIONAL GROUPS: Organized by what component consumes them
// ============================================================================

/// Target configuration
///
/// Used by: `ChmodPlan::build()`
#[derive(clap::Args, Debug, Clone)]
pub struct TargetConfig {
    /// Octal mode to apply (e.g. 750); must keep owner read permission
    ///
    /// Directories are changed before their contents. With -R, a mode that
    /// drops the owner execute bit (e.g. 644) makes each directory
    /// unsearchable before its entries are reached, so the run stops at the
    /// first entry beneath it and leaves the tree partly changed.
    #[arg(value_name = "MODE")]
    pub mode: String,

    /// File or directory to change
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Change every file and directory beneath PATH as well
    #[arg(short = 'R', long)]
    pub recursive: bool,
}

/// Output and logging configuration
///
/// Used by: `main()`, logging initialization
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Output Options")]
pub struct OutputConfig {
    /// Print the planned changes in the order they would run, without applying
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl OutputConfig {
    /// Map `-q`/`-v` onto a tracing level
    #[must_use]
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

impl Args {
    /// Validate command-line arguments
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The target path does not exist
    /// - The mode does not grant the owner read permission
    /// - Both --quiet and --verbose options are used
    pub fn validate(&self) -> Result<()> {
        if self.target.path.symlink_metadata().is_err() {
            anyhow::bail!("Path does not exist: {}", self.target.path.display());
        }

        if !check_file_permissions(&self.target.mode) {
            anyhow::bail!(
                "Mode '{}' must be numeric and grant the owner read permission",
                self.target.mode
            );
        }

        if self.output.quiet && self.output.verbose > 0 {
            anyhow::bail!("Cannot use both --quiet and --verbose options");
        }

        Ok(())
    }
}
