//! permwalk command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use permwalk::backends::{LocalFileSystem, LocalPath};
use permwalk::cli::Args;
use permwalk::ChmodPlan;
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.output.log_level())
        .with_writer(std::io::stderr)
        .init();

    args.validate()?;

    let fs = LocalFileSystem::new();
    let root = LocalPath::new(&args.target.path)?;
    let plan = ChmodPlan::build(root, &fs, args.target.recursive, &args.target.mode)
        .with_context(|| format!("Failed to plan changes for {}", args.target.path.display()))?;

    info!(
        entries = plan.len(),
        recursive = args.target.recursive,
        "Planned mode {:o} for {}",
        plan.mode(),
        args.target.path.display()
    );

    if args.output.dry_run {
        for path in plan.pop_order() {
            println!("{:o} {path}", plan.mode());
        }
        return Ok(());
    }

    let stats = plan.apply(&fs).with_context(|| {
        format!(
            "Failed to change permissions under {}",
            args.target.path.display()
        )
    })?;

    if !args.output.quiet {
        println!("{stats}");
    }
    Ok(())
}
