use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use gopkg_rewrite::{
    logging, Config, FileReport, FileStatus, RewriteConfig, RunSummary, SkipReason, Walker,
};

use crate::cli::utils::summary_line;

pub fn handle_rewrite(matches: &ArgMatches) -> Result<RunSummary> {
    let dirs: Vec<PathBuf> = matches
        .get_many::<PathBuf>("dirs")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let dry_run = matches.get_flag("dry-run");
    let verbose = matches.get_flag("verbose");
    let json = matches.get_one::<String>("format").map(String::as_str) == Some("json");

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, matches);

    logging::init(&config.logging, verbose)?;

    // Bad pattern or template aborts before any file is touched
    let rewrite_config =
        RewriteConfig::compile(&config.rewrite).context("Invalid rewrite configuration")?;
    info!(
        "Filtering packages by {:?}, rendering {:?}",
        rewrite_config.transformer.package_regex().as_str(),
        rewrite_config.transformer.template().source()
    );
    let walker = Walker::new(rewrite_config, config.rewrite.extension.clone())?
        .with_dry_run(dry_run);

    let start_time = Instant::now();
    let mut summary = RunSummary {
        dry_run,
        ..RunSummary::default()
    };

    for dir in &dirs {
        if !json {
            println!("Replacing go_package recursively in {}", dir.display());
        }
        let dir_summary = walker.walk(dir, |report| {
            if !json {
                print_report(report, dry_run);
            }
        });
        summary.merge(&dir_summary);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary_line(&summary, start_time.elapsed()));
    }

    Ok(summary)
}

fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(package) = matches.get_one::<String>("package") {
        config.rewrite.package = package.clone();
    }
    if let Some(go_package) = matches.get_one::<String>("go_package") {
        config.rewrite.go_package = go_package.clone();
    }
    if matches.get_flag("require-package") {
        config.rewrite.require_package = true;
    }
    if let Some(extension) = matches.get_one::<String>("extension") {
        config.rewrite.extension = extension.clone();
    }
}

fn print_report(report: &FileReport, dry_run: bool) {
    println!("  file: {}", report.path.display());
    match &report.status {
        FileStatus::Rewritten { value, .. } if dry_run => {
            println!("    result: {} (dry run)", value)
        }
        FileStatus::Rewritten { value, .. } => println!("    result: {}", value),
        FileStatus::UpToDate { value } => println!("    result: {} (unchanged)", value),
        FileStatus::Skipped(SkipReason::NoPackageDirective) => {
            println!("    no package definition")
        }
        FileStatus::Skipped(SkipReason::PackageMismatch { package }) => {
            println!("    package didn't match: {}", package)
        }
        FileStatus::Failed(e) => println!("    error: {}", e),
    }
}
