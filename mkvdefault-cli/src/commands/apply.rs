//! Implementation of the 'apply' subcommand.
//!
//! Builds the run configuration, checks for the mkvtoolnix binaries,
//! discovers the media files, runs the batch and prints the summary.

use crate::cli::ApplyArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::progress::ProgressReporter;
use crate::terminal;

use mkvdefault_core::discovery::{DiscoveryOptions, find_media_files};
use mkvdefault_core::languages;
use mkvdefault_core::{
    AggregateSummary, BatchReport, CoreConfig, CoreConfigBuilder, CoreError, DesiredLanguage,
    MkvmergeInspector, MkvpropeditEditor, check_dependency, format_runtime, run_batch,
    run_single_file,
};

use log::{debug, info, warn};
use serde_json::json;

use std::path::PathBuf;
use std::time::Instant;

/// Builds and validates the core configuration from the arguments.
pub fn build_config(args: &ApplyArgs) -> CliResult<CoreConfig> {
    let mut builder = CoreConfigBuilder::new()
        .policy(args.policy)
        .dry_run(args.dry_run)
        .concurrency(args.jobs.unwrap_or(1))
        .mkvmerge_path(&args.mkvmerge)
        .mkvpropedit_path(&args.mkvpropedit)
        .continue_on_inspect_error(args.continue_on_error);

    if let Some(audio) = &args.audio {
        builder = builder.audio(audio);
    }
    if let Some(subtitle) = &args.subtitle {
        builder = builder.subtitle(subtitle);
    }

    builder.build()
}

/// Finds the files to process. No matches is not an error: the batch is empty.
pub fn discover_files(args: &ApplyArgs) -> CliResult<Vec<PathBuf>> {
    let input = args
        .input()
        .cli_context("Either --file or --library is required")?;

    if !input.exists() {
        return Err(CoreError::OperationFailed(format!(
            "Input path '{}' does not exist",
            input.display()
        )));
    }

    let options = DiscoveryOptions {
        depth: args.depth.unwrap_or(0),
        extensions: args.file_extensions.clone(),
        regex_filter: args.regex_filter.clone(),
    };

    match find_media_files(input, &options) {
        Ok(files) => Ok(files),
        Err(CoreError::NoFilesFound) => {
            warn!(
                "No media files could be found, double check pathing and/or filters: \"{}\"",
                input.display()
            );
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Status-line text for a desired language, e.g. `jpn (Japanese)`.
fn describe_language(language: &DesiredLanguage) -> String {
    if language.is_off() {
        return format!("{language} (no default subtitle)");
    }
    match languages::display_name(language.as_str()) {
        Some(name) => format!("{language} ({name})"),
        None => language.to_string(),
    }
}

/// Checks the tools the run will actually invoke.
fn check_tools(config: &CoreConfig) -> CliResult<()> {
    check_dependency(&config.mkvmerge_path)?;
    if config.dry_run {
        debug!("Dry run: skipping mkvpropedit check");
    } else {
        check_dependency(&config.mkvpropedit_path)?;
    }
    Ok(())
}

fn print_report(report: &BatchReport, problems: &[String], runtime: &str) {
    if !problems.is_empty() {
        terminal::print_section("Problems");
        for problem in problems {
            terminal::print_warning(problem);
        }
    }

    terminal::print_summary(&report.summary);
    terminal::print_runtime(runtime);
}

fn print_json(report: &BatchReport, runtime_seconds: f64) -> CliResult<()> {
    let output = json!({
        "summary": report.summary,
        "files": report.files,
        "runtime_seconds": runtime_seconds,
    });
    let text = serde_json::to_string_pretty(&output).cli_context("Failed to render JSON summary")?;
    println!("{text}");
    Ok(())
}

/// Runs the `apply` command.
pub fn run_apply(args: ApplyArgs) -> CliResult<()> {
    let start = Instant::now();

    let config = build_config(&args)?;
    check_tools(&config)?;

    let files = discover_files(&args)?;
    info!("Found {} media file(s) to process", files.len());

    if !args.json {
        terminal::print_section(if config.dry_run { "Dry run" } else { "Processing" });
        if let Some(audio) = &config.audio {
            terminal::print_status("Audio", &describe_language(audio));
        }
        if let Some(subtitle) = &config.subtitle {
            terminal::print_status("Subtitle", &describe_language(subtitle));
        }
        terminal::print_status("Method", &config.policy.to_string());
        terminal::print_status("Files", &files.len().to_string());
        terminal::print_status("Jobs", &config.concurrency.to_string());
        println!();
    }

    let inspector = MkvmergeInspector::new(&config.mkvmerge_path);
    let editor = MkvpropeditEditor::new(&config.mkvpropedit_path);
    let reporter = ProgressReporter::new(!args.json);

    let outcome = match (&args.file, files.as_slice()) {
        (Some(_), [file]) => run_single_file(&config, file, &inspector, &editor, &reporter),
        _ => run_batch(&config, &files, &inspector, &editor, &reporter),
    };
    let (report, aborted) = match outcome {
        Ok(report) => (report, None),
        Err(e) => {
            // Nothing was edited: pass B never started
            let empty = BatchReport {
                summary: AggregateSummary::new(config.dry_run),
                files: Vec::new(),
            };
            (empty, Some(e))
        }
    };
    let elapsed = start.elapsed();

    if args.json {
        print_json(&report, elapsed.as_secs_f64())?;
    } else {
        print_report(&report, &reporter.problems(), &format_runtime(elapsed));
    }

    match aborted {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mkvdefault_core::TrackType;

    #[test]
    fn languages_are_described_by_name() {
        let jpn = DesiredLanguage::parse("JPN", TrackType::Audio).unwrap();
        assert_eq!(describe_language(&jpn), "jpn (Japanese)");

        let off = DesiredLanguage::parse("off", TrackType::Subtitle).unwrap();
        assert_eq!(describe_language(&off), "off (no default subtitle)");
    }
}
