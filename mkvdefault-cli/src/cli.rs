// mkvdefault-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use mkvdefault_core::DefaultPolicy;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "mkvdefault: Set the default audio/subtitle tracks of Matroska files",
    long_about = "Flags the desired audio and subtitle languages as the playback default \
                  in Matroska files, in place, using mkvmerge and mkvpropedit."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level for diagnostics on stderr
    #[arg(
        short = 'v',
        long,
        global = true,
        value_enum,
        default_value_t = Verbosity::Error
    )]
    pub verbosity: Verbosity,

    /// Also write log output (without colors) to this file
    #[arg(long, global = true, value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sets the default audio and/or subtitle track of one file or a library
    Apply(ApplyArgs),
    /// Prints the accepted language codes
    Languages,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Off => LevelFilter::Off,
            Verbosity::Error => LevelFilter::Error,
            Verbosity::Warn => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
        }
    }
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["file", "library"])))]
pub struct ApplyArgs {
    /// A single media file to update
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// A directory of media files to update
    #[arg(short = 'l', long, value_name = "DIR")]
    pub library: Option<PathBuf>,

    /// Desired default audio language code (cannot be "off")
    #[arg(short = 'a', long, value_name = "CODE")]
    pub audio: Option<String>,

    /// Desired default subtitle language code, or "off" for no default subtitle
    #[arg(short = 's', long, value_name = "CODE")]
    pub subtitle: Option<String>,

    /// strict: change a file only if every requested track exists;
    /// lazy: change whatever requested tracks exist
    #[arg(
        short = 'm',
        long = "default-method",
        value_name = "METHOD",
        default_value = "strict",
        value_parser = parse_policy
    )]
    pub policy: DefaultPolicy,

    /// Directory levels below the library to search (library only)
    #[arg(short = 'd', long, value_name = "DEPTH", requires = "library")]
    pub depth: Option<usize>,

    /// Comma separated media file extensions to search for
    #[arg(
        short = 'e',
        long = "file-extensions",
        value_name = "EXTS",
        value_delimiter = ',',
        default_value = ".mkv"
    )]
    pub file_extensions: Vec<String>,

    /// Number of files processed concurrently (library only)
    #[arg(short = 'j', long, value_name = "JOBS", requires = "library")]
    pub jobs: Option<usize>,

    /// Only process files whose name matches this regex from its start (library only)
    #[arg(short = 'r', long, value_name = "REGEX", requires = "library")]
    pub regex_filter: Option<String>,

    /// Report what would change without modifying any file
    #[arg(long)]
    pub dry_run: bool,

    /// Record files mkvmerge cannot read as failed instead of stopping
    #[arg(long)]
    pub continue_on_error: bool,

    /// Location of the mkvmerge binary
    #[arg(
        long,
        value_name = "PATH",
        env = "MKVDEFAULT_MKVMERGE",
        default_value = "mkvmerge"
    )]
    pub mkvmerge: PathBuf,

    /// Location of the mkvpropedit binary
    #[arg(
        long,
        value_name = "PATH",
        env = "MKVDEFAULT_MKVPROPEDIT",
        default_value = "mkvpropedit"
    )]
    pub mkvpropedit: PathBuf,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ApplyArgs {
    /// The file or library being processed.
    pub fn input(&self) -> Option<&PathBuf> {
        self.file.as_ref().or(self.library.as_ref())
    }
}

fn parse_policy(value: &str) -> Result<DefaultPolicy, String> {
    value.parse::<DefaultPolicy>().map_err(|e| e.to_string())
}
