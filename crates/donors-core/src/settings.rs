use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use crate::error::{DonorsError, Result};

/// Default read-ahead per chunk of input lines (20 MiB).
pub const DEFAULT_BUFFER_BYTES: usize = 20 * 1024 * 1024;

// ── TruncatedPolicy ────────────────────────────────────────────────────────────

/// What to do with a line that has fewer fields than the record layout.
#[derive(ValueEnum, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TruncatedPolicy {
    /// Log a warning with the line number and continue.
    #[default]
    Skip,
    /// Abort the run with an error.
    Fail,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Running median, count and total of FEC contributions by zip code and date
#[derive(Parser, Debug, Clone)]
#[command(
    name = "find-political-donors",
    about = "Running median, count and total of FEC contributions by zip code and date",
    version
)]
pub struct Settings {
    /// Pipe-delimited individual contributions file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file for per-record statistics keyed by zip code
    #[arg(value_name = "ZIP_OUTPUT")]
    pub zip_output: PathBuf,

    /// Output file for final statistics keyed by transaction date
    #[arg(value_name = "DATE_OUTPUT")]
    pub date_output: PathBuf,

    /// Approximate number of bytes read per chunk of lines
    #[arg(long, default_value_t = DEFAULT_BUFFER_BYTES)]
    pub buffer_bytes: usize,

    /// Handling of lines with fewer than 16 fields
    #[arg(long, value_enum, default_value_t = TruncatedPolicy::Skip)]
    pub on_truncated: TruncatedPolicy,

    /// Append to the output files instead of overwriting them
    #[arg(long)]
    pub append: bool,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary_file: Option<PathBuf>,

    /// Logging level
    #[arg(
        long,
        env = "DONORS_LOG_LEVEL",
        default_value = "INFO",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"]
    )]
    pub log_level: String,

    /// Log file path (stderr when absent)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply `--debug`.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn try_load_from<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// Reject values that parse but cannot drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_bytes == 0 {
            return Err(DonorsError::Config(
                "--buffer-bytes must be greater than zero".to_string(),
            ));
        }
        if self.zip_output == self.date_output {
            return Err(DonorsError::Config(format!(
                "zip and date outputs must differ (both are {})",
                self.zip_output.display()
            )));
        }
        Ok(())
    }

    fn resolve(mut settings: Settings) -> Self {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
