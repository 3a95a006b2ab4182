//! Command-line interface definition for wordbucket

use clap::Parser;
use std::path::PathBuf;

use crate::error::{PipelineError, Result};

/// Default name of the excluded-words report inside the output directory
pub const DEFAULT_REPORT_NAME: &str = "excluded_result.txt";

/// Count word frequencies across a directory of text files
///
/// Writes one FILE_<LETTER>.txt per starting letter and a report of the
/// words found in the exclusion list.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordbucket",
    version,
    about = "Count word frequencies and split them into per-letter files",
    long_about = r#"
Reads every file in INPUT_DIR in parallel, counts how often each word occurs
and writes the counts to FILE_A.txt .. FILE_Z.txt in the output directory.
Letters without any words get no file.

Words are split on whitespace, stripped of . , ! ? ; : " ' ( ) [ ] { }
and lowercased.

Words listed in the exclusion file (one per line) are summed into a separate
report whose first line is "Excluded word count: <total>".

EXAMPLES:
    # Count the words in ./input, write results to ./output
    wordbucket input

    # Custom exclusion list and output directory
    wordbucket input -e stopwords.txt -o results

    # Only .txt files, including subdirectories, on at most 4 threads
    wordbucket input --extensions txt --recursive -t 4
"#
)]
pub struct Args {
    /// Directory containing the files to count
    #[arg(value_name = "INPUT_DIR")]
    pub input: PathBuf,

    /// Directory for the per-letter files
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output: PathBuf,

    /// Exclusion list, one word per line
    #[arg(short, long, value_name = "FILE", default_value = "exclude.txt")]
    pub exclude: PathBuf,

    /// Excluded-words report path (default: <OUTPUT>/excluded_result.txt)
    #[arg(long, value_name = "FILE")]
    pub excluded_report: Option<PathBuf>,

    /// Process directories recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Only read files with these extensions, comma separated (default: all files)
    #[arg(long, value_name = "EXT", default_value = "")]
    pub extensions: String,

    /// Maximum number of reader threads (default: auto-detect)
    #[arg(short = 't', long, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl Args {
    /// Report path, defaulting to the output directory
    pub fn get_excluded_report(&self) -> PathBuf {
        self.excluded_report
            .clone()
            .unwrap_or_else(|| self.output.join(DEFAULT_REPORT_NAME))
    }

    /// Parse file extensions to process; empty means every file
    pub fn get_extensions(&self) -> Vec<String> {
        self.extensions
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Default log filter for env_logger
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Validate option values that clap cannot check
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(PipelineError::config("--threads must be at least 1", None));
        }
        Ok(())
    }
}
