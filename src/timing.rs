//! Stage timing records
//!
//! Every pipeline stage produces a [`StageTiming`] when it finishes and hands it
//! to the logger explicitly. There is no ambient logging context.

use std::fmt;
use std::time::{Duration, Instant};

/// Log target used for all timing records
pub const TIMING_TARGET: &str = "wordbucket::timing";

/// Labelled pipeline stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    ReadingFiles,
    ReadingFile(String),
    CountingWords,
    LoadingExclusionList,
    SavingExcludedWords,
    WritingAlphabetFiles,
    Total,
}

impl Stage {
    pub fn label(&self) -> String {
        match self {
            Self::ReadingFiles => "Reading data from multiple files".to_string(),
            Self::ReadingFile(name) => format!("Reading {}", name),
            Self::CountingWords => "Counting words from all files".to_string(),
            Self::LoadingExclusionList => "Loading the exclusion list".to_string(),
            Self::SavingExcludedWords => "Saving the number of excluded words".to_string(),
            Self::WritingAlphabetFiles => {
                "Creating and writing files for each letter in the alphabet".to_string()
            }
            Self::Total => "Total time".to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Wall-clock duration of one finished stage
#[derive(Debug, Clone)]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed: Duration,
}

impl StageTiming {
    pub fn new(stage: Stage, elapsed: Duration) -> Self {
        Self { stage, elapsed }
    }

    /// Measure from `start` until now
    pub fn since(stage: Stage, start: Instant) -> Self {
        Self::new(stage, start.elapsed())
    }

    /// Duration rendered in milliseconds
    pub fn millis(&self) -> String {
        format_millis(self.elapsed)
    }

    /// Emit this record at info level on [`TIMING_TARGET`]
    pub fn log(&self) {
        log::info!(target: TIMING_TARGET, "{}", self);
    }
}

impl fmt::Display for StageTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Duration time: {} ms", self.stage, self.millis())
    }
}

/// Run `f`, then log how long it took under `stage`.
///
/// The record is logged whether `f` succeeds or fails.
pub fn time_stage<T, F>(stage: Stage, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    StageTiming::since(stage, start).log();
    result
}

/// Format a duration as milliseconds.
///
/// Durations of one millisecond or more are whole milliseconds; shorter ones
/// keep microsecond precision (`0.042`).
pub fn format_millis(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis >= 1 {
        millis.to_string()
    } else {
        format!("0.{:03}", duration.as_micros())
    }
}
