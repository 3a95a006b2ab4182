//! Output management module
//!
//! Buffered line writer shared by the excluded-words report and the alphabet
//! files. Every I/O failure is reported against the path being written.

use crate::error::{PipelineError, Result};
use crate::timing::Stage;

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for file writing (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Output file writer with buffering
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    stage: Stage,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) the file at `path`
    pub fn create(path: PathBuf, stage: Stage) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| PipelineError::write(stage.clone(), &path, e))?;

        Ok(Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file),
            path,
            stage,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)
            .map_err(|e| PipelineError::write(self.stage.clone(), &self.path, e))?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    /// Write one `<word> <count>` line
    pub fn write_count(&mut self, word: &str, count: u64) -> Result<()> {
        self.write_line(&format!("{} {}", word, count))
    }

    /// Flush to disk and close, surfacing any buffered write error
    pub fn finish(mut self) -> Result<WrittenFile> {
        self.writer
            .flush()
            .map_err(|e| PipelineError::write(self.stage.clone(), &self.path, e))?;

        Ok(WrittenFile {
            path: self.path,
            lines: self.lines_written,
            bytes: self.bytes_written,
        })
    }
}

/// A file that was completely written and flushed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub lines: u64,
    pub bytes: u64,
}

/// Remove a file left by an earlier run; `Ok(false)` if there was none
pub fn remove_stale(path: &Path, stage: Stage) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PipelineError::write(stage, path, e)),
    }
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path, stage: Stage) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| PipelineError::write(stage, path, e))?;
    }
    Ok(())
}
