//! Parallel file reader
//!
//! Reads every input file on a bounded rayon pool, tokenizes it into a private
//! word list and merges the lists in submission order once all reads finish.

use crate::error::{PipelineError, Result};
use crate::progress::create_progress_bar;
use crate::timing::{Stage, StageTiming};
use crate::tokenize::tokenize_line_into;

use bytesize::ByteSize;
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Read buffer size per file (64KB)
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Line iterator that tolerates invalid UTF-8 and `\r\n` line endings
pub struct LineIterator<R> {
    reader: R,
    line_buffer: Vec<u8>,
}

impl LineIterator<BufReader<File>> {
    /// Open a file for line-by-line reading
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buffer: Vec::with_capacity(4096),
        }
    }
}

impl<R: BufRead> Iterator for LineIterator<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line_buffer.clear();

        match self.reader.read_until(b'\n', &mut self.line_buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.line_buffer.last() == Some(&b'\n') {
                    self.line_buffer.pop();
                    if self.line_buffer.last() == Some(&b'\r') {
                        self.line_buffer.pop();
                    }
                }

                Some(Ok(String::from_utf8_lossy(&self.line_buffer).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Words read from one input file
#[derive(Debug, Clone)]
pub struct FileWords {
    pub path: PathBuf,
    pub bytes: u64,
    pub words: Vec<String>,
}

/// Merged output of the reader stage
#[derive(Debug, Default)]
pub struct ReadOutput {
    /// All words, in file-submission order
    pub words: Vec<String>,
    pub files_read: usize,
    pub bytes_read: u64,
}

/// Read and tokenize a single file
pub fn read_words_from_file(path: &Path) -> Result<FileWords> {
    let to_error = |e: io::Error| PipelineError::read(Stage::ReadingFiles, path, e);

    let bytes = std::fs::metadata(path).map_err(to_error)?.len();
    let mut words = Vec::new();

    for line in LineIterator::open(path).map_err(to_error)? {
        tokenize_line_into(&line.map_err(to_error)?, &mut words);
    }

    Ok(FileWords {
        path: path.to_path_buf(),
        bytes,
        words,
    })
}

/// Per-file read with its own timing record
fn read_file_logged(path: &Path) -> Result<FileWords> {
    let start = Instant::now();
    let result = read_words_from_file(path)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let thread = std::thread::current()
        .name()
        .unwrap_or("unnamed")
        .to_string();

    log::info!(
        "File {} is read: {} words ({}) on {}",
        name,
        result.words.len(),
        ByteSize(result.bytes),
        thread
    );
    StageTiming::since(Stage::ReadingFile(name), start).log();

    Ok(result)
}

/// Pool size: min(available parallelism, file count), never zero
pub fn pool_size(file_count: usize, max_threads: Option<usize>) -> usize {
    let available = max_threads.unwrap_or_else(num_cpus::get).max(1);
    available.min(file_count).max(1)
}

/// Concatenate per-file results in the given order
fn merge(results: Vec<Result<FileWords>>) -> Result<ReadOutput> {
    let mut output = ReadOutput::default();

    for result in results {
        let file = result?;
        output.files_read += 1;
        output.bytes_read += file.bytes;
        output.words.extend(file.words);
    }

    Ok(output)
}

/// Reader stage options
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Upper bound on worker threads (default: number of CPUs)
    pub max_threads: Option<usize>,
    pub show_progress: bool,
}

/// Bounded parallel reader
pub struct ParallelReader {
    options: ReaderOptions,
}

impl ParallelReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Read all files concurrently.
    ///
    /// Waits for every read to finish. If any failed, the error of the first
    /// failing file in submission order is returned and no words are.
    pub fn read_all(&self, files: &[PathBuf]) -> Result<ReadOutput> {
        let start = Instant::now();
        let threads = pool_size(files.len(), self.options.max_threads);

        log::debug!("Reading {} files on {} threads", files.len(), threads);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("reader-{}", i))
            .build()?;

        let pb = if self.options.show_progress {
            create_progress_bar(files.len() as u64, "Reading files...")
        } else {
            ProgressBar::hidden()
        };

        let results: Vec<Result<FileWords>> = pool.install(|| {
            files
                .par_iter()
                .progress_with(pb.clone())
                .map(|path| read_file_logged(path))
                .collect()
        });

        pb.finish_and_clear();

        let output = merge(results)?;
        StageTiming::since(Stage::ReadingFiles, start).log();

        Ok(output)
    }
}

/// Single-threaded reader, same result as [`ParallelReader::read_all`]
pub fn read_all_sequential(files: &[PathBuf]) -> Result<ReadOutput> {
    merge(files.iter().map(|p| read_words_from_file(p)).collect())
}
