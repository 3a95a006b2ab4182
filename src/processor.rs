//! Core processing engine
//!
//! Discovers the input files, then runs Reader -> Counter -> Exclusion ->
//! Partitioner. Input problems are reported as configuration errors before
//! any stage starts.

use crate::cli::Args;
use crate::counter::{count_words, WordFrequencyTable};
use crate::error::{PipelineError, Result};
use crate::exclusion::{load_exclusion_list, save_excluded_report};
use crate::output::ensure_output_dir;
use crate::partition::write_alphabet_files;
use crate::progress::{print_bullet, print_header, print_info, print_success, RunSummary};
use crate::reader::{ParallelReader, ReaderOptions};
use crate::timing::{time_stage, Stage, StageTiming};

use bytesize::ByteSize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub output_dir: PathBuf,
    pub exclude_file: PathBuf,
    pub excluded_report: PathBuf,
    pub recursive: bool,
    /// Lowercase extensions to read; empty reads every file
    pub extensions: Vec<String>,
    pub max_threads: Option<usize>,
    pub quiet: bool,
    pub show_progress: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        args.validate()?;

        Ok(Self {
            output_dir: args.output.clone(),
            exclude_file: args.exclude.clone(),
            excluded_report: args.get_excluded_report(),
            recursive: args.recursive,
            extensions: args.get_extensions(),
            max_threads: args.threads,
            quiet: args.quiet,
            show_progress: !args.quiet && !args.no_progress,
        })
    }

    /// Configuration writing everything under `output_dir`, silent
    pub fn new(output_dir: impl Into<PathBuf>, exclude_file: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            excluded_report: output_dir.join(crate::cli::DEFAULT_REPORT_NAME),
            output_dir,
            exclude_file: exclude_file.into(),
            recursive: false,
            extensions: Vec::new(),
            max_threads: None,
            quiet: true,
            show_progress: false,
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline over `input`
    pub fn process(&self, input: &Path) -> Result<RunSummary> {
        let start = Instant::now();

        if !self.config.quiet {
            print_header("Scanning input...");
        }

        let files = self.collect_files(input)?;

        if !self.config.quiet {
            print_info(&format!("Found {} files", files.len()));
            print_header("Counting words...");
        }

        let reader = ParallelReader::new(ReaderOptions {
            max_threads: self.config.max_threads,
            show_progress: self.config.show_progress,
        });
        let read = reader.read_all(&files)?;

        let table = time_stage(Stage::CountingWords, || count_words(&read.words));
        log::info!("Counted {} words, {} unique", read.words.len(), table.len());

        let exclusions = load_exclusion_list(&self.config.exclude_file)?;

        if let Some(parent) = self.config.excluded_report.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_output_dir(parent, Stage::SavingExcludedWords)?;
            }
        }
        let report = save_excluded_report(&table, &exclusions, &self.config.excluded_report)?;

        ensure_output_dir(&self.config.output_dir, Stage::WritingAlphabetFiles)?;
        let written = write_alphabet_files(&table, &self.config.output_dir)?;

        let elapsed = start.elapsed();
        StageTiming::new(Stage::Total, elapsed).log();

        let summary = RunSummary {
            files_read: read.files_read,
            bytes_read: read.bytes_read,
            total_words: table.total(),
            unique_words: table.len(),
            excluded_words: report.total,
            letter_files: written.len(),
            elapsed,
        };

        if !self.config.quiet {
            self.print_outputs(&table, &written);
            summary.print();
        }

        Ok(summary)
    }

    /// Collect the regular files of `input`, sorted by path.
    ///
    /// The sort fixes submission order, which fixes the merged word order.
    pub fn collect_files(&self, input: &Path) -> Result<Vec<PathBuf>> {
        if !input.exists() {
            return Err(PipelineError::config(
                format!("Input path does not exist: {}", input.display()),
                Some(input),
            ));
        }
        if !input.is_dir() {
            return Err(PipelineError::config(
                format!("Provided path: {} is not a directory.", input.display()),
                Some(input),
            ));
        }

        let walker = if self.config.recursive {
            WalkDir::new(input).min_depth(1)
        } else {
            WalkDir::new(input).min_depth(1).max_depth(1)
        };

        let mut files = Vec::new();
        for entry in walker.sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(input).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
                PipelineError::read(Stage::ReadingFiles, &path, source)
            })?;

            if entry.file_type().is_file() && self.config.accepts(entry.path()) {
                files.push(entry.into_path());
            }
        }

        if files.is_empty() {
            return Err(PipelineError::config(
                format!("No files found in the directory {}.", input.display()),
                Some(input),
            ));
        }

        log::info!("Number of files: {}", files.len());
        Ok(files)
    }

    fn print_outputs(&self, table: &WordFrequencyTable, written: &[crate::output::WrittenFile]) {
        print_success(&format!(
            "Excluded-words report: {}",
            self.config.excluded_report.display()
        ));
        print_success(&format!("Letter files in {}:", self.config.output_dir.display()));
        for file in written {
            let name = file
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            print_bullet(&format!("{} ({} words, {})", name, file.lines, ByteSize(file.bytes)));
        }
        print_info(&format!("Unique words: {}", table.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        input: PathBuf,
        output: PathBuf,
        exclude: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input");
        let output = dir.path().join("output");
        let exclude = dir.path().join("exclude.txt");

        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("test_file_1.txt"), "Etiam sit amet, neque non purus.\n").unwrap();
        std::fs::write(input.join("test_file_2.txt"), "Integer sit etiam.\n").unwrap();
        std::fs::write(&exclude, "amet\npurus\nneque\n").unwrap();

        Fixture {
            _dir: dir,
            input,
            output,
            exclude,
        }
    }

    fn snapshot(dir: &Path) -> BTreeMap<String, String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .map(|p| {
                let name = p.file_name().unwrap().to_string_lossy().into_owned();
                (name, std::fs::read_to_string(&p).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_full_pipeline() {
        let fx = fixture();
        let processor = Processor::new(ProcessorConfig::new(&fx.output, &fx.exclude));

        let summary = processor.process(&fx.input).unwrap();

        assert_eq!(summary.files_read, 2);
        assert_eq!(summary.total_words, 9);
        assert_eq!(summary.unique_words, 7);
        assert_eq!(summary.excluded_words, 3);

        let report = std::fs::read_to_string(fx.output.join("excluded_result.txt")).unwrap();
        assert_eq!(report, "Excluded word count: 3\namet 1\nneque 1\npurus 1\n");

        let files = snapshot(&fx.output);
        assert_eq!(files["FILE_E.txt"], "etiam 2\n");
        assert_eq!(files["FILE_S.txt"], "sit 2\n");
        assert_eq!(files["FILE_N.txt"], "neque 1\nnon 1\n");
        assert!(!files.contains_key("FILE_B.txt"));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let fx = fixture();
        let processor = Processor::new(ProcessorConfig::new(&fx.output, &fx.exclude));

        processor.process(&fx.input).unwrap();
        let first = snapshot(&fx.output);
        processor.process(&fx.input).unwrap();
        let second = snapshot(&fx.output);

        assert_eq!(first, second);
    }

    #[test]
    fn test_rerun_with_fewer_words_drops_letter_files() {
        let fx = fixture();
        let processor = Processor::new(ProcessorConfig::new(&fx.output, &fx.exclude));

        processor.process(&fx.input).unwrap();
        assert!(fx.output.join("FILE_I.txt").exists());

        std::fs::remove_file(fx.input.join("test_file_2.txt")).unwrap();
        let summary = processor.process(&fx.input).unwrap();

        let files = snapshot(&fx.output);
        assert!(!files.contains_key("FILE_I.txt"));
        assert_eq!(files["FILE_E.txt"], "etiam 1\n");
        assert_eq!(files.len(), summary.letter_files + 1);
    }

    #[test]
    fn test_report_write_failure_is_write_error() {
        let fx = fixture();
        let mut config = ProcessorConfig::new(&fx.output, &fx.exclude);
        config.excluded_report = fx.exclude.join("report.txt");

        let err = Processor::new(config).process(&fx.input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Write);
        assert_eq!(err.path(), Some(fx.exclude.join("report.txt").as_path()));
        assert!(!fx.output.join("FILE_E.txt").exists());
    }

    #[test]
    fn test_zero_threads_is_config_error() {
        use clap::Parser;

        let args = Args::try_parse_from(["wordbucket", "input", "--threads", "0"]).unwrap();
        let err = ProcessorConfig::from_args(&args).unwrap_err();

        let err = err.downcast_ref::<PipelineError>().unwrap();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_empty_directory_is_config_error() {
        let fx = fixture();
        let empty = fx.input.join("empty");
        std::fs::create_dir(&empty).unwrap();

        let processor = Processor::new(ProcessorConfig::new(&fx.output, &fx.exclude));
        let err = processor.process(&empty).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("No files found in the directory"));
        assert!(!fx.output.exists());
    }

    #[test]
    fn test_missing_and_non_directory_input() {
        let fx = fixture();
        let processor = Processor::new(ProcessorConfig::new(&fx.output, &fx.exclude));

        let missing = processor.process(&fx.input.join("nonexistent_directory")).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::Config);

        let not_dir = processor.process(&fx.exclude).unwrap_err();
        assert_eq!(not_dir.kind(), ErrorKind::Config);
        assert!(not_dir.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_missing_exclusion_file_fails_run() {
        let fx = fixture();
        let processor = Processor::new(ProcessorConfig::new(&fx.output, fx.input.join("nope.txt")));

        let err = processor.process(&fx.input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Read);
        assert!(!fx.output.join("FILE_E.txt").exists());
    }

    #[test]
    fn test_collect_files_sorted_and_filtered() {
        let fx = fixture();
        std::fs::write(fx.input.join("notes.md"), "markdown words").unwrap();
        let nested = fx.input.join("sub");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("deep.txt"), "deep").unwrap();

        let mut config = ProcessorConfig::new(&fx.output, &fx.exclude);
        let flat = Processor::new(config.clone()).collect_files(&fx.input).unwrap();
        assert_eq!(flat.len(), 3);
        assert!(flat.windows(2).all(|w| w[0] < w[1]));

        config.recursive = true;
        config.extensions = vec!["txt".to_string()];
        let deep = Processor::new(config).collect_files(&fx.input).unwrap();
        let names: Vec<_> = deep
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["deep.txt", "test_file_1.txt", "test_file_2.txt"]);
    }
}
