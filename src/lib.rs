//! # Wordbucket
//!
//! Counts word frequencies across a directory of text files and splits the
//! result into one file per starting letter.
//!
//! ## Pipeline
//!
//! 1. **Read**: every file is read and tokenized on a bounded thread pool;
//!    per-file word lists are merged in submission order.
//! 2. **Count**: the merged list is reduced to a [`WordFrequencyTable`].
//! 3. **Exclude**: words from the exclusion list are summed into the
//!    excluded-words report.
//! 4. **Partition**: the table is written to `FILE_A.txt` .. `FILE_Z.txt`,
//!    skipping letters without words.
//!
//! Any failure aborts the run with a [`PipelineError`] naming the stage, the
//! path and the cause.
//!
//! ## Usage
//!
//! ```bash
//! # Count the words in ./input, write results to ./output
//! wordbucket input
//!
//! # Custom exclusion list and output directory
//! wordbucket input -e stopwords.txt -o results
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordbucket::processor::{Processor, ProcessorConfig};
//! use std::path::Path;
//!
//! let config = ProcessorConfig::new("./output", "./exclude.txt");
//! let processor = Processor::new(config);
//! let summary = processor.process(Path::new("./input")).unwrap();
//! println!("{} unique words", summary.unique_words);
//! ```

pub mod cli;
pub mod counter;
pub mod error;
pub mod exclusion;
pub mod output;
pub mod partition;
pub mod processor;
pub mod progress;
pub mod reader;
pub mod timing;
pub mod tokenize;

pub use cli::Args;
pub use counter::{count_words, WordFrequencyTable};
pub use error::{ErrorKind, PipelineError, Result};
pub use exclusion::{compute_excluded_report, load_exclusion_list, ExcludedReport, ExclusionSet};
pub use partition::{partition, write_alphabet_files, AlphabetBuckets};
pub use processor::{Processor, ProcessorConfig};
pub use reader::{ParallelReader, ReaderOptions};
