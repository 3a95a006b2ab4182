//! Alphabet partitioner
//!
//! Splits the frequency table into 26 buckets by first letter and writes each
//! non-empty bucket to `FILE_<LETTER>.txt`. Letters with no words get no file,
//! so a missing file means the letter had no matches. Words that do not start
//! with `a`..=`z` are never bucketed.

use crate::counter::WordFrequencyTable;
use crate::error::Result;
use crate::output::{remove_stale, OutputWriter, WrittenFile};
use crate::timing::{time_stage, Stage};

use std::path::{Path, PathBuf};

/// Number of buckets, one per ASCII lowercase letter
pub const ALPHABET_SIZE: usize = 26;

/// File name for the bucket of `letter`, e.g. `FILE_A.txt`
pub fn bucket_file_name(letter: char) -> String {
    format!("FILE_{}.txt", letter.to_ascii_uppercase())
}

/// Bucket index for a word, if it starts with a lowercase ASCII letter
#[inline]
pub fn bucket_index(word: &str) -> Option<usize> {
    match word.as_bytes().first() {
        Some(&b) if b.is_ascii_lowercase() => Some((b - b'a') as usize),
        _ => None,
    }
}

/// Table entries grouped by first letter, each bucket sorted by word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetBuckets<'a> {
    buckets: Vec<Vec<(&'a str, u64)>>,
}

impl<'a> AlphabetBuckets<'a> {
    /// Entries for `letter` (`a`..=`z`); empty for anything else
    pub fn get(&self, letter: char) -> &[(&'a str, u64)] {
        if letter.is_ascii_lowercase() {
            &self.buckets[(letter as u8 - b'a') as usize]
        } else {
            &[]
        }
    }

    /// Total number of bucketed entries
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Group table entries by first letter
pub fn partition(table: &WordFrequencyTable) -> AlphabetBuckets<'_> {
    let mut buckets: Vec<Vec<(&str, u64)>> = vec![Vec::new(); ALPHABET_SIZE];

    for (word, count) in table.sorted() {
        if let Some(idx) = bucket_index(word) {
            buckets[idx].push((word, count));
        }
    }

    AlphabetBuckets { buckets }
}

/// Write one file per non-empty bucket into `output_dir`.
///
/// Files for letters without words are removed if an earlier run left them,
/// so a file exists exactly when its letter has words. Stops at the first
/// failure; files written for earlier letters are kept.
pub fn write_alphabet_files(table: &WordFrequencyTable, output_dir: &Path) -> Result<Vec<WrittenFile>> {
    time_stage(Stage::WritingAlphabetFiles, || -> Result<Vec<WrittenFile>> {
        let buckets = partition(table);
        log::debug!("Partitioned {} words by first letter", buckets.len());
        let mut written = Vec::new();

        for letter in 'a'..='z' {
            let path: PathBuf = output_dir.join(bucket_file_name(letter));
            let entries = buckets.get(letter);

            if entries.is_empty() {
                if remove_stale(&path, Stage::WritingAlphabetFiles)? {
                    log::debug!("Removed stale {}", path.display());
                }
                continue;
            }

            let mut writer = OutputWriter::create(path, Stage::WritingAlphabetFiles)?;
            for &(word, count) in entries {
                writer.write_count(word, count)?;
            }

            let file = writer.finish()?;
            log::debug!("Wrote {} words to {}", file.lines, file.path.display());
            written.push(file);
        }

        log::info!(
            "Wrote {} letter files to {}",
            written.len(),
            output_dir.display()
        );
        Ok(written)
    })
}
