//! Exclusion list handling
//!
//! Loads the denylist, intersects it with the frequency table and writes the
//! excluded-words report:
//!
//! ```text
//! Excluded word count: <total>
//! <word> <count>
//! ...
//! ```
//!
//! Report lines follow the set's lexicographic order.

use crate::counter::WordFrequencyTable;
use crate::error::{PipelineError, Result};
use crate::output::{OutputWriter, WrittenFile};
use crate::reader::LineIterator;
use crate::timing::{time_stage, Stage};

use std::collections::BTreeSet;
use std::path::Path;

/// Header prefix of the report's first line
pub const REPORT_HEADER: &str = "Excluded word count:";

/// Lowercased words to report separately. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    words: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }
}

/// Excluded words found in the table and their combined count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedReport {
    pub total: u64,
    pub entries: Vec<(String, u64)>,
}

impl ExcludedReport {
    pub fn header(&self) -> String {
        format!("{} {}", REPORT_HEADER, self.total)
    }

    /// Full report text, one line per entry after the header
    pub fn render(&self) -> String {
        let mut out = self.header();
        out.push('\n');
        for (word, count) in &self.entries {
            out.push_str(&format!("{} {}\n", word, count));
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<WrittenFile> {
        let mut writer = OutputWriter::create(path.to_path_buf(), Stage::SavingExcludedWords)?;
        writer.write_line(&self.header())?;
        for (word, count) in &self.entries {
            writer.write_count(word, *count)?;
        }
        writer.finish()
    }
}

/// Load the exclusion list, one word per line, lowercased
pub fn load_exclusion_list(path: &Path) -> Result<ExclusionSet> {
    time_stage(Stage::LoadingExclusionList, || -> Result<ExclusionSet> {
        let to_error = |e: std::io::Error| PipelineError::read(Stage::LoadingExclusionList, path, e);

        let lines = LineIterator::open(path)
            .map_err(to_error)?
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(to_error)?;

        let set: ExclusionSet = lines.into_iter().collect();
        if set.is_empty() {
            log::warn!("Exclusion list {} is empty", path.display());
        }
        log::debug!("Loaded {} excluded words from {}", set.len(), path.display());
        Ok(set)
    })
}

/// Intersect the exclusion set with the table
pub fn compute_excluded_report(table: &WordFrequencyTable, exclusions: &ExclusionSet) -> ExcludedReport {
    let mut report = ExcludedReport::default();

    for word in exclusions.iter() {
        if let Some(count) = table.get(word) {
            report.total += count;
            report.entries.push((word.to_string(), count));
        }
    }

    report
}

/// Compute the report and write it to `path`
pub fn save_excluded_report(
    table: &WordFrequencyTable,
    exclusions: &ExclusionSet,
    path: &Path,
) -> Result<ExcludedReport> {
    time_stage(Stage::SavingExcludedWords, || -> Result<ExcludedReport> {
        let report = compute_excluded_report(table, exclusions);
        report.write_to(path)?;
        log::info!(
            "Excluded {} occurrences of {} words, report saved to {}",
            report.total,
            report.entries.len(),
            path.display()
        );
        Ok(report)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::count_words;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn sample_table() -> WordFrequencyTable {
        count_words(&["amet", "etiam", "purus", "nequ"])
    }

    fn sample_set() -> ExclusionSet {
        ["amet", "purus", "neque"].into_iter().collect()
    }

    #[test]
    fn test_load_exclusion_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "amet").unwrap();
        writeln!(file, "Purus").unwrap();
        writeln!(file, "NEQUE").unwrap();
        writeln!(file, "amet").unwrap();

        let set = load_exclusion_list(file.path()).unwrap();
        assert_eq!(set, sample_set());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("someFilePath");

        let err = load_exclusion_list(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Read);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_load_empty_exclusion_list() {
        let file = NamedTempFile::new().unwrap();

        let set = load_exclusion_list(file.path()).unwrap();
        assert!(set.is_empty());
        assert_eq!(compute_excluded_report(&sample_table(), &set).total, 0);
    }

    #[test]
    fn test_compute_excluded_report() {
        let report = compute_excluded_report(&sample_table(), &sample_set());

        assert_eq!(report.total, 2);
        assert_eq!(
            report.entries,
            vec![("amet".to_string(), 1), ("purus".to_string(), 1)]
        );
    }

    #[test]
    fn test_report_sums_counts() {
        let table = count_words(&["the", "the", "a", "the", "cat"]);
        let set: ExclusionSet = ["the", "a"].into_iter().collect();

        let report = compute_excluded_report(&table, &set);
        assert_eq!(report.total, 4);
    }

    #[test]
    fn test_save_excluded_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("excluded_result.txt");

        save_excluded_report(&sample_table(), &sample_set(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["Excluded word count: 2", "amet 1", "purus 1"]);
    }

    #[test]
    fn test_render_matches_written_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        let report = compute_excluded_report(&sample_table(), &sample_set());

        report.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), report.render());
    }

    #[test]
    fn test_no_matches() {
        let set: ExclusionSet = ["zzz"].into_iter().collect();
        let report = compute_excluded_report(&sample_table(), &set);

        assert_eq!(report.render(), "Excluded word count: 0\n");
    }
}
