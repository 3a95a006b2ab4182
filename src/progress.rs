//! Progress display module
//!
//! Console helpers, the reader progress bar and the end-of-run summary.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════╗
║                                                          ║
║   WORDBUCKET                                             ║
║   Word frequencies, split by letter                      ║
║                                                 v1.0.0   ║
╚══════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled progress bar
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Figures collected over one run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files_read: usize,
    pub bytes_read: u64,
    pub total_words: u64,
    pub unique_words: usize,
    pub excluded_words: u64,
    pub letter_files: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Print final statistics
    pub fn print(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    PROCESSING COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Files read:     ".green(), self.files_read);
        println!("  {} {}", "Data read:      ".green(), ByteSize(self.bytes_read));
        println!();

        println!("  {} {}", "Total words:    ".green(), format_number(self.total_words));
        println!("  {} {}", "Unique words:   ".green(), format_number(self.unique_words as u64));
        println!("  {} {}", "Excluded words: ".yellow(), format_number(self.excluded_words));
        println!(
            "  {} {}",
            "Letter files:   ".green().bold(),
            self.letter_files.to_string().green().bold()
        );

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed));
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }
}
