//! Progress reporting and summaries for CLI

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tabclean_core::FilterReport;

/// Progress reporter over a dataset reader
pub struct ProgressReporter {
    bar: ProgressBar,
    mode: ProgressMode,
}

/// Progress tracking mode
enum ProgressMode {
    /// Track progress by bytes consumed (file size known)
    Bytes,
    /// Count records only (compressed input)
    Records,
}

impl ProgressReporter {
    /// Byte-based bar if the input size is known, record spinner otherwise
    pub fn new(total_bytes: Option<u64>) -> Self {
        match total_bytes {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▓▒░-"),
                );
                Self {
                    bar,
                    mode: ProgressMode::Bytes,
                }
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template("[{elapsed_precise}] {spinner} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                Self {
                    bar,
                    mode: ProgressMode::Records,
                }
            }
        }
    }

    /// Update with the reader's current position
    pub fn update(&self, bytes: u64, records: usize) {
        match self.mode {
            ProgressMode::Bytes => self.bar.set_position(bytes),
            ProgressMode::Records => self.bar.tick(),
        }
        self.bar
            .set_message(format!("{} records", format_number(records)));
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        self.bar.finish_with_message("Complete!");
    }
}

/// Format large numbers compactly
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Print a formatted summary of the Chinese-text filter
pub fn print_filter_summary(report: &FilterReport) {
    print_summary_report(
        &report.input,
        report.output.as_deref(),
        report.original_records,
        report.filtered_records,
    );

    let hits: Vec<_> = report
        .stats
        .column_hits
        .iter()
        .filter(|(_, count)| *count > 0)
        .collect();
    if !hits.is_empty() {
        println!("Chinese text by column:");
        for (column, count) in hits {
            println!("  {:<18}{}", column, format_with_commas(*count));
        }
        println!("{}", "═".repeat(60));
    }
}

/// Print a formatted summary report
pub fn print_summary_report(input: &Path, output: Option<&Path>, total: usize, kept: usize) {
    let removed = total - kept;

    println!("\n{}", "═".repeat(60));
    println!("Dataset Cleaning Complete");
    println!("{}", "═".repeat(60));
    println!("Input:              {}", input.display());

    if let Some(output_path) = output {
        println!("Output:             {}", output_path.display());
    } else {
        println!("Output:             (dry run - no output written)");
    }

    println!("Total records:      {}", format_with_commas(total));

    if removed > 0 {
        println!(
            "Chinese removed:    {} ({:.1}%)",
            format_with_commas(removed),
            (removed as f64 / total as f64) * 100.0
        );
    }

    if total > 0 {
        println!(
            "Final dataset:      {} ({:.1}%)",
            format_with_commas(kept),
            (kept as f64 / total as f64) * 100.0
        );
    } else {
        println!("Final dataset:      0");
    }

    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
fn format_with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
