//! Output formatting and progress bars for CLI

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::SeriesResult;

/// Create a progress bar for training episodes
pub fn create_training_progress(total_episodes: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_episodes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
            .context("invalid progress bar template")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn count_with_rate(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

/// Print the outcome counts of a match series
pub fn print_series_result(result: &SeriesResult) {
    print_kv("Games", &format_number(result.games));
    print_kv(
        &format!("X wins [{}]", result.x_agent),
        &count_with_rate(result.x_wins, result.x_win_rate),
    );
    print_kv(
        &format!("O wins [{}]", result.o_agent),
        &count_with_rate(result.o_wins, result.o_win_rate),
    );
    print_kv("Draws", &count_with_rate(result.draws, result.draw_rate));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn rates_as_percentages() {
        assert_eq!(count_with_rate(1500, 0.375), "1,500 (37.5%)");
    }
}
