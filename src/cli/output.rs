//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::ExperimentResult;

/// Create a spinner for long searches
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
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

/// Format a count together with its share of the total
pub fn format_count(count: usize, rate: f64) -> String {
    format!("{count} ({:.1}%)", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:24} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Print the tallies of one experiment
pub fn print_result(result: &ExperimentResult) {
    print_stats_table(&[
        ("Games", format_number(result.total_games)),
        ("First won", format_count(result.first_wins, result.first_win_rate)),
        ("Second won", format_count(result.second_wins, result.second_win_rate)),
        ("Ties", format_count(result.ties, result.tie_rate)),
        ("First execution time", format!("{:.2}s", result.first_time)),
        ("Second execution time", format!("{:.2}s", result.second_time)),
    ]);
}

/// Print one line per result, aligned for a quick comparison
pub fn print_results_table(results: &[ExperimentResult]) {
    println!(
        "  {:44} {:>6} {:>6} {:>6} {:>9} {:>9}",
        "Name", "First", "Second", "Ties", "First s", "Second s"
    );
    for result in results {
        println!(
            "  {:44} {:>6} {:>6} {:>6} {:>9.2} {:>9.2}",
            result.name,
            result.first_wins,
            result.second_wins,
            result.ties,
            result.first_time,
            result.second_time
        );
    }
}
