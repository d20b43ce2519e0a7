//! Display utilities for formatting trend output.
//!
//! This module provides the terminal rendering used by the CLI: an entity
//! table, a per-entity bar chart and a summary block.
//!
//! # Functions
//!
//! - [`truncate`] - Truncate strings to a maximum length with ellipsis
//! - [`make_bar`] - Create visual bar charts for relative values
//! - [`format_score`] / [`format_trend`] - Format scores and trend percentages
//! - [`print_section`] / [`print_section_simple`] - Print section headers
//! - [`display_entity_table`] / [`display_series`] / [`display_summary`] - Display formatted reports

use crate::pipeline::EntityReport;
use crate::series::Series;
use crate::summary::Summary;

/// Top of the quality score scale.
pub const QS_SCALE_MAX: f64 = 10.0;

/// Truncate a string to a maximum length, adding "..." if truncated.
///
/// Handles Unicode characters correctly by counting chars rather than bytes.
/// For `max_len < 3`, truncates without ellipsis since there's no room for "...".
///
/// # Examples
///
/// ```
/// use qs_trends::display::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hello", 2), "he");
/// ```
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len < 3 {
        // No room for ellipsis, just truncate
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

/// Create a visual bar for displaying relative values.
///
/// Uses Unicode block characters to create a proportional bar chart.
///
/// # Arguments
///
/// * `value` - The value to represent (negative values treated as 0)
/// * `max_value` - The maximum value (determines 100% width)
/// * `width` - The total width of the bar in characters
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn make_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }
    let ratio = (value / max_value).clamp(0.0, 1.0);
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Format a score with one decimal, or "-" when there is no data.
pub fn format_score(qs: f64) -> String {
    if qs > 0.0 {
        format!("{qs:.1}")
    } else {
        "-".to_string()
    }
}

/// Format a trend percentage with an explicit sign.
pub fn format_trend(percent: f64) -> String {
    if percent == 0.0 {
        "0.0%".to_string()
    } else {
        format!("{percent:+.1}%")
    }
}

/// Print a section header with equals signs.
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {title}");
    println!("{}", "=".repeat(60));
}

/// Print a simple section header with dashes.
pub fn print_section_simple(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Display the average and trend of a series.
pub fn display_summary(summary: &Summary) {
    let direction = summary.direction();
    println!("  Average score:    {:>10}", format_score(summary.average));
    println!(
        "  Trend:            {:>10} {}",
        format_trend(summary.trend_percent),
        direction.arrow()
    );
}

/// Display a series as a horizontal bar chart.
pub fn display_series(series: &Series, bar_width: usize) {
    let max_value = series.values().fold(QS_SCALE_MAX, f64::max);

    for bucket in series {
        println!(
            "  {:<13} {} {:>5} {:>5}",
            bucket.label,
            make_bar(bucket.qs, max_value, bar_width),
            format_score(bucket.qs),
            bucket.secondary_count
        );
    }
}

/// Display one row per entity.
pub fn display_entity_table(reports: &[EntityReport]) {
    println!(
        "  {:<28} {:<9} {:>15} {:>7} {:>10}",
        "Entity", "Level", "Children", "Avg QS", "Trend"
    );
    for report in reports {
        let summary = &report.trend.summary;
        let children = format!(
            "{} {}",
            report.secondary_count(),
            truncate(report.level.secondary_label(), 9)
        );
        println!(
            "  {:<28} {:<9} {:>15} {:>7} {:>8} {}",
            truncate(&report.name, 28),
            report.level.display_name(),
            children,
            format_score(summary.average),
            format_trend(summary.trend_percent),
            summary.direction().arrow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("Kampagne Größe", 8), "Kampa...");
    }

    #[test]
    fn test_truncate_small_max_len() {
        assert_eq!(truncate("hello", 2), "he");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_make_bar_full() {
        assert_eq!(make_bar(10.0, 10.0, 10), "██████████");
    }

    #[test]
    fn test_make_bar_half() {
        assert_eq!(make_bar(5.0, 10.0, 10), "█████░░░░░");
    }

    #[test]
    fn test_make_bar_zero() {
        assert_eq!(make_bar(0.0, 10.0, 4), "    ");
        assert_eq!(make_bar(5.0, 0.0, 4), "    ");
    }

    #[test]
    fn test_make_bar_clamps_out_of_scale() {
        assert_eq!(make_bar(12.0, 10.0, 4), "████");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(7.0), "7.0");
        assert_eq!(format_score(6.66), "6.7");
        assert_eq!(format_score(0.0), "-");
    }

    #[test]
    fn test_format_trend() {
        assert_eq!(format_trend(100.0 / 3.0), "+33.3%");
        assert_eq!(format_trend(-50.0), "-50.0%");
        assert_eq!(format_trend(0.0), "0.0%");
    }
}
