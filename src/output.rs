use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Global output settings
static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    OUTPUT_JSON.store(matches!(format, OutputFormat::Json), Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Print a message (skipped in quiet mode, wrapped in an object in JSON mode)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        print_json(&serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

pub fn success_line(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}

pub fn error_line(message: &str) -> String {
    format!("{} {}", "✗".red().bold(), message.red())
}

/// Format a date string nicely using chrono
pub fn format_date(iso: &str) -> String {
    use chrono::{DateTime, Local, Utc};

    if let Ok(dt) = iso.parse::<DateTime<Utc>>() {
        let local: DateTime<Local> = dt.into();
        local.format("%Y-%m-%d %H:%M").to_string()
    } else {
        // Fallback: just extract date portion
        iso.split('T').next().unwrap_or(iso).to_string()
    }
}

/// Format a date string as date only
pub fn format_date_only(iso: &str) -> String {
    use chrono::{DateTime, Utc};

    if let Ok(dt) = iso.parse::<DateTime<Utc>>() {
        dt.format("%Y-%m-%d").to_string()
    } else {
        iso.split('T').next().unwrap_or(iso).to_string()
    }
}

/// Format a plain `YYYY-MM-DD` date as "Apr 2023", leaving anything else as is
pub fn format_month(date: &str) -> String {
    use chrono::NaiveDate;

    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%b %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Join a list for a single table cell
pub fn join_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// One item per line, for full-width detail blocks
pub fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ééééééééé", 6), "ééé...");
    }

    #[test]
    fn test_format_date_only() {
        assert_eq!(format_date_only("2024-01-15T10:00:00Z"), "2024-01-15");
        assert_eq!(format_date_only("2024-01-15"), "2024-01-15");
    }

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("2023-04-01"), "Apr 2023");
        assert_eq!(format_month("Present"), "Present");
    }

    #[test]
    fn test_bullets() {
        assert_eq!(bullets(&["a".into(), "b".into()]), "• a\n• b");
        assert_eq!(bullets(&[]), "");
    }

    #[test]
    fn test_join_list() {
        assert_eq!(join_list(&[]), "-");
        assert_eq!(join_list(&["Rust".into(), "Go".into()]), "Rust, Go");
    }
}
