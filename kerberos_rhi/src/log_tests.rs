//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry and DefaultLogger formatting.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "kerberos::Test".to_string(),
        message: "hello".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_have_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Error.label(), "ERROR");
    assert_eq!(LogSeverity::Info.label().trim_end(), "INFO");
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_min_severity_follows_build() {
    let logger = DefaultLogger::default();
    if cfg!(debug_assertions) {
        assert_eq!(logger.min_severity, LogSeverity::Trace);
    } else {
        assert_eq!(logger.min_severity, LogSeverity::Info);
    }
}

#[test]
fn test_format_plain_without_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Warn, None, None));
    assert!(line.contains("[WARN ]"));
    assert!(line.contains("[kerberos::Test]"));
    assert!(line.ends_with("hello"));
}

#[test]
fn test_format_plain_with_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("src/render_pass.rs"), Some(42)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("hello (src/render_pass.rs:42)"));
}

#[test]
fn test_format_plain_needs_both_file_and_line() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, Some("src/lib.rs"), None));
    assert!(!line.contains("src/lib.rs"));
}

#[test]
fn test_default_logger_logs_every_severity() {
    // Filtered and unfiltered entries must both be accepted without panicking
    let logger = DefaultLogger::new(LogSeverity::Warn);
    logger.log(&entry(LogSeverity::Trace, None, None));
    logger.log(&entry(LogSeverity::Warn, None, None));
    logger.log(&entry(LogSeverity::Error, Some("file.rs"), Some(1)));
}

#[test]
fn test_log_entry_clone() {
    let original = entry(LogSeverity::Debug, None, None);
    let copy = original.clone();
    assert_eq!(copy.severity, LogSeverity::Debug);
    assert_eq!(copy.source, original.source);
    assert_eq!(copy.message, original.message);
}
