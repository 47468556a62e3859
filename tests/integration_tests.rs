//! Integration tests for the node logger
//!
//! These tests verify:
//! - Severity filtering and sequence numbering end to end
//! - Local and remote delivery toggles
//! - Console line layout
//! - Call-site streams and location prefixes
//! - Rate-limited macros through a logger
//! - JSON sink output

use node_logger::appenders::memory::SharedLines;
use node_logger::appenders::{format_line, JsonAppender, MemoryAppender};
use node_logger::core::error::LoggerError;
use node_logger::prelude::*;
use node_logger::{log_changed, log_every_n, log_once, log_stream, log_throttle};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

type Published = Arc<Mutex<Vec<LogEntry>>>;

fn capture() -> (PublishCallback, Published) {
    let published: Published = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&published);
    let callback: PublishCallback = Arc::new(move |entry: &LogEntry| {
        sink.lock().push(entry.clone());
    });
    (callback, published)
}

fn node(name: &str) -> (Logger, SharedLines, Published) {
    let memory = MemoryAppender::new();
    let lines = memory.lines();
    let (callback, published) = capture();
    let logger = Logger::builder()
        .node_name(name)
        .local_sink(memory)
        .publish_callback(callback)
        .build();
    (logger, lines, published)
}

#[test]
fn test_warn_threshold_filters_lower_levels() {
    let (logger, lines, published) = node("n1");
    logger.set_min_level(LogLevel::Warn);

    logger.info("a");
    logger.warn("b");
    logger.error("c");

    let published = published.lock();
    assert_eq!(published.len(), 2);
    assert_eq!(published[0].message, "b");
    assert_eq!(published[0].header.sequence, 0);
    assert_eq!(published[0].level, LogLevel::Warn.as_i32());
    assert_eq!(published[1].message, "c");
    assert_eq!(published[1].header.sequence, 1);
    assert_eq!(published[1].level, LogLevel::Error.as_i32());
    assert_eq!(lines.lock().len(), 2);
    assert_eq!(logger.sequence(), 2);
}

#[test]
fn test_entry_carries_node_identity_and_time() {
    let (logger, _lines, published) = node("arm_ctrl");
    logger.info("ready");

    let published = published.lock();
    let entry = &published[0];
    assert_eq!(entry.node_name, "arm_ctrl");
    assert_eq!(entry.header.node_id, "arm_ctrl");
    assert!(entry.header.microseconds < 1_000_000);
    assert!(entry.header.seconds > 1_600_000_000);
}

#[test]
fn test_console_line_layout() {
    let (logger, lines, _published) = node("n1");
    logger.warn("disk almost full");

    let lines = lines.lock();
    let line = &lines[0];
    // "[HH:MM:SS.uuuuuu] [ WARN] [n1] disk almost full"
    assert_eq!(&line[0..1], "[");
    assert_eq!(&line[16..18], "] ");
    assert!(line.ends_with(" [ WARN] [n1] disk almost full"));
}

#[test]
fn test_format_line_pads_labels() {
    let entry = LogEntry::new(LogLevel::Info, "n1", 0, "x".to_string());
    let line = format_line(&entry, &TimestampFormat::Utc, false);
    assert!(line.contains("] [ INFO] [n1] x"));

    let mut unknown = entry.clone();
    unknown.level = 9;
    let line = format_line(&unknown, &TimestampFormat::Utc, false);
    assert!(line.contains("[UNKNOWN] [n1] x"));
}

#[test]
fn test_output_toggles() {
    let (logger, lines, published) = node("n1");

    logger.set_local_output(false);
    logger.info("remote only");
    assert!(lines.lock().is_empty());
    assert_eq!(published.lock().len(), 1);

    logger.set_local_output(true);
    logger.set_remote_output(false);
    logger.info("local only");
    assert_eq!(lines.lock().len(), 1);
    assert_eq!(published.lock().len(), 1);

    // Disabled outputs still advance the sequence.
    logger.set_local_output(false);
    logger.info("nowhere");
    assert_eq!(logger.sequence(), 3);
}

#[test]
fn test_publish_callback_replacement() {
    let logger = Logger::builder().local_output(false).build();
    assert!(!logger.is_remote_output_enabled());

    let (first, first_seen) = capture();
    let (second, second_seen) = capture();

    logger.set_publish_callback(Some(first));
    logger.info("one");
    logger.set_publish_callback(Some(second));
    logger.info("two");
    logger.set_publish_callback(None);
    logger.info("three");

    assert_eq!(first_seen.lock().len(), 1);
    assert_eq!(second_seen.lock().len(), 1);
    assert_eq!(second_seen.lock()[0].header.sequence, 1);
    assert!(!logger.is_remote_output_enabled());
    assert_eq!(logger.metrics().published_count(), 2);
}

#[test]
fn test_remote_output_without_callback_is_silent() {
    let logger = Logger::builder()
        .local_output(false)
        .remote_output(true)
        .build();
    logger.info("nobody listening");

    assert_eq!(logger.sequence(), 1);
    assert_eq!(logger.metrics().published_count(), 0);
}

#[test]
fn test_stream_and_location_prefix() {
    let (callback, published) = capture();
    let logger = Logger::builder()
        .node_name("n1")
        .local_output(false)
        .capture_location(true)
        .publish_callback(callback)
        .build();

    let line = line!() + 1;
    log_stream!(logger, LogLevel::Info).append("x=").append(42);
    logger.stream(LogLevel::Info).append("no location");

    let published = published.lock();
    assert_eq!(
        published[0].message,
        format!("[integration_tests.rs:{}] x=42", line)
    );
    assert_eq!(published[1].message, "no location");
}

#[test]
fn test_location_ignored_when_capture_off() {
    let (logger, _lines, published) = node("n1");
    logger.log_at(LogLevel::Info, "plain", Location::new("src/main.rs", 3));
    assert_eq!(published.lock()[0].message, "plain");
}

#[test]
fn test_filtered_stream_has_no_effect() {
    let (logger, lines, published) = node("n1");
    logger.set_min_level(LogLevel::Error);

    logger.stream(LogLevel::Debug).append("nothing").append(1);

    assert!(lines.lock().is_empty());
    assert!(published.lock().is_empty());
    assert_eq!(logger.sequence(), 0);
}

#[test]
fn test_rate_limited_macros_through_logger() {
    let (logger, _lines, published) = node("n1");

    for reach in 1..=6 {
        log_once!(logger, LogLevel::Warn, "once {}", reach);
        log_every_n!(logger, LogLevel::Info, 2, "every {}", reach);
        log_changed!(logger, LogLevel::Info, reach % 3 == 0, "edge {}", reach);
        log_throttle!(logger, LogLevel::Info, Duration::from_secs(60), "throttle {}", reach);
    }

    let messages: Vec<String> = published
        .lock()
        .iter()
        .map(|entry| entry.message.clone())
        .collect();
    assert_eq!(
        messages,
        vec![
            "once 1",
            "throttle 1",
            "every 2",
            "edge 3",
            "every 4",
            "every 6",
            "edge 6",
        ]
    );
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_json_sink_matches_published_entry() {
    let buffer = SharedBuffer::default();
    let (callback, published) = capture();
    let logger = Logger::builder()
        .node_name("n1")
        .local_sink(JsonAppender::new(buffer.clone()))
        .publish_callback(callback)
        .build();

    logger.error("overcurrent");
    logger.flush().expect("flush");

    let written = String::from_utf8(buffer.0.lock().clone()).expect("utf8");
    let parsed = LogEntry::from_json(written.trim_end()).expect("valid JSON line");
    assert_eq!(parsed, published.lock()[0]);
}

struct BrokenSink;

impl Appender for BrokenSink {
    fn append(&mut self, _entry: &LogEntry) -> node_logger::Result<()> {
        Err(LoggerError::sink("broken", "device unplugged"))
    }

    fn flush(&mut self) -> node_logger::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[test]
fn test_local_sink_failure_does_not_block_remote() {
    let (callback, published) = capture();
    let logger = Logger::builder()
        .local_sink(BrokenSink)
        .publish_callback(callback)
        .build();

    logger.info("still published");

    assert_eq!(published.lock().len(), 1);
    assert_eq!(logger.metrics().sink_failures(), 1);
}

#[test]
fn test_logger_from_json_config() {
    let config = LoggerConfig::from_json(
        r#"{"node_name": "planner", "min_level": "Error", "capture_location": true}"#,
    )
    .expect("valid config");
    let logger = Logger::builder()
        .config(config)
        .local_output(false)
        .build();

    assert_eq!(logger.node_name(), "planner");
    assert_eq!(logger.min_level(), LogLevel::Error);
    assert!(!logger.is_enabled(LogLevel::Warn));
}
