//! Integration tests for the context logger
//!
//! These tests verify:
//! - Field contexts and error capabilities end to end
//! - Level gating and runtime reconfiguration
//! - Traces and their completion entries
//! - Handler output (text, JSON file, fan-out)
//! - Telemetry increments from contexts
//! - Log injection prevention

use rust_context_logger::prelude::*;
use rust_context_logger::telemetry::{CounterRegistry, CounterVec};
use rust_context_logger::{fields, info, traced};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn memory_logger() -> (Logger, Arc<MemoryHandler>) {
    let handler = Arc::new(MemoryHandler::new());
    (Logger::new(Arc::clone(&handler)), handler)
}

fn str_field<'a>(entry: &'a LogEntry, key: &str) -> Option<&'a str> {
    entry.field(key).and_then(FieldValue::as_str)
}

#[test]
fn test_upload_scenario() {
    let (logger, handler) = memory_logger();

    let ctx = logger.with_fields(&fields! { "file" => "sloth.png", "user" => "tobi" });
    ctx.info("upload");
    ctx.info("upload complete");
    ctx.with_error(&std::io::Error::other("unauthorized"))
        .error("upload failed");

    let entries = handler.entries();
    assert_eq!(entries.len(), 3);

    for entry in &entries {
        assert_eq!(str_field(entry, "file"), Some("sloth.png"));
        assert_eq!(str_field(entry, "user"), Some("tobi"));
    }
    assert_eq!(entries[0].fields.len(), 2);
    assert_eq!(entries[2].level, LogLevel::Error);
    assert_eq!(entries[2].message, "upload failed");
    assert_eq!(str_field(&entries[2], "error"), Some("unauthorized"));
}

#[test]
fn test_parent_context_unchanged_by_derivation() {
    let (logger, handler) = memory_logger();

    let base = logger.with_field("request_id", "abc123");
    let child = base.with_field("user", "tobi").with_field("request_id", "override");

    base.info("from base");
    child.info("from child");

    let entries = handler.entries();
    assert_eq!(entries[0].fields.len(), 1);
    assert_eq!(str_field(&entries[0], "request_id"), Some("abc123"));
    assert_eq!(str_field(&entries[1], "request_id"), Some("override"));
    assert_eq!(str_field(&entries[1], "user"), Some("tobi"));
}

#[test]
fn test_level_gating_and_runtime_change() {
    let (logger, handler) = memory_logger();

    logger.debug("hidden");
    logger.info("shown");

    logger.set_level(LogLevel::Debug);
    logger.debug("now shown");

    logger.set_level_from_str("error").unwrap();
    logger.warn("hidden again");
    logger.error("shown again");

    assert!(logger.set_level_from_str("verbose").is_err());
    assert_eq!(logger.level(), LogLevel::Error);

    let messages: Vec<String> = handler.entries().into_iter().map(|e| e.message).collect();
    assert_eq!(messages, vec!["shown", "now shown", "shown again"]);
    assert_eq!(logger.metrics().filtered(), 2);
    assert_eq!(logger.metrics().dispatched(), 3);
}

#[test]
fn test_trace_success_and_failure() {
    let (logger, handler) = memory_logger();
    let ctx = logger.with_field("file", "sloth.png");

    let trace = ctx.trace("upload");
    std::thread::sleep(Duration::from_millis(5));
    trace.stop(None);

    let result: std::result::Result<(), std::io::Error> =
        ctx.traced("upload", || Err(std::io::Error::other("timeout")));
    assert!(result.is_err());

    let entries = handler.entries();
    assert_eq!(entries.len(), 4);

    assert_eq!(entries[0].level, LogLevel::Info);
    assert!(entries[0].field("duration").is_none());

    assert_eq!(entries[1].level, LogLevel::Info);
    assert_eq!(entries[1].message, "upload");
    let elapsed = entries[1]
        .field("duration")
        .and_then(FieldValue::as_duration)
        .unwrap();
    assert!(elapsed >= Duration::from_millis(5));

    assert_eq!(entries[3].level, LogLevel::Error);
    assert_eq!(str_field(&entries[3], "error"), Some("timeout"));
    assert_eq!(str_field(&entries[3], "file"), Some("sloth.png"));
}

#[test]
fn test_dropped_trace_completes() {
    let (logger, handler) = memory_logger();

    {
        let _trace = logger.trace("scoped work");
    }

    let entries = handler.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[1].field("duration").is_some());
}

#[test]
fn test_traced_error_source() {
    fn load() -> std::result::Result<(), Traced<std::io::Error>> {
        Err(traced!(std::io::Error::other("disk full")))
    }

    let (logger, handler) = memory_logger();
    if let Err(err) = load() {
        logger.with_error(&err).error("load failed");
    }

    let entry = handler.last().unwrap();
    assert_eq!(str_field(&entry, "error"), Some("disk full"));
    let source = str_field(&entry, "source").unwrap();
    assert!(source.contains("load"), "{}", source);
    assert!(source.contains("integration_tests.rs:"), "{}", source);
}

#[test]
fn test_json_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.jsonl");

    let logger = Logger::new(JsonHandler::file(&log_file).expect("Failed to open log file"));
    logger
        .with_field("user", "tobi")
        .with_field("size", 1024)
        .info("upload");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let value: serde_json::Value = serde_json::from_str(content.trim()).unwrap();

    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 4);
    assert_eq!(value["level"], "info");
    assert_eq!(value["message"], "upload");
    assert_eq!(value["fields"]["user"], "tobi");
    assert_eq!(value["fields"]["size"], 1024);
}

#[test]
fn test_multi_handler_with_level_filter() {
    let all = Arc::new(MemoryHandler::new());
    let errors = Arc::new(MemoryHandler::new());

    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .handler(
            MultiHandler::new()
                .with(Arc::clone(&all))
                .with(LevelFilter::new(Arc::clone(&errors), LogLevel::Error)),
        )
        .build();

    logger.debug("connecting");
    logger.info("connected");
    logger.error("connection reset");

    assert_eq!(all.len(), 3);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.last().unwrap().message, "connection reset");
}

#[test]
fn test_handler_failure_does_not_reach_caller() {
    let failures = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let seen = Arc::clone(&failures);

    let logger = Logger::builder()
        .handler(HandlerFn::new(|_: &LogEntry| {
            Err(LoggerError::writer("disk full"))
        }))
        .on_handler_error(Arc::new(move |_| {
            seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }))
        .build();

    logger.info("lost");
    logger.with_field("k", "v").warn("also lost");

    assert_eq!(failures.load(std::sync::atomic::Ordering::SeqCst), 2);
    assert_eq!(logger.metrics().handler_failures(), 2);
}

#[test]
fn test_telemetry_counters_from_contexts() {
    let registry = Arc::new(CounterRegistry::new());
    registry
        .register(CounterVec::new(
            "hd_errors_total",
            "Number of hard-disk errors.",
            &["device"],
        ))
        .unwrap();

    let (logger, handler) = memory_logger();
    logger.set_telemetry(Arc::clone(&registry));

    let sda = logger.with_tags(["sda"]);
    sda.inc("hd_errors_total", 1.0)
        .with_field("sector", 42)
        .error("read error");
    sda.inc("hd_errors_total", 1.0);
    logger
        .with_tags(["sdb"])
        .inc("hd_errors_total", 4.0)
        .warn("smart warning");

    assert_eq!(registry.value("hd_errors_total", &["sda"]), Some(2.0));
    assert_eq!(registry.value("hd_errors_total", &["sdb"]), Some(4.0));
    assert_eq!(handler.len(), 2);
    assert!(registry
        .render()
        .contains("hd_errors_total{device=\"sda\"} 2"));
}

#[test]
fn test_text_handler_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");
    let file = fs::File::create(&log_file).expect("Failed to create log file");

    let logger = Logger::new(TextHandler::new(file).with_colors(false));

    let malicious_message = "User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation";
    logger.info(malicious_message);
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("\\n"));
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
}

#[test]
fn test_macros_with_contexts() {
    let (logger, handler) = memory_logger();
    let ctx = logger.with_field("user", "tobi");

    info!(ctx, "uploaded {} files", 3);

    let entry = handler.last().unwrap();
    assert_eq!(entry.message, "uploaded 3 files");
    assert_eq!(str_field(&entry, "user"), Some("tobi"));
}

#[test]
fn test_fatal_uses_exit_hook() {
    fn exit_by_panic(code: i32) -> ! {
        panic!("exit {}", code)
    }

    let handler = Arc::new(MemoryHandler::new());
    let logger = Logger::builder()
        .handler(Arc::clone(&handler))
        .exit_hook(exit_by_panic)
        .build();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.with_field("reason", "corrupt index").fatal("cannot continue")
    }));

    let payload = result.unwrap_err();
    assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("exit 1"));

    let entry = handler.last().unwrap();
    assert_eq!(entry.level, LogLevel::Fatal);
    assert_eq!(str_field(&entry, "reason"), Some("corrupt index"));
}
