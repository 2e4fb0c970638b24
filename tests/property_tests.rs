//! Property-based tests for rust_context_logger using proptest

use proptest::prelude::*;
use rust_context_logger::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

fn memory_logger(level: LogLevel) -> (Logger, Arc<MemoryHandler>) {
    let handler = Arc::new(MemoryHandler::new());
    let logger = Logger::builder()
        .min_level(level)
        .handler(Arc::clone(&handler))
        .build();
    (logger, handler)
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names parse back to the same level, in any case
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), upper in any::<bool>()) {
        let name = if upper { level.as_str().to_uppercase() } else { level.as_str().to_string() };
        prop_assert_eq!(LogLevel::parse(&name).unwrap(), level);
    }

    /// Ordering follows severity
    #[test]
    fn test_log_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, (a as i8) <= (b as i8));
        prop_assert!(LogLevel::Invalid < a);
    }

    /// Unknown names are rejected
    #[test]
    fn test_unknown_level_names(name in "[a-z]{1,10}") {
        prop_assume!(!["debug", "info", "warn", "warning", "error", "fatal"].contains(&name.as_str()));
        prop_assert!(LogLevel::parse(&name).is_err());
        prop_assert_eq!(LogLevel::parse_lossy(&name), LogLevel::Invalid);
    }
}

// ============================================================================
// Context Tests
// ============================================================================

proptest! {
    /// The emitted fields equal a right-biased merge of every layer
    #[test]
    fn test_layer_merge_is_right_biased(
        layers in prop::collection::vec(
            prop::collection::btree_map("[a-e]", any::<i64>(), 0..4),
            0..6,
        )
    ) {
        let (logger, handler) = memory_logger(LogLevel::Info);

        let mut ctx = logger.with_fields(&Fields::new());
        let mut expected = BTreeMap::new();
        for layer in &layers {
            let fields: Fields = layer.iter().map(|(k, v)| (k.clone(), FieldValue::from(*v))).collect();
            ctx = ctx.with_fields(&fields);
            expected.extend(layer.iter().map(|(k, v)| (k.clone(), *v)));
        }
        ctx.info("merged");

        let entry = handler.last().unwrap();
        prop_assert_eq!(entry.fields.len(), expected.len());
        for (key, value) in &expected {
            prop_assert_eq!(entry.field(key).and_then(FieldValue::as_i64), Some(*value));
        }
    }

    /// Deriving a child never changes what the parent emits
    #[test]
    fn test_parent_unchanged(
        key in "[a-z]{1,8}",
        parent_value in any::<i64>(),
        child_value in any::<i64>(),
    ) {
        let (logger, handler) = memory_logger(LogLevel::Info);

        let parent = logger.with_field(key.clone(), parent_value);
        let _child = parent.with_field(key.clone(), child_value).with_field("extra", true);
        parent.info("parent");

        let entry = handler.last().unwrap();
        prop_assert_eq!(entry.fields.len(), 1);
        prop_assert_eq!(entry.field(&key).and_then(FieldValue::as_i64), Some(parent_value));
    }

    /// An entry reaches the handler exactly when its level passes the minimum
    #[test]
    fn test_level_gating(min in any_level(), level in prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]) {
        let (logger, handler) = memory_logger(min);

        logger.with_field("k", "v").log(level, "message");

        prop_assert_eq!(handler.len() == 1, level >= min);
        prop_assert_eq!(logger.metrics().filtered() == 1, level < min);
    }
}

// ============================================================================
// LogEntry Tests
// ============================================================================

proptest! {
    /// The wire JSON always has exactly four keys in order
    #[test]
    fn test_entry_json_shape(message in ".*", level in any_level(), value in any::<i64>()) {
        let entry = LogEntry::new(level, message.clone())
            .with_fields(Fields::new().with("value", value));

        let json = serde_json::to_string(&entry).unwrap();
        let prefix = "{\"fields\":";
        prop_assert!(json.starts_with(prefix));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed.as_object().unwrap().len(), 4);
        prop_assert_eq!(parsed["message"].as_str(), Some(message.as_str()));
        prop_assert_eq!(parsed["level"].as_str(), Some(level.as_str()));
        prop_assert_eq!(parsed["fields"]["value"].as_i64(), Some(value));
    }

    /// Sanitized messages never span lines
    #[test]
    fn test_sanitized_message_single_line(message in ".*") {
        let entry = LogEntry::new(LogLevel::Info, message);
        let sanitized = entry.sanitized_message();

        prop_assert!(!sanitized.contains('\n'));
        prop_assert!(!sanitized.contains('\r'));
    }
}
