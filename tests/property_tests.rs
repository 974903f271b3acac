//! Property-based tests for client_logger using proptest

use client_logger::prelude::*;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

fn any_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        "(?s).{0,24}".prop_map(FieldValue::from),
        any::<i64>().prop_map(FieldValue::from),
        (-1.0e9f64..1.0e9f64).prop_map(FieldValue::from),
        any::<bool>().prop_map(FieldValue::from),
        Just(FieldValue::Null),
    ]
}

fn any_context() -> impl Strategy<Value = LogContext> {
    prop::collection::vec(("[a-d]{1,2}", any_value()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn capture(level: LogLevel) -> (Logger, MemoryAppender) {
    let sink = MemoryAppender::new();
    let logger = Logger::builder()
        .min_level(level)
        .console_appender(sink.clone())
        .build();
    (logger, sink)
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering follows the discriminants
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Test that LogLevel parsing ignores case
    #[test]
    fn test_log_level_case_insensitive(level in any_level(), use_lower in any::<bool>()) {
        let text = if use_lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(text.parse::<LogLevel>().unwrap(), level);
    }

    #[test]
    fn test_log_level_invalid_parse(invalid_str in "[^DIWEONdiweon ]+") {
        prop_assert!(invalid_str.parse::<LogLevel>().is_err());
    }
}

// ============================================================================
// Filtering Tests
// ============================================================================

proptest! {
    /// A record is written exactly when its level is a severity at or above
    /// the threshold.
    #[test]
    fn test_threshold_decides_emission(threshold in any_level(), level in any_level()) {
        let (logger, sink) = capture(threshold);
        logger.log(level, "threshold check");

        let expected = level != LogLevel::Off && threshold != LogLevel::Off && level >= threshold;
        prop_assert_eq!(sink.len(), usize::from(expected));
        prop_assert_eq!(logger.is_enabled(level), expected);
    }

    /// Children never see a different threshold than their root
    #[test]
    fn test_child_follows_root_threshold(
        initial in any_level(),
        updated in any_level(),
        level in any_level(),
    ) {
        let (logger, sink) = capture(initial);
        let child = logger.child(LogContext::for_component("Filter"));
        logger.set_log_level(updated);

        child.log(level, "threshold check");
        prop_assert_eq!(sink.len(), usize::from(level.passes(updated)));
    }
}

// ============================================================================
// Context Tests
// ============================================================================

proptest! {
    /// Every key of either side is present after a merge, and call-site
    /// values win on conflict.
    #[test]
    fn test_merge_call_site_wins(bound in any_context(), call_site in any_context()) {
        let merged = bound.merged(&call_site);

        for (key, value) in call_site.iter() {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in bound.iter() {
            if !call_site.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        let unique_call_site = call_site.keys().filter(|k| !bound.contains_key(k)).count();
        prop_assert_eq!(merged.len(), bound.len() + unique_call_site);
    }

    /// The record written by a child carries exactly the merged context
    #[test]
    fn test_child_record_context(bound in any_context(), call_site in any_context()) {
        let (logger, sink) = capture(LogLevel::Debug);
        let child = logger.child(bound.clone());

        child.info_with_context("m", call_site.clone());
        prop_assert_eq!(sink.last().unwrap().context, Some(bound.merged(&call_site)));
    }

    /// Rendering a context always yields parseable JSON with one entry per key
    #[test]
    fn test_context_renders_valid_json(context in any_context()) {
        let parsed: serde_json::Value = serde_json::from_str(&context.to_json_string()).unwrap();
        prop_assert_eq!(parsed.as_object().map(|o| o.len()), Some(context.len()));
    }
}

// ============================================================================
// Formatting Tests
// ============================================================================

proptest! {
    /// Messages and context values can never split a record across lines
    #[test]
    fn test_line_is_single_line(
        message in "(?s).{0,64}",
        context in any_context(),
        level in prop::sample::select(vec![
            LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error,
        ]),
    ) {
        let (logger, sink) = capture(LogLevel::Debug);
        logger.log_with_context(level, message, context);

        let line = sink.last().unwrap().line;
        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
    }

    /// JSON lines parse back to the sanitized message
    #[test]
    fn test_json_line_parses(message in "[^\\n\\r\\t]{0,64}", context in any_context()) {
        let sink = MemoryAppender::new();
        let logger = Logger::builder()
            .min_level(LogLevel::Debug)
            .output_format(OutputFormat::Json)
            .console_appender(sink.clone())
            .build();

        logger.warn_with_context(message.clone(), context);
        let parsed: serde_json::Value = serde_json::from_str(&sink.last().unwrap().line).unwrap();
        prop_assert_eq!(parsed["message"].as_str(), Some(message.as_str()));
    }

    /// Emission is total: arbitrary input never panics
    #[test]
    fn test_emission_no_panic(
        message in "(?s).*",
        error_message in "(?s).*",
        stack in proptest::option::of("(?s).*"),
        context in proptest::option::of(any_context()),
    ) {
        let (logger, sink) = capture(LogLevel::Debug);
        let mut error = ErrorInfo::new(error_message);
        if let Some(stack) = stack {
            error = error.with_stack(stack);
        }

        logger.error_with(message, Some(error), context);
        prop_assert_eq!(sink.len(), 1);
    }
}
