//! Tests for installing the process-wide logger before first access
//!
//! Kept in their own test binary: installation only succeeds while no
//! instance exists, so nothing else in this process may touch it first.

use client_logger::prelude::*;

#[test]
fn test_installed_logger_becomes_instance() {
    assert!(Logger::try_instance().is_none());

    let sink = MemoryAppender::new();
    let installed = Logger::builder()
        .environment(Environment::Production)
        .min_level(LogLevel::Info)
        .console_appender(sink.clone())
        .install()
        .expect("First installation should succeed");

    let instance = Logger::instance();
    assert!(instance.same_as(installed));
    assert_eq!(instance.log_level(), LogLevel::Info);
    assert!(Logger::try_instance().is_some_and(|existing| existing.same_as(installed)));

    // Records emitted through the instance reach the installed appender
    instance.debug("below threshold");
    instance.info_with_context("installed", LogContext::new().with_field("step", 1));
    Logger::instance()
        .child(LogContext::for_component("Installer"))
        .warn("from child");

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].line.ends_with(r#"installed | {"step":1}"#));
    assert_eq!(lines[1].context, Some(LogContext::for_component("Installer")));

    // A second installation leaves the first one in place
    let other = MemoryAppender::new();
    assert!(matches!(
        Logger::init(Logger::builder().console_appender(other.clone()).build()),
        Err(LoggerError::AlreadyInitialized)
    ));
    Logger::instance().error("still routed to the installed appender");
    assert_eq!(sink.len(), 3);
    assert!(other.is_empty());
}
