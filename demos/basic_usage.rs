//! Basic logger usage example
//!
//! Demonstrates the process-wide logger, level filtering, structured
//! context and the domain helpers.
//!
//! Run with: cargo run --example basic_usage

use client_logger::prelude::*;
use client_logger::{context, info};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Client Logger - Basic Usage Example ===\n");

    // Install a development logger before anything asks for the instance
    let logger = Logger::builder()
        .environment(Environment::Development)
        .console_appender(ConsoleAppender::with_colors(true))
        .install()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Logging with a higher minimum level:");
    Logger::instance().set_log_level(LogLevel::Warn);
    println!("   Minimum level set to WARN - debug and info won't show:");
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");
    logger.set_log_level(LogLevel::Debug);

    println!("\n3. Structured context:");
    logger.info_with_context(
        "User logged in",
        LogContext::new()
            .with_user_id(42)
            .with_session_id("sess-7f3a")
            .with_action("login"),
    );
    info!(logger, "Loaded {} jobs from {}", 25, "/api/jobs");

    println!("\n4. Domain helpers:");
    logger.auth("Token refreshed", Some(context! { "userId" => 42 }));
    logger.api("GET /api/jobs", Some(context! { "status" => 200 }));
    logger.performance("render_job_list", Duration::from_micros(12_500), None);
    logger.component("JobCard", "mounted", None);

    println!("\n5. Errors with a trace:");
    let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    logger.error_with(
        "Failed to load jobs",
        Some(ErrorInfo::from_error(&io).with_stack("at load_jobs (jobs.rs:42)\nat main (main.rs:10)")),
        Some(context! { "retry" => true }),
    );

    println!("\n6. Console output disabled:");
    logger.enable_console_output(false);
    logger.error("Nobody sees this");
    logger.enable_console_output(true);

    logger.flush()?;
    println!(
        "\n=== Example completed: {} records emitted ===",
        logger.metrics().total_logged()
    );

    Ok(())
}
