//! Child logger example
//!
//! Demonstrates scoping a context to a component, nesting children, and
//! sharing the root's configuration across threads.
//!
//! Run with: cargo run --example child_loggers

use client_logger::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

fn load_page(logger: &ChildLogger, page: u32) {
    let started = Instant::now();
    logger.debug_with_context("fetching page", LogContext::new().with_field("page", page));
    thread::sleep(Duration::from_millis(5));
    logger.performance("load_page", started.elapsed(), Some(LogContext::new().with_field("page", page)));
}

fn main() -> Result<()> {
    println!("=== Client Logger - Child Loggers Example ===\n");

    let root = Logger::builder()
        .environment(Environment::Development)
        .timestamp_format(TimestampFormat::Custom("%H:%M:%S%.3f".to_string()))
        .build();

    println!("1. Component-scoped child:");
    let jobs = root.child(LogContext::for_component("JobBoard"));
    jobs.info("mounted");
    jobs.info_with_context("filter applied", LogContext::new().with_field("remote", true));

    println!("\n2. Call-site fields win over bound fields:");
    jobs.warn_with_context("override", LogContext::for_component("JobBoard/Filters"));

    println!("\n3. Grandchild for a single request:");
    let request = jobs.child(LogContext::new().with_field("requestId", "req-1138"));
    request.api("GET /api/jobs?page=1", None);
    request.error_with(
        "request failed",
        Some(ErrorInfo::new("503 Service Unavailable").with_stack("at fetch_jobs (api.rs:77)")),
        Some(LogContext::new().with_field("attempt", 2)),
    );

    println!("\n4. Children on worker threads:");
    let handles: Vec<_> = (1..=3)
        .map(|page| {
            let worker = jobs.child(LogContext::new().with_field("worker", page));
            thread::spawn(move || load_page(&worker, page))
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }

    println!("\n5. Root reconfiguration reaches every child:");
    root.set_log_level(LogLevel::Error);
    jobs.warn("hidden: below ERROR");
    request.error("visible through the grandchild");

    println!("\n6. JSON lines:");
    let json = Logger::builder()
        .environment(Environment::Development)
        .output_format(OutputFormat::Json)
        .build();
    json.child(LogContext::for_component("Search"))
        .info_with_context("query", LogContext::new().with_field("q", "rust"));

    root.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
