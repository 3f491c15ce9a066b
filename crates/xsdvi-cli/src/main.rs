//! Xsdvi CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use xsdvi::XsdviError;
use xsdvi_cli::{Args, error_adapter::to_reportables};

fn report(reporter: &GraphicalReportHandler, err: &XsdviError) {
    // Render each diagnostic independently
    for reportable in to_reportables(err) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_err() {
            writer = reportable.to_string();
        }

        error!("{writer}");
    }
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Parse configuration first
    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Xsdvi");
    debug!(args:?; "Parsed arguments");

    let reporter = GraphicalReportHandler::new();

    // Run the application
    match xsdvi_cli::run(&args) {
        Ok(summary) if summary.is_success() => {
            info!(written = summary.written.len(); "Completed successfully");
        }
        Ok(summary) => {
            for err in &summary.failures {
                report(&reporter, err);
            }
            process::exit(1);
        }
        Err(err) => {
            report(&reporter, &err);
            process::exit(1);
        }
    }
}
