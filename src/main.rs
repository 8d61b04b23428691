//! This file defines the ahs-prevalence binary entry point.

use std::error::Error;

use ahs_prevalence::app;
use ahs_prevalence::cli;
use ahs_prevalence::tracing;

/// Application entry point
fn main() {
    let args = cli::parse();
    tracing::init_tracing();
    if let Err(error) = app::run(&args) {
        eprintln!("Error: {}", error);
        let mut current = error.source();
        while let Some(source) = current {
            eprintln!("Caused by: {}", source);
            current = source.source();
        }
        std::process::exit(1);
    }
}
