//! Stackvars CLI Binary

use clap::Parser;
use stackvars::logging::init_logging;
use stackvars::tooling::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let context = CliContext::new(settings);
    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
