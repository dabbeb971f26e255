//! shbundle - self-executing shell bundle builder.
//!
//! This binary assembles a Python application and its pure-source
//! dependencies into one directly executable shell archive, with proper
//! error handling and a graceful no-interpreter fallback in the artifact.

mod bundle;
mod catalog;
mod cli;
mod config;
mod error;

use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
