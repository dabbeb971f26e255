//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Self-executing shell bundle builder
#[derive(Parser, Debug)]
#[command(
    name = "shbundle",
    version,
    about = "Bundles a Python application and its pure-source dependencies into one executable shell archive",
    long_about = "Produces a single file that is both a POSIX shell script and a ZIP archive.

The shell header probes for a usable python interpreter and re-execs the
file through it; the interpreter then runs the embedded archive as a
zipapp. Dependencies are embedded from their source trees on the manifest's
search path, minus explicitly excluded submodules.

Usage:
  shbundle --tag rc1
  shbundle --config bundle.toml --dist-dir dist --tag \"$(git rev-parse --short HEAD)\"

Exit code 0 = artifact written to the dist directory."
)]
pub struct Args {
    /// Bundle manifest naming the primary package and its dependencies
    #[arg(short, long, value_name = "FILE", default_value = "bundle.toml")]
    pub config: PathBuf,

    /// Directory to put the final built artifact in
    #[arg(short = 'd', long, value_name = "DIR", default_value = "dist")]
    pub dist_dir: PathBuf,

    /// String to tag this build with (appended to the embedded version)
    #[arg(short, long, value_name = "TAG", default_value = "")]
    pub tag: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
