//! Command line interface for the bundle builder.

mod args;

pub use args::Args;

use crate::bundle::Composer;
use crate::catalog::FsCatalog;
use crate::config::BundleConfig;
use crate::error::Result;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    run_with(&Args::parse_args())
}

/// Execute one bundle assembly for already-parsed arguments.
pub fn run_with(args: &Args) -> Result<i32> {
    let config = BundleConfig::load(&args.config)?;
    let catalog = FsCatalog::new(config.search_path.clone());

    let path = Composer::new(&config, &catalog).compose(&args.dist_dir, &args.tag)?;

    eprintln!("Generated {}", path.display());
    Ok(0)
}
