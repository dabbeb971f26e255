//! Error types for bundle assembly.
//!
//! Every failure is a hard stop: the bundler is a one-shot build step and
//! never retries. Variants map one-to-one onto the failure taxonomy of the
//! assembly pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all bundler operations
#[derive(Error, Debug)]
pub enum Error {
    /// Output directory could not be created (for a reason other than
    /// already existing)
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        /// Directory that failed to create
        path: PathBuf,
        /// Underlying filesystem error
        source: std::io::Error,
    },

    /// The primary package's init file has no `__version__ = ` line
    #[error("no __version__ line found in the package init file")]
    MissingVersion,

    /// A `__version__ = ` line exists but its literal is too short to
    /// carry a quoted value
    #[error("malformed __version__ literal in the package init file")]
    MalformedVersion,

    /// A discovered dependency module has no retrievable source text
    /// (e.g. a compiled extension module)
    #[error("module {module} has no retrievable source")]
    MissingSource {
        /// Dotted name of the sourceless module
        module: String,
    },

    /// A dependency package could not be located on the search path
    #[error("package {package} not found on the search path")]
    PackageNotFound {
        /// Top-level package name
        package: String,
    },

    /// Two producers targeted the same archive path
    #[error("duplicate archive entry: {path}")]
    DuplicateEntry {
        /// Colliding archive-relative path
        path: String,
    },

    /// Bundle manifest is missing or malformed
    #[error("invalid bundle manifest {}: {message}", path.display())]
    Config {
        /// Manifest file path
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk errors
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Archive write errors
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
