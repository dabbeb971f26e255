//! Self-executing shell bundle builder.
//!
//! Packages a Python application tree and the pure-source modules of its
//! dependencies into a single output file that is simultaneously a POSIX
//! shell script and a ZIP archive. The shell header probes for a usable
//! python interpreter and re-execs the file through it; the interpreter
//! then runs the embedded archive as a zipapp.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundle;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
