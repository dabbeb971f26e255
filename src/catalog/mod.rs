//! Source-catalog abstraction over dependency package introspection.
//!
//! The resolver never touches the filesystem (or a live interpreter)
//! directly; it asks a [`SourceCatalog`] which modules a package contains
//! and what their source text is. [`FsCatalog`] answers from a
//! site-packages-style search path; [`MemoryCatalog`] answers from an
//! in-memory fixture tree so the pipeline can be tested without real
//! packages on disk.

mod fs;
mod memory;

pub use fs::FsCatalog;
pub use memory::MemoryCatalog;

use crate::error::Result;

/// One discovered submodule of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    /// Fully dotted module name (e.g. `jinja2.filters`)
    pub name: String,
    /// Whether the module is itself a package (a directory with an init
    /// file) rather than a plain module
    pub is_package: bool,
}

/// Enumerates a package's importable submodules and retrieves their
/// source text.
pub trait SourceCatalog {
    /// List every transitive submodule of `package`, in a discovery
    /// order that is deterministic for the same catalog contents. The
    /// top-level package itself is not included.
    fn list_modules(&self, package: &str) -> Result<Vec<ModuleRecord>>;

    /// Raw source bytes for a dotted module name. Fails with
    /// [`crate::Error::MissingSource`] when the module exists but ships
    /// no source text (compiled extension modules).
    fn get_source(&self, dotted_name: &str) -> Result<Vec<u8>>;
}
