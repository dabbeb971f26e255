//! Bundle manifest loading.
//!
//! The manifest (`bundle.toml` by convention) names the primary package,
//! the interpreter search path used for dependency discovery, and the
//! static table of dependency packages with their excluded-module
//! prefixes. Read and parsed exactly once per run.

use crate::bundle::PackageSpec;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Complete bundle manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// Primary package section
    pub package: PackageConfig,

    /// Roots searched for dependency packages (defaults to the current
    /// directory)
    #[serde(default = "default_search_path")]
    pub search_path: Vec<PathBuf>,

    /// Dependency table: `[[dependency]]` entries
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<PackageSpec>,
}

/// Primary package metadata from the manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// Importable name of the primary package
    pub name: String,

    /// Directory holding the package tree (defaults to `./<name>`)
    pub root: Option<PathBuf>,

    /// Base name of the file executed when the archive runs; relocated to
    /// the archive root
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// A file inside the tree to omit from the bundle (e.g. a build
    /// helper that must not ship in the artifact it builds)
    pub exclude_file: Option<PathBuf>,
}

fn default_search_path() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

fn default_entry_point() -> String {
    "__main__.py".to_string()
}

impl BundleConfig {
    /// Load a manifest from disk (single read + parse)
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: BundleConfig = toml::from_str(&raw).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if config.package.name.is_empty() {
            return Err(Error::Config {
                path: path.to_path_buf(),
                message: "package.name must not be empty".to_string(),
            });
        }

        Ok(config)
    }

    /// Directory the primary tree is walked from
    pub fn package_root(&self) -> PathBuf {
        self.package
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.package.name))
    }

    /// Name of the produced artifact inside the dist directory
    pub fn artifact_name(&self) -> String {
        format!("{}.sh", self.package.name)
    }

    /// Archive path of the primary package's init file (the one entry
    /// that gets version-stamped)
    pub fn init_archive_path(&self) -> String {
        format!("{}/__init__.py", self.package.name)
    }
}
