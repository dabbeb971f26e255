//! In-memory source catalog for tests and embedding.

#![allow(dead_code)]

use super::{ModuleRecord, SourceCatalog};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Source catalog answering from an in-memory fixture tree.
///
/// Modules are listed in insertion order, which stands in for the
/// filesystem discovery order of [`super::FsCatalog`].
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    /// Insertion-ordered (dotted name, is_package) pairs
    modules: Vec<(String, bool)>,
    /// `None` marks a module that exists but has no retrievable source
    sources: HashMap<String, Option<Vec<u8>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package (top-level or nested) with its init source.
    pub fn add_package(&mut self, dotted_name: &str, source: &[u8]) -> &mut Self {
        self.modules.push((dotted_name.to_string(), true));
        self.sources
            .insert(dotted_name.to_string(), Some(source.to_vec()));
        self
    }

    /// Register a plain module with its source.
    pub fn add_module(&mut self, dotted_name: &str, source: &[u8]) -> &mut Self {
        self.modules.push((dotted_name.to_string(), false));
        self.sources
            .insert(dotted_name.to_string(), Some(source.to_vec()));
        self
    }

    /// Register a module that is discoverable but ships no source text,
    /// like a compiled extension.
    pub fn add_sourceless_module(&mut self, dotted_name: &str) -> &mut Self {
        self.modules.push((dotted_name.to_string(), false));
        self.sources.insert(dotted_name.to_string(), None);
        self
    }
}

impl SourceCatalog for MemoryCatalog {
    fn list_modules(&self, package: &str) -> Result<Vec<ModuleRecord>> {
        if !self.sources.contains_key(package) {
            return Err(Error::PackageNotFound {
                package: package.to_string(),
            });
        }
        let prefix = format!("{package}.");
        Ok(self
            .modules
            .iter()
            .filter(|(name, _)| name.starts_with(&prefix))
            .map(|(name, is_package)| ModuleRecord {
                name: name.clone(),
                is_package: *is_package,
            })
            .collect())
    }

    fn get_source(&self, dotted_name: &str) -> Result<Vec<u8>> {
        match self.sources.get(dotted_name) {
            Some(Some(source)) => Ok(source.clone()),
            Some(None) => Err(Error::MissingSource {
                module: dotted_name.to_string(),
            }),
            None if !dotted_name.contains('.') => Err(Error::PackageNotFound {
                package: dotted_name.to_string(),
            }),
            None => Err(Error::MissingSource {
                module: dotted_name.to_string(),
            }),
        }
    }
}
