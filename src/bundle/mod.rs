//! Archive assembly engine.
//!
//! Produces one output file that is simultaneously a POSIX shell script
//! and a ZIP archive: a fixed bootstrap header followed by the compressed
//! sources of the primary package and its dependencies.

pub mod archive;
pub mod composer;
pub mod resolver;
pub mod stamp;
pub mod tree;

pub use archive::ArchiveWriter;
pub use composer::{Composer, SHELL_SCRIPT};

use serde::Deserialize;

/// One dependency package and the submodule-name prefixes to skip
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSpec {
    /// Importable top-level package name
    pub name: String,

    /// Dotted-name prefixes to exclude; a prefix also excludes every
    /// deeper submodule of the matched name
    #[serde(default, rename = "exclude")]
    pub excluded_prefixes: Vec<String>,
}

impl PackageSpec {
    /// Simple starts-with prefix match, first match wins.
    pub fn is_excluded(&self, dotted_name: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| dotted_name.starts_with(prefix.as_str()))
    }
}

/// One file destined for the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Slash-separated path under which the file is stored
    pub archive_path: String,
    /// Raw file content
    pub content: Vec<u8>,
}

impl SourceEntry {
    pub fn new(archive_path: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            archive_path: archive_path.into(),
            content,
        }
    }

    /// Base name component of the archive path
    pub fn base_name(&self) -> &str {
        self.archive_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.archive_path)
    }
}

/// A transform applied, while entries stream into the archive, to every
/// entry matching a predicate.
///
/// Entry-point relocation and version stamping are both instances of this
/// rule shape rather than special-cased branches in the pipeline.
pub struct EntryRule<'a> {
    matches: Box<dyn Fn(&SourceEntry) -> bool + 'a>,
    apply: Box<dyn Fn(SourceEntry) -> SourceEntry + 'a>,
}

impl<'a> EntryRule<'a> {
    pub fn new(
        matches: impl Fn(&SourceEntry) -> bool + 'a,
        apply: impl Fn(SourceEntry) -> SourceEntry + 'a,
    ) -> Self {
        Self {
            matches: Box::new(matches),
            apply: Box::new(apply),
        }
    }

    /// Run every matching rule over one entry, in rule order.
    pub fn rewrite(rules: &[EntryRule<'a>], mut entry: SourceEntry) -> SourceEntry {
        for rule in rules {
            if (rule.matches)(&entry) {
                entry = (rule.apply)(entry);
            }
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_exclusion_covers_deeper_submodules() {
        let spec = PackageSpec {
            name: "pkg".to_string(),
            excluded_prefixes: vec!["pkg.tests".to_string()],
        };
        assert!(spec.is_excluded("pkg.tests"));
        assert!(spec.is_excluded("pkg.tests.unit"));
        assert!(spec.is_excluded("pkg.testsuite"));
        assert!(!spec.is_excluded("pkg.core"));
    }

    #[test]
    fn rules_apply_in_order_to_matching_entries_only() {
        let relocate = EntryRule::new(
            |e: &SourceEntry| e.base_name() == "__main__.py",
            |mut e| {
                e.archive_path = "__main__.py".to_string();
                e
            },
        );
        let tag = EntryRule::new(
            |e: &SourceEntry| e.archive_path == "__main__.py",
            |mut e| {
                e.content = b"tagged".to_vec();
                e
            },
        );
        let rules = [relocate, tag];

        let moved = EntryRule::rewrite(
            &rules,
            SourceEntry::new("pkg/__main__.py", b"orig".to_vec()),
        );
        assert_eq!(moved.archive_path, "__main__.py");
        assert_eq!(moved.content, b"tagged");

        let untouched = EntryRule::rewrite(
            &rules,
            SourceEntry::new("pkg/util.py", b"orig".to_vec()),
        );
        assert_eq!(untouched.archive_path, "pkg/util.py");
        assert_eq!(untouched.content, b"orig");
    }
}
