//! Filesystem-backed source catalog.

use super::{ModuleRecord, SourceCatalog};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Compiled extension suffixes: discovered as modules, but carry no
/// retrievable source.
const BINARY_SUFFIXES: [&str; 2] = [".so", ".pyd"];

/// Source catalog backed by package directories on a search path.
///
/// A top-level package is a directory named after the package, containing
/// an `__init__.py`, under one of the search roots. Discovery descends
/// only into subdirectories that are themselves packages, the same shape
/// a live interpreter would walk.
#[derive(Debug, Clone)]
pub struct FsCatalog {
    search_path: Vec<PathBuf>,
}

impl FsCatalog {
    /// Create a catalog over the given search roots, tried in order.
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }

    /// Locate the directory of a top-level package.
    fn package_dir(&self, package: &str) -> Result<PathBuf> {
        for root in &self.search_path {
            let candidate = root.join(package);
            if candidate.join("__init__.py").is_file() {
                return Ok(candidate);
            }
        }
        Err(Error::PackageNotFound {
            package: package.to_string(),
        })
    }
}

impl SourceCatalog for FsCatalog {
    fn list_modules(&self, package: &str) -> Result<Vec<ModuleRecord>> {
        let dir = self.package_dir(package)?;
        let mut records = Vec::new();
        collect_modules(&dir, package, &mut records)?;
        Ok(records)
    }

    fn get_source(&self, dotted_name: &str) -> Result<Vec<u8>> {
        let mut parts = dotted_name.split('.');
        let top = parts.next().unwrap_or(dotted_name);
        let mut path = self.package_dir(top)?;
        for part in parts {
            path.push(part);
        }

        if path.is_dir() {
            let init = path.join("__init__.py");
            if init.is_file() {
                return Ok(std::fs::read(init)?);
            }
        } else {
            let module = path.with_extension("py");
            if module.is_file() {
                return Ok(std::fs::read(module)?);
            }
        }

        Err(Error::MissingSource {
            module: dotted_name.to_string(),
        })
    }
}

/// Depth-first module discovery under one package directory.
///
/// Entries are visited in file-name order so the result is stable for the
/// same tree. A compiled extension is recorded only when no plain-source
/// module shadows its stem.
fn collect_modules(dir: &Path, prefix: &str, out: &mut Vec<ModuleRecord>) -> Result<()> {
    let mut entries: Vec<_> =
        std::fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    let source_stems: HashSet<String> = entries
        .iter()
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            name.strip_suffix(".py").map(str::to_string)
        })
        .collect();

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if path.is_dir() {
            // Plain directories without an init file are not importable
            if path.join("__init__.py").is_file() {
                let dotted = format!("{prefix}.{name}");
                out.push(ModuleRecord {
                    name: dotted.clone(),
                    is_package: true,
                });
                collect_modules(&path, &dotted, out)?;
            }
        } else if let Some(stem) = name.strip_suffix(".py") {
            if stem != "__init__" {
                out.push(ModuleRecord {
                    name: format!("{prefix}.{stem}"),
                    is_package: false,
                });
            }
        } else if BINARY_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            // `_speedups.cpython-311-x86_64-linux-gnu.so` -> `_speedups`
            let stem = name.split('.').next().unwrap_or(&name);
            if !stem.is_empty() && !source_stems.contains(stem) {
                out.push(ModuleRecord {
                    name: format!("{prefix}.{stem}"),
                    is_package: false,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path, content: &[u8]) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("mkdir");
        }
        std::fs::write(path, content).expect("write");
    }

    fn fixture_catalog() -> (tempfile::TempDir, FsCatalog) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        touch(&root.join("pkg/__init__.py"), b"# pkg\n");
        touch(&root.join("pkg/util.py"), b"# util\n");
        touch(&root.join("pkg/sub/__init__.py"), b"# sub\n");
        touch(&root.join("pkg/sub/deep.py"), b"# deep\n");
        touch(&root.join("pkg/data/readme.txt"), b"not a module\n");
        let catalog = FsCatalog::new(vec![root.to_path_buf()]);
        (dir, catalog)
    }

    #[test]
    fn lists_transitive_modules_in_stable_order() {
        let (_dir, catalog) = fixture_catalog();
        let modules = catalog.list_modules("pkg").expect("list");
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["pkg.sub", "pkg.sub.deep", "pkg.util"]);
        assert!(modules[0].is_package);
        assert!(!modules[1].is_package);
    }

    #[test]
    fn non_package_directories_are_not_descended() {
        let (_dir, catalog) = fixture_catalog();
        let modules = catalog.list_modules("pkg").expect("list");
        assert!(modules.iter().all(|m| !m.name.contains("data")));
    }

    #[test]
    fn reads_source_for_packages_and_modules() {
        let (_dir, catalog) = fixture_catalog();
        assert_eq!(catalog.get_source("pkg").expect("init"), b"# pkg\n");
        assert_eq!(catalog.get_source("pkg.sub").expect("sub"), b"# sub\n");
        assert_eq!(catalog.get_source("pkg.sub.deep").expect("deep"), b"# deep\n");
    }

    #[test]
    fn compiled_module_is_discovered_but_has_no_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        touch(&root.join("ext/__init__.py"), b"");
        touch(
            &root.join("ext/_speedups.cpython-311-x86_64-linux-gnu.so"),
            b"\x7fELF",
        );
        let catalog = FsCatalog::new(vec![root.to_path_buf()]);

        let modules = catalog.list_modules("ext").expect("list");
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "ext._speedups");

        let err = catalog.get_source("ext._speedups").unwrap_err();
        assert!(matches!(err, Error::MissingSource { .. }));
    }

    #[test]
    fn source_module_shadows_compiled_variant() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        touch(&root.join("ext/__init__.py"), b"");
        touch(&root.join("ext/native.py"), b"# fallback\n");
        touch(&root.join("ext/native.so"), b"\x7fELF");
        let catalog = FsCatalog::new(vec![root.to_path_buf()]);

        let modules = catalog.list_modules("ext").expect("list");
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "ext.native");
        assert_eq!(catalog.get_source("ext.native").expect("src"), b"# fallback\n");
    }

    #[test]
    fn unknown_package_is_an_error() {
        let (_dir, catalog) = fixture_catalog();
        let err = catalog.list_modules("ghost").unwrap_err();
        assert!(matches!(err, Error::PackageNotFound { .. }));
    }

    #[test]
    fn search_roots_are_tried_in_order() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        touch(&second.path().join("pkg/__init__.py"), b"# from second\n");
        let catalog = FsCatalog::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(catalog.get_source("pkg").expect("src"), b"# from second\n");
    }
}
