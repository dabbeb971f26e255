//! Dependency module source resolution.

use crate::bundle::{PackageSpec, SourceEntry};
use crate::catalog::{ModuleRecord, SourceCatalog};
use crate::error::Result;

/// Lazily yield the archive entries for one dependency package.
///
/// The package's own init file comes first, as
/// `<name>/__init__.py`, followed by every transitive submodule the
/// catalog discovers, minus those matching an excluded prefix. Source
/// retrieval happens per entry, so a sourceless module (compiled
/// extension) fails the run exactly when it is reached: the "this
/// dependency ships as pure source" assumption is violated and the
/// resolution must not silently skip it.
pub fn resolve<'a>(
    catalog: &'a dyn SourceCatalog,
    spec: &'a PackageSpec,
) -> Result<impl Iterator<Item = Result<SourceEntry>> + 'a> {
    let init = catalog.get_source(&spec.name)?;
    let modules = catalog.list_modules(&spec.name)?;
    log::debug!(
        "resolved {} submodules under package {}",
        modules.len(),
        spec.name
    );

    let first = SourceEntry::new(format!("{}/__init__.py", spec.name), init);
    let rest = modules
        .into_iter()
        .filter(move |module| !spec.is_excluded(&module.name))
        .map(move |module| {
            let content = catalog.get_source(&module.name)?;
            Ok(SourceEntry::new(archive_path(&module), content))
        });

    Ok(std::iter::once(Ok(first)).chain(rest))
}

/// Dots become slashes; packages keep their init file name, plain
/// modules get the source suffix.
fn archive_path(module: &ModuleRecord) -> String {
    let mut path = module.name.replace('.', "/");
    if module.is_package {
        path.push_str("/__init__.py");
    } else {
        path.push_str(".py");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::error::Error;

    fn spec(name: &str, excludes: &[&str]) -> PackageSpec {
        PackageSpec {
            name: name.to_string(),
            excluded_prefixes: excludes.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn paths(catalog: &MemoryCatalog, spec: &PackageSpec) -> Vec<String> {
        resolve(catalog, spec)
            .expect("resolve")
            .map(|entry| entry.expect("entry").archive_path)
            .collect()
    }

    #[test]
    fn yields_init_first_then_every_submodule() {
        let mut catalog = MemoryCatalog::new();
        catalog
            .add_package("a", b"# a\n")
            .add_module("a.b", b"# b\n")
            .add_module("a.c", b"# c\n");

        assert_eq!(
            paths(&catalog, &spec("a", &[])),
            vec!["a/__init__.py", "a/b.py", "a/c.py"]
        );
    }

    #[test]
    fn nested_packages_keep_their_init_name() {
        let mut catalog = MemoryCatalog::new();
        catalog
            .add_package("pkg", b"")
            .add_package("pkg.sub", b"")
            .add_module("pkg.sub.leaf", b"");

        assert_eq!(
            paths(&catalog, &spec("pkg", &[])),
            vec!["pkg/__init__.py", "pkg/sub/__init__.py", "pkg/sub/leaf.py"]
        );
    }

    #[test]
    fn excluded_prefixes_drop_whole_subtrees() {
        let mut catalog = MemoryCatalog::new();
        catalog
            .add_package("pkg", b"")
            .add_module("pkg.core", b"")
            .add_package("pkg.tests", b"")
            .add_module("pkg.tests.unit", b"");

        let got = paths(&catalog, &spec("pkg", &["pkg.tests"]));
        assert_eq!(got, vec!["pkg/__init__.py", "pkg/core.py"]);
        assert!(got.iter().all(|p| !p.starts_with("pkg/tests")));
    }

    #[test]
    fn sourceless_module_aborts_the_resolution() {
        let mut catalog = MemoryCatalog::new();
        catalog
            .add_package("ext", b"")
            .add_sourceless_module("ext._speedups")
            .add_module("ext.safe", b"");

        let results: Vec<_> = resolve(&catalog, &spec("ext", &[]))
            .expect("resolve")
            .collect();
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1].as_ref().unwrap_err(),
            Error::MissingSource { .. }
        ));
    }

    #[test]
    fn excluding_the_sourceless_module_keeps_the_run_alive() {
        let mut catalog = MemoryCatalog::new();
        catalog
            .add_package("ext", b"")
            .add_sourceless_module("ext._speedups")
            .add_module("ext.safe", b"");

        assert_eq!(
            paths(&catalog, &spec("ext", &["ext._speedups"])),
            vec!["ext/__init__.py", "ext/safe.py"]
        );
    }

    #[test]
    fn unknown_package_fails_up_front() {
        let catalog = MemoryCatalog::new();
        assert!(matches!(
            resolve(&catalog, &spec("ghost", &[])).err(),
            Some(Error::PackageNotFound { .. })
        ));
    }
}
