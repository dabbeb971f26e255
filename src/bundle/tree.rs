//! Primary-tree filtering.
//!
//! Walks the application's own package directory and decides, file by
//! file, what belongs in the archive: python sources anywhere in the
//! tree, plus resource files living directly inside a directory named
//! `templates`.

use crate::bundle::SourceEntry;
use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reserved directory name whose direct children are bundled regardless
/// of extension.
const TEMPLATES_DIR: &str = "templates";

/// Lazily yield every bundled file under `root` as a [`SourceEntry`].
///
/// Archive paths are `<prefix>/<relative path>` with forward slashes,
/// where `prefix` is the primary package's importable name. The root
/// directory's own base name never leaks into archive paths, so the
/// bundle stays importable even when the tree lives in a directory named
/// differently from the package. `exclude_file`, compared by canonical
/// absolute path, names the one file omitted even though it matches the
/// inclusion rule: a packaging helper living inside the tree must not
/// ship in the artifact it builds. The walk is sorted by file name so
/// output is deterministic for the same tree.
pub fn filter_tree(
    root: &Path,
    prefix: &str,
    exclude_file: Option<&Path>,
) -> impl Iterator<Item = Result<SourceEntry>> {
    let root: PathBuf = root.to_path_buf();
    let prefix = prefix.to_string();
    let excluded = exclude_file.and_then(|path| path.canonicalize().ok());

    WalkDir::new(root.clone())
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            if !entry.file_type().is_file() {
                return None;
            }

            let path = entry.path();
            if !is_bundled(path) {
                return None;
            }
            if let Some(excluded) = &excluded {
                if path.canonicalize().ok().as_deref() == Some(excluded) {
                    log::debug!("excluding {} from the bundle", path.display());
                    return None;
                }
            }

            let archive_path = match path.strip_prefix(&root) {
                Ok(rel) => join_archive_path(&prefix, rel),
                Err(_) => return None,
            };
            match std::fs::read(path) {
                Ok(content) => Some(Ok(SourceEntry::new(archive_path, content))),
                Err(e) => Some(Err(e.into())),
            }
        })
}

/// Inclusion rule: python source anywhere, anything directly inside a
/// `templates` directory.
fn is_bundled(path: &Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy());
    let is_source = name.map(|n| n.ends_with(".py")).unwrap_or(false);
    let in_templates = path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n == TEMPLATES_DIR)
        .unwrap_or(false);
    is_source || in_templates
}

fn join_archive_path(prefix: &str, rel: &Path) -> String {
    let mut out = prefix.to_string();
    for component in rel.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}
