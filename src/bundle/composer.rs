//! Bootstrap composition: header plus archive, one output stream.

use crate::bundle::{resolver, stamp, tree, ArchiveWriter, EntryRule, SourceEntry};
use crate::catalog::SourceCatalog;
use crate::config::BundleConfig;
use crate::error::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Fixed POSIX-shell bootstrap prefixed to the archive.
///
/// Probes a prioritized list of interpreters and re-execs this same file
/// through the first one found. Exit 1 means no supported interpreter
/// (the diagnostic names whichever python, if any, was found but is
/// unsupported); exit 5 means the re-exec itself failed. These are exit
/// codes of the shipped artifact, not of the build tool.
pub const SHELL_SCRIPT: &str = r#"#!/bin/sh
if [ "${LANG:-C}" = "C" ]; then
    export LANG="en_US.utf8"
fi

python=$({ which python2.7 ||
           which python2.6 ||
           which python3; } 2>/dev/null)

if [ $? -ne 0 ]; then
    echo "No supported python command found." >&2
    python=$(which python 2>/dev/null)
    if [ $? -eq 0 ]; then
        echo "However, found $(${python} -V 2>&1)" >&2
    fi
    echo "This program requires python2.6+, or python3+." >&2
    echo "Aborting." >&2
    exit 1
fi
exec ${python} $0 $@ || exit 5
"#;

/// Drives the whole assembly: output resource, header, primary tree,
/// dependencies, finalization. Strictly sequential, no retries; any
/// failure is a hard stop and may leave a partial artifact on disk.
pub struct Composer<'a> {
    config: &'a BundleConfig,
    catalog: &'a dyn SourceCatalog,
}

impl<'a> Composer<'a> {
    pub fn new(config: &'a BundleConfig, catalog: &'a dyn SourceCatalog) -> Self {
        Self { config, catalog }
    }

    /// Assemble the bundle into `<dist_dir>/<package>.sh` and return the
    /// produced path.
    pub fn compose(&self, dist_dir: &Path, tag: &str) -> Result<PathBuf> {
        create_output_dir(dist_dir)?;

        // Stamp up front: a primary package without a version line must
        // abort before any archive content is written.
        let root = self.config.package_root();
        let init_source = std::fs::read(root.join("__init__.py"))?;
        let stamped = stamp::stamp(&init_source, tag)?;

        let out_path = dist_dir.join(self.config.artifact_name());
        log::info!("Assembling {}", out_path.display());

        let mut file = std::fs::File::create(&out_path)?;

        // Owner rwx before any content, so a partially written file is
        // never left without its execute bit.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o700))?;
        }

        file.write_all(SHELL_SCRIPT.as_bytes())?;

        let rules = self.entry_rules(stamped);
        let mut archive = ArchiveWriter::new(file);

        let exclude = self.config.package.exclude_file.as_deref();
        for entry in tree::filter_tree(&root, &self.config.package.name, exclude) {
            let entry = EntryRule::rewrite(&rules, entry?);
            archive.add_bytes(&entry.archive_path, &entry.content)?;
        }

        for dependency in &self.config.dependencies {
            log::debug!("embedding dependency {}", dependency.name);
            for entry in resolver::resolve(self.catalog, dependency)? {
                let entry = entry?;
                archive.add_bytes(&entry.archive_path, &entry.content)?;
            }
        }

        archive.finish()?;
        log::info!("✓ Created bundle: {}", out_path.display());
        Ok(out_path)
    }

    /// Streaming rules: relocate the entry-point file to the archive
    /// root, substitute the stamped bytes for the primary init entry.
    fn entry_rules(&self, stamped: Vec<u8>) -> Vec<EntryRule<'static>> {
        let entry_point = self.config.package.entry_point.clone();
        let relocated = entry_point.clone();
        let init_path = self.config.init_archive_path();

        vec![
            EntryRule::new(
                move |entry: &SourceEntry| entry.base_name() == entry_point,
                move |mut entry| {
                    entry.archive_path = relocated.clone();
                    entry
                },
            ),
            EntryRule::new(
                move |entry: &SourceEntry| entry.archive_path == init_path,
                move |mut entry| {
                    entry.content = stamped.clone();
                    entry
                },
            ),
        ]
    }
}

/// Idempotent output-directory creation: tolerates an already existing
/// directory, fails on anything else. A plain file occupying the dist
/// path also reports AlreadyExists, so the arm re-checks it is a
/// directory.
fn create_output_dir(path: &Path) -> Result<()> {
    match std::fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(Error::OutputDir {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
