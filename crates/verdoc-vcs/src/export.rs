// Copyright 2026 Oxide Computer Company

//! Per-revision tree export.

use crate::{ExportError, GitRepo};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use fs_err as fs;
use tracing::{debug, info};
use verdoc_versions::CommitSha;

/// Materializes revision trees under an export root, one directory per
/// sha.
///
/// Each export lands at `<export_root>/<sha>` and contains exactly the
/// revision's tracked files: no repository metadata, no untracked or
/// ignored files. Exports are keyed by revision, so two refs pointing at
/// the same commit share one directory, and a directory that already
/// exists is reused rather than rebuilt.
///
/// An export is unpacked into a temporary directory and renamed into
/// place, so a crash mid-export never leaves a partial tree at the final
/// path.
#[derive(Debug, Clone)]
pub struct Exporter {
    export_root: Utf8PathBuf,
}

impl Exporter {
    /// Creates an exporter rooted at `export_root`.
    ///
    /// The directory is created on first use, not here.
    pub fn new(export_root: impl Into<Utf8PathBuf>) -> Self {
        Exporter { export_root: export_root.into() }
    }

    /// Returns the export root.
    pub fn export_root(&self) -> &Utf8Path {
        &self.export_root
    }

    /// Exports a revision's tracked tree, returning its directory.
    ///
    /// If `<export_root>/<sha>` already exists it is returned as-is.
    /// Otherwise the tree is captured with `git archive`, unpacked into a
    /// staging directory under the export root, and renamed into place.
    pub fn export(
        &self,
        repo: &GitRepo,
        sha: CommitSha,
    ) -> Result<Utf8PathBuf, ExportError> {
        fs::create_dir_all(&self.export_root).map_err(|source| {
            ExportError::CreateDir {
                path: self.export_root.clone(),
                source,
            }
        })?;

        let target = self.export_root.join(sha.to_string());
        match target.try_exists() {
            Ok(true) => {
                debug!(%sha, "reusing existing export");
                return Ok(target);
            }
            Ok(false) => {}
            Err(source) => {
                return Err(ExportError::Io { path: target, source });
            }
        }

        let archive_bytes = repo.archive(sha)?;

        let staging = Utf8TempDir::with_prefix_in(".export-", &self.export_root)
            .map_err(|source| ExportError::CreateStaging {
                path: self.export_root.clone(),
                source,
            })?;

        let mut archive = tar::Archive::new(archive_bytes.as_slice());
        archive.unpack(staging.path()).map_err(|source| {
            ExportError::Unpack { sha, source }
        })?;

        match fs::rename(staging.path(), &target) {
            Ok(()) => {}
            Err(source) => {
                // Another export of the same sha may have published the
                // directory first; the existing tree is equivalent.
                if matches!(target.try_exists(), Ok(true)) {
                    debug!(%sha, "export raced; reusing published tree");
                    return Ok(target);
                }
                return Err(ExportError::Publish { path: target, source });
            }
        }

        info!(%sha, path = %target, "exported revision");
        Ok(target)
    }
}
