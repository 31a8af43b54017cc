// Copyright 2026 Oxide Computer Company

//! The multi-version build pipeline.
//!
//! [`run`] ties the pieces together: discover qualifying refs, export
//! and render each one into a staging directory, then publish the root
//! version's pages at the top of the output directory and every other
//! version under its own slug subdirectory.

use crate::{
    errors::{RunError, VersionError},
    renderer::DocBuilder,
};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use fs_err as fs;
use std::{collections::HashMap, io, path::Path};
use tracing::{debug, info, warn};
use verdoc_vcs::{Exporter, GitRepo};
use verdoc_versions::{Version, Versions, VersionsError, slug};

/// Options for a multi-version build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    repo_root: Utf8PathBuf,
    output_root: Utf8PathBuf,
    required_files: Vec<String>,
    root_ref: String,
    export_root: Option<Utf8PathBuf>,
}

impl BuildOptions {
    /// Creates options for building `repo_root` into `output_root`.
    ///
    /// By default refs qualify by containing `conf.py` and `master` is
    /// the root version.
    pub fn new(
        repo_root: impl Into<Utf8PathBuf>,
        output_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            repo_root: repo_root.into(),
            output_root: output_root.into(),
            required_files: vec!["conf.py".to_string()],
            root_ref: "master".to_string(),
            export_root: None,
        }
    }

    /// Sets the files a ref must contain to qualify as a version.
    pub fn required_files(mut self, files: Vec<String>) -> Self {
        self.required_files = files;
        self
    }

    /// Sets the ref whose documentation lands at the top of the output
    /// directory.
    pub fn root_ref(mut self, name: impl Into<String>) -> Self {
        self.root_ref = name.into();
        self
    }

    /// Keeps exported trees under `path` instead of a temporary
    /// directory, so later runs reuse them.
    pub fn export_root(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.export_root = Some(path.into());
        self
    }
}

/// One successfully built version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltVersion {
    /// The version name (its ref name).
    pub name: String,
    /// The version's landing page, relative to the output root.
    pub url: String,
}

/// One version that failed to build.
#[derive(Debug)]
pub struct VersionFailure {
    /// The version name.
    pub name: String,
    /// What went wrong.
    pub error: VersionError,
}

/// The outcome of a build run.
#[derive(Debug)]
pub struct BuildSummary {
    /// Successfully built versions, in registry order.
    pub versions: Vec<BuiltVersion>,
    /// Versions that failed, in the order the failures occurred.
    pub failures: Vec<VersionFailure>,
}

/// A version rendered into the staging directory, not yet published.
#[derive(Debug)]
struct StagedBuild {
    dir: Utf8PathBuf,
    landing_page: String,
}

/// Runs a full multi-version build.
///
/// Individual version failures are confined to that version and
/// reported in the summary. The run fails outright only if discovery
/// finds nothing, the root version fails, or every version fails.
pub fn run(
    options: &BuildOptions,
    builder: &dyn DocBuilder,
) -> Result<BuildSummary, RunError> {
    if options.required_files.is_empty() {
        return Err(RunError::NoRequiredFiles);
    }

    let repo = GitRepo::open(&options.repo_root)?;
    let refs = repo.discover(&options.required_files)?;
    if refs.is_empty() {
        return Err(RunError::NoQualifyingRefs {
            required_files: options.required_files.clone(),
        });
    }

    let mut versions = Versions::from_refs(refs.iter().cloned());
    if versions.len() < refs.len() {
        // A name can be listed as both a branch and a tag; the earlier
        // listing wins.
        for remote_ref in &refs {
            if let Ok(kept) = versions.get(&remote_ref.name) {
                if kept.sha() != remote_ref.sha
                    || kept.kind() != remote_ref.kind
                {
                    warn!(
                        name = %remote_ref.name,
                        kind = %remote_ref.kind,
                        sha = %remote_ref.sha,
                        "duplicate version name; keeping the earlier ref"
                    );
                }
            }
        }
    }
    versions.set_root(&options.root_ref)?;

    fs::create_dir_all(&options.output_root).map_err(|source| {
        RunError::CreateDir { path: options.output_root.clone(), source }
    })?;

    let (export_root, _temp_exports) = match &options.export_root {
        Some(root) => (root.clone(), None),
        None => {
            let temp = Utf8TempDir::with_prefix("verdoc-exports-").map_err(
                |source| RunError::CreateStaging {
                    path: system_temp_dir(),
                    source,
                },
            )?;
            (temp.path().to_owned(), Some(temp))
        }
    };
    let exporter = Exporter::new(export_root);

    // Staging lives inside the output directory so publishing a build
    // is a same-filesystem rename.
    let stage = Utf8TempDir::with_prefix_in(".stage-", &options.output_root)
        .map_err(|source| RunError::CreateStaging {
            path: options.output_root.clone(),
            source,
        })?;

    let mut root_outcome: Option<Result<StagedBuild, VersionError>> = None;
    let mut staged: Vec<(String, StagedBuild)> = Vec::new();
    let mut failures: Vec<VersionFailure> = Vec::new();

    for (index, version) in versions.all().iter().enumerate() {
        let outcome = build_version(
            &repo,
            &exporter,
            builder,
            options,
            stage.path(),
            index,
            version,
        );
        match outcome {
            Ok(build) if version.is_root() => {
                root_outcome = Some(Ok(build));
            }
            Ok(build) => {
                staged.push((version.name().to_string(), build));
            }
            Err(error) => {
                warn!(
                    name = %version.name(),
                    error = %error,
                    "version failed to build"
                );
                if version.is_root() {
                    root_outcome = Some(Err(error));
                } else {
                    failures.push(VersionFailure {
                        name: version.name().to_string(),
                        error,
                    });
                }
            }
        }
    }

    if staged.is_empty() && !matches!(&root_outcome, Some(Ok(_))) {
        return Err(RunError::AllVersionsFailed { attempted: versions.len() });
    }
    let root_build = match root_outcome {
        Some(Ok(build)) => build,
        Some(Err(source)) => {
            return Err(RunError::RootVersionFailed {
                name: options.root_ref.clone(),
                source,
            });
        }
        // set_root guarantees the root is in the registry, so the loop
        // produced an outcome for it.
        None => {
            return Err(RunError::Registry(VersionsError::NotFound {
                name: options.root_ref.clone(),
            }));
        }
    };

    let mut root_entries = Vec::new();
    for entry in fs::read_dir(&root_build.dir).map_err(|source| {
        RunError::ListOutput { path: root_build.dir.clone(), source }
    })? {
        let entry = entry.map_err(|source| RunError::ListOutput {
            path: root_build.dir.clone(),
            source,
        })?;
        root_entries.push((entry.path(), entry.file_name()));
    }

    // Top-level names the non-root slugs must avoid: the root version's
    // own pages plus the staging directory itself. Pre-existing output
    // entries are deliberately not included, so a version keeps the
    // same slug from run to run.
    let mut reserved: Vec<String> = Vec::new();
    if let Some(name) = stage.path().file_name() {
        reserved.push(name.to_string());
    }
    reserved.extend(
        root_entries
            .iter()
            .map(|(_, name)| name.to_string_lossy().into_owned()),
    );
    let assignments = slug::assign_slugs(&versions, reserved);

    // The root version's pages land directly at the top of the output
    // directory.
    for (path, file_name) in &root_entries {
        let target = options.output_root.as_std_path().join(file_name);
        replace_entry(path, &target).map_err(|source| {
            RunError::RootVersionFailed {
                name: options.root_ref.clone(),
                source: VersionError::Publish {
                    path: options.output_root.clone(),
                    source,
                },
            }
        })?;
    }
    versions.set_url(&options.root_ref, root_build.landing_page.as_str())?;
    info!(
        name = %options.root_ref,
        url = %root_build.landing_page,
        "published root version"
    );

    let mut pending: HashMap<String, StagedBuild> =
        staged.into_iter().collect();
    for (name, target_slug) in &assignments {
        // Failed versions still hold their slug; there is just nothing
        // to publish for them.
        let Some(build) = pending.remove(name) else {
            continue;
        };
        let target = options.output_root.join(target_slug);
        match replace_entry(build.dir.as_std_path(), target.as_std_path()) {
            Ok(()) => {
                let url = format!("{target_slug}/{}", build.landing_page);
                versions.set_url(name, url.as_str())?;
                info!(name = %name, url = %url, "published version");
            }
            Err(source) => {
                warn!(
                    name = %name,
                    path = %target,
                    error = %source,
                    "failed to publish version"
                );
                failures.push(VersionFailure {
                    name: name.clone(),
                    error: VersionError::Publish { path: target, source },
                });
            }
        }
    }

    let mut built = Vec::new();
    for version in versions.all() {
        if let Some(url) = version.url() {
            built.push(BuiltVersion {
                name: version.name().to_string(),
                url: url.to_string(),
            });
        }
    }

    info!(
        built = built.len(),
        failed = failures.len(),
        output = %options.output_root,
        "build complete"
    );

    Ok(BuildSummary { versions: built, failures })
}

/// Exports and renders one version into the staging directory.
fn build_version(
    repo: &GitRepo,
    exporter: &Exporter,
    builder: &dyn DocBuilder,
    options: &BuildOptions,
    stage_root: &Utf8Path,
    index: usize,
    version: &Version,
) -> Result<StagedBuild, VersionError> {
    let export = exporter.export(repo, version.sha())?;

    // The renderer runs in the directory holding the first required
    // file, which is the renderer config in the common layout.
    let source_dir = match options.required_files.first() {
        Some(marker) => match Utf8Path::new(marker).parent() {
            Some(parent) if !parent.as_str().is_empty() => {
                export.join(parent)
            }
            _ => export.clone(),
        },
        None => export.clone(),
    };

    let target = stage_root.join(index.to_string());
    debug!(
        name = %version.name(),
        sha = %version.sha(),
        source = %source_dir,
        "rendering version"
    );
    let rendered = builder.build(&source_dir, &target)?;

    Ok(StagedBuild { dir: target, landing_page: rendered.landing_page })
}

/// Moves `source` to `target`, replacing whatever is already there.
fn replace_entry(source: &Path, target: &Path) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(target)?,
        Ok(_) => fs::remove_file(target)?,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    fs::rename(source, target)
}

/// The system temporary directory, for error reporting.
fn system_temp_dir() -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(std::env::temp_dir())
        .unwrap_or_else(|path| path.to_string_lossy().into_owned().into())
}
