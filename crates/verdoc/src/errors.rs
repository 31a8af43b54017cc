// Copyright 2026 Oxide Computer Company

//! Error types for rendering and the build pipeline.

use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;
use verdoc_vcs::{DiscoverError, ExportError, OpenRepoError};
use verdoc_versions::VersionsError;

/// An error from rendering one version's documentation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Failed to create the build target directory.
    #[error("failed to create build directory {path}")]
    CreateDir {
        /// The directory path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to read the renderer configuration file.
    #[error("failed to read renderer config at {path}")]
    ConfigRead {
        /// The configuration file path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to spawn the renderer process.
    #[error("failed to run renderer {program:?}")]
    SpawnFailed {
        /// The renderer program.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The renderer exited unsuccessfully.
    #[error("{program} failed ({exit_status}): {stderr}")]
    RendererFailed {
        /// The renderer program.
        program: String,
        /// A human-readable description of the exit status (e.g.,
        /// "exit code 2" or "killed by signal").
        exit_status: String,
        /// The stderr output from the renderer.
        stderr: String,
    },

    /// The renderer exited successfully but produced no landing page.
    #[error("renderer produced no landing page at {path}")]
    MissingLandingPage {
        /// The landing page path that was expected.
        path: Utf8PathBuf,
    },

    /// An I/O error occurred while checking the rendered output.
    #[error("I/O error while checking rendered output at {path}")]
    Io {
        /// The path being checked when the error occurred.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// An error from building one version.
///
/// These are confined to a single version: the pipeline records the
/// failure and continues with the remaining versions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VersionError {
    /// Exporting the version's tree failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Rendering the version's documentation failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Moving the built documentation into the output directory failed.
    #[error("failed to publish built documentation to {path}")]
    Publish {
        /// The destination path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// An error that ends a build run.
///
/// Per-version failures are reported in the build summary instead; these
/// mean no usable output could be produced at all.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// The repository could not be opened.
    #[error(transparent)]
    OpenRepo(#[from] OpenRepoError),

    /// Remote refs could not be discovered.
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    /// No required files were given to qualify refs with.
    #[error("no required files given (at least one is needed to qualify refs)")]
    NoRequiredFiles,

    /// No remote branch or tag contains the required files.
    #[error("no remote branch or tag contains {required_files:?}")]
    NoQualifyingRefs {
        /// The files each qualifying ref was required to contain.
        required_files: Vec<String>,
    },

    /// The version registry rejected an operation.
    #[error(transparent)]
    Registry(#[from] VersionsError),

    /// Failed to create the output directory.
    #[error("failed to create output directory {path}")]
    CreateDir {
        /// The directory path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to create a staging directory.
    #[error("failed to create staging directory under {path}")]
    CreateStaging {
        /// The directory the staging directory was created under.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to list a built version's documentation.
    #[error("failed to list built documentation at {path}")]
    ListOutput {
        /// The directory being listed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Every discovered version failed to build.
    #[error("all {attempted} versions failed to build")]
    AllVersionsFailed {
        /// How many versions were attempted.
        attempted: usize,
    },

    /// The root version failed to build.
    ///
    /// The root version provides the top-level pages of the output
    /// directory, so there is nothing to publish without it.
    #[error("root version {name:?} failed to build")]
    RootVersionFailed {
        /// The root version's name.
        name: String,
        /// The underlying per-version failure.
        #[source]
        source: VersionError,
    },
}
