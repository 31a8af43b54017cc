// Copyright 2026 Oxide Computer Company

//! Error types for git discovery and export operations.

use camino::Utf8PathBuf;
use std::{ffi::OsString, io};
use thiserror::Error;
use verdoc_versions::{CommitSha, ShaParseError};

/// An error from reading the git binary path from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitEnvError {
    /// The environment variable is set but is not valid UTF-8.
    #[error(
        "${var} environment variable is not valid \
         UTF-8: {value:?}"
    )]
    NonUtf8 {
        /// The environment variable name.
        var: &'static str,
        /// The non-UTF-8 value.
        value: OsString,
    },
}

/// An error that occurs while opening a repository.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpenRepoError {
    /// The provided repository root does not exist.
    #[error("{repo_root} does not exist (expected a repository root)")]
    PathNotFound {
        /// The path that was provided.
        repo_root: Utf8PathBuf,
    },

    /// The provided repository root is not a directory.
    #[error("{repo_root} is not a directory (expected a repository root)")]
    NotADirectory {
        /// The path that was provided.
        repo_root: Utf8PathBuf,
    },

    /// An I/O error occurred while probing the repository root.
    #[error("I/O error while checking for a repository at {path}")]
    Io {
        /// The path being checked when the error occurred.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// No `.git` was found at the repository root.
    #[error("no git repository found at {repo_root} (expected .git)")]
    NotFound {
        /// The repository root that was searched.
        repo_root: Utf8PathBuf,
    },

    /// The `$GIT` environment variable is not valid UTF-8.
    #[error(transparent)]
    Env(#[from] GitEnvError),
}

/// An error that occurs while discovering buildable versions.
///
/// Any of these means the remote could not be queried reliably, so the
/// whole discovery is abandoned rather than reporting a partial ref list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscoverError {
    /// Failed to spawn the git process.
    #[error("failed to run git at {binary_path:?} in {repo_root}")]
    SpawnFailed {
        /// The path to the git executable.
        binary_path: String,
        /// The working directory where the command was run.
        repo_root: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A git command failed.
    #[error("git {command} failed ({exit_status}): {stderr}")]
    GitFailed {
        /// The git subcommand that failed (e.g., "ls-remote").
        command: String,
        /// A human-readable description of the exit status (e.g.,
        /// "exit code 128" or "killed by signal").
        exit_status: String,
        /// The stderr output from git.
        stderr: String,
    },

    /// A line of `git ls-remote` output could not be parsed.
    #[error("unexpected ls-remote output line: {line:?}")]
    UnexpectedOutput {
        /// The line that could not be interpreted.
        line: String,
    },

    /// A ref listing contained an invalid revision identifier.
    #[error("invalid commit sha for ref {refname:?}")]
    InvalidSha {
        /// The ref whose sha failed to parse.
        refname: String,
        /// Details about the parsing error.
        #[source]
        source: ShaParseError,
    },
}

/// An error that occurs while exporting a revision's tree.
///
/// Export failures are confined to a single revision: callers processing
/// several versions record the failure and continue with the rest.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Failed to create the export root directory.
    #[error("failed to create export root {path}")]
    CreateDir {
        /// The directory path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to spawn the git process.
    #[error("failed to run git at {binary_path:?} in {repo_root}")]
    SpawnFailed {
        /// The path to the git executable.
        binary_path: String,
        /// The working directory where the command was run.
        repo_root: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// `git archive` failed for the revision.
    #[error("git archive failed for {sha} ({exit_status}): {stderr}")]
    ArchiveFailed {
        /// The revision that was requested.
        sha: CommitSha,
        /// A human-readable description of the exit status (e.g.,
        /// "exit code 128" or "killed by signal").
        exit_status: String,
        /// The stderr output from git.
        stderr: String,
    },

    /// Failed to create the staging directory for an export.
    #[error("failed to create staging directory under {path}")]
    CreateStaging {
        /// The export root the staging directory was created under.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to unpack the archived tree.
    #[error("failed to unpack archive for {sha}")]
    Unpack {
        /// The revision being exported.
        sha: CommitSha,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to move the unpacked tree into place.
    #[error("failed to publish export at {path}")]
    Publish {
        /// The final export path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An I/O error occurred while probing the export directory.
    #[error("I/O error while checking export at {path}")]
    Io {
        /// The path being checked when the error occurred.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}
