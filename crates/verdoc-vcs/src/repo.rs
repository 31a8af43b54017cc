// Copyright 2026 Oxide Computer Company

//! A local git clone and the remote ref queries run against it.

use crate::{DiscoverError, ExportError, GitEnvError, OpenRepoError};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::{io, process::Command};
use tracing::{debug, info};
use verdoc_versions::{CommitSha, RefKind, RemoteRef};

/// The remote that versions are discovered from.
const REMOTE: &str = "origin";

/// Reads the git binary path from an environment variable, falling back
/// to `default` if the variable is unset or empty.
///
/// The value is trimmed of leading and trailing whitespace.
///
/// Returns an error if the variable is set but is not valid UTF-8.
fn read_git_env(
    var: &'static str,
    default: &str,
) -> Result<String, GitEnvError> {
    match std::env::var(var) {
        Ok(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(default.to_string())
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(std::env::VarError::NotUnicode(value)) => {
            Err(GitEnvError::NonUtf8 { var, value })
        }
    }
}

/// A local clone of the repository whose versions are being built.
///
/// All remote queries go through the `origin` remote of this clone, by
/// running the git binary as a subprocess. Use [`GitRepo::open`] to
/// validate the clone and locate the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRepo {
    repo_root: Utf8PathBuf,
    binary: String,
}

impl GitRepo {
    /// Opens the repository at `repo_root`.
    ///
    /// `repo_root` must be an existing directory containing `.git`
    /// (a directory, or a file as in worktrees and submodules). The git
    /// binary comes from the `$GIT` environment variable, falling back to
    /// `"git"`.
    pub fn open(
        repo_root: impl Into<Utf8PathBuf>,
    ) -> Result<Self, OpenRepoError> {
        let repo_root = repo_root.into();

        // Use metadata() to distinguish "not a directory" from I/O
        // errors (e.g., permission denied).
        match fs::metadata(&repo_root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(OpenRepoError::NotADirectory { repo_root });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(OpenRepoError::PathNotFound { repo_root });
            }
            Err(err) => {
                return Err(OpenRepoError::Io {
                    path: repo_root,
                    source: err,
                });
            }
        }

        let git_path = repo_root.join(".git");
        match git_path.try_exists() {
            Ok(true) => {}
            Ok(false) => {
                return Err(OpenRepoError::NotFound { repo_root });
            }
            Err(source) => {
                return Err(OpenRepoError::Io { path: git_path, source });
            }
        }

        let binary = read_git_env("GIT", "git")?;
        Ok(GitRepo { repo_root, binary })
    }

    /// Returns the repository root this clone was opened at.
    pub fn root(&self) -> &Utf8Path {
        &self.repo_root
    }

    /// Returns the path to the git binary.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary);
        command.current_dir(&self.repo_root);
        command
    }

    fn spawn_failed(&self, source: io::Error) -> DiscoverError {
        DiscoverError::SpawnFailed {
            binary_path: self.binary.clone(),
            repo_root: self.repo_root.clone(),
            source,
        }
    }

    /// Lists the remote's branches and tags, in remote listing order.
    ///
    /// Runs `git ls-remote --heads --tags origin`. Annotated tags are
    /// recorded with the commit they dereference to (the peeled `^{}`
    /// entry), in the position of the tag itself.
    pub fn list_remote(&self) -> Result<Vec<RemoteRef>, DiscoverError> {
        let output = self
            .command()
            .args(["ls-remote", "--heads", "--tags", REMOTE])
            .output()
            .map_err(|source| self.spawn_failed(source))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiscoverError::GitFailed {
                command: "ls-remote".to_string(),
                exit_status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_ls_remote(&stdout)
    }

    /// Fetches the remote's objects into the local clone.
    ///
    /// Runs `git fetch --quiet --force --tags origin`, so the trees of
    /// every advertised ref are inspectable locally. `--force` keeps
    /// moved tags from failing the fetch.
    pub fn fetch(&self) -> Result<(), DiscoverError> {
        let output = self
            .command()
            .args(["fetch", "--quiet", "--force", "--tags", REMOTE])
            .output()
            .map_err(|source| self.spawn_failed(source))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiscoverError::GitFailed {
                command: "fetch".to_string(),
                exit_status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    /// Checks whether a revision's tree contains a file.
    ///
    /// Runs `git cat-file -e <sha>:<path>`. A failing check means the
    /// file is absent or the object is unavailable; either way the
    /// revision does not qualify.
    pub fn has_file(
        &self,
        sha: CommitSha,
        path: &str,
    ) -> Result<bool, DiscoverError> {
        let output = self
            .command()
            .args(["cat-file", "-e", &format!("{sha}:{path}")])
            .output()
            .map_err(|source| self.spawn_failed(source))?;

        Ok(output.status.success())
    }

    /// Discovers the refs whose trees contain every required file.
    ///
    /// Lists the remote's branches and tags, fetches their objects, and
    /// keeps each ref only if all of `required_files` exist in its tree.
    /// A disqualified ref is skipped, not an error; zero qualifying refs
    /// is a valid empty result. Two refs pointing at the same revision
    /// are both retained, and the remote listing order is preserved.
    pub fn discover(
        &self,
        required_files: &[String],
    ) -> Result<Vec<RemoteRef>, DiscoverError> {
        let refs = self.list_remote()?;
        self.fetch()?;

        let mut qualified = Vec::new();
        for remote_ref in refs {
            let mut missing = None;
            for file in required_files {
                if !self.has_file(remote_ref.sha, file)? {
                    missing = Some(file.as_str());
                    break;
                }
            }
            match missing {
                Some(file) => {
                    debug!(
                        name = %remote_ref.name,
                        kind = %remote_ref.kind,
                        file,
                        "skipping ref without required file"
                    );
                }
                None => qualified.push(remote_ref),
            }
        }

        info!(count = qualified.len(), "discovered buildable versions");
        Ok(qualified)
    }

    /// Captures a revision's tracked tree as an uncompressed tar stream.
    ///
    /// Runs `git archive --format=tar <sha>`. The archive contains only
    /// tracked files, with no repository metadata.
    pub(crate) fn archive(
        &self,
        sha: CommitSha,
    ) -> Result<Vec<u8>, ExportError> {
        let output = self
            .command()
            .args(["archive", "--format=tar", &sha.to_string()])
            .output()
            .map_err(|source| ExportError::SpawnFailed {
                binary_path: self.binary.clone(),
                repo_root: self.repo_root.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ExportError::ArchiveFailed {
                sha,
                exit_status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

/// Parses `git ls-remote --heads --tags` output into ref records.
///
/// Lines are `<sha>\t<refname>`. A `refs/tags/<name>^{}` line carries the
/// commit an annotated tag dereferences to; it replaces the sha of the
/// `<name>` tag recorded just before it. Well-formed lines outside the
/// heads and tags namespaces are skipped; malformed lines are errors.
fn parse_ls_remote(stdout: &str) -> Result<Vec<RemoteRef>, DiscoverError> {
    let mut refs: Vec<RemoteRef> = Vec::new();

    for line in stdout.lines() {
        if line.is_empty() {
            continue;
        }
        let Some((sha, refname)) = line.split_once('\t') else {
            return Err(DiscoverError::UnexpectedOutput {
                line: line.to_string(),
            });
        };

        let sha: CommitSha = sha.parse().map_err(|source| {
            DiscoverError::InvalidSha { refname: refname.to_string(), source }
        })?;

        if let Some(name) = refname.strip_prefix("refs/heads/") {
            refs.push(RemoteRef {
                name: name.to_string(),
                sha,
                kind: RefKind::Branch,
            });
        } else if let Some(tag_ref) = refname.strip_prefix("refs/tags/") {
            if let Some(name) = tag_ref.strip_suffix("^{}") {
                // Peeled entry for an annotated tag.
                let Some(tag) = refs.iter_mut().rev().find(|r| {
                    r.kind == RefKind::Tag && r.name == name
                }) else {
                    return Err(DiscoverError::UnexpectedOutput {
                        line: line.to_string(),
                    });
                };
                tag.sha = sha;
            } else {
                refs.push(RemoteRef {
                    name: tag_ref.to_string(),
                    sha,
                    kind: RefKind::Tag,
                });
            }
        } else {
            debug!(refname, "ignoring ref outside heads and tags");
        }
    }

    Ok(refs)
}
