// Copyright 2026 Oxide Computer Company

//! Shared repository setup helpers for the integration tests.

use anyhow::Result;
use camino::Utf8Path;
use camino_tempfile::Utf8TempDir;
use std::{fs, process::Command};

/// Returns a `Command` for git, respecting the `$GIT` environment variable.
pub fn git_command() -> Command {
    let bin = std::env::var("GIT").unwrap_or_else(|_| "git".to_string());
    Command::new(bin)
}

/// Initializes a git repository on branch `master` and configures the
/// user.
pub fn init_repo(repo_root: &Utf8Path) -> Result<()> {
    let status = git_command()
        .args(["init", "--initial-branch=master"])
        .current_dir(repo_root)
        .status()?;
    assert!(status.success(), "git init failed");

    let status = git_command()
        .args(["config", "user.email", "test@example.com"])
        .current_dir(repo_root)
        .status()?;
    assert!(status.success(), "git config user.email failed");

    let status = git_command()
        .args(["config", "user.name", "Test User"])
        .current_dir(repo_root)
        .status()?;
    assert!(status.success(), "git config user.name failed");

    Ok(())
}

/// Writes a file into the working tree without committing it.
pub fn stage_file(
    repo_root: &Utf8Path,
    rel_path: &str,
    contents: &str,
) -> Result<()> {
    let path = repo_root.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    Ok(())
}

/// Commits everything in the working tree. Returns the commit hash.
pub fn commit_all(repo_root: &Utf8Path, message: &str) -> Result<String> {
    let status =
        git_command().args(["add", "."]).current_dir(repo_root).status()?;
    assert!(status.success(), "git add failed");

    let status = git_command()
        .args(["commit", "-m", message])
        .current_dir(repo_root)
        .status()?;
    assert!(status.success(), "git commit failed");

    rev_parse(repo_root, "HEAD")
}

/// Writes a file and commits the working tree. Returns the commit hash.
pub fn commit_file(
    repo_root: &Utf8Path,
    rel_path: &str,
    contents: &str,
    message: &str,
) -> Result<String> {
    stage_file(repo_root, rel_path, contents)?;
    commit_all(repo_root, message)
}

/// Resolves a revision to its commit hash.
pub fn rev_parse(repo_root: &Utf8Path, rev: &str) -> Result<String> {
    let output = git_command()
        .args(["rev-parse", rev])
        .current_dir(repo_root)
        .output()?;
    assert!(
        output.status.success(),
        "git rev-parse {} failed: {}",
        rev,
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Creates and checks out a new branch.
pub fn checkout_new_branch(repo_root: &Utf8Path, name: &str) -> Result<()> {
    let status = git_command()
        .args(["checkout", "-b", name])
        .current_dir(repo_root)
        .status()?;
    assert!(status.success(), "git checkout -b {name} failed");
    Ok(())
}

/// Checks out an existing branch.
pub fn checkout(repo_root: &Utf8Path, name: &str) -> Result<()> {
    let status = git_command()
        .args(["checkout", name])
        .current_dir(repo_root)
        .status()?;
    assert!(status.success(), "git checkout {name} failed");
    Ok(())
}

/// Removes a tracked file and commits the removal.
pub fn remove_and_commit(
    repo_root: &Utf8Path,
    rel_path: &str,
    message: &str,
) -> Result<String> {
    let status = git_command()
        .args(["rm", "--quiet", rel_path])
        .current_dir(repo_root)
        .status()?;
    assert!(status.success(), "git rm {rel_path} failed");
    commit_all(repo_root, message)
}

/// Creates a lightweight tag at HEAD.
pub fn tag(repo_root: &Utf8Path, name: &str) -> Result<()> {
    let status =
        git_command().args(["tag", name]).current_dir(repo_root).status()?;
    assert!(status.success(), "git tag {name} failed");
    Ok(())
}

/// Creates an annotated tag at HEAD.
pub fn tag_annotated(
    repo_root: &Utf8Path,
    name: &str,
    message: &str,
) -> Result<()> {
    let status = git_command()
        .args(["tag", "-a", name, "-m", message])
        .current_dir(repo_root)
        .status()?;
    assert!(status.success(), "git tag -a {name} failed");
    Ok(())
}

/// Clones `origin` into `dest`.
pub fn clone_repo(origin: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    let status = git_command()
        .args(["clone", "--quiet", origin.as_str(), dest.as_str()])
        .status()?;
    assert!(status.success(), "git clone failed");
    Ok(())
}

/// Creates an origin repository with a `conf.py` commit on `master` and
/// a local clone of it. Returns (origin, clone, master commit hash).
pub fn setup_cloned_repo() -> Result<(Utf8TempDir, Utf8TempDir, String)> {
    let origin = Utf8TempDir::with_prefix("verdoc-origin-")?;
    init_repo(origin.path())?;
    let sha = commit_file(
        origin.path(),
        "conf.py",
        "project = 'docs'\n",
        "Add docs config",
    )?;

    let clone = Utf8TempDir::with_prefix("verdoc-clone-")?;
    clone_repo(origin.path(), clone.path())?;

    Ok((origin, clone, sha))
}

/// Creates a standalone repository with a `conf.py` commit on `master`.
/// Returns (repo, commit hash).
pub fn setup_local_repo() -> Result<(Utf8TempDir, String)> {
    let repo = Utf8TempDir::with_prefix("verdoc-repo-")?;
    init_repo(repo.path())?;
    let sha = commit_file(
        repo.path(),
        "conf.py",
        "project = 'docs'\n",
        "Add docs config",
    )?;
    Ok((repo, sha))
}
