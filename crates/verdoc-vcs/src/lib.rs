// Copyright 2026 Oxide Computer Company

//! Git discovery and per-revision tree export for versioned documentation.
//!
//! This crate is the bridge between the git binary and the version data
//! model in `verdoc-versions`. [`GitRepo`] wraps a local clone: it lists
//! the remote's branches and tags, fetches their objects, and filters the
//! refs down to the ones whose trees contain the required files.
//! [`Exporter`] materializes a revision's tracked tree into an isolated
//! per-sha directory, reusing the directory when it already exists.
//!
//! All git interaction happens by running the `git` binary as a
//! subprocess. The binary path comes from the `$GIT` environment variable,
//! falling back to `"git"`.
//!
//! # Examples
//!
//! ```no_run
//! use verdoc_vcs::{Exporter, GitRepo};
//!
//! let repo = GitRepo::open("/path/to/clone").expect("repository opened");
//! let refs = repo
//!     .discover(&["conf.py".to_string()])
//!     .expect("remote refs discovered");
//!
//! let exporter = Exporter::new("/tmp/exports");
//! for remote_ref in &refs {
//!     let tree = exporter
//!         .export(&repo, remote_ref.sha)
//!         .expect("revision exported");
//!     println!("{} exported to {tree}", remote_ref.name);
//! }
//! ```

#![deny(missing_docs)]

mod errors;
mod export;
mod repo;

pub use errors::{DiscoverError, ExportError, GitEnvError, OpenRepoError};
pub use export::Exporter;
pub use repo::GitRepo;
