// Copyright 2026 Oxide Computer Company

//! Version registry and slug resolution for versioned documentation.
//!
//! A documentation site built from a git repository has one *version* per
//! remote branch and tag. This crate holds the data model for those
//! versions: the [`CommitSha`] each one points at, the ordered name-keyed
//! [`Versions`] registry, and the [`slug`] functions that turn ref names
//! into unique, filesystem-safe output directories.
//!
//! This crate performs no I/O. Discovering refs and materializing their
//! trees is the job of the `verdoc-vcs` crate; this one only records what
//! was discovered and decides where each version is published.
//!
//! # Examples
//!
//! ```
//! use verdoc_versions::{RefKind, RemoteRef, Versions, slug};
//!
//! let sha = "0123456789abcdef0123456789abcdef01234567".parse().unwrap();
//! let refs = vec![
//!     RemoteRef { name: "master".to_string(), sha, kind: RefKind::Branch },
//!     RemoteRef { name: "v1.0".to_string(), sha, kind: RefKind::Tag },
//! ];
//!
//! let mut versions = Versions::from_refs(refs);
//! versions.set_root("master").unwrap();
//!
//! // Non-root versions get a slug; reserved names are never reused.
//! let assigned = slug::assign_slugs(&versions, ["_static".to_string()]);
//! assert_eq!(assigned, vec![("v1.0".to_string(), "v1.0".to_string())]);
//!
//! versions.set_url("v1.0", "v1.0/contents.html").unwrap();
//! assert_eq!(versions.get("v1.0").unwrap().url(), Some("v1.0/contents.html"));
//! ```

#![deny(missing_docs)]

mod errors;
mod refs;
mod sha;
pub mod slug;
mod versions;

pub use errors::{ShaParseError, VersionsError};
pub use refs::{RefKind, RemoteRef};
pub use sha::CommitSha;
pub use versions::{Version, Versions};
