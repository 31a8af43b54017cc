// Copyright 2026 Oxide Computer Company

//! Remote ref records produced by version discovery.

use crate::CommitSha;
use std::fmt;

/// The kind of remote ref a version was discovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RefKind {
    /// A branch (`refs/heads/*`).
    Branch,
    /// A tag (`refs/tags/*`).
    Tag,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::Branch => write!(f, "branch"),
            RefKind::Tag => write!(f, "tag"),
        }
    }
}

/// A remote branch or tag and the revision it points at.
///
/// Records are produced in remote listing order, which the
/// [`Versions`](crate::Versions) registry preserves. Two refs pointing at
/// the same revision stay separate records; annotated tags are recorded
/// with the commit they dereference to, not the tag object itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    /// The short ref name, without the `refs/heads/` or `refs/tags/`
    /// prefix.
    pub name: String,
    /// The commit the ref points at.
    pub sha: CommitSha,
    /// Whether the ref is a branch or a tag.
    pub kind: RefKind,
}
