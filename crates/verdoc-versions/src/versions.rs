// Copyright 2026 Oxide Computer Company

//! The ordered, name-keyed registry of discovered versions.

use crate::{CommitSha, RefKind, RemoteRef, VersionsError};
use std::collections::HashMap;

/// A single buildable version of the documentation.
///
/// One record exists per discovered remote ref. The `name` and `sha` are
/// fixed at registration; `is_root` and `url` are derived fields assigned
/// exactly once, later in the build.
#[derive(Debug, Clone)]
pub struct Version {
    name: String,
    sha: CommitSha,
    kind: RefKind,
    is_root: bool,
    url: Option<String>,
}

impl Version {
    /// Returns the ref name this version was discovered from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the revision this version builds from.
    pub fn sha(&self) -> CommitSha {
        self.sha
    }

    /// Returns whether the version came from a branch or a tag.
    pub fn kind(&self) -> RefKind {
        self.kind
    }

    /// Returns true if this version is published at the output root,
    /// without a slug prefix.
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Returns the published URL, or `None` if it has not been assigned
    /// yet.
    ///
    /// URLs are assigned after a version's documentation has been built,
    /// because the landing page name comes from the version's own
    /// configuration.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// The registry of every discovered version, in discovery order.
///
/// The registry is append-only: versions are registered once, from the
/// discovered remote refs, and never removed. Iteration via [`all`] always
/// yields registration order, so output listings and URL assignment are
/// deterministic for a given remote state.
///
/// Names are unique within the registry. Revisions are not: a branch and a
/// tag pointing at the same commit are two records sharing one sha.
///
/// [`all`]: Versions::all
#[derive(Debug, Clone, Default)]
pub struct Versions {
    records: Vec<Version>,
    by_name: HashMap<String, usize>,
}

impl Versions {
    /// Builds a registry from discovered remote refs, preserving their
    /// order.
    ///
    /// If two refs share a name (a branch and a tag may), the first one
    /// wins and later ones are dropped. Remote listings put branches
    /// before tags, so a branch shadows a tag of the same name.
    pub fn from_refs(refs: impl IntoIterator<Item = RemoteRef>) -> Self {
        let mut versions = Versions::default();
        for RemoteRef { name, sha, kind } in refs {
            if versions.by_name.contains_key(&name) {
                continue;
            }
            versions.by_name.insert(name.clone(), versions.records.len());
            versions.records.push(Version {
                name,
                sha,
                kind,
                is_root: false,
                url: None,
            });
        }
        versions
    }

    /// Looks up a version by name.
    pub fn get(&self, name: &str) -> Result<&Version, VersionsError> {
        self.index_of(name).map(|index| &self.records[index])
    }

    /// Designates the version published at the output root.
    ///
    /// Exactly one version may be the root. Designating a second one is an
    /// error, as is naming an unregistered version.
    pub fn set_root(&mut self, name: &str) -> Result<(), VersionsError> {
        let index = self.index_of(name)?;
        if let Some(current) = self.root() {
            return Err(VersionsError::RootAlreadySet {
                current: current.name.clone(),
                requested: name.to_string(),
            });
        }
        self.records[index].is_root = true;
        Ok(())
    }

    /// Assigns a version's published URL.
    ///
    /// URLs are assign-once: a second assignment for the same name is an
    /// error, never a silent overwrite.
    pub fn set_url(
        &mut self,
        name: &str,
        url: impl Into<String>,
    ) -> Result<(), VersionsError> {
        let index = self.index_of(name)?;
        let record = &mut self.records[index];
        if let Some(existing) = &record.url {
            return Err(VersionsError::UrlAlreadySet {
                name: name.to_string(),
                url: existing.clone(),
            });
        }
        record.url = Some(url.into());
        Ok(())
    }

    /// Returns every registered version, in registration order.
    pub fn all(&self) -> &[Version] {
        &self.records
    }

    /// Returns the root version, if one has been designated.
    pub fn root(&self) -> Option<&Version> {
        self.records.iter().find(|version| version.is_root)
    }

    /// Returns the number of registered versions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no versions are registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn index_of(&self, name: &str) -> Result<usize, VersionsError> {
        self.by_name.get(name).copied().ok_or_else(|| {
            VersionsError::NotFound { name: name.to_string() }
        })
    }
}
