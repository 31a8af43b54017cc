// Copyright 2026 Oxide Computer Company

//! Slug assignment: turning ref names into unique output directories.
//!
//! Ref names may contain characters that are hostile to filesystems and
//! URLs (most commonly `/` in branch names like `user/feature`). Each
//! non-root version is published under a *slug*: the sanitized ref name,
//! disambiguated against every name already taken.
//!
//! The root version gets no slug; its pages are published directly at the
//! output root. Its own top-level output entries (for example `_static`)
//! therefore seed the taken set, so no slug can shadow them.

use crate::Versions;
use std::collections::HashSet;

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
///
/// The mapping is total and deterministic: equal names always sanitize
/// equally, and the result is a single path segment. A name consisting
/// entirely of `.` characters maps entirely to `_`, since `.` and `..`
/// are not usable as directory names.
///
/// # Examples
///
/// ```
/// use verdoc_versions::slug::sanitize;
///
/// assert_eq!(sanitize("robpol86/feature"), "robpol86_feature");
/// assert_eq!(sanitize("v1.0"), "v1.0");
/// ```
pub fn sanitize(name: &str) -> String {
    if !name.is_empty() && name.chars().all(|c| c == '.') {
        return "_".repeat(name.len());
    }
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolves a candidate slug against the set of taken names.
///
/// While the candidate collides with a taken name, one `_` is appended.
/// Each iteration strictly lengthens the candidate and the taken set is
/// finite, so this terminates. There is no length cap: a pathological
/// collision chain produces a long slug rather than a failure.
///
/// The function is pure. It does not insert the result into `taken`;
/// callers do that between assignments.
pub fn resolve_unique(candidate: &str, taken: &HashSet<String>) -> String {
    let mut slug = candidate.to_string();
    while taken.contains(&slug) {
        slug.push('_');
    }
    slug
}

/// Assigns a slug to every non-root version, in registry order.
///
/// `reserved` seeds the taken set with names that slugs must never
/// collide with, typically the top-level entries of the root version's
/// rendered output. Each assigned slug joins the taken set, so earlier
/// versions keep the shorter name when two sanitize identically.
///
/// Returns `(name, slug)` pairs in registry order.
pub fn assign_slugs(
    versions: &Versions,
    reserved: impl IntoIterator<Item = String>,
) -> Vec<(String, String)> {
    let mut taken: HashSet<String> = reserved.into_iter().collect();
    let mut assigned = Vec::new();
    for version in versions.all() {
        if version.is_root() {
            continue;
        }
        let slug = resolve_unique(&sanitize(version.name()), &taken);
        taken.insert(slug.clone());
        assigned.push((version.name().to_string(), slug));
    }
    assigned
}
