// Copyright 2026 Oxide Computer Company

//! Error types for version registry operations.

use thiserror::Error;

/// An error that occurs while parsing a [`CommitSha`](crate::CommitSha).
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ShaParseError {
    /// The revision identifier has an invalid length.
    #[error(
        "invalid length: expected 40 (SHA-1) or 64 (SHA-256) hex characters, \
         got {0}"
    )]
    InvalidLength(usize),

    /// The revision identifier is not valid hexadecimal.
    #[error("invalid hexadecimal")]
    InvalidHex(hex::FromHexError),
}

/// An error from a [`Versions`](crate::Versions) registry operation.
///
/// These are contract violations: the registry never silently recovers
/// from a lookup of an unknown name or a second assignment of a derived
/// field.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VersionsError {
    /// No version with the requested name is registered.
    #[error("no version named {name:?} in the registry")]
    NotFound {
        /// The name that was requested.
        name: String,
    },

    /// A root version has already been designated.
    #[error(
        "root version is already {current:?}; cannot designate {requested:?}"
    )]
    RootAlreadySet {
        /// The name of the version already designated as root.
        current: String,
        /// The name that was requested as the new root.
        requested: String,
    },

    /// The version already has a URL assigned.
    #[error("version {name:?} already has URL {url:?} assigned")]
    UrlAlreadySet {
        /// The name of the version.
        name: String,
        /// The URL already assigned to it.
        url: String,
    },
}
