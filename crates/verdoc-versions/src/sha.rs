// Copyright 2026 Oxide Computer Company

//! Commit identifier types.

use crate::ShaParseError;
use std::{fmt, str::FromStr};

/// A git commit identifier.
///
/// This type guarantees the contained value is either:
///
/// - 20 bytes (SHA-1, displayed as 40 lowercase hex characters)
/// - 32 bytes (SHA-256, displayed as 64 lowercase hex characters)
///
/// The displayed form doubles as the name of the directory a revision's
/// tree is exported into, so it must be stable and filesystem-safe.
///
/// # Parsing
///
/// Parse from a hex string using [`FromStr`]:
///
/// ```
/// use verdoc_versions::CommitSha;
///
/// let sha: CommitSha =
///     "0123456789abcdef0123456789abcdef01234567".parse().unwrap();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommitSha {
    /// A SHA-1 hash: the one traditionally used in git.
    Sha1([u8; 20]),
    /// A SHA-256 hash, supported by newer versions of git.
    Sha256([u8; 32]),
}

impl FromStr for CommitSha {
    type Err = ShaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.len();
        match len {
            40 => {
                let mut bytes = [0; 20];
                hex::decode_to_slice(s, &mut bytes)
                    .map_err(ShaParseError::InvalidHex)?;
                Ok(CommitSha::Sha1(bytes))
            }
            64 => {
                let mut bytes = [0; 32];
                hex::decode_to_slice(s, &mut bytes)
                    .map_err(ShaParseError::InvalidHex)?;
                Ok(CommitSha::Sha256(bytes))
            }
            _ => Err(ShaParseError::InvalidLength(len)),
        }
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitSha::Sha1(bytes) => hex::encode(bytes).fmt(f),
            CommitSha::Sha256(bytes) => hex::encode(bytes).fmt(f),
        }
    }
}
