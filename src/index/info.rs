//! Info blob rendering and checksum derivation
//!
//! The info blob is the per-package dependency listing:
//!
//! ```text
//! ---
//! 1.0 foo:=1.0.1|checksum:abc123
//! 1.1 foo:=1.0.1,bar:< 2&>= 1.0|checksum:def456,ruby:>= 2.7
//! ```
//!
//! Its MD5 is published as the trailing field of the versions list line, so
//! the bytes must stay stable for an unchanged version set.

use md5::{Digest, Md5};

use crate::index::version::VersionIdentifier;

/// Render the info blob for a version set, in the given order
pub fn info_blob(versions: &[VersionIdentifier]) -> String {
    let mut blob = String::from("---\n");
    for version in versions {
        blob.push_str(&version.to_line());
        blob.push('\n');
    }
    blob
}

/// Lowercase hex MD5 of the info blob
pub fn info_checksum(versions: &[VersionIdentifier]) -> String {
    hex::encode(Md5::digest(info_blob(versions).as_bytes()))
}
