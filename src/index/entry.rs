//! A package and its known versions

use std::cmp::Ordering;

use serde::Deserialize;

use crate::index::error::IndexError;
use crate::index::info::info_checksum;
use crate::index::version::VersionIdentifier;

/// Package name plus its version set
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageEntry {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<VersionIdentifier>,
}

impl PackageEntry {
    pub fn new(name: &str, versions: Vec<VersionIdentifier>) -> Self {
        Self {
            name: name.to_string(),
            versions,
        }
    }

    /// Sort versions ascending by [`VersionIdentifier::compare`]
    pub fn sort_versions(&mut self) {
        self.versions.sort_by(VersionIdentifier::compare);
    }

    /// Order by name
    pub fn compare(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// Highest version, assuming [`sort_versions`](Self::sort_versions) ran
    pub fn latest(&self) -> Result<&VersionIdentifier, IndexError> {
        self.versions.last().ok_or_else(|| self.empty_versions())
    }

    /// Derive the info checksum of the current version set and store it on
    /// the latest version
    pub fn calculate_info_checksum(&mut self) -> Result<&str, IndexError> {
        let checksum = info_checksum(&self.versions);
        let latest = self
            .versions
            .last_mut()
            .ok_or_else(|| IndexError::EmptyVersions {
                name: self.name.clone(),
            })?;

        Ok(latest.info_checksum.insert(checksum).as_str())
    }

    fn empty_versions(&self) -> IndexError {
        IndexError::EmptyVersions {
            name: self.name.clone(),
        }
    }
}
