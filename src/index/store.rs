//! On-disk versions list
//!
//! ```text
//! created_at: 2015-08-23T17:22:53-07:00
//! ---
//! gem1 1.1,1.2 abc123
//! gem2 2.1,2.1-jruby def456
//! ```
//!
//! The header is written once by [`VersionsListStore::create`]; later
//! [`VersionsListStore::update`] calls append body lines only. The store
//! assumes a single writer and does no locking.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use tracing::{debug, info, warn};

use crate::index::clock::{Clock, SystemClock};
use crate::index::entry::PackageEntry;
use crate::index::error::IndexError;
use crate::index::line::render_lines;

/// Prefix of the header line carrying the creation time
pub const CREATED_AT_PREFIX: &str = "created_at: ";

/// Line separating the header from the body
pub const HEADER_SEPARATOR: &str = "---";

pub struct VersionsListStore<C: Clock = SystemClock> {
    path: PathBuf,
    clock: C,
}

impl VersionsListStore<SystemClock> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> VersionsListStore<C> {
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file contents followed by lines for `extra`
    ///
    /// The file is never modified. A missing file reads as empty. With
    /// `calculate_checksums`, the info checksum of every extra entry is
    /// derived from its version set instead of taken from the entry.
    pub fn contents(
        &self,
        extra: &[PackageEntry],
        calculate_checksums: bool,
    ) -> Result<String, IndexError> {
        let mut out = self.read_existing()?.unwrap_or_default();

        if !extra.is_empty() {
            let mut extra = extra.to_vec();
            out.push_str(&render_lines(&mut extra, calculate_checksums)?);
        }

        Ok(out)
    }

    /// Timestamp from the `created_at` header, if the file has one
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Versions list {:?} does not exist", self.path);
                return None;
            }
            Err(e) => {
                warn!("Failed to open versions list {:?}: {}", self.path, e);
                return None;
            }
        };

        parse_created_at(BufReader::new(file))
    }

    /// Creation time of the file, or the Unix epoch when unknown
    pub fn updated_at(&self) -> DateTime<FixedOffset> {
        self.created_at()
            .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
    }

    /// Replace the file with a header and one line per entry
    ///
    /// Entries are sorted by name and their versions ascending. A name may
    /// appear only once. The new content is written to a sibling temp file
    /// and renamed into place.
    pub fn create(&self, entries: &[PackageEntry]) -> Result<(), IndexError> {
        let mut entries = entries.to_vec();
        entries.sort_by(PackageEntry::compare);
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(IndexError::DuplicateName {
                name: pair[0].name.clone(),
            });
        }
        let body = render_lines(&mut entries, false)?;

        let created_at = self.clock.now().to_rfc3339_opts(SecondsFormat::Secs, false);
        let content = format!("{CREATED_AT_PREFIX}{created_at}\n{HEADER_SEPARATOR}\n{body}");

        self.replace_file(content.as_bytes())
            .map_err(|source| self.write_error(source))?;

        info!(
            "Created versions list {:?} with {} packages",
            self.path,
            entries.len()
        );
        Ok(())
    }

    /// Append one line per entry, in the given order
    ///
    /// The header and existing lines are left untouched. Names already
    /// present in the file are not deduplicated. The file must exist.
    pub fn update(&self, entries: &[PackageEntry]) -> Result<(), IndexError> {
        let mut entries = entries.to_vec();
        let body = render_lines(&mut entries, false)?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| self.write_error(source))?;
        file.write_all(body.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| self.write_error(source))?;

        info!(
            "Appended {} packages to versions list {:?}",
            entries.len(),
            self.path
        );
        Ok(())
    }

    /// [`create`](Self::create) when the file is missing or empty,
    /// [`update`](Self::update) otherwise
    pub fn update_or_create(&self, entries: &[PackageEntry]) -> Result<(), IndexError> {
        let has_content = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len() > 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(source) => {
                return Err(IndexError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if has_content {
            self.update(entries)
        } else {
            self.create(entries)
        }
    }

    fn read_existing(&self) -> Result<Option<String>, IndexError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Versions list {:?} does not exist yet", self.path);
                Ok(None)
            }
            Err(source) => Err(IndexError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn replace_file(&self, content: &[u8]) -> io::Result<()> {
        let temp_path = self.temp_path();

        let result = File::create(&temp_path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            writer.write_all(content)?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    /// `.{file_name}.tmp` in the target's directory
    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_default());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: io::Error) -> IndexError {
        IndexError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Scan header lines up to the separator for a parseable `created_at`
///
/// Malformed `created_at` values are skipped.
pub fn parse_created_at(reader: impl BufRead) -> Option<DateTime<FixedOffset>> {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read versions list header: {}", e);
                return None;
            }
        };

        if line == HEADER_SEPARATOR {
            break;
        }

        let Some(value) = line.strip_prefix(CREATED_AT_PREFIX) else {
            continue;
        };

        match parse_timestamp(value.trim()) {
            Some(timestamp) => return Some(timestamp),
            None => debug!("Skipping malformed created_at header: {:?}", value),
        }
    }

    None
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z"))
        .ok()
}
