//! Compact index versions list
//!
//! This module renders package version sets into versions list lines and
//! maintains the on-disk listing, either rebuilt from scratch or extended by
//! appending.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ PackageEntry│────▶│    Line     │────▶│    Store    │
//! │ (versions)  │     │  (render)   │     │ (file I/O)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Number    │     │    Info     │     │    Clock    │
//! │(version cmp)│     │ (MD5 blob)  │     │ (created_at)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`version`]: A single (number, platform) version and its info line
//! - [`entry`]: A package with its version set
//! - [`dependency`]: Dependency tokens used on info lines
//! - [`number`]: Version number ordering
//! - [`info`]: Info blob rendering and MD5 checksum derivation
//! - [`line`]: Versions list line rendering
//! - [`store`]: The versions list file (`contents`, `create`, `update`)
//! - [`clock`]: Time source for the `created_at` header
//! - [`error`]: Error types for index operations

pub mod clock;
pub mod dependency;
pub mod entry;
pub mod error;
pub mod info;
pub mod line;
pub mod number;
pub mod store;
pub mod version;
