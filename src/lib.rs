//! # scanprobe
//!
//! Directory-listing consistency probe for cached and object-storage-backed
//! filesystems.
//!
//! A probe takes one file path and runs a fixed cycle against it:
//! check the name is absent from its parent's listing, create the file,
//! check the name is listed, delete the file, check the name is gone again.
//! The first disagreement stops the run.
//!
//! Presence is always decided by scanning the parent directory's entries
//! for an exact name match, never by stat'ing the path. Backends that cache
//! metadata and listings separately can answer a stat correctly while
//! serving a stale listing; only a scan catches that.
//!
//! # Quick Start
//!
//! ```rust
//! use scanprobe::Presence;
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("sample.txt");
//!
//! assert_eq!(scanprobe::lookup(&path)?, Presence::NotFound);
//!
//! let report = scanprobe::probe(&path).run()?;
//! assert_eq!(report.rounds, 1);
//! assert_eq!(report.steps.len(), 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Custom Sources
//!
//! Implement [`Source`] to list directories some other way, or to model a
//! backend that misbehaves. Creation and deletion always go through the real
//! filesystem; only the listing is swapped.
//!
//! ```rust
//! use std::path::Path;
//! use scanprobe::{Listing, ProbeError, Source};
//!
//! /// A backend whose listing never shows anything.
//! struct Blind;
//!
//! impl Source for Blind {
//!     fn list(&self, _dir: &Path) -> Result<Listing<'_>, ProbeError> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let err = scanprobe::probe(dir.path().join("sample.txt"))
//!     .source(Blind)
//!     .run()
//!     .unwrap_err();
//! assert!(err.is_inconsistency());
//! ```

#![forbid(unsafe_code)]

mod builder;
mod entry;
mod error;
mod lifecycle;
mod lookup;
mod results;
mod source;
mod target;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ProbeBuilder;
pub use entry::{Entry, EntryKind};
pub use error::ProbeError;
pub use lifecycle::Step;
pub use lookup::{scan, scan_with, ExactName, Lookup, Presence};
pub use results::{Report, ScanStats, StepRecord};
pub use source::DirSource;
pub use target::Target;
pub use traits::{Listing, Matcher, Source};

use std::path::PathBuf;

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a [`ProbeBuilder`] for the create/delete cycle on `path`.
pub fn probe(path: impl Into<PathBuf>) -> ProbeBuilder {
    ProbeBuilder::new(path.into())
}

/// Report whether `path` is listed in its parent directory.
///
/// Scans the parent with [`DirSource`]; see [`scan`] to use another source.
///
/// # Errors
///
/// [`ProbeError::InvalidTarget`] if `path` has no parent to list, and
/// [`ProbeError::ParentNotFound`] (or another listing error) if the parent
/// cannot be opened.
pub fn lookup(path: impl Into<PathBuf>) -> Result<Presence, ProbeError> {
    let target = Target::parse(path)?;
    Ok(scan(&DirSource, &target)?.presence)
}
