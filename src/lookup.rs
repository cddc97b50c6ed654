use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, trace};

use crate::entry::Entry;
use crate::error::ProbeError;
use crate::results::ScanStats;
use crate::target::Target;
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// Outcome of a lookup: whether the name showed up in its parent's listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    NotFound,
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Presence::Found    => "found",
            Presence::NotFound => "not-found",
        })
    }
}

/// A lookup result together with how much of the listing it took.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub presence: Presence,
    pub stats:    ScanStats,
}

// ---------------------------------------------------------------------------
// ExactName
// ---------------------------------------------------------------------------

/// Matches the entry whose name is byte-for-byte equal to the target name.
///
/// No case folding and no normalisation: `Sample.txt`, `sample.txt.bak`
/// and `xsample.txt` never match `sample.txt`.
#[derive(Debug, Clone)]
pub struct ExactName(OsString);

impl ExactName {
    pub fn new(name: impl AsRef<OsStr>) -> Self {
        Self(name.as_ref().to_os_string())
    }
}

impl Matcher for ExactName {
    fn is_match(&self, entry: &Entry) -> bool {
        entry.name.as_encoded_bytes() == self.0.as_encoded_bytes()
    }
}

// ---------------------------------------------------------------------------
// scan()
// ---------------------------------------------------------------------------

/// Look `target` up by scanning its parent's listing for the exact name.
///
/// Never stats the target directly; presence is decided purely by what the
/// directory listing returns. The parent is reopened on every call.
pub fn scan(source: &dyn Source, target: &Target) -> Result<Lookup, ProbeError> {
    let lookup = scan_with(source, target.parent(), &ExactName::new(target.name()))?;
    debug!(
        path = %target.path().display(),
        presence = %lookup.presence,
        entries = lookup.stats.entries,
        "lookup"
    );
    Ok(lookup)
}

/// Scan `dir` until `matcher` accepts an entry or the listing is exhausted.
///
/// Stops at the first match. The listing, and with it the directory handle,
/// is dropped before returning on every path, including errors.
pub fn scan_with(
    source:  &dyn Source,
    dir:     &Path,
    matcher: &dyn Matcher,
) -> Result<Lookup, ProbeError> {
    let start = Instant::now();
    let mut entries  = 0;
    let mut presence = Presence::NotFound;

    for entry in source.list(dir)? {
        let entry = entry?;
        entries += 1;
        trace!(name = ?entry.name, kind = ?entry.kind, "listed");

        if matcher.is_match(&entry) {
            presence = Presence::Found;
            break;
        }
    }

    Ok(Lookup {
        presence,
        stats: ScanStats::compute(entries, start.elapsed()),
    })
}
