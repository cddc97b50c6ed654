use std::path::Path;

use crate::entry::Entry;
use crate::error::ProbeError;

/// Entries of one directory, in the order the backend enumerates them.
///
/// Dropping the iterator releases the underlying directory handle.
pub type Listing<'a> = Box<dyn Iterator<Item = Result<Entry, ProbeError>> + 'a>;

/// Something that can list the entries of a single directory.
///
/// The default is [`DirSource`](crate::DirSource), which reads the real
/// filesystem. Implement this to put a different listing path under test,
/// or to model a misbehaving backend (stale or sticky listings) in tests.
///
/// # Errors
///
/// Failing to open `dir` is reported from `list()` itself, so callers can
/// tell "could not list" apart from "listed, not there". Errors hit while
/// iterating are yielded as `Err` items.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use scanprobe::{Entry, EntryKind, Listing, ProbeError, Source};
///
/// struct Fixed(Vec<&'static str>);
///
/// impl Source for Fixed {
///     fn list(&self, dir: &Path) -> Result<Listing<'_>, ProbeError> {
///         let dir = dir.to_path_buf();
///         Ok(Box::new(self.0.iter().map(move |name| Ok(Entry {
///             path: dir.join(name),
///             name: name.into(),
///             kind: EntryKind::File,
///         }))))
///     }
/// }
/// ```
pub trait Source {
    /// Open `dir` and return its entries. `.` and `..` are not yielded.
    fn list(&self, dir: &Path) -> Result<Listing<'_>, ProbeError>;
}

/// Decides whether a listed entry is the one being looked up.
///
/// # Example
///
/// ```rust
/// use scanprobe::{Entry, Matcher};
///
/// struct Extension(&'static str);
///
/// impl Matcher for Extension {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.path.extension().map(|e| e == self.0).unwrap_or(false)
///     }
/// }
/// ```
pub trait Matcher {
    /// Returns `true` if this entry counts as present.
    fn is_match(&self, entry: &Entry) -> bool;
}
