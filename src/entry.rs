use std::ffi::OsString;
use std::fs::FileType;
use std::path::PathBuf;

/// A single directory entry produced by a [`Source`](crate::traits::Source)
/// while listing a parent directory.
///
/// `name` is kept as the raw OS string so lookups compare names
/// byte-for-byte, with no lossy UTF-8 conversion in between.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// The entry's name exactly as the directory listing reported it.
    pub name: OsString,

    /// What kind of entry this is.
    pub kind: EntryKind,
}

/// The kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    pub(crate) fn from_file_type(ft: Option<FileType>) -> Self {
        match ft {
            Some(ft) if ft.is_dir()     => EntryKind::Dir,
            Some(ft) if ft.is_file()    => EntryKind::File,
            Some(ft) if ft.is_symlink() => EntryKind::Symlink,
            _                           => EntryKind::Other,
        }
    }
}
