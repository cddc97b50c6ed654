use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::{DirEntry, Walk, WalkBuilder};

use crate::entry::{Entry, EntryKind};
use crate::error::ProbeError;
use crate::traits::{Listing, Source};

// ---------------------------------------------------------------------------
// DirSource
// ---------------------------------------------------------------------------

/// Lists a directory on the real filesystem.
///
/// Backed by a single-level `ignore` walk with every filter switched off:
/// hidden files, ignore files and symlink targets are all reported as the
/// directory listing returns them. Nothing is stat'ed by name, so a lookup
/// through this source exercises the backend's readdir path only.
///
/// A parent that is itself a symlink is followed, the way `opendir` follows
/// it. Entries are still reported under the path the caller passed in.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirSource;

impl Source for DirSource {
    fn list(&self, dir: &Path) -> Result<Listing<'_>, ProbeError> {
        let root = resolve_parent(dir)?;

        let mut builder = WalkBuilder::new(&root);
        builder
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .max_depth(Some(1));

        let mut walk = builder.build();

        // The walk yields the directory itself first. Anything other than a
        // directory there means the parent cannot be listed.
        match walk.next() {
            Some(Ok(entry)) => {
                let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
                if !is_dir {
                    return Err(ProbeError::ParentNotDirectory(dir.to_path_buf()));
                }
            }
            Some(Err(e)) => return Err(map_ignore_error(&root, e)),
            None => return Err(ProbeError::ParentNotFound(dir.to_path_buf())),
        }

        Ok(Box::new(Children {
            walk,
            root,
            dir: dir.to_path_buf(),
        }))
    }
}

/// The directory `opendir(dir)` would open.
///
/// Only a symlinked final component is resolved. The walk never follows
/// links, so depth-1 symlinks stay symlinks.
fn resolve_parent(dir: &Path) -> Result<PathBuf, ProbeError> {
    let meta = fs::symlink_metadata(dir)
        .map_err(|e| map_io_error("opendir", dir, dir.to_path_buf(), e))?;
    if !meta.file_type().is_symlink() {
        return Ok(dir.to_path_buf());
    }
    fs::canonicalize(dir).map_err(|e| map_io_error("opendir", dir, dir.to_path_buf(), e))
}

/// Depth-1 entries of a walk whose root has already been consumed.
struct Children {
    walk: Walk,
    /// Directory actually walked.
    root: PathBuf,
    /// Directory as the caller named it.
    dir:  PathBuf,
}

impl Iterator for Children {
    type Item = Result<Entry, ProbeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(e)  => e,
                Err(e) => return Some(Err(map_ignore_error(&self.root, e))),
            };
            if entry.depth() == 0 {
                continue;
            }
            return Some(Ok(to_entry(&self.dir, entry)));
        }
    }
}

fn to_entry(dir: &Path, entry: DirEntry) -> Entry {
    let name = entry.file_name().to_os_string();
    Entry {
        kind: EntryKind::from_file_type(entry.file_type()),
        path: dir.join(&name),
        name,
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error to ProbeError
// ---------------------------------------------------------------------------

fn map_ignore_error(dir: &Path, e: ignore::Error) -> ProbeError {
    match e {
        ignore::Error::WithDepth { err, .. } => map_ignore_error(dir, *err),
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => map_io_error("readdir", dir, path, io_err),
            other => map_ignore_error(dir, other),
        },
        ignore::Error::Io(io_err) => map_io_error("readdir", dir, dir.to_path_buf(), io_err),
        other => ProbeError::Io {
            op:     "readdir",
            path:   dir.to_path_buf(),
            source: io::Error::other(other.to_string()),
        },
    }
}

fn map_io_error(op: &'static str, dir: &Path, path: PathBuf, io_err: io::Error) -> ProbeError {
    match io_err.kind() {
        io::ErrorKind::NotFound if path == dir => ProbeError::ParentNotFound(path),
        io::ErrorKind::PermissionDenied => ProbeError::PermissionDenied(path),
        _ => ProbeError::Io {
            op,
            path,
            source: io_err,
        },
    }
}
