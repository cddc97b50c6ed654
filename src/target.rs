use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::ProbeError;

/// The file a probe creates and deletes, split into the directory that gets
/// listed and the name looked for in that listing.
///
/// `parent().join(name())` refers to the same entry as `path()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    path:   PathBuf,
    parent: PathBuf,
    name:   OsString,
}

impl Target {
    /// Split `path` on its last directory separator.
    ///
    /// # Errors
    ///
    /// [`ProbeError::InvalidTarget`] when the path has no separator (a bare
    /// file name), ends in a separator, or ends in `.` or `..`. None of those
    /// name an entry that can be found by listing a parent directory.
    pub fn parse(path: impl Into<PathBuf>) -> Result<Self, ProbeError> {
        let path = path.into();
        let invalid = |reason| ProbeError::InvalidTarget { path: path.clone(), reason };

        let bytes = path.as_os_str().as_encoded_bytes();
        let split = bytes
            .iter()
            .rposition(|&b| is_separator_byte(b))
            .ok_or_else(|| invalid("no directory separator"))?;

        match &bytes[split + 1..] {
            b"" => return Err(invalid("ends with a directory separator")),
            b"." | b".." => return Err(invalid("does not name a directory entry")),
            _ => {}
        }

        // With the raw last segment validated, std's component parsing
        // yields exactly that segment as the file name.
        let name = path
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| invalid("does not name a directory entry"))?;
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| invalid("no parent directory"))?;

        Ok(Self { path, parent, name })
    }

    /// The full path as given.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory whose listing is scanned.
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Entry name searched for in the parent's listing.
    pub fn name(&self) -> &OsStr {
        &self.name
    }
}

fn is_separator_byte(b: u8) -> bool {
    b.is_ascii() && std::path::is_separator(char::from(b))
}
