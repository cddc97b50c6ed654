use std::path::PathBuf;
use thiserror::Error;

use crate::lifecycle::Step;
use crate::lookup::Presence;

#[derive(Error, Debug)]
pub enum ProbeError {
    // Input
    #[error("invalid target `{}`: {reason}", .path.display())]
    InvalidTarget {
        path:   PathBuf,
        reason: &'static str,
    },

    #[error("invalid round count {0}: at least one round is required")]
    InvalidRounds(usize),

    // Directory listing
    #[error("parent directory `{}` not found", .0.display())]
    ParentNotFound(PathBuf),

    #[error("parent `{}` is not a directory", .0.display())]
    ParentNotDirectory(PathBuf),

    #[error("permission denied: `{}`", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{op} `{}`", .path.display())]
    Io {
        op:   &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Lifecycle
    #[error("{op} `{}` failed during {step}", .path.display())]
    Os {
        step: Step,
        op:   &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("checkpoint {step} failed for `{}`: expected {expected}, observed {observed}", .path.display())]
    Checkpoint {
        step:     Step,
        path:     PathBuf,
        expected: Presence,
        observed: Presence,
    },
}

impl ProbeError {
    /// The path this error occurred at.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidTarget { path, .. }
            | Self::ParentNotFound(path)
            | Self::ParentNotDirectory(path)
            | Self::PermissionDenied(path)
            | Self::Io { path, .. }
            | Self::Os { path, .. }
            | Self::Checkpoint { path, .. } => Some(path),
            Self::InvalidRounds(_) => None,
        }
    }

    /// Process exit status for this failure.
    ///
    /// `1` for operating-system failures (create, unlink, listing the
    /// parent), `2` for invalid input, `3` for a checkpoint that observed
    /// the wrong presence. `2` matches what clap uses for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidTarget { .. } | Self::InvalidRounds(_) => 2,
            Self::Checkpoint { .. } => 3,
            Self::ParentNotFound(_)
            | Self::ParentNotDirectory(_)
            | Self::PermissionDenied(_)
            | Self::Io { .. }
            | Self::Os { .. } => 1,
        }
    }

    /// Whether the backend disagreed with itself, as opposed to the probe
    /// failing to run at all.
    pub fn is_inconsistency(&self) -> bool {
        matches!(self, Self::Checkpoint { .. })
    }
}
