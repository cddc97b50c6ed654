use std::fmt;
use std::fs::{self, OpenOptions};
use std::time::Instant;

use tracing::debug;

use crate::error::ProbeError;
use crate::lookup::{scan, Presence};
use crate::results::{ScanStats, StepRecord};
use crate::target::Target;
use crate::traits::Source;

/// One step of the create/delete cycle.
///
/// A cycle runs every step in declaration order and stops at the first
/// failure:
///
/// `AssertAbsent → Create → AssertPresent → Delete → AssertAbsentAfterDelete`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Checkpoint: the name must not be listed yet.
    AssertAbsent,

    /// Open the file read/write, creating it, then close it.
    Create,

    /// Checkpoint: the new file must be listed.
    AssertPresent,

    /// Unlink the file.
    Delete,

    /// Checkpoint: the name must no longer be listed.
    AssertAbsentAfterDelete,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::AssertAbsent,
        Step::Create,
        Step::AssertPresent,
        Step::Delete,
        Step::AssertAbsentAfterDelete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Step::AssertAbsent            => "assert-absent",
            Step::Create                  => "create",
            Step::AssertPresent           => "assert-present",
            Step::Delete                  => "delete",
            Step::AssertAbsentAfterDelete => "assert-absent-after-delete",
        }
    }

    /// Presence a checkpoint step requires, `None` for filesystem operations.
    pub fn expected(self) -> Option<Presence> {
        match self {
            Step::AssertAbsent | Step::AssertAbsentAfterDelete => Some(Presence::NotFound),
            Step::AssertPresent                                => Some(Presence::Found),
            Step::Create | Step::Delete                        => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run one full cycle against `target`, appending a record per step.
pub(crate) fn run_cycle(
    source: &dyn Source,
    target: &Target,
    round:  usize,
    steps:  &mut Vec<StepRecord>,
) -> Result<(), ProbeError> {
    for step in Step::ALL {
        let start = Instant::now();
        let scan_stats = match step.expected() {
            Some(expected) => Some(checkpoint(source, target, step, expected)?),
            None => {
                operate(target, step)?;
                None
            }
        };

        let record = StepRecord {
            round,
            step,
            duration: start.elapsed(),
            scan: scan_stats,
        };
        debug!(round, %step, elapsed = ?record.duration, "step passed");
        steps.push(record);
    }
    Ok(())
}

fn checkpoint(
    source:   &dyn Source,
    target:   &Target,
    step:     Step,
    expected: Presence,
) -> Result<ScanStats, ProbeError> {
    let lookup = scan(source, target)?;
    if lookup.presence != expected {
        return Err(ProbeError::Checkpoint {
            step,
            path: target.path().to_path_buf(),
            expected,
            observed: lookup.presence,
        });
    }
    Ok(lookup.stats)
}

fn operate(target: &Target, step: Step) -> Result<(), ProbeError> {
    let path = target.path();
    let (op, result) = match step {
        // The handle is dropped, and so closed, as soon as the open returns.
        Step::Create => (
            "open",
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(path)
                .map(drop),
        ),
        Step::Delete => ("unlink", fs::remove_file(path)),
        _ => return Ok(()),
    };

    result.map_err(|source| ProbeError::Os {
        step,
        op,
        path: path.to_path_buf(),
        source,
    })
}
