use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;

use crate::error::ProbeError;
use crate::lifecycle::run_cycle;
use crate::results::Report;
use crate::source::DirSource;
use crate::target::Target;
use crate::traits::Source;

// ---------------------------------------------------------------------------
// ProbeBuilder
// ---------------------------------------------------------------------------

/// Configures and runs the create/delete consistency cycle on one path.
///
/// Created via [`scanprobe::probe()`](crate::probe). Configure with chained
/// builder methods, then call [`run()`](ProbeBuilder::run) to execute.
///
/// # Example
///
/// ```rust,no_run
/// let report = scanprobe::probe("/mnt/bucket/test_dir/sample.txt")
///     .rounds(2)
///     .run()?;
/// assert_eq!(report.rounds, 2);
/// # Ok::<(), scanprobe::ProbeError>(())
/// ```
pub struct ProbeBuilder {
    path:   PathBuf,
    source: Option<Box<dyn Source>>,
    rounds: usize,
}

impl ProbeBuilder {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            source: None,
            rounds: 1,
        }
    }

    // ── Source ────────────────────────────────────────────────────────────

    /// Set the source used to list the target's parent directory.
    ///
    /// Defaults to [`DirSource`], the real filesystem. Create and delete
    /// always act on the real filesystem regardless of the source.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Repeat the full cycle `n` times on the same path. Defaults to `1`.
    ///
    /// Every round must leave the path absent for the next one to pass its
    /// first checkpoint.
    pub fn rounds(mut self, n: usize) -> Self {
        self.rounds = n;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Run the cycle and return a report of every step.
    ///
    /// # Errors
    ///
    /// Returns the first failure and runs nothing after it. No cleanup is
    /// attempted, so after a failure the target may or may not exist.
    pub fn run(self) -> Result<Report, ProbeError> {
        if self.rounds == 0 {
            return Err(ProbeError::InvalidRounds(self.rounds));
        }

        let target = Target::parse(self.path)?;
        let source: Box<dyn Source> = match self.source {
            Some(s) => s,
            None    => Box::new(DirSource),
        };

        let start = Instant::now();
        let mut steps = Vec::new();

        // Only the last round's records are kept.
        for round in 0..self.rounds {
            debug!(round, path = %target.path().display(), "starting round");
            steps.clear();
            run_cycle(source.as_ref(), &target, round, &mut steps)?;
        }

        Ok(Report {
            rounds: self.rounds,
            steps,
            duration: start.elapsed(),
        })
    }
}
