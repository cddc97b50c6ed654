use std::time::Duration;

use crate::lifecycle::Step;

/// The output of a successful probe.
///
/// A failed probe returns a [`ProbeError`](crate::ProbeError) instead; there
/// is no partial report.
#[derive(Debug, Clone)]
pub struct Report {
    /// Number of full create/delete cycles that passed.
    pub rounds: usize,

    /// One record per step of the final round, in execution order.
    pub steps: Vec<StepRecord>,

    /// Wall-clock time from the first lookup to the last.
    pub duration: Duration,
}

/// What happened during one lifecycle step.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Zero-based round this step belongs to.
    pub round: usize,

    pub step: Step,

    /// Time spent in the step, including any directory scan.
    pub duration: Duration,

    /// Listing statistics, for checkpoint steps only.
    pub scan: Option<ScanStats>,
}

/// Statistics for one directory scan.
#[derive(Debug, Clone)]
pub struct ScanStats {
    /// Entries pulled from the listing before the scan stopped.
    pub entries: usize,

    /// Wall-clock time of the scan.
    pub duration: Duration,

    /// Entries scanned per second. Equals `entries / duration.as_secs_f64()`,
    /// clamped to 0 on zero-duration scans.
    pub entries_per_sec: usize,
}

impl ScanStats {
    pub(crate) fn compute(entries: usize, duration: Duration) -> Self {
        let eps = if duration.as_secs_f64() > 0.0 {
            (entries as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            entries,
            duration,
            entries_per_sec: eps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_has_zero_rate() {
        let stats = ScanStats::compute(10, Duration::ZERO);
        assert_eq!(stats.entries_per_sec, 0);
    }

    #[test]
    fn rate_is_entries_over_seconds() {
        let stats = ScanStats::compute(500, Duration::from_millis(250));
        assert_eq!(stats.entries_per_sec, 2000);
    }
}
