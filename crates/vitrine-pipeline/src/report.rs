//! Stage and pipeline result reporting.

use std::fmt;
use std::time::Duration;

/// The three per-theme stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Install,
    Build,
    Screenshot,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Install => "install",
            StageKind::Build => "build",
            StageKind::Screenshot => "screenshot",
        };
        f.write_str(name)
    }
}

/// Outcome of one stage across all themes.
#[derive(Debug)]
pub struct StageReport {
    pub stage: StageKind,
    /// Number of items that completed.
    pub succeeded: usize,
    /// Failed items as `(theme id, message)` pairs.
    pub failed: Vec<(String, String)>,
    pub duration: Duration,
    /// The stage was disabled for this run.
    pub skipped: bool,
}

impl StageReport {
    pub fn skipped(stage: StageKind) -> Self {
        Self {
            stage,
            succeeded: 0,
            failed: Vec::new(),
            duration: Duration::ZERO,
            skipped: true,
        }
    }
}

/// Aggregate outcome of a pipeline run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub stages: Vec<StageReport>,
}

impl PipelineReport {
    /// Total item failures across all stages.
    pub fn total_failures(&self) -> usize {
        self.stages.iter().map(|s| s.failed.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total_failures() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_failures_across_stages() {
        let mut report = PipelineReport::default();
        report.stages.push(StageReport {
            stage: StageKind::Install,
            succeeded: 3,
            failed: vec![("zephyr".into(), "boom".into())],
            duration: Duration::from_secs(1),
            skipped: false,
        });
        report.stages.push(StageReport::skipped(StageKind::Build));
        report.stages.push(StageReport {
            stage: StageKind::Screenshot,
            succeeded: 2,
            failed: vec![
                ("a".into(), "x".into()),
                ("b".into(), "y".into()),
            ],
            duration: Duration::from_secs(2),
            skipped: false,
        });

        assert_eq!(report.total_failures(), 3);
        assert!(!report.is_clean());
    }

    #[test]
    fn empty_report_is_clean() {
        assert!(PipelineReport::default().is_clean());
    }
}
