use crate::RunStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EvalMetrics {
    pub level: u8,
    pub max_level: u8,
    pub score: f64,
    pub target: f64,
    pub gold: f64,
    pub failed: bool,
    pub completed: bool,
}

/// Terminal status for a finished run, `None` while play can continue.
pub fn terminal_status(metrics: EvalMetrics) -> Option<RunStatus> {
    if metrics.completed {
        Some(RunStatus::Completed)
    } else if metrics.failed {
        Some(RunStatus::Failed)
    } else {
        None
    }
}

/// Fraction of the whole run achieved so far, in `[0, 1]`.
pub fn progress_ratio(metrics: EvalMetrics) -> f64 {
    if metrics.max_level == 0 {
        return 0.0;
    }
    if metrics.completed {
        return 1.0;
    }
    let level_part = if metrics.target > 0.0 {
        (metrics.score / metrics.target).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let done = f64::from(metrics.level.saturating_sub(1)) + level_part;
    (done / f64::from(metrics.max_level)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(level: u8, score: f64) -> EvalMetrics {
        EvalMetrics {
            level,
            max_level: 3,
            score,
            target: 60.0,
            gold: 0.0,
            failed: false,
            completed: false,
        }
    }

    #[test]
    fn progress_counts_cleared_levels() {
        assert_eq!(progress_ratio(metrics(1, 0.0)), 0.0);
        assert_eq!(progress_ratio(metrics(2, 30.0)), 0.5);
        assert_eq!(progress_ratio(metrics(3, 90.0)), 1.0);
    }

    #[test]
    fn completion_wins_over_failure_flag() {
        let mut m = metrics(3, 0.0);
        assert_eq!(terminal_status(m), None);
        m.failed = true;
        assert_eq!(terminal_status(m), Some(RunStatus::Failed));
        m.completed = true;
        assert_eq!(terminal_status(m), Some(RunStatus::Completed));
        assert_eq!(progress_ratio(m), 1.0);
    }
}
