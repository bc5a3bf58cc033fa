// Termination predicates and the end-of-run report.

use crate::domain::state::RunMetrics;
use serde::Serialize;

/// Result of evaluating the termination predicates for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Continue,
    // More than half of the quota reached the ground.
    Overrun,
    // Every threat of the quota was destroyed or reached the ground.
    AllHandled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Victory,
    DefeatOverrun,
    DefeatShortfall,
}

impl RunMetrics {
    pub fn termination(&self) -> Termination {
        if self.reached > self.total / 2 {
            Termination::Overrun
        } else if self.handled() >= self.total {
            Termination::AllHandled
        } else {
            Termination::Continue
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.reached > self.total / 2 {
            Verdict::DefeatOverrun
        } else if self.destroyed >= self.total / 2 {
            Verdict::Victory
        } else {
            Verdict::DefeatShortfall
        }
    }
}

/// Final results reported once every worker has been joined.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub difficulty: &'static str,
    pub score: u32,
    pub destroyed: u32,
    pub total: u32,
    pub reached: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub accuracy: f64,
    pub best_streak: u32,
    pub elapsed_secs: u64,
    pub verdict: Verdict,
}

impl RunReport {
    pub fn new(difficulty: &'static str, metrics: &RunMetrics) -> Self {
        Self {
            difficulty,
            score: metrics.score,
            destroyed: metrics.destroyed,
            total: metrics.total,
            reached: metrics.reached,
            shots_fired: metrics.shots_fired,
            shots_hit: metrics.shots_hit,
            accuracy: metrics.accuracy(),
            best_streak: metrics.best_streak,
            elapsed_secs: metrics.elapsed_secs,
            verdict: metrics.verdict(),
        }
    }
}
