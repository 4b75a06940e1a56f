use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Shop,
    MagicChoice,
    Failed,
    Completed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Failed | Phase::Completed)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::InProgress => "in progress",
            Phase::Shop => "shop",
            Phase::MagicChoice => "magic choice",
            Phase::Failed => "failed",
            Phase::Completed => "completed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub level: u8,
    pub phase: Phase,
    pub target: f64,
    /// Cumulative across levels; only a restart zeroes it.
    pub score: f64,
    pub gold: f64,
}

impl GameState {
    pub fn new(target: f64) -> Self {
        Self {
            level: 1,
            phase: Phase::InProgress,
            target,
            score: 0.0,
            gold: 0.0,
        }
    }

    /// The level target is met and the run is waiting in the shop or on a magic choice.
    pub fn cleared(&self) -> bool {
        matches!(self.phase, Phase::Shop | Phase::MagicChoice)
    }

    pub fn failed(&self) -> bool {
        self.phase == Phase::Failed
    }

    pub fn finished_all(&self) -> bool {
        self.phase == Phase::Completed
    }
}
