use crate::HandKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAIN_STEP: f64 = 0.25;

/// Tracks consecutive plays that repeat a kind or climb exactly one rung.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainState {
    pub last: Option<HandKind>,
    pub count: u32,
    pub multiplier: f64,
    step: f64,
}

impl Default for ChainState {
    fn default() -> Self {
        Self::with_step(DEFAULT_CHAIN_STEP)
    }
}

impl ChainState {
    pub fn with_step(step: f64) -> Self {
        Self {
            last: None,
            count: 0,
            multiplier: 1.0,
            step,
        }
    }

    /// A fresh (reset) tracker accepts nothing as a continuation.
    pub fn is_compatible(&self, incoming: HandKind) -> bool {
        match self.last {
            None => false,
            Some(last) => last == incoming || last.next_rung() == Some(incoming),
        }
    }

    /// Records a classified play and returns the multiplier it earns.
    pub fn advance(&mut self, incoming: HandKind) -> f64 {
        if self.is_compatible(incoming) {
            self.count = self.count.saturating_add(1);
        } else {
            self.count = 1;
        }
        self.multiplier = 1.0 + self.step * f64::from(self.count - 1);
        self.last = Some(incoming);
        self.multiplier
    }

    /// Multiplier `advance` would return, without recording the play.
    pub fn peek(&self, incoming: HandKind) -> f64 {
        let mut next = self.clone();
        next.advance(incoming)
    }

    pub fn reset(&mut self) {
        *self = Self::with_step(self.step);
    }
}
