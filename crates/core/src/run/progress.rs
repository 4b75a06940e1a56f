use super::*;
use crate::{Event, EventBus};

impl RunState {
    /// Clear first, then failure. The failure test ignores the discard pile:
    /// an empty draw pile and an empty hand end the run.
    pub(super) fn check_progress(&mut self, events: &mut EventBus) {
        if self.state.phase != Phase::InProgress {
            return;
        }
        if self.state.score >= self.state.target {
            self.state.phase = Phase::Shop;
            tracing::info!(
                current_level = self.state.level,
                score = self.state.score,
                "level cleared"
            );
            self.emit(
                events,
                Event::LevelCleared {
                    level: self.state.level,
                    score: self.state.score,
                    gold: self.state.gold,
                },
            );
            return;
        }
        if self.deck.draw.is_empty() && self.hand.is_empty() {
            self.fail(events);
        }
    }

    pub(super) fn fail(&mut self, events: &mut EventBus) {
        self.state.phase = Phase::Failed;
        tracing::info!(
            current_level = self.state.level,
            score = self.state.score,
            level_target = self.state.target,
            "run failed"
        );
        self.emit(
            events,
            Event::RunFailed {
                score: self.state.score,
                target: self.state.target,
            },
        );
    }

    /// Moves past the current level once its magic choice has been applied.
    pub(super) fn advance_level(&mut self, events: &mut EventBus) {
        self.state.level = self.state.level.saturating_add(1);
        let Some(target) = self.config.target_for(self.state.level) else {
            self.state.phase = Phase::Completed;
            tracing::info!(score = self.state.score, "run completed");
            self.emit(
                events,
                Event::RunCompleted {
                    score: self.state.score,
                },
            );
            return;
        };
        self.state.target = target;
        self.state.phase = Phase::InProgress;
        tracing::info!(current_level = self.state.level, level_target = target, "level started");
        self.emit(
            events,
            Event::LevelStarted {
                level: self.state.level,
                target,
            },
        );
        self.check_progress(events);
    }
}
