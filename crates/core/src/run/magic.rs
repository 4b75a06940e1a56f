use super::*;
use crate::{CardMultiplier, Event, EventBus};

impl RunState {
    pub fn choose_magic_by_id(
        &mut self,
        choice: &str,
        target: Option<usize>,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        let parsed =
            MagicChoice::from_id(choice).ok_or_else(|| RunError::UnknownMagic(choice.to_string()))?;
        self.choose_magic(parsed, target, events)
    }

    /// Applies the level-up reward and moves on to the next level. `target`
    /// is a hand index, required by suit change and card multiplier.
    pub fn choose_magic(
        &mut self,
        choice: MagicChoice,
        target: Option<usize>,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        match self.state.phase {
            Phase::MagicChoice => {}
            phase if phase.is_terminal() => return Err(RunError::RunOver(phase)),
            _ => return Err(RunError::MagicNotAvailable),
        }
        let target_idx = if choice.needs_target() {
            match target {
                Some(idx) if idx < self.hand.len() => Some(idx),
                Some(_) => return Err(RunError::InvalidSelection),
                None => return Err(RunError::MissingTarget(choice)),
            }
        } else {
            None
        };

        match choice {
            MagicChoice::HandScoreUpgrade => {
                self.emit(events, Event::MagicChosen { choice });
                let amount = self.config.magic.pair_upgrade;
                self.modifiers.add_bonus(HandKind::Pair, amount);
            }
            MagicChoice::SuitChange => {
                let idx = target_idx.ok_or(RunError::MissingTarget(choice))?;
                self.emit(events, Event::MagicChosen { choice });
                let before = self.hand[idx];
                self.hand[idx].cycle_suit();
                let after = self.hand[idx];
                self.emit(events, Event::SuitChanged { before, after });
            }
            MagicChoice::CardMultiplier => {
                let idx = target_idx.ok_or(RunError::MissingTarget(choice))?;
                self.emit(events, Event::MagicChosen { choice });
                let rank = self.hand[idx].rank;
                let factor = self.config.magic.card_multiplier_factor;
                self.modifiers.card_multiplier = Some(CardMultiplier { rank, factor });
                self.emit(events, Event::CardMultiplierSet { rank, factor });
            }
            MagicChoice::DiscardRedraw => {
                self.emit(events, Event::MagicChosen { choice });
                self.modifiers.redraw_available = true;
            }
            MagicChoice::DrawBoost => {
                self.emit(events, Event::MagicChosen { choice });
                self.modifiers.draw_boost_available = true;
            }
        }
        self.advance_level(events);
        Ok(())
    }
}
