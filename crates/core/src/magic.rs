use crate::{HandKind, Rank};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CardMultiplier {
    pub rank: Rank,
    pub factor: f64,
}

/// Everything the shop and level-up choices leave behind on a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Modifiers {
    pub bonuses: HashMap<HandKind, f64>,
    pub card_multiplier: Option<CardMultiplier>,
    pub draw_boost_available: bool,
    pub redraw_available: bool,
}

impl Modifiers {
    pub fn bonus(&self, kind: HandKind) -> f64 {
        self.bonuses.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn add_bonus(&mut self, kind: HandKind, amount: f64) {
        *self.bonuses.entry(kind).or_insert(0.0) += amount;
    }

    /// Factor to apply when any played card hits the configured rank.
    pub fn card_factor_for(&self, ranks: impl IntoIterator<Item = Rank>) -> f64 {
        let Some(multiplier) = self.card_multiplier else {
            return 1.0;
        };
        if multiplier.factor <= 1.0 {
            return 1.0;
        }
        if ranks.into_iter().any(|rank| rank == multiplier.rank) {
            multiplier.factor
        } else {
            1.0
        }
    }

    /// Returns whether the flag was armed, clearing it either way.
    pub fn consume_draw_boost(&mut self) -> bool {
        std::mem::take(&mut self.draw_boost_available)
    }

    pub fn consume_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_available)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MagicChoice {
    HandScoreUpgrade,
    SuitChange,
    CardMultiplier,
    DiscardRedraw,
    DrawBoost,
}

impl MagicChoice {
    pub const ALL: [MagicChoice; 5] = [
        MagicChoice::HandScoreUpgrade,
        MagicChoice::SuitChange,
        MagicChoice::CardMultiplier,
        MagicChoice::DiscardRedraw,
        MagicChoice::DrawBoost,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MagicChoice::HandScoreUpgrade => "hand_score",
            MagicChoice::SuitChange => "suit_change",
            MagicChoice::CardMultiplier => "card_multiplier",
            MagicChoice::DiscardRedraw => "redraw",
            MagicChoice::DrawBoost => "draw_boost",
        }
    }

    /// Accepts the stable id, a few short aliases, or the 1-based menu slot.
    pub fn from_id(value: &str) -> Option<MagicChoice> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "1" | "hand_score" | "hand_score_upgrade" | "upgrade" => {
                Some(MagicChoice::HandScoreUpgrade)
            }
            "2" | "suit_change" | "suit" => Some(MagicChoice::SuitChange),
            "3" | "card_multiplier" | "multiplier" | "mult" => Some(MagicChoice::CardMultiplier),
            "4" | "redraw" | "discard_redraw" => Some(MagicChoice::DiscardRedraw),
            "5" | "draw_boost" | "boost" => Some(MagicChoice::DrawBoost),
            _ => None,
        }
    }

    /// Suit change and card multiplier act on a card picked from the hand.
    pub fn needs_target(self) -> bool {
        matches!(self, MagicChoice::SuitChange | MagicChoice::CardMultiplier)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MagicChoice::HandScoreUpgrade => "Hand Score Upgrade",
            MagicChoice::SuitChange => "Suit Change",
            MagicChoice::CardMultiplier => "Card Multiplier",
            MagicChoice::DiscardRedraw => "Discard / Redraw",
            MagicChoice::DrawBoost => "Draw Boost",
        }
    }
}

impl fmt::Display for MagicChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_factor_requires_matching_rank() {
        let mut mods = Modifiers::default();
        assert_eq!(mods.card_factor_for([Rank::Ace]), 1.0);
        mods.card_multiplier = Some(CardMultiplier {
            rank: Rank::Ace,
            factor: 2.0,
        });
        assert_eq!(mods.card_factor_for([Rank::Two, Rank::Ace]), 2.0);
        assert_eq!(mods.card_factor_for([Rank::Two, Rank::King]), 1.0);
    }

    #[test]
    fn one_shot_flags_clear_on_consume() {
        let mut mods = Modifiers {
            redraw_available: true,
            ..Modifiers::default()
        };
        assert!(mods.consume_redraw());
        assert!(!mods.consume_redraw());
        assert!(!mods.consume_draw_boost());
    }

    #[test]
    fn choice_ids_round_trip_through_parser() {
        for (slot, choice) in MagicChoice::ALL.iter().enumerate() {
            assert_eq!(MagicChoice::from_id(choice.id()), Some(*choice));
            assert_eq!(MagicChoice::from_id(&(slot + 1).to_string()), Some(*choice));
        }
        assert_eq!(MagicChoice::from_id("Suit-Change"), Some(MagicChoice::SuitChange));
        assert_eq!(MagicChoice::from_id("joker"), None);
    }
}
