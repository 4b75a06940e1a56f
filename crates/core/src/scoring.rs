use crate::{Card, GameConfig, HandKind, Modifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub hand: HandKind,
    pub base: f64,
    pub bonus: f64,
    pub chain_mult: f64,
    pub card_mult: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    pub fn subtotal(&self) -> f64 {
        self.base + self.bonus
    }
}

/// `(base + bonus) * chain * card`, where the card factor only applies when
/// one of `cards` carries the configured rank.
pub fn score_play(
    cards: &[Card],
    hand: HandKind,
    level: u8,
    modifiers: &Modifiers,
    chain_mult: f64,
    config: &GameConfig,
) -> ScoreBreakdown {
    let base = config.base_points(hand, level);
    let bonus = modifiers.bonus(hand);
    let card_mult = modifiers.card_factor_for(cards.iter().map(|card| card.rank));
    let total = ((base + bonus) * chain_mult * card_mult).max(0.0);
    ScoreBreakdown {
        hand,
        base,
        bonus,
        chain_mult,
        card_mult,
        total,
    }
}

pub fn gold_for_points(points: f64, config: &GameConfig) -> f64 {
    points * config.gold_per_point
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardMultiplier, Rank, Suit};

    fn single(rank: Rank) -> Vec<Card> {
        vec![Card::new(rank, Suit::Spades)]
    }

    #[test]
    fn level_overrides_apply_to_singles_and_pairs() {
        let config = GameConfig::default();
        let mods = Modifiers::default();
        let cards = single(Rank::Nine);
        let l1 = score_play(&cards, HandKind::Single, 1, &mods, 1.0, &config);
        let l2 = score_play(&cards, HandKind::Single, 2, &mods, 1.0, &config);
        let l3 = score_play(&cards, HandKind::Single, 3, &mods, 1.0, &config);
        assert_eq!(l1.total, 1.0);
        assert_eq!(l2.total, 0.5);
        assert_eq!(l3.total, 0.0);
        assert_eq!(config.base_points(HandKind::Pair, 2), 4.0);
        assert_eq!(config.base_points(HandKind::Pair, 3), 2.0);
        assert_eq!(config.base_points(HandKind::Flush, 3), 6.0);
    }

    #[test]
    fn bonus_is_multiplied_by_chain_then_card_factor() {
        let config = GameConfig::default();
        let mut mods = Modifiers::default();
        mods.add_bonus(HandKind::Pair, 5.0);
        mods.card_multiplier = Some(CardMultiplier {
            rank: Rank::King,
            factor: 2.0,
        });
        let cards = vec![
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::King, Suit::Clubs),
        ];
        let breakdown = score_play(&cards, HandKind::Pair, 1, &mods, 1.5, &config);
        assert_eq!(breakdown.subtotal(), 7.0);
        assert_eq!(breakdown.card_mult, 2.0);
        assert_eq!(breakdown.total, 21.0);
    }

    #[test]
    fn gold_is_half_the_points() {
        let config = GameConfig::default();
        assert_eq!(gold_for_points(7.0, &config), 3.5);
        assert_eq!(gold_for_points(0.0, &config), 0.0);
    }
}
