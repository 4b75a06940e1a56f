use crate::HandKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandRule {
    pub kind: HandKind,
    pub base_points: f64,
}

/// Replaces a hand's base points while the run is on `level`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelOverride {
    pub level: u8,
    pub kind: HandKind,
    pub base_points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopOffer {
    pub id: String,
    pub name: String,
    pub kind: HandKind,
    pub bonus: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MagicRule {
    pub pair_upgrade: f64,
    pub card_multiplier_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub hand_size: usize,
    /// Cumulative score needed to clear each level, indexed by `level - 1`.
    pub level_targets: Vec<f64>,
    pub hands: Vec<HandRule>,
    #[serde(default)]
    pub level_overrides: Vec<LevelOverride>,
    pub gold_per_point: f64,
    pub chain_step: f64,
    pub shop: Vec<ShopOffer>,
    pub magic: MagicRule,
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

fn default_log_capacity() -> usize {
    8
}

impl GameConfig {
    pub fn target_for(&self, level: u8) -> Option<f64> {
        let idx = usize::from(level).checked_sub(1)?;
        self.level_targets.get(idx).copied()
    }

    pub fn max_level(&self) -> u8 {
        u8::try_from(self.level_targets.len()).unwrap_or(u8::MAX)
    }

    pub fn shop_offer(&self, id: &str) -> Option<&ShopOffer> {
        self.shop.iter().find(|offer| offer.id == id)
    }

    pub fn base_points(&self, kind: HandKind, level: u8) -> f64 {
        if let Some(rule) = self
            .level_overrides
            .iter()
            .find(|rule| rule.level == level && rule.kind == kind)
        {
            return rule.base_points;
        }
        self.hands
            .iter()
            .find(|rule| rule.kind == kind)
            .map(|rule| rule.base_points)
            .unwrap_or_else(|| default_base_points(kind))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let hands = HandKind::ALL
            .iter()
            .map(|&kind| HandRule {
                kind,
                base_points: default_base_points(kind),
            })
            .collect();
        Self {
            hand_size: 7,
            level_targets: vec![55.0, 60.0, 65.0],
            hands,
            level_overrides: vec![
                LevelOverride {
                    level: 2,
                    kind: HandKind::Single,
                    base_points: 0.5,
                },
                LevelOverride {
                    level: 2,
                    kind: HandKind::Pair,
                    base_points: 4.0,
                },
                LevelOverride {
                    level: 3,
                    kind: HandKind::Single,
                    base_points: 0.0,
                },
            ],
            gold_per_point: 0.5,
            chain_step: 0.25,
            shop: default_shop(),
            magic: MagicRule {
                pair_upgrade: 3.0,
                card_multiplier_factor: 2.0,
            },
            log_capacity: default_log_capacity(),
        }
    }
}

fn default_base_points(kind: HandKind) -> f64 {
    match kind {
        HandKind::Single => 1.0,
        HandKind::Pair => 2.0,
        HandKind::Straight => 5.0,
        HandKind::Flush => 6.0,
        HandKind::FullHouse => 8.0,
        HandKind::FourOfAKind => 10.0,
        HandKind::StraightFlush => 12.0,
    }
}

fn default_shop() -> Vec<ShopOffer> {
    [
        ("pair_bonus", "Extra Pair Bonus", HandKind::Pair, 5.0, 30.0),
        ("straight_bonus", "Straight Bonus", HandKind::Straight, 7.0, 40.0),
        ("flush_bonus", "Flush Bonus", HandKind::Flush, 8.0, 50.0),
        ("full_house_bonus", "Full House Bonus", HandKind::FullHouse, 10.0, 60.0),
        ("four_kind_bonus", "Four of a Kind Bonus", HandKind::FourOfAKind, 12.0, 75.0),
        (
            "straight_flush_bonus",
            "Straight Flush Bonus",
            HandKind::StraightFlush,
            15.0,
            100.0,
        ),
    ]
    .into_iter()
    .map(|(id, name, kind, bonus, cost)| ShopOffer {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        bonus,
        cost,
    })
    .collect()
}
