use super::*;
use crate::{CardMultiplier, ShopListing};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModifierSnapshot {
    pub bonuses: BTreeMap<HandKind, f64>,
    pub card_multiplier: Option<CardMultiplier>,
    pub draw_boost_available: bool,
    pub redraw_available: bool,
}

/// Read-only view handed to presentation code.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunSnapshot {
    pub seed: u64,
    pub phase: Phase,
    pub level: u8,
    pub max_level: u8,
    pub target: f64,
    pub score: f64,
    pub gold: f64,
    pub chain_count: u32,
    pub chain_mult: f64,
    pub chain_last: Option<HandKind>,
    pub deck_size: usize,
    pub hand_size: usize,
    pub discard_size: usize,
    pub hand: Vec<Card>,
    pub modifiers: ModifierSnapshot,
    pub shop: Vec<ShopListing>,
    pub cleared: bool,
    pub failed: bool,
    pub finished_all: bool,
    pub log: Vec<String>,
}

impl RunState {
    pub fn snapshot(&self) -> RunSnapshot {
        let bonuses = self
            .modifiers
            .bonuses
            .iter()
            .filter(|(_, value)| **value != 0.0)
            .map(|(kind, value)| (*kind, *value))
            .collect();
        let shop = if self.state.phase == Phase::Shop {
            self.shop_listings()
        } else {
            Vec::new()
        };
        RunSnapshot {
            seed: self.seed(),
            phase: self.state.phase,
            level: self.state.level,
            max_level: self.config.max_level(),
            target: self.state.target,
            score: self.state.score,
            gold: self.state.gold,
            chain_count: self.chain.count,
            chain_mult: self.chain.multiplier,
            chain_last: self.chain.last,
            deck_size: self.deck.draw.len(),
            hand_size: self.hand.len(),
            discard_size: self.deck.discard.len(),
            hand: self.hand.clone(),
            modifiers: ModifierSnapshot {
                bonuses,
                card_multiplier: self.modifiers.card_multiplier,
                draw_boost_available: self.modifiers.draw_boost_available,
                redraw_available: self.modifiers.redraw_available,
            },
            shop,
            cleared: self.state.cleared(),
            failed: self.state.failed(),
            finished_all: self.state.finished_all(),
            log: self.log.to_vec(),
        }
    }
}
