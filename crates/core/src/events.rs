use crate::{Card, HandKind, MagicChoice, Rank};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RunStarted {
        seed: u64,
        restarted: bool,
    },
    HandDealt {
        count: usize,
    },
    Played {
        hand: HandKind,
        cards: usize,
        points: f64,
        gold: f64,
        chain_count: u32,
        chain_mult: f64,
        card_mult: f64,
    },
    PlayRejected {
        cards: usize,
    },
    Passed {
        drawn: usize,
    },
    DrawBoostUsed {
        requested: usize,
        drawn: usize,
    },
    Redrawn {
        from_discard: usize,
        from_deck: usize,
        hand: usize,
        deck: usize,
        discard: usize,
    },
    LevelCleared {
        level: u8,
        score: f64,
        gold: f64,
    },
    ShopBought {
        id: String,
        kind: HandKind,
        bonus: f64,
        cost: f64,
        gold: f64,
    },
    ShopClosed,
    MagicChosen {
        choice: MagicChoice,
    },
    SuitChanged {
        before: Card,
        after: Card,
    },
    CardMultiplierSet {
        rank: Rank,
        factor: f64,
    },
    LevelStarted {
        level: u8,
        target: f64,
    },
    RunFailed {
        score: f64,
        target: f64,
    },
    RunCompleted {
        score: f64,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::RunStarted { seed, restarted } => {
                if *restarted {
                    write!(f, "Restarted (seed {seed}).")
                } else {
                    write!(f, "Welcome. Select 1, 2 or 5 cards and play, or pass. (seed {seed})")
                }
            }
            Event::HandDealt { count } => write!(f, "Drew {count} card(s)."),
            Event::Played {
                hand,
                cards,
                points,
                gold,
                chain_count,
                chain_mult,
                card_mult,
            } => {
                write!(f, "Played {cards} card(s) => {hand}, +{points:.1} pts, +{gold:.1} gold")?;
                if *chain_mult > 1.0 {
                    write!(f, " [chain x{chain_mult:.2} #{chain_count}]")?;
                }
                if *card_mult > 1.0 {
                    write!(f, " [card x{card_mult:.0}]")?;
                }
                Ok(())
            }
            Event::PlayRejected { cards } => write!(
                f,
                "Invalid play ({cards} card(s)). Try a single, a pair, or a 5-card combo."
            ),
            Event::Passed { drawn } => write!(f, "Passed. Drew {drawn} card(s)."),
            Event::DrawBoostUsed { requested, drawn } => write!(
                f,
                "Draw Boost: drew {drawn}/{requested} random card(s) from the discard pile (used up)."
            ),
            Event::Redrawn {
                from_discard,
                from_deck,
                hand,
                deck,
                discard,
            } => write!(
                f,
                "Redraw: {from_discard} from discard, {from_deck} from deck; hand={hand}, deck={deck}, discard={discard}"
            ),
            Event::LevelCleared { level, score, gold } => write!(
                f,
                "Level {level} cleared with {score:.1} pts! Visit the shop. Gold: {gold:.1}"
            ),
            Event::ShopBought {
                kind, bonus, cost, gold, ..
            } => write!(
                f,
                "Bought: +{bonus} {kind} bonus for {cost} gold ({gold:.1} left)."
            ),
            Event::ShopClosed => write!(f, "Shop closed. Choose a magic upgrade."),
            Event::MagicChosen { choice } => write!(f, "Chosen: {choice}."),
            Event::SuitChanged { before, after } => {
                write!(f, "Changed suit of {before} to {after}.")
            }
            Event::CardMultiplierSet { rank, factor } => {
                write!(f, "Card Multiplier set to rank {} (x{factor}).", rank.label())
            }
            Event::LevelStarted { level, target } => {
                write!(f, "Starting level {level} (target {target}).")
            }
            Event::RunFailed { score, target } => write!(
                f,
                "Deck and hand are empty at {score:.1}/{target} -> GAME OVER."
            ),
            Event::RunCompleted { score } => {
                write!(f, "All levels cleared with {score:.1} pts!")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Bounded narrative log for display. Not authoritative state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventLog {
    capacity: usize,
    lines: VecDeque<String>,
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_only_the_most_recent_lines() {
        let mut log = EventLog::with_capacity(8);
        for idx in 0..12 {
            log.push(format!("line {idx}"));
        }
        let lines = log.to_vec();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines.first().map(String::as_str), Some("line 4"));
        assert_eq!(lines.last().map(String::as_str), Some("line 11"));
    }

    #[test]
    fn played_event_mentions_chain_only_when_active() {
        let plain = Event::Played {
            hand: HandKind::Pair,
            cards: 2,
            points: 2.0,
            gold: 1.0,
            chain_count: 1,
            chain_mult: 1.0,
            card_mult: 1.0,
        };
        assert!(!plain.to_string().contains("chain"));
        let chained = Event::Played {
            hand: HandKind::Pair,
            cards: 2,
            points: 2.5,
            gold: 1.25,
            chain_count: 2,
            chain_mult: 1.25,
            card_mult: 1.0,
        };
        assert!(chained.to_string().contains("chain x1.25 #2"));
    }

    #[test]
    fn bus_drains_in_order() {
        let mut bus = EventBus::default();
        bus.push(Event::ShopClosed);
        bus.push(Event::HandDealt { count: 3 });
        let drained: Vec<Event> = bus.drain().collect();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], Event::ShopClosed);
        assert!(bus.is_empty());
    }
}
