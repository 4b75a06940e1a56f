use crate::{Card, Rank, Suit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Classified play. Ordered by base value; an unclassifiable set is `None`
/// wherever a `HandKind` is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandKind {
    Single,
    Pair,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandKind {
    pub const ALL: [HandKind; 7] = [
        HandKind::Single,
        HandKind::Pair,
        HandKind::Straight,
        HandKind::Flush,
        HandKind::FullHouse,
        HandKind::FourOfAKind,
        HandKind::StraightFlush,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandKind::Single => "single",
            HandKind::Pair => "pair",
            HandKind::Straight => "straight",
            HandKind::Flush => "flush",
            HandKind::FullHouse => "full_house",
            HandKind::FourOfAKind => "four_of_a_kind",
            HandKind::StraightFlush => "straight_flush",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandKind::Single => "Single",
            HandKind::Pair => "Pair",
            HandKind::Straight => "Straight",
            HandKind::Flush => "Flush",
            HandKind::FullHouse => "Full House",
            HandKind::FourOfAKind => "Four of a Kind",
            HandKind::StraightFlush => "Straight Flush",
        }
    }

    /// The next rung of the chain ladder, if any.
    pub fn next_rung(self) -> Option<HandKind> {
        match self {
            HandKind::Single => Some(HandKind::Pair),
            HandKind::Pair => Some(HandKind::Straight),
            HandKind::Straight => Some(HandKind::Flush),
            HandKind::Flush => Some(HandKind::FullHouse),
            HandKind::FullHouse => Some(HandKind::FourOfAKind),
            HandKind::FourOfAKind => Some(HandKind::StraightFlush),
            HandKind::StraightFlush => None,
        }
    }
}

impl fmt::Display for HandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classifies a selection. Only sizes 1, 2 and 5 can ever be valid, and the
/// result depends on the card multiset alone, never on selection order.
pub fn evaluate_hand(cards: &[Card]) -> Option<HandKind> {
    match cards.len() {
        1 => Some(HandKind::Single),
        2 if cards[0].rank == cards[1].rank => Some(HandKind::Pair),
        5 => evaluate_five(cards),
        _ => None,
    }
}

fn evaluate_five(cards: &[Card]) -> Option<HandKind> {
    let mut rank_counts: HashMap<Rank, usize> = HashMap::new();
    for card in cards {
        *rank_counts.entry(card.rank).or_insert(0) += 1;
    }
    let mut counts: Vec<usize> = rank_counts.values().copied().collect();
    counts.sort_by(|a, b| b.cmp(a));

    let flush = is_flush(cards);
    let straight = is_straight(cards);

    if straight && flush {
        return Some(HandKind::StraightFlush);
    }
    if counts.first() == Some(&4) {
        return Some(HandKind::FourOfAKind);
    }
    if counts == [3, 2] {
        return Some(HandKind::FullHouse);
    }
    if flush {
        return Some(HandKind::Flush);
    }
    if straight {
        return Some(HandKind::Straight);
    }
    None
}

fn is_flush(cards: &[Card]) -> bool {
    let first: Option<Suit> = cards.first().map(|card| card.suit);
    first.is_some_and(|suit| cards.iter().all(|card| card.suit == suit))
}

/// Five distinct consecutive values, ace high only.
fn is_straight(cards: &[Card]) -> bool {
    let mut values: Vec<u8> = cards.iter().map(|card| card.rank.value()).collect();
    values.sort_unstable();
    values.dedup();
    if values.len() != 5 {
        return false;
    }
    values.windows(2).all(|w| w[1] == w[0] + 1)
}
