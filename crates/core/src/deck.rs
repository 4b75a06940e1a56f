use crate::{Card, Rank, RngState, Suit};

pub const DECK_SIZE: usize = 52;

/// Draw pile plus discard pile. The hand lives on the run itself.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn standard52() -> Self {
        let mut draw = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push(Card::new(rank, suit));
            }
        }
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn draw_card(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    pub fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(card) = self.draw.pop() {
                cards.push(card);
            } else {
                break;
            }
        }
        cards
    }

    pub fn discard(&mut self, mut cards: Vec<Card>) {
        self.discard.append(&mut cards);
    }

    /// Removes up to `count` cards chosen uniformly at random from the discard pile.
    pub fn take_random_discards(&mut self, count: usize, rng: &mut RngState) -> Vec<Card> {
        let mut taken = Vec::with_capacity(count.min(self.discard.len()));
        for _ in 0..count {
            let Some(idx) = rng.pick_index(self.discard.len()) else {
                break;
            };
            taken.push(self.discard.remove(idx));
        }
        taken
    }

    pub fn is_exhausted(&self) -> bool {
        self.draw.is_empty() && self.discard.is_empty()
    }
}
