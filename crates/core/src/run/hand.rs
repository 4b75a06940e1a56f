use super::*;
use crate::{evaluate_hand, gold_for_points, score_play, Event, EventBus};

impl RunState {
    /// Tops the hand up to `hand_size` from the draw pile only.
    pub(super) fn refill_hand(&mut self, events: &mut EventBus) -> usize {
        let needed = self.config.hand_size.saturating_sub(self.hand.len());
        if needed == 0 {
            return 0;
        }
        let mut drawn = self.deck.draw_cards(needed);
        let count = drawn.len();
        self.hand.append(&mut drawn);
        if count > 0 {
            self.emit(events, Event::HandDealt { count });
        }
        count
    }

    /// Classifies and scores a selection without touching the run.
    pub fn preview(&self, indices: &[usize]) -> Result<ScoreBreakdown, RunError> {
        let cards = selected_cards(&self.hand, indices)?;
        let hand = evaluate_hand(&cards).ok_or(RunError::InvalidCombination)?;
        let chain_mult = self.chain.peek(hand);
        Ok(score_play(
            &cards,
            hand,
            self.state.level,
            &self.modifiers,
            chain_mult,
            &self.config,
        ))
    }

    pub fn play_hand(
        &mut self,
        indices: &[usize],
        events: &mut EventBus,
    ) -> Result<PlayOutcome, RunError> {
        self.ensure_phase(Phase::InProgress)?;
        let cards = selected_cards(&self.hand, indices)?;
        let Some(hand) = evaluate_hand(&cards) else {
            self.emit(events, Event::PlayRejected { cards: cards.len() });
            return Err(RunError::InvalidCombination);
        };

        let chain_mult = self.chain.advance(hand);
        let breakdown = score_play(
            &cards,
            hand,
            self.state.level,
            &self.modifiers,
            chain_mult,
            &self.config,
        );
        let points = breakdown.total;
        let gold = gold_for_points(points, &self.config);
        self.state.score += points;
        self.state.gold += gold;
        self.emit(
            events,
            Event::Played {
                hand,
                cards: cards.len(),
                points,
                gold,
                chain_count: self.chain.count,
                chain_mult,
                card_mult: breakdown.card_mult,
            },
        );

        let played = take_cards(&mut self.hand, indices);
        let played_count = played.len();
        self.deck.discard(played);
        let drawn = self.refill_hand(events);
        let boost_drawn = if self.modifiers.consume_draw_boost() {
            let mut boosted = self.deck.take_random_discards(played_count, &mut self.rng);
            let count = boosted.len();
            self.hand.append(&mut boosted);
            self.emit(
                events,
                Event::DrawBoostUsed {
                    requested: played_count,
                    drawn: count,
                },
            );
            Some(count)
        } else {
            None
        };

        self.check_progress(events);
        Ok(PlayOutcome {
            hand,
            breakdown,
            points,
            gold,
            chain_count: self.chain.count,
            chain_mult,
            drawn,
            boost_drawn,
        })
    }

    /// Skips the turn: no scoring, just a refill from the draw pile.
    pub fn pass(&mut self, events: &mut EventBus) -> Result<usize, RunError> {
        self.ensure_phase(Phase::InProgress)?;
        let drawn = self.refill_hand(events);
        self.emit(events, Event::Passed { drawn });
        self.check_progress(events);
        Ok(drawn)
    }

    /// Swaps the hand for random discards of the same size. One shot.
    pub fn redraw(&mut self, events: &mut EventBus) -> Result<RedrawOutcome, RunError> {
        self.ensure_phase(Phase::InProgress)?;
        if !self.modifiers.consume_redraw() {
            return Err(RunError::RedrawNotAvailable);
        }
        let hand_size = self.hand.len();
        let staged = self.deck.take_random_discards(hand_size, &mut self.rng);
        let from_discard = staged.len();
        let old_hand = std::mem::replace(&mut self.hand, staged);
        self.deck.discard(old_hand);

        let mut from_deck = 0;
        if from_discard == 0 {
            let mut topped = self.deck.draw_cards(hand_size);
            from_deck = topped.len();
            self.hand.append(&mut topped);
        }
        self.emit(
            events,
            Event::Redrawn {
                from_discard,
                from_deck,
                hand: self.hand.len(),
                deck: self.deck.draw.len(),
                discard: self.deck.discard.len(),
            },
        );
        if self.hand.is_empty() && self.deck.is_exhausted() {
            self.fail(events);
        } else {
            self.check_progress(events);
        }
        Ok(RedrawOutcome {
            from_discard,
            from_deck,
            hand_size: self.hand.len(),
        })
    }
}

fn validate_indices(hand: &[Card], indices: &[usize]) -> Result<Vec<usize>, RunError> {
    let mut unique = indices.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if unique.len() != indices.len() || unique.iter().any(|&idx| idx >= hand.len()) {
        return Err(RunError::InvalidSelection);
    }
    Ok(unique)
}

fn selected_cards(hand: &[Card], indices: &[usize]) -> Result<Vec<Card>, RunError> {
    let unique = validate_indices(hand, indices)?;
    Ok(unique.into_iter().map(|idx| hand[idx]).collect())
}

/// Removes already-validated indices, keeping the played cards in hand order.
fn take_cards(hand: &mut Vec<Card>, indices: &[usize]) -> Vec<Card> {
    let mut unique = indices.to_vec();
    unique.sort_unstable_by(|a, b| b.cmp(a));
    unique.dedup();
    let mut picked = Vec::with_capacity(unique.len());
    for idx in unique {
        if idx < hand.len() {
            picked.push(hand.remove(idx));
        }
    }
    picked.reverse();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    fn hand() -> Vec<Card> {
        vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Five, Suit::Hearts),
            Card::new(Rank::Nine, Suit::Spades),
        ]
    }

    #[test]
    fn duplicate_or_out_of_range_indices_are_rejected() {
        assert_eq!(
            validate_indices(&hand(), &[0, 0]),
            Err(RunError::InvalidSelection)
        );
        assert_eq!(
            validate_indices(&hand(), &[3]),
            Err(RunError::InvalidSelection)
        );
        assert_eq!(validate_indices(&hand(), &[2, 0]), Ok(vec![0, 2]));
    }

    #[test]
    fn take_cards_preserves_hand_order() {
        let mut cards = hand();
        let taken = take_cards(&mut cards, &[2, 0]);
        assert_eq!(taken[0].rank, Rank::Two);
        assert_eq!(taken[1].rank, Rank::Nine);
        assert_eq!(cards, vec![Card::new(Rank::Five, Suit::Hearts)]);
    }
}
