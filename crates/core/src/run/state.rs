use super::*;
use crate::{Event, EventBus, DECK_SIZE};

impl RunState {
    pub fn new(config: GameConfig, seed: u64, events: &mut EventBus) -> Self {
        let target = config.target_for(1).unwrap_or(0.0);
        let mut run = Self {
            rng: RngState::from_seed(seed),
            deck: Deck::default(),
            hand: Vec::new(),
            state: GameState::new(target),
            modifiers: Modifiers::default(),
            chain: ChainState::with_step(config.chain_step),
            log: EventLog::with_capacity(config.log_capacity),
            config,
        };
        run.deal_fresh(false, events);
        run
    }

    /// Throws away everything but the config and starts over on the next
    /// seed drawn from the current generator.
    pub fn restart(&mut self, events: &mut EventBus) {
        let seed = self.rng.next_u64();
        self.restart_with_seed(seed, events);
    }

    pub fn restart_with_seed(&mut self, seed: u64, events: &mut EventBus) {
        self.rng.reseed(seed);
        self.state = GameState::new(self.config.target_for(1).unwrap_or(0.0));
        self.modifiers = Modifiers::default();
        self.chain.reset();
        self.log.clear();
        self.deal_fresh(true, events);
    }

    fn deal_fresh(&mut self, restarted: bool, events: &mut EventBus) {
        self.deck = Deck::standard52();
        self.deck.shuffle(&mut self.rng);
        self.hand.clear();
        self.emit(
            events,
            Event::RunStarted {
                seed: self.rng.seed(),
                restarted,
            },
        );
        self.refill_hand(events);
        tracing::info!(seed = self.rng.seed(), restarted, "run started");
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Cards across draw pile, hand and discard pile. Always the full deck.
    pub fn card_count(&self) -> usize {
        self.deck.draw.len() + self.hand.len() + self.deck.discard.len()
    }

    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        cards.extend_from_slice(&self.deck.draw);
        cards.extend_from_slice(&self.hand);
        cards.extend_from_slice(&self.deck.discard);
        cards
    }

    pub(super) fn emit(&mut self, events: &mut EventBus, event: Event) {
        tracing::debug!(?event, "run event");
        self.log.push(event.to_string());
        events.push(event);
    }

    pub(super) fn ensure_phase(&self, expected: Phase) -> Result<(), RunError> {
        let phase = self.state.phase;
        if phase.is_terminal() {
            return Err(RunError::RunOver(phase));
        }
        if phase != expected {
            return Err(RunError::InvalidPhase(phase));
        }
        Ok(())
    }
}
