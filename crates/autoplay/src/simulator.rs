use crate::{AutoAction, AutoplayConfig, AutoplayError, EvalMetrics};
use chainhand_core::{Card, EventBus, GameConfig, MagicChoice, Phase, RunState};

#[derive(Debug)]
pub struct Simulator {
    pub run: RunState,
    pub events: EventBus,
}

impl Simulator {
    pub fn new(run: RunState) -> Self {
        Self {
            run,
            events: EventBus::default(),
        }
    }

    /// Starts a fresh run seeded from `cfg.seed`.
    pub fn from_config(game: GameConfig, cfg: &AutoplayConfig) -> Self {
        let mut events = EventBus::default();
        let run = RunState::new(game, cfg.seed, &mut events);
        Self { run, events }
    }

    pub fn metrics(&self) -> EvalMetrics {
        EvalMetrics {
            level: self.run.state.level,
            max_level: self.run.config.max_level(),
            score: self.run.state.score,
            target: self.run.state.target,
            gold: self.run.state.gold,
            failed: self.run.state.failed(),
            completed: self.run.state.finished_all(),
        }
    }

    pub fn phase_name(&self) -> String {
        self.run.state.phase.label().to_string()
    }

    pub fn legal_actions(&self) -> Vec<AutoAction> {
        let mut actions = Vec::new();
        match self.run.state.phase {
            Phase::InProgress => {
                actions.extend(legal_play_actions(&self.run));
                actions.push(AutoAction::Pass);
                if self.run.modifiers.redraw_available {
                    actions.push(AutoAction::Redraw);
                }
            }
            Phase::Shop => {
                for listing in self.run.shop_listings() {
                    if listing.affordable {
                        actions.push(AutoAction::Buy { item: listing.id });
                    }
                }
                actions.push(AutoAction::ContinueShop);
            }
            Phase::MagicChoice => {
                for choice in MagicChoice::ALL {
                    if choice.needs_target() {
                        for idx in 0..self.run.hand.len() {
                            actions.push(AutoAction::Magic {
                                choice,
                                target: Some(idx),
                            });
                        }
                    } else {
                        actions.push(AutoAction::Magic {
                            choice,
                            target: None,
                        });
                    }
                }
            }
            Phase::Failed | Phase::Completed => {}
        }
        actions.sort_by_key(|item| item.stable_key());
        actions.dedup_by_key(|item| item.stable_key());
        actions
    }

    /// One-ply greedy policy: best previewed play, priciest affordable
    /// upgrade, first preferred magic.
    pub fn greedy_action(&self, cfg: &AutoplayConfig) -> Option<AutoAction> {
        match self.run.state.phase {
            Phase::InProgress => Some(self.greedy_turn()),
            Phase::Shop => {
                if cfg.buy_upgrades {
                    let best = self
                        .run
                        .shop_listings()
                        .into_iter()
                        .filter(|listing| listing.affordable)
                        .max_by(|a, b| a.cost.total_cmp(&b.cost));
                    if let Some(listing) = best {
                        return Some(AutoAction::Buy { item: listing.id });
                    }
                }
                Some(AutoAction::ContinueShop)
            }
            Phase::MagicChoice => Some(self.greedy_magic(cfg)),
            Phase::Failed | Phase::Completed => None,
        }
    }

    fn greedy_turn(&self) -> AutoAction {
        let best = legal_play_actions(&self.run)
            .into_iter()
            .filter_map(|action| {
                let AutoAction::Play { indices } = &action else {
                    return None;
                };
                let breakdown = self.run.preview(indices).ok()?;
                Some((breakdown.total, action))
            })
            .max_by(|a, b| a.0.total_cmp(&b.0));
        match best {
            Some((points, action)) => {
                let weak = points <= self.run.config.base_points(
                    chainhand_core::HandKind::Single,
                    self.run.state.level,
                );
                if weak
                    && self.run.modifiers.redraw_available
                    && self.run.deck.discard.len() >= self.run.hand.len()
                {
                    AutoAction::Redraw
                } else {
                    action
                }
            }
            None => AutoAction::Pass,
        }
    }

    fn greedy_magic(&self, cfg: &AutoplayConfig) -> AutoAction {
        let target = highest_rank_index(&self.run.hand);
        for &choice in &cfg.magic_preference {
            if !choice.needs_target() {
                return AutoAction::Magic {
                    choice,
                    target: None,
                };
            }
            if let Some(idx) = target {
                return AutoAction::Magic {
                    choice,
                    target: Some(idx),
                };
            }
        }
        AutoAction::Magic {
            choice: MagicChoice::HandScoreUpgrade,
            target: None,
        }
    }

    pub fn describe_action(&self, action: &AutoAction) -> Option<String> {
        match action {
            AutoAction::Play { indices } => {
                let cards = cards_from_hand(&self.run.hand, indices);
                let breakdown = self.run.preview(indices).ok()?;
                Some(format!(
                    "play [{}]: {} base {} + bonus {} x chain {:.2} x card {} = {}",
                    format_cards(&cards),
                    breakdown.hand,
                    breakdown.base,
                    breakdown.bonus,
                    breakdown.chain_mult,
                    breakdown.card_mult,
                    breakdown.total
                ))
            }
            AutoAction::Redraw => Some(format!(
                "redraw {} card(s) from a discard pile of {}",
                self.run.hand.len(),
                self.run.deck.discard.len()
            )),
            AutoAction::Buy { item } => {
                let offer = self.run.config.shop_offer(item)?;
                Some(format!(
                    "buy {}: +{} {} for {} gold",
                    offer.name, offer.bonus, offer.kind, offer.cost
                ))
            }
            AutoAction::Magic {
                choice,
                target: Some(idx),
            } => {
                let card = self.run.hand.get(*idx)?;
                Some(format!("{} on {card}", choice.display_name()))
            }
            AutoAction::Pass | AutoAction::ContinueShop | AutoAction::Magic { .. } => None,
        }
    }

    /// Applies one action and returns how many events it produced.
    pub fn apply_action(&mut self, action: &AutoAction) -> Result<usize, AutoplayError> {
        match action {
            AutoAction::Play { indices } => {
                self.run.play_hand(indices, &mut self.events)?;
            }
            AutoAction::Pass => {
                self.run.pass(&mut self.events)?;
            }
            AutoAction::Redraw => {
                self.run.redraw(&mut self.events)?;
            }
            AutoAction::Buy { item } => {
                self.run.buy_upgrade(item, &mut self.events)?;
            }
            AutoAction::ContinueShop => self.run.continue_from_shop(&mut self.events)?,
            AutoAction::Magic { choice, target } => {
                if choice.needs_target() && target.is_none() {
                    return Err(AutoplayError::InvalidAction(action.short_label()));
                }
                self.run.choose_magic(*choice, *target, &mut self.events)?;
            }
        }
        let event_count = self.events.drain().count();
        Ok(event_count)
    }
}

fn legal_play_actions(run: &RunState) -> Vec<AutoAction> {
    let mut out = Vec::new();
    for size in [1, 2, 5] {
        let mut combos = Vec::new();
        enumerate_combinations(run.hand.len(), size, &mut combos);
        for indices in combos {
            if run.preview(&indices).is_ok() {
                out.push(AutoAction::Play { indices });
            }
        }
    }
    out
}

fn enumerate_combinations(n: usize, k: usize, out: &mut Vec<Vec<usize>>) {
    if k == 0 || k > n {
        return;
    }
    let mut current = Vec::with_capacity(k);
    recurse_combinations(0, n, k, &mut current, out);
}

fn recurse_combinations(
    start: usize,
    n: usize,
    k: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if current.len() == k {
        out.push(current.clone());
        return;
    }
    for idx in start..n {
        current.push(idx);
        recurse_combinations(idx + 1, n, k, current, out);
        current.pop();
    }
}

fn highest_rank_index(hand: &[Card]) -> Option<usize> {
    hand.iter()
        .enumerate()
        .max_by_key(|(idx, card)| (card.rank, std::cmp::Reverse(*idx)))
        .map(|(idx, _)| idx)
}

fn cards_from_hand(hand: &[Card], indices: &[usize]) -> Vec<Card> {
    indices
        .iter()
        .filter_map(|idx| hand.get(*idx).copied())
        .collect()
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
