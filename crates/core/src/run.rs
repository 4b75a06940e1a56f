use crate::{
    Card, ChainState, Deck, EventLog, GameConfig, GameState, HandKind, MagicChoice, Modifiers,
    Phase, RngState, ScoreBreakdown, ShopError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod hand;
mod magic;
mod progress;
mod shop;
mod snapshot;
mod state;

pub use snapshot::*;

#[derive(Debug, Error, PartialEq)]
pub enum RunError {
    #[error("invalid phase: {0}")]
    InvalidPhase(Phase),
    #[error("run is over: {0}")]
    RunOver(Phase),
    #[error("invalid card selection")]
    InvalidSelection,
    #[error("invalid combination")]
    InvalidCombination,
    #[error("redraw not available")]
    RedrawNotAvailable,
    #[error("shop not available")]
    ShopNotAvailable,
    #[error("magic choice not available")]
    MagicNotAvailable,
    #[error("unknown magic choice '{0}'")]
    UnknownMagic(String),
    #[error("{0} needs a card from the hand")]
    MissingTarget(MagicChoice),
    #[error("shop error: {0}")]
    Shop(#[from] ShopError),
}

/// The whole session: one owned aggregate passed to every action.
#[derive(Debug, Clone)]
pub struct RunState {
    pub config: GameConfig,
    pub rng: RngState,
    pub deck: Deck,
    pub hand: Vec<Card>,
    pub state: GameState,
    pub modifiers: Modifiers,
    pub chain: ChainState,
    pub log: EventLog,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayOutcome {
    pub hand: HandKind,
    pub breakdown: ScoreBreakdown,
    pub points: f64,
    pub gold: f64,
    pub chain_count: u32,
    pub chain_mult: f64,
    pub drawn: usize,
    pub boost_drawn: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedrawOutcome {
    pub from_discard: usize,
    pub from_deck: usize,
    pub hand_size: usize,
}
