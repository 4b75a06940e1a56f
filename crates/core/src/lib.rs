//! Core rules and progression engine. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod chain;
pub mod config;
pub mod deck;
pub mod events;
pub mod hand;
pub mod magic;
pub mod rng;
pub mod run;
pub mod scoring;
pub mod shop;
pub mod state;

pub use cards::*;
pub use chain::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use hand::*;
pub use magic::*;
pub use rng::*;
pub use run::*;
pub use scoring::*;
pub use shop::*;
pub use state::*;
