//! Seeded greedy autoplay over the core run API.

mod action;
mod config;
mod driver;
mod error;
mod objective;
mod simulator;
mod trace;

pub use action::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use objective::*;
pub use simulator::*;
pub use trace::*;
