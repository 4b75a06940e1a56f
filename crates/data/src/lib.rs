//! Data loading and validation for game rules.

pub mod load;

pub use load::*;
