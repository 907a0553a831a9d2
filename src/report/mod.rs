//! Output rendering for shopping lists and recipes.

pub mod generator;

pub use generator::*;
