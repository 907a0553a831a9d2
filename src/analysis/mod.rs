//! Shopping list analysis.
//!
//! Scaling, aggregation and staple handling. Nothing in here performs I/O.

pub mod aggregator;
pub mod staples;

pub use aggregator::*;
pub use staples::{StapleCatalog, StapleSet};
