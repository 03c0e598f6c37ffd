//! Hand classification on the flop.
//!
//! Maps a holding and a flop to one of twelve mutually exclusive
//! categories, see [`classifier`] for the rule cascade.

pub mod category;
pub mod classifier;

pub use category::{Category, CategoryGroup};
pub use classifier::{classify, classify_all, longest_run};
