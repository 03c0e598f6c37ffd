//! Solver strategy model.
//!
//! - `table`: the parsed per-holding strategy of one decision node
//! - `export`: loading solver JSON exports and picking a node out of the tree

pub mod export;
pub mod table;

pub use export::{NodeStrategy, SolverNode};
pub use table::{ActionTotal, StrategyRow, StrategyTable};
