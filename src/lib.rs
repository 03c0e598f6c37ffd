//! # Flop Summary
//!
//! Condenses a poker solver's flop strategy into something a human can read
//! at a glance: every holding is sorted into a hand category ("Set",
//! "Top Pair Top Kicker", "Flush Draw", "Air", ...) and the solver's
//! per-holding action frequencies are averaged per category.
//!
//! ## Quick Start
//!
//! ```
//! use flop_summary::{aggregate, Board, Category, StrategyTable};
//!
//! let board: Board = "QsJh2h".parse().unwrap();
//! let table = StrategyTable::from_pairs(
//!     vec!["CHECK".to_string(), "BET".to_string()],
//!     vec![("KdAc", vec![0.6, 0.4]), ("AsKc", vec![0.8, 0.2])],
//! )
//! .unwrap();
//!
//! let summary = aggregate(&table, &board).unwrap();
//! let overcards = summary.get(Category::Overcards).unwrap();
//! assert_eq!(overcards.holdings, 2);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: cards, hole cards, the flop and the deck
//! - [`classify`]: the hand category cascade
//! - [`strategy`]: strategy tables and solver JSON import
//! - [`summary`]: per-category aggregation and reports
//!
//! ## Architecture
//!
//! ```text
//!   solver JSON ──► SolverNode ──► StrategyTable
//!                                       │
//!                        per row        ▼
//!              Board ──► classify ──► aggregate ──► CategorySummary ──► SummaryReport
//! ```

#![warn(missing_docs)]

/// Card, board and deck types.
pub mod cards;

/// Hand classification on the flop.
pub mod classify;

/// Error types.
pub mod error;

/// Solver strategy tables and export loading.
pub mod strategy;

/// Per-category summaries and reports.
pub mod summary;

// Re-export commonly used types at crate root for convenience
pub use cards::{Board, Card, Deck, HoleCards, Rank, Suit};
pub use classify::{classify, Category, CategoryGroup};
pub use error::{Error, ParseError, ValidationError};
pub use strategy::{SolverNode, StrategyRow, StrategyTable};
pub use summary::{aggregate, aggregate_with, CategorySummary, RowPolicy, SummaryConfig, SummaryReport};
