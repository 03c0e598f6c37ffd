//! Card, hole card, board and deck types.
//!
//! ## Modules
//!
//! - `card`: `Rank`, `Suit`, `Card` and `HoleCards`
//! - `board`: the 3-card flop, normalized rank-descending
//! - `deck`: deck enumeration and random flop sampling

pub mod board;
pub mod card;
pub mod deck;

pub use board::Board;
pub use card::{Card, HoleCards, Rank, Suit};
pub use deck::Deck;
