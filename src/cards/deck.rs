//! Deck enumeration and flop sampling.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use super::board::Board;
use super::card::{Card, HoleCards, Rank, Suit};

/// A deck of 52 cards, minus any dead cards.
#[derive(Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a full deck, grouped by suit in the solver's suit order.
    pub fn new() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// Create a deck with specific cards removed.
    pub fn without(dead_cards: &[Card]) -> Self {
        let mut deck = Self::new();
        deck.cards.retain(|c| !dead_cards.contains(c));
        deck
    }

    /// Number of cards left.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Draw a uniformly random flop from the remaining cards.
    ///
    /// Returns `None` if fewer than 3 cards are left.
    pub fn sample_flop<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Board> {
        let picked: Vec<Card> = self.cards.choose_multiple(rng, 3).copied().collect();
        Board::new(&picked).ok()
    }

    /// Every two-card combination of the remaining cards.
    ///
    /// A deck built with `Deck::without(board.cards())` yields the
    /// C(49,2) = 1176 holdings a flop leaves live.
    pub fn holdings(&self) -> Vec<HoleCards> {
        let mut out = Vec::with_capacity(self.cards.len() * self.cards.len().saturating_sub(1) / 2);
        for (i, &a) in self.cards.iter().enumerate() {
            for &b in &self.cards[i + 1..] {
                // cards in a deck are distinct
                if let Ok(hole) = HoleCards::new(a, b) {
                    out.push(hole);
                }
            }
        }
        out
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_full_deck() {
        let deck = Deck::new();
        assert_eq!(deck.len(), 52);
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_deck_without() {
        let dead: Vec<Card> = vec!["As".parse().unwrap(), "Ah".parse().unwrap()];
        let deck = Deck::without(&dead);
        assert_eq!(deck.len(), 50);
        assert!(!deck.cards().contains(&dead[0]));
    }

    #[test]
    fn test_holdings_count() {
        assert_eq!(Deck::new().holdings().len(), 1326);

        let board: Board = "QsJh2h".parse().unwrap();
        let holdings = Deck::without(board.cards()).holdings();
        assert_eq!(holdings.len(), 1176);
        assert!(holdings.iter().all(|h| !board.blocks(h)));
    }

    #[test]
    fn test_sample_flop() {
        let mut rng = StdRng::seed_from_u64(42);
        let deck = Deck::new();
        for _ in 0..100 {
            let board = deck.sample_flop(&mut rng).unwrap();
            let ranks = board.ranks();
            assert!(ranks[0] >= ranks[1] && ranks[1] >= ranks[2]);
        }

        let tiny = Deck::without(&Deck::new().cards()[2..]);
        assert_eq!(tiny.len(), 2);
        assert!(tiny.sample_flop(&mut rng).is_none());
    }
}
