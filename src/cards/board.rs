//! Flop board.

use std::fmt;
use std::str::FromStr;

use super::card::{Card, HoleCards, Rank};
use crate::error::{Error, ParseError, ValidationError};

/// Three community cards, kept in rank-descending order.
///
/// The order is fixed at construction (stable, so equal ranks keep their
/// input order), which makes `top()` the highest board card.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cards: [Card; 3],
}

impl Board {
    /// Create a board from exactly 3 distinct cards.
    pub fn new(cards: &[Card]) -> Result<Self, ValidationError> {
        let mut sorted: [Card; 3] = cards
            .try_into()
            .map_err(|_| ValidationError::BoardSize(cards.len()))?;

        for (i, card) in sorted.iter().enumerate() {
            if sorted[..i].contains(card) {
                return Err(ValidationError::DuplicateBoardCard(*card));
            }
        }

        // sort_by is stable
        sorted.sort_by(|a, b| b.rank().cmp(&a.rank()));
        Ok(Self { cards: sorted })
    }

    /// The cards, highest rank first.
    pub fn cards(&self) -> &[Card; 3] {
        &self.cards
    }

    /// The highest-ranked board card.
    #[inline]
    pub fn top(&self) -> Card {
        self.cards[0]
    }

    /// Board ranks, highest first.
    pub fn ranks(&self) -> [Rank; 3] {
        self.cards.map(|c| c.rank())
    }

    /// Check if the board contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Check if any board card has this rank.
    pub fn has_rank(&self, rank: Rank) -> bool {
        self.cards.iter().any(|c| c.rank() == rank)
    }

    /// Check if either hole card is also on the board.
    pub fn blocks(&self, hole: &HoleCards) -> bool {
        hole.cards().iter().any(|&c| self.contains(c))
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse a board from a string like "QsJh2h" or "Qs Jh 2h".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.len() != 6 {
            return Err(Error::parse(
                s,
                ParseError::InvalidLength {
                    input: compact.iter().collect(),
                    expected: 6,
                },
            ));
        }

        let cards = compact
            .chunks(2)
            .map(|pair| pair.iter().collect::<String>().parse::<Card>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::parse(s, e))?;

        Ok(Self::new(&cards)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}
