//! Card representation.
//!
//! - `Rank`: 2 through Ace, ordered by face value (Ace high only)
//! - `Suit`: one of four suits, compared for equality only
//! - `Card`: a rank and a suit, written as `"As"`, `"Th"`, `"2c"`
//! - `HoleCards`: a player's two private cards, written as `"AsKh"`

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Rank characters in ascending order.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters, in the solver's deck order.
const SUIT_CHARS: [char; 4] = ['s', 'd', 'c', 'h'];

/// Rank of a card. The discriminant is the face value (Ace = 14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    /// Deuce.
    Two = 2,
    /// Three.
    Three = 3,
    /// Four.
    Four = 4,
    /// Five.
    Five = 5,
    /// Six.
    Six = 6,
    /// Seven.
    Seven = 7,
    /// Eight.
    Eight = 8,
    /// Nine.
    Nine = 9,
    /// Ten (`T`).
    Ten = 10,
    /// Jack (`J`).
    Jack = 11,
    /// Queen (`Q`).
    Queen = 12,
    /// King (`K`).
    King = 13,
    /// Ace (`A`), always high.
    Ace = 14,
}

impl Rank {
    /// All ranks, lowest first.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Face value, 2 through 14.
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Parse a rank character.
    pub fn from_char(c: char) -> Result<Self, ParseError> {
        RANK_CHARS
            .iter()
            .position(|&r| r == c)
            .map(|i| Rank::ALL[i])
            .ok_or(ParseError::InvalidRank(c))
    }

    /// Character used in card strings.
    pub fn to_char(self) -> char {
        RANK_CHARS[(self.value() - 2) as usize]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Suit of a card.
///
/// Suits have no poker meaning beyond equality; the derived order only lets
/// cards live in sorted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// `s`
    Spades,
    /// `d`
    Diamonds,
    /// `c`
    Clubs,
    /// `h`
    Hearts,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Clubs, Suit::Hearts];

    /// Parse a suit character.
    pub fn from_char(c: char) -> Result<Self, ParseError> {
        SUIT_CHARS
            .iter()
            .position(|&s| s == c)
            .map(|i| Suit::ALL[i])
            .ok_or(ParseError::InvalidSuit(c))
    }

    /// Character used in card strings.
    pub fn to_char(self) -> char {
        SUIT_CHARS[self as usize]
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A single playing card.
///
/// Cards order by rank first; two cards are equal only if rank and suit
/// both match.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card from a rank and a suit.
    #[inline]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// The card's rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The card's suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl FromStr for Card {
    type Err = ParseError;

    /// Parse a card from a string like "As", "Kh", "2c".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(ParseError::InvalidLength {
                input: s.to_string(),
                expected: 2,
            });
        }
        let rank = Rank::from_char(chars[0])?;
        let suit = Suit::from_char(chars[1])?;
        Ok(Self::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A player's two hole cards.
///
/// The pair is unordered: `AsKh` and `KhAs` are the same holding. The higher
/// card is stored first.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards {
    /// Higher card (by rank, then suit).
    pub card1: Card,
    /// Lower card.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards from two distinct cards.
    pub fn new(a: Card, b: Card) -> Result<Self, ParseError> {
        if a == b {
            return Err(ParseError::DuplicateCard(a));
        }
        let (card1, card2) = if a > b { (a, b) } else { (b, a) };
        Ok(Self { card1, card2 })
    }

    /// Both cards, higher first.
    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    /// Both ranks, higher first.
    pub fn ranks(&self) -> [Rank; 2] {
        [self.card1.rank(), self.card2.rank()]
    }

    /// Check if both cards share a rank.
    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }

    /// Check if both cards share a suit.
    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    /// Check if either card is `card`.
    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }
}

impl FromStr for HoleCards {
    type Err = ParseError;

    /// Parse a 4-character holding key like "AsKh" (no separator).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(ParseError::InvalidLength {
                input: s.to_string(),
                expected: 4,
            });
        }
        let a = Card::new(Rank::from_char(chars[0])?, Suit::from_char(chars[1])?);
        let b = Card::new(Rank::from_char(chars[2])?, Suit::from_char(chars[3])?);
        Self::new(a, b)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
