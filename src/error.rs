//! Error types.
//!
//! Parsing and validation failures are kept apart so callers can tell a
//! malformed holding key (recoverable per row) from a broken board or table
//! (fatal for the whole aggregation).

use std::fmt;

use crate::cards::Card;

/// Failure to parse a card, holding or board string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input has the wrong number of characters.
    InvalidLength {
        /// The offending input.
        input: String,
        /// Expected number of characters.
        expected: usize,
    },
    /// Character is not one of `23456789TJQKA`.
    InvalidRank(char),
    /// Character is not one of `sdch`.
    InvalidSuit(char),
    /// A holding names the same card twice.
    DuplicateCard(Card),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidLength { input, expected } => write!(
                f,
                "'{}' has {} characters, expected {}",
                input,
                input.chars().count(),
                expected
            ),
            ParseError::InvalidRank(c) => write!(f, "Invalid rank character: {}", c),
            ParseError::InvalidSuit(c) => write!(f, "Invalid suit character: {}", c),
            ParseError::DuplicateCard(card) => write!(f, "Card {} appears twice", card),
        }
    }
}

impl std::error::Error for ParseError {}

/// A structurally valid value that breaks an invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Board does not hold exactly 3 cards.
    BoardSize(usize),
    /// Board holds the same card more than once.
    DuplicateBoardCard(Card),
    /// A row's frequency vector does not match the action list.
    RowLength {
        /// Holding key of the row.
        holding: String,
        /// Number of declared actions.
        expected: usize,
        /// Length of the row's vector.
        found: usize,
    },
    /// The same holding key appears twice in one table.
    DuplicateHolding(String),
    /// A configuration value is out of range.
    InvalidConfig(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BoardSize(n) => {
                write!(f, "Board must have exactly 3 cards, got {}", n)
            }
            ValidationError::DuplicateBoardCard(card) => {
                write!(f, "Board contains {} more than once", card)
            }
            ValidationError::RowLength { holding, expected, found } => write!(
                f,
                "Row {} has {} frequencies but {} actions are declared",
                holding, found, expected
            ),
            ValidationError::DuplicateHolding(h) => write!(f, "Holding {} appears twice", h),
            ValidationError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Crate-level error.
#[derive(Debug)]
pub enum Error {
    /// A string could not be parsed.
    Parse {
        /// The input that failed, e.g. the holding key of a strategy row.
        input: String,
        /// Underlying parse failure.
        source: ParseError,
    },
    /// An invariant was violated.
    Validation(ValidationError),
    /// Reading or writing a file failed.
    Io(String),
    /// JSON (de)serialization failed.
    Json(String),
    /// An action path did not lead to a node in the solver tree.
    MissingNode(String),
    /// The node carries no strategy (chance or terminal node).
    MissingStrategy(String),
}

impl Error {
    /// Wrap a parse failure together with the input that produced it.
    pub fn parse(input: impl Into<String>, source: ParseError) -> Self {
        Error::Parse {
            input: input.into(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { input, source } => write!(f, "Cannot parse '{}': {}", input, source),
            Error::Validation(e) => write!(f, "{}", e),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::Json(msg) => write!(f, "JSON error: {}", msg),
            Error::MissingNode(path) => write!(f, "No node at action path '{}'", path),
            Error::MissingStrategy(node) => write!(f, "Node '{}' has no strategy", node),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse { source, .. } => Some(source),
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
