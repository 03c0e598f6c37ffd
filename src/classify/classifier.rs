//! Flop hand classification.
//!
//! `classify` walks a fixed rule cascade and returns the first category
//! whose rule matches:
//!
//! | # | Category | Rule |
//! |---|----------|------|
//! | 1 | Set | pocket pair matching a board rank (quads included) |
//! | 2 | PocketUnderpair | pocket pair below the top board card |
//! | 3 | TopPairTopKicker | one hole card pairs a non-Ace top card, the other is an Ace |
//! | 4 | TopPair | a hole card pairs the top card |
//! | 5 | Pair | a hole card pairs the 2nd or 3rd board card |
//! | 6 | Flush | suited hole cards, three board cards of that suit |
//! | 7 | FlushDraw | suited hole cards, two board cards of that suit |
//! | 8 | Straight | longest rank run of 4 steps (five in a row) |
//! | 9 | Overcards | both hole cards above the top board card |
//! | 10 | StraightDraw | longest rank run of 3 steps (four in a row) |
//! | 11 | AceHigh | an Ace in hand |
//! | 12 | Air | anything else |
//!
//! Runs are measured over the five combined ranks sorted ascending, Ace
//! high only. A repeated rank breaks a run.

use super::category::Category;
use crate::cards::{Board, Deck, HoleCards, Rank};

/// Classify a holding on a flop.
///
/// Pure and total: every holding gets exactly one category. Overlap between
/// the hole cards and the board is not checked.
pub fn classify(hole: &HoleCards, board: &Board) -> Category {
    let top = board.top().rank();
    let ranks = hole.ranks();

    if hole.is_pair() {
        if board.has_rank(ranks[0]) {
            return Category::Set;
        }
        if ranks[0] < top {
            return Category::PocketUnderpair;
        }
    }

    let top_hits = ranks.iter().filter(|&&r| r == top).count();
    if top_hits == 1 && top != Rank::Ace {
        let kicker = if ranks[0] == top { ranks[1] } else { ranks[0] };
        if kicker == Rank::Ace {
            return Category::TopPairTopKicker;
        }
    }
    if top_hits > 0 {
        return Category::TopPair;
    }

    if board.cards()[1..].iter().any(|c| ranks.contains(&c.rank())) {
        return Category::Pair;
    }

    if hole.is_suited() {
        let suit = hole.card1.suit();
        match board.cards().iter().filter(|c| c.suit() == suit).count() {
            3 => return Category::Flush,
            2 => return Category::FlushDraw,
            _ => {}
        }
    }

    let run = longest_run(hole, board);
    if run >= 4 {
        return Category::Straight;
    }

    // two overcards outrank a four-card run
    if ranks.iter().all(|&r| r > top) {
        return Category::Overcards;
    }

    if run == 3 {
        return Category::StraightDraw;
    }

    if ranks.contains(&Rank::Ace) {
        return Category::AceHigh;
    }

    Category::Air
}

/// Longest chain of consecutive ranks, counted in steps.
///
/// Sorts the five hole and board ranks ascending and counts adjacent pairs
/// that differ by exactly one. Any other gap, including a repeated rank,
/// resets the count. `[9, T, J, Q]` is 3 steps; a made straight is 4.
pub fn longest_run(hole: &HoleCards, board: &Board) -> usize {
    let mut values: Vec<u8> = hole
        .ranks()
        .iter()
        .chain(board.ranks().iter())
        .map(|r| r.value())
        .collect();
    values.sort_unstable();

    let mut best = 0;
    let mut current = 0;
    for pair in values.windows(2) {
        if pair[1] == pair[0] + 1 {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Classify every holding left live by the board.
pub fn classify_all(board: &Board) -> Vec<(HoleCards, Category)> {
    Deck::without(board.cards())
        .holdings()
        .into_iter()
        .map(|hole| (hole, classify(&hole, board)))
        .collect()
}
