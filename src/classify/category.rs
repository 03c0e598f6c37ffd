//! Hand categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flop hand category.
///
/// Exactly one category applies to every holding on a given flop. The
/// derived order follows the listed taxonomy, which is also the order
/// [`classify`](crate::classify::classify) checks in with one exception:
/// `Overcards` is checked before `StraightDraw`, so two overcards that also
/// complete a four-rank run report `Overcards`.
///
/// Not yet classified: two pair, trips using two board cards, overpairs and
/// nut flushes. These currently land in `TopPair`/`Pair`, `Overcards` and
/// `Flush`.
// TODO: split TwoPair, Trips, Overpair and NutFlush out of the existing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Pocket pair matching a board rank.
    Set,
    /// Pocket pair below the top board card.
    PocketUnderpair,
    /// Top pair with an Ace kicker.
    TopPairTopKicker,
    /// Top pair, any other kicker.
    TopPair,
    /// Pair with the second or third board card.
    Pair,
    /// Suited hole cards on a monotone board.
    Flush,
    /// Suited hole cards with two board cards of that suit.
    FlushDraw,
    /// Five consecutive ranks.
    Straight,
    /// Four consecutive ranks.
    StraightDraw,
    /// Both hole cards above the top board card.
    Overcards,
    /// An Ace with nothing better.
    AceHigh,
    /// Everything else.
    Air,
}

impl Category {
    /// All categories in taxonomy order.
    pub const ALL: [Category; 12] = [
        Category::Set,
        Category::PocketUnderpair,
        Category::TopPairTopKicker,
        Category::TopPair,
        Category::Pair,
        Category::Flush,
        Category::FlushDraw,
        Category::Straight,
        Category::StraightDraw,
        Category::Overcards,
        Category::AceHigh,
        Category::Air,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Set => "Set",
            Category::PocketUnderpair => "Pocket Underpair",
            Category::TopPairTopKicker => "Top Pair Top Kicker",
            Category::TopPair => "Top Pair",
            Category::Pair => "Pair",
            Category::Flush => "Flush",
            Category::FlushDraw => "Flush Draw",
            Category::Straight => "Straight",
            Category::StraightDraw => "Straight Draw",
            Category::Overcards => "Overcards",
            Category::AceHigh => "Ace High",
            Category::Air => "Air",
        }
    }

    /// Coarse group this category rolls up into.
    pub fn group(&self) -> CategoryGroup {
        match self {
            Category::Set | Category::TopPairTopKicker | Category::Flush | Category::Straight => {
                CategoryGroup::Strong
            }
            Category::PocketUnderpair | Category::TopPair | Category::Pair => {
                CategoryGroup::Marginal
            }
            Category::FlushDraw | Category::StraightDraw => CategoryGroup::Draw,
            Category::Overcards | Category::AceHigh | Category::Air => CategoryGroup::Air,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Coarse grouping of categories for a quick read of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryGroup {
    /// Top pair top kicker and better.
    Strong,
    /// Weaker made hands.
    Marginal,
    /// Flush and straight draws.
    Draw,
    /// Unpaired, undrawn hands.
    Air,
}

impl CategoryGroup {
    /// All groups, strongest first.
    pub const ALL: [CategoryGroup; 4] = [
        CategoryGroup::Strong,
        CategoryGroup::Marginal,
        CategoryGroup::Draw,
        CategoryGroup::Air,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            CategoryGroup::Strong => "TPTK+",
            CategoryGroup::Marginal => "Marginal",
            CategoryGroup::Draw => "Draws",
            CategoryGroup::Air => "Air",
        }
    }

    /// Categories belonging to this group, in priority order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| c.group() == *self)
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert!(Category::Set < Category::Flush);
        assert!(Category::AceHigh < Category::Air);
    }

    #[test]
    fn test_every_category_has_one_group() {
        let total: usize = CategoryGroup::ALL.iter().map(|g| g.categories().count()).sum();
        assert_eq!(total, Category::ALL.len());
        assert_eq!(Category::TopPairTopKicker.group(), CategoryGroup::Strong);
        assert_eq!(Category::TopPair.group(), CategoryGroup::Marginal);
    }

    #[test]
    fn test_names() {
        assert_eq!(Category::TopPairTopKicker.to_string(), "Top Pair Top Kicker");
        assert_eq!(CategoryGroup::Draw.to_string(), "Draws");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Category::FlushDraw).unwrap();
        assert_eq!(json, "\"FlushDraw\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::FlushDraw);
    }
}
