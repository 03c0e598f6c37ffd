//! In-memory strategy table.
//!
//! One row per holding, each holding's frequency vector positionally aligned
//! with the table's action names.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::cards::HoleCards;
use crate::error::{Error, ValidationError};

/// Strategy for a single holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRow {
    /// Holding key as exported, e.g. "AsKh".
    pub holding: String,
    /// Frequency per action, aligned with the table's action list.
    ///
    /// Values are fractions of the range's weight for this holding and are
    /// not required to sum to 1.
    pub frequencies: Vec<f64>,
}

impl StrategyRow {
    /// Create a row.
    pub fn new(holding: impl Into<String>, frequencies: Vec<f64>) -> Self {
        Self {
            holding: holding.into(),
            frequencies,
        }
    }

    /// Parse the holding key into cards.
    pub fn hole_cards(&self) -> Result<HoleCards, Error> {
        self.holding
            .parse()
            .map_err(|e| Error::parse(self.holding.as_str(), e))
    }
}

/// Total frequency of one action across all rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTotal {
    /// Action name.
    pub action: String,
    /// Sum of this action's frequency over every row.
    pub total: f64,
    /// `total` divided by the sum over all actions (0 for an empty table).
    pub share: f64,
}

/// Parsed solver strategy for one decision node.
///
/// Immutable once built: every row has exactly one frequency per action and
/// holding keys are unique.
#[derive(Debug, Clone, Default)]
pub struct StrategyTable {
    actions: Vec<String>,
    rows: Vec<StrategyRow>,
    index: FxHashMap<String, usize>,
}

impl StrategyTable {
    /// Build a table, checking row lengths and holding uniqueness.
    pub fn new(actions: Vec<String>, rows: Vec<StrategyRow>) -> Result<Self, ValidationError> {
        let mut index = FxHashMap::with_capacity_and_hasher(rows.len(), Default::default());

        for (i, row) in rows.iter().enumerate() {
            if row.frequencies.len() != actions.len() {
                return Err(ValidationError::RowLength {
                    holding: row.holding.clone(),
                    expected: actions.len(),
                    found: row.frequencies.len(),
                });
            }
            if index.insert(row.holding.clone(), i).is_some() {
                return Err(ValidationError::DuplicateHolding(row.holding.clone()));
            }
        }

        Ok(Self { actions, rows, index })
    }

    /// Build a table from `(holding, frequencies)` pairs.
    pub fn from_pairs<I, K>(actions: Vec<String>, pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, Vec<f64>)>,
        K: Into<String>,
    {
        let rows = pairs
            .into_iter()
            .map(|(holding, freqs)| StrategyRow::new(holding, freqs))
            .collect();
        Self::new(actions, rows)
    }

    /// Action names, in row-vector order.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Rows in table order.
    pub fn rows(&self) -> &[StrategyRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by its exact holding key.
    pub fn get(&self, holding: &str) -> Option<&StrategyRow> {
        self.index.get(holding).map(|&i| &self.rows[i])
    }

    /// Keys naming a holding an earlier key already named, e.g. `KhAs`
    /// after `AsKh`. Keys that do not parse are ignored.
    pub fn aliased_keys(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.rows
            .iter()
            .filter(|r| r.hole_cards().map_or(false, |h| !seen.insert(h)))
            .map(|r| r.holding.as_str())
            .collect()
    }

    /// Overall frequency of each action across the table.
    ///
    /// Treats every holding as wholly in the range, so a row contributes
    /// its raw frequencies.
    pub fn action_totals(&self) -> Vec<ActionTotal> {
        let mut totals = vec![0.0; self.actions.len()];
        for row in &self.rows {
            for (t, f) in totals.iter_mut().zip(&row.frequencies) {
                *t += f;
            }
        }

        let grand: f64 = totals.iter().sum();
        self.actions
            .iter()
            .zip(totals)
            .map(|(action, total)| ActionTotal {
                action: action.clone(),
                total,
                share: if grand > 0.0 { total / grand } else { 0.0 },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_table() {
        let table = StrategyTable::from_pairs(
            actions(&["CHECK", "BET"]),
            vec![("AsKh", vec![0.6, 0.4]), ("7c5d", vec![1.0, 0.0])],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.actions(), &["CHECK", "BET"]);
        assert_eq!(table.get("7c5d").unwrap().frequencies, vec![1.0, 0.0]);
        assert!(table.get("5d7c").is_none());
    }

    #[test]
    fn test_row_length_mismatch() {
        let err = StrategyTable::from_pairs(
            actions(&["CHECK", "BET"]),
            vec![("AsKh", vec![0.6, 0.4]), ("7c5d", vec![1.0])],
        )
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::RowLength {
                holding: "7c5d".to_string(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_holding() {
        let err = StrategyTable::from_pairs(
            actions(&["CHECK"]),
            vec![("AsKh", vec![0.5]), ("AsKh", vec![0.5])],
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateHolding("AsKh".to_string()));
    }

    #[test]
    fn test_empty_table() {
        let table = StrategyTable::new(actions(&["CHECK", "BET"]), vec![]).unwrap();
        assert!(table.is_empty());
        let totals = table.action_totals();
        assert_eq!(totals.len(), 2);
        assert!(totals.iter().all(|t| t.total == 0.0 && t.share == 0.0));
    }

    #[test]
    fn test_hole_cards_parse() {
        let row = StrategyRow::new("KhAs", vec![]);
        assert_eq!(row.hole_cards().unwrap().to_string(), "AsKh");

        let bad = StrategyRow::new("AsK", vec![]);
        assert!(matches!(bad.hole_cards(), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_aliased_keys() {
        let table = StrategyTable::from_pairs(
            actions(&["CHECK"]),
            vec![
                ("AsKh", vec![0.5]),
                ("7c5d", vec![1.0]),
                ("KhAs", vec![0.5]),
                ("bad!", vec![0.0]),
                ("5d7c", vec![1.0]),
            ],
        )
        .unwrap();
        assert_eq!(table.aliased_keys(), ["KhAs", "5d7c"]);

        let clean = StrategyTable::from_pairs(actions(&["CHECK"]), vec![("AsKh", vec![0.5])]).unwrap();
        assert!(clean.aliased_keys().is_empty());
    }

    #[test]
    fn test_action_totals() {
        let table = StrategyTable::from_pairs(
            actions(&["CHECK", "BET"]),
            vec![("AsKh", vec![0.25, 0.25]), ("7c5d", vec![0.5, 0.0])],
        )
        .unwrap();

        let totals = table.action_totals();
        assert_eq!(totals[0].action, "CHECK");
        assert!((totals[0].total - 0.75).abs() < 1e-12);
        assert!((totals[0].share - 0.75).abs() < 1e-12);
        assert!((totals[1].share - 0.25).abs() < 1e-12);
    }
}
