//! Per-category aggregation of a strategy table.
//!
//! Every row is classified against the board and its frequency vector is
//! added to a running sum for its category. Each category's mean is the sum
//! divided by the number of rows it received: an unweighted mean, since the
//! export carries no range weights to weight by.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::{RowPolicy, SummaryConfig};
use crate::cards::Board;
use crate::classify::{classify, Category, CategoryGroup};
use crate::error::Error;
use crate::strategy::{StrategyRow, StrategyTable};

/// Mean strategy of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// The category.
    pub category: Category,
    /// Mean frequency per action.
    pub frequencies: Vec<f64>,
    /// Number of holdings that contributed.
    pub holdings: usize,
}

/// Mean strategy of one coarse group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// The group.
    pub group: CategoryGroup,
    /// Mean frequency per action over the group's holdings.
    pub frequencies: Vec<f64>,
    /// Number of holdings that contributed.
    pub holdings: usize,
}

/// Running sum and row count for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    /// Element-wise sum of frequency vectors.
    pub sums: Vec<f64>,
    /// Rows added.
    pub count: usize,
}

impl Tally {
    fn zero(width: usize) -> Self {
        Self {
            sums: vec![0.0; width],
            count: 0,
        }
    }

    fn mean(&self) -> Vec<f64> {
        let n = self.count as f64;
        self.sums.iter().map(|s| s / n).collect()
    }
}

/// Per-category sums.
///
/// Reads never insert; only [`entry`](Self::entry) creates a zeroed tally.
#[derive(Debug, Clone)]
pub struct CategoryAccumulator {
    width: usize,
    tallies: FxHashMap<Category, Tally>,
}

impl CategoryAccumulator {
    /// Create an accumulator for vectors of `width` actions.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            tallies: FxHashMap::default(),
        }
    }

    /// Tally for `category`, inserting a zeroed one if absent.
    pub fn entry(&mut self, category: Category) -> &mut Tally {
        let width = self.width;
        self.tallies
            .entry(category)
            .or_insert_with(|| Tally::zero(width))
    }

    /// Add one row's frequencies to `category`.
    pub fn add(&mut self, category: Category, frequencies: &[f64]) {
        debug_assert_eq!(frequencies.len(), self.width);
        let tally = self.entry(category);
        for (sum, f) in tally.sums.iter_mut().zip(frequencies) {
            *sum += f;
        }
        tally.count += 1;
    }

    /// Rows added to `category` so far (0 if none).
    pub fn count(&self, category: Category) -> usize {
        self.tallies.get(&category).map_or(0, |t| t.count)
    }

    /// Divide through and produce the summary, in category priority order.
    pub fn finish(self, actions: Vec<String>, skipped: Vec<String>) -> CategorySummary {
        let categories = Category::ALL
            .iter()
            .filter_map(|&category| {
                self.tallies
                    .get(&category)
                    .filter(|t| t.count > 0)
                    .map(|t| CategoryStats {
                        category,
                        frequencies: t.mean(),
                        holdings: t.count,
                    })
            })
            .collect();

        CategorySummary {
            actions,
            categories,
            skipped,
        }
    }
}

/// Mean action frequencies per hand category.
///
/// Categories that received no rows are absent. The order is category
/// priority, but callers should look categories up with [`get`](Self::get).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    actions: Vec<String>,
    categories: Vec<CategoryStats>,
    skipped: Vec<String>,
}

impl CategorySummary {
    /// Action names, aligned with every frequency vector.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Stats of every category present.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryStats> {
        self.categories.iter()
    }

    /// Stats for one category.
    pub fn get(&self, category: Category) -> Option<&CategoryStats> {
        self.categories.iter().find(|s| s.category == category)
    }

    /// Number of categories present.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if no category received a row.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Holdings counted across all categories.
    pub fn total_holdings(&self) -> usize {
        self.categories.iter().map(|s| s.holdings).sum()
    }

    /// Holding keys left out under [`RowPolicy::Skip`].
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Roll categories up into their coarse groups.
    ///
    /// Each group's vector is the count-weighted mean of its categories,
    /// i.e. the plain mean over the group's holdings.
    pub fn groups(&self) -> Vec<GroupStats> {
        CategoryGroup::ALL
            .iter()
            .filter_map(|&group| {
                let mut sums = vec![0.0; self.actions.len()];
                let mut holdings = 0;
                for stats in self.categories.iter().filter(|s| s.category.group() == group) {
                    for (sum, f) in sums.iter_mut().zip(&stats.frequencies) {
                        *sum += f * stats.holdings as f64;
                    }
                    holdings += stats.holdings;
                }
                (holdings > 0).then(|| GroupStats {
                    group,
                    frequencies: sums.iter().map(|s| s / holdings as f64).collect(),
                    holdings,
                })
            })
            .collect()
    }
}

fn classify_row(row: &StrategyRow, board: &Board) -> Result<Category, Error> {
    row.hole_cards().map(|hole| classify(&hole, board))
}

/// Summarize a strategy table by hand category.
///
/// Fails on the first row whose holding key does not parse. An empty table
/// yields an empty summary.
pub fn aggregate(table: &StrategyTable, board: &Board) -> Result<CategorySummary, Error> {
    aggregate_with(table, board, &SummaryConfig::default())
}

/// Summarize a strategy table with explicit settings.
///
/// Under [`RowPolicy::Skip`] malformed rows are logged and listed in
/// [`CategorySummary::skipped`]; the counted holdings plus the skipped ones
/// always equal the table's row count.
pub fn aggregate_with(
    table: &StrategyTable,
    board: &Board,
    config: &SummaryConfig,
) -> Result<CategorySummary, Error> {
    let classified: Vec<Result<Category, Error>> = if config.parallel {
        table.rows().par_iter().map(|row| classify_row(row, board)).collect()
    } else {
        table.rows().iter().map(|row| classify_row(row, board)).collect()
    };

    let mut acc = CategoryAccumulator::new(table.actions().len());
    let mut skipped = Vec::new();

    for (row, result) in table.rows().iter().zip(classified) {
        match result {
            Ok(category) => acc.add(category, &row.frequencies),
            Err(e) => match config.row_policy {
                RowPolicy::FailFast => return Err(e),
                RowPolicy::Skip => {
                    log::warn!("skipping holding {}: {}", row.holding, e);
                    skipped.push(row.holding.clone());
                }
            },
        }
    }

    let summary = acc.finish(table.actions().to_vec(), skipped);
    log::debug!(
        "{}: {} holdings in {} categories ({} skipped)",
        board,
        summary.total_holdings(),
        summary.len(),
        summary.skipped().len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;

    fn actions(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn board() -> Board {
        "QsJh2h".parse().unwrap()
    }

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-9, "{:?} != {:?}", a, b);
        }
    }

    /// Every live holding on the board, with a frequency vector derived from its index.
    fn full_table(board: &Board) -> StrategyTable {
        let rows = Deck::without(board.cards())
            .holdings()
            .into_iter()
            .enumerate()
            .map(|(i, hole)| {
                let bet = (i % 10) as f64 / 10.0;
                (hole.to_string(), vec![1.0 - bet, bet])
            });
        StrategyTable::from_pairs(actions(&["CHECK", "BET"]), rows).unwrap()
    }

    #[test]
    fn test_mean_of_two_rows() {
        // both overcards on QsJh2h
        let table = StrategyTable::from_pairs(
            actions(&["CHECK", "BET"]),
            vec![("KdAc", vec![0.6, 0.4]), ("AsKc", vec![0.8, 0.2])],
        )
        .unwrap();

        let summary = aggregate(&table, &board()).unwrap();
        assert_eq!(summary.len(), 1);

        let stats = summary.get(Category::Overcards).unwrap();
        assert_close(&stats.frequencies, &[0.7, 0.3]);
        assert_eq!(stats.holdings, 2);
    }

    #[test]
    fn test_counts_are_conserved() {
        let board = board();
        let table = full_table(&board);
        let summary = aggregate(&table, &board).unwrap();

        assert_eq!(summary.total_holdings(), table.len());
        assert!(summary.skipped().is_empty());
        assert!(summary.get(Category::Flush).is_none());
        assert!(summary.iter().all(|s| s.holdings > 0));
    }

    #[test]
    fn test_summary_order_follows_priority() {
        let board = board();
        let summary = aggregate(&full_table(&board), &board).unwrap();
        let order: Vec<Category> = summary.iter().map(|s| s.category).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_empty_table() {
        let table = StrategyTable::new(actions(&["CHECK", "BET"]), vec![]).unwrap();
        let summary = aggregate(&table, &board()).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total_holdings(), 0);
        assert!(summary.groups().is_empty());
    }

    #[test]
    fn test_fail_fast_on_bad_holding() {
        let table = StrategyTable::from_pairs(
            actions(&["CHECK"]),
            vec![("AsKc", vec![1.0]), ("XxKc", vec![1.0]), ("AsK", vec![1.0])],
        )
        .unwrap();

        match aggregate(&table, &board()) {
            Err(Error::Parse { input, .. }) => assert_eq!(input, "XxKc"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_policy() {
        let table = StrategyTable::from_pairs(
            actions(&["CHECK"]),
            vec![("AsKc", vec![1.0]), ("XxKc", vec![1.0]), ("7c5d", vec![0.5])],
        )
        .unwrap();
        let config = SummaryConfig::new().with_row_policy(RowPolicy::Skip);

        let summary = aggregate_with(&table, &board(), &config).unwrap();
        assert_eq!(summary.skipped(), &["XxKc".to_string()]);
        assert_eq!(summary.total_holdings() + summary.skipped().len(), table.len());
        assert_eq!(summary.get(Category::Air).unwrap().holdings, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let board: Board = "Td9d4s".parse().unwrap();
        let table = full_table(&board);

        let sequential = aggregate(&table, &board).unwrap();
        let parallel =
            aggregate_with(&table, &board, &SummaryConfig::new().with_parallel(true)).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_groups_match_holding_mean() {
        let board = board();
        let table = full_table(&board);
        let summary = aggregate(&table, &board).unwrap();
        let groups = summary.groups();

        assert_eq!(
            groups.iter().map(|g| g.holdings).sum::<usize>(),
            summary.total_holdings()
        );

        for group in &groups {
            let mut sums = vec![0.0; 2];
            let mut n = 0;
            for row in table.rows() {
                let category = classify(&row.hole_cards().unwrap(), &board);
                if category.group() == group.group {
                    sums[0] += row.frequencies[0];
                    sums[1] += row.frequencies[1];
                    n += 1;
                }
            }
            assert_eq!(n, group.holdings);
            let mean: Vec<f64> = sums.iter().map(|s| s / n as f64).collect();
            assert_close(&group.frequencies, &mean);
        }
    }

    #[test]
    fn test_accumulator_reads_do_not_insert() {
        let mut acc = CategoryAccumulator::new(2);
        assert_eq!(acc.count(Category::Set), 0);
        acc.add(Category::Air, &[0.5, 0.5]);
        acc.add(Category::Air, &[1.0, 0.0]);
        assert_eq!(acc.count(Category::Air), 2);

        let summary = acc.finish(actions(&["CHECK", "BET"]), vec![]);
        assert_eq!(summary.len(), 1);
        assert!(summary.get(Category::Set).is_none());
        assert_close(&summary.get(Category::Air).unwrap().frequencies, &[0.75, 0.25]);
    }

    #[test]
    fn test_accumulator_zeroed_entry_is_omitted() {
        let mut acc = CategoryAccumulator::new(1);
        acc.entry(Category::Set);
        assert!(acc.finish(actions(&["CHECK"]), vec![]).is_empty());
    }
}
