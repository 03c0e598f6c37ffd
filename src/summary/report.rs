//! Report output.
//!
//! Bundles a summary with the context needed to read it (board, node,
//! overall action mix) and renders it as JSON or a text table.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::aggregate::{CategoryStats, CategorySummary, GroupStats};
use crate::cards::Board;
use crate::error::Error;
use crate::strategy::{ActionTotal, SolverNode, StrategyTable};

const LABEL_WIDTH: usize = 22;

/// A summarized node, ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Flop the strategy was solved for.
    pub board: String,
    /// Solver node kind, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Acting player, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    /// Action names, aligned with every frequency vector.
    pub actions: Vec<String>,
    /// Overall action mix of the table.
    pub action_totals: Vec<ActionTotal>,
    /// Per-category means.
    pub categories: Vec<CategoryStats>,
    /// Per-group means (empty when groups are disabled).
    #[serde(default)]
    pub groups: Vec<GroupStats>,
    /// Holdings left out of the summary.
    #[serde(default)]
    pub skipped: Vec<String>,
    /// Keys that repeat an earlier holding with the cards swapped; such a
    /// holding is counted once per key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliased: Vec<String>,
}

impl SummaryReport {
    /// Build a report for a board, its table and the table's summary.
    pub fn new(board: &Board, table: &StrategyTable, summary: &CategorySummary) -> Self {
        Self {
            board: board.to_string(),
            node_type: None,
            player: None,
            actions: summary.actions().to_vec(),
            action_totals: table.action_totals(),
            categories: summary.iter().cloned().collect(),
            groups: summary.groups(),
            skipped: summary.skipped().to_vec(),
            aliased: table.aliased_keys().into_iter().map(String::from).collect(),
        }
    }

    /// Attach the solver node's type and player.
    pub fn with_node(mut self, node: &SolverNode) -> Self {
        if !node.node_type.is_empty() {
            self.node_type = Some(node.node_type.clone());
        }
        self.player = node.player.clone();
        self
    }

    /// Keep or drop the group rollup.
    pub fn with_groups(mut self, enable: bool) -> Self {
        if !enable {
            self.groups.clear();
        }
        self
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path.as_ref())?;
        file.write_all(json.as_bytes())?;
        log::info!("saved report {}", path.as_ref().display());
        Ok(())
    }

    /// Render the report as a column-aligned text table.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let mut title = self.board.clone();
        match (&self.player, &self.node_type) {
            (Some(p), Some(t)) => title.push_str(&format!(" (player {}, {})", p, t)),
            (Some(p), None) => title.push_str(&format!(" (player {})", p)),
            (None, Some(t)) => title.push_str(&format!(" ({})", t)),
            (None, None) => {}
        }
        out.push_str(&format!("=== {} ===\n", title));

        let overall: Vec<String> = self
            .action_totals
            .iter()
            .map(|t| format!("{} {:.1}%", t.action, t.share * 100.0))
            .collect();
        out.push_str(&format!("Overall: {}\n\n", overall.join(" | ")));

        let rows: Vec<(String, &[f64], usize)> = self
            .categories
            .iter()
            .map(|s| (s.category.to_string(), s.frequencies.as_slice(), s.holdings))
            .collect();
        out.push_str(&self.render_rows("Category", &rows));

        if !self.groups.is_empty() {
            out.push('\n');
            let rows: Vec<(String, &[f64], usize)> = self
                .groups
                .iter()
                .map(|g| (g.group.to_string(), g.frequencies.as_slice(), g.holdings))
                .collect();
            out.push_str(&self.render_rows("Group", &rows));
        }

        if !self.skipped.is_empty() {
            out.push_str(&format!(
                "\nSkipped {} holdings: {}\n",
                self.skipped.len(),
                self.skipped.join(", ")
            ));
        }
        if !self.aliased.is_empty() {
            out.push_str(&format!(
                "\nCounted twice (same holding as an earlier key): {}\n",
                self.aliased.join(", ")
            ));
        }
        out
    }

    fn render_rows(&self, label: &str, rows: &[(String, &[f64], usize)]) -> String {
        let widths: Vec<usize> = self.actions.iter().map(|a| a.len().max(7)).collect();

        let mut out = format!("{:<width$}", label, width = LABEL_WIDTH);
        for (action, w) in self.actions.iter().zip(&widths) {
            out.push_str(&format!("  {:>w$}", action, w = *w));
        }
        out.push_str("  Holdings\n");

        for (name, freqs, holdings) in rows {
            out.push_str(&format!("{:<width$}", name, width = LABEL_WIDTH));
            for (f, w) in freqs.iter().zip(&widths) {
                let pct = format!("{:.1}%", f * 100.0);
                out.push_str(&format!("  {:>w$}", pct, w = *w));
            }
            out.push_str(&format!("  {:>8}\n", holdings));
        }
        out
    }

    /// Print the text table to stdout.
    pub fn print_table(&self) {
        print!("{}", self.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::aggregate;

    const EXPORT: &str = r#"{
        "node_type": "action_node",
        "player": 1,
        "actions": ["CHECK", "BET 10.0"],
        "strategy": {
            "actions": ["CHECK", "BET 10.0"],
            "strategy": {
                "AsKh": [0.25, 0.75],
                "KdAc": [0.75, 0.25],
                "7c5d": [1.0, 0.0],
                "QdQh": [0.0, 1.0]
            }
        }
    }"#;

    fn report() -> SummaryReport {
        let node = SolverNode::from_json_str(EXPORT).unwrap();
        let table = node.to_table().unwrap();
        let board: Board = "QsJh2h".parse().unwrap();
        let summary = aggregate(&table, &board).unwrap();
        SummaryReport::new(&board, &table, &summary).with_node(&node)
    }

    #[test]
    fn test_report_contents() {
        let report = report();
        assert_eq!(report.board, "QsJh2h");
        assert_eq!(report.player.as_deref(), Some("1"));
        assert_eq!(report.node_type.as_deref(), Some("action_node"));
        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.categories.iter().map(|c| c.holdings).sum::<usize>(), 4);
        assert!(!report.groups.is_empty());
    }

    #[test]
    fn test_render() {
        let text = report().render();
        assert!(text.starts_with("=== QsJh2h (player 1, action_node) ===\n"));
        assert!(text.contains("Overall: CHECK 50.0% | BET 10.0 50.0%"));
        assert!(text.contains("Overcards"));
        assert!(text.contains("TPTK+"));

        let set_line = text.lines().find(|l| l.starts_with("Set")).unwrap();
        assert!(set_line.contains("100.0%"));
        assert!(set_line.trim_end().ends_with('1'));
    }

    #[test]
    fn test_without_groups() {
        let report = report().with_groups(false);
        assert!(report.groups.is_empty());
        assert!(!report.render().contains("Group"));
    }

    #[test]
    fn test_aliased_keys_reported() {
        let table = StrategyTable::from_pairs(
            vec!["CHECK".to_string()],
            vec![("AsKh", vec![1.0]), ("KhAs", vec![1.0])],
        )
        .unwrap();
        let board: Board = "QsJh2h".parse().unwrap();
        let summary = aggregate(&table, &board).unwrap();
        let report = SummaryReport::new(&board, &table, &summary);

        assert_eq!(report.aliased, ["KhAs"]);
        assert!(report.render().contains("Counted twice (same holding as an earlier key): KhAs"));

        let clean = self::report();
        assert!(clean.aliased.is_empty());
        assert!(!serde_json::to_string(&clean).unwrap().contains("aliased"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QsJh2h.json");
        report.save_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: SummaryReport = serde_json::from_str(&content).unwrap();
        assert_eq!(back, report);
    }
}
