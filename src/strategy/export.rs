//! Solver export import.
//!
//! Reads the JSON a TexasSolver-style solver dumps for a game tree and turns
//! one decision node into a [`StrategyTable`]. The export never records the
//! board; callers track it alongside the file.
//!
//! ```text
//! {
//!   "node_type": "action_node",
//!   "player": 1,
//!   "actions": ["CHECK", "BET 10.0"],
//!   "childrens": { "CHECK": { ... }, "BET 10.0": { ... } },
//!   "strategy": {
//!     "actions": ["CHECK", "BET 10.0"],
//!     "strategy": { "AsKh": [0.25, 0.75], ... }
//!   }
//! }
//! ```

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use super::table::StrategyTable;
use crate::error::Error;

/// One node of an exported game tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverNode {
    /// Node kind, e.g. "action_node" or "chance_node".
    #[serde(default)]
    pub node_type: String,
    /// Acting player; exported as a number or a string.
    #[serde(default, deserialize_with = "player_label")]
    pub player: Option<String>,
    /// Actions available at this node.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Per-holding strategy; absent on chance and terminal nodes.
    #[serde(default)]
    pub strategy: Option<NodeStrategy>,
    /// Child nodes keyed by the action leading to them.
    #[serde(default)]
    pub childrens: BTreeMap<String, SolverNode>,
}

/// Strategy payload of an action node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeStrategy {
    /// Action names aligned with each frequency vector.
    pub actions: Vec<String>,
    /// Holding key and frequency per action, in file order.
    ///
    /// Kept as a list so a key the export repeats is seen twice rather than
    /// overwritten.
    #[serde(deserialize_with = "holding_entries", serialize_with = "holding_map")]
    pub strategy: Vec<(String, Vec<f64>)>,
}

struct HoldingEntries;

impl<'de> Visitor<'de> for HoldingEntries {
    type Value = Vec<(String, Vec<f64>)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from holding to action frequencies")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Vec<f64>>()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

fn holding_entries<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<f64>)>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(HoldingEntries)
}

fn holding_map<S>(entries: &[(String, Vec<f64>)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(entries.iter().map(|(holding, freqs)| (holding, freqs)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Number(i64),
}

fn player_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Label>::deserialize(deserializer)?.map(|label| match label {
        Label::Text(s) => s,
        Label::Number(n) => n.to_string(),
    }))
}

impl SolverNode {
    /// Load an export from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("loading solver export {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Parse an export from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Follow an action path through `childrens`.
    ///
    /// An empty path returns this node.
    pub fn child<S: AsRef<str>>(&self, path: &[S]) -> Result<&SolverNode, Error> {
        let mut node = self;
        for (depth, step) in path.iter().enumerate() {
            node = node.childrens.get(step.as_ref()).ok_or_else(|| {
                let walked: Vec<&str> = path[..=depth].iter().map(|s| s.as_ref()).collect();
                Error::MissingNode(walked.join("/"))
            })?;
        }
        Ok(node)
    }

    /// Number of holdings in this node's strategy.
    pub fn num_holdings(&self) -> usize {
        self.strategy.as_ref().map_or(0, |s| s.strategy.len())
    }

    /// Convert this node's strategy into a table.
    pub fn to_table(&self) -> Result<StrategyTable, Error> {
        let strategy = self
            .strategy
            .as_ref()
            .ok_or_else(|| Error::MissingStrategy(self.node_type.clone()))?;

        let table = StrategyTable::from_pairs(
            strategy.actions.clone(),
            strategy
                .strategy
                .iter()
                .map(|(holding, freqs)| (holding.as_str(), freqs.clone())),
        )?;
        log::debug!(
            "node {} ({} actions, {} holdings)",
            self.node_type,
            table.actions().len(),
            table.len()
        );
        Ok(table)
    }
}
