use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// One beam search run, row-oriented: `predicted_ids[step][slot]` is the token
/// decoded into `slot` at `step`, `parent_ids[step][slot]` names the slot at
/// the previous step it extended, and `scores` follows the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamRecord {
	pub id: String,
	pub sent: String,
	pub predicted_ids: Vec<Vec<i64>>,
	pub parent_ids: Vec<Vec<usize>>,
	pub scores: Vec<Vec<Option<f64>>>,
}

impl BeamRecord {
	pub fn num_steps(&self) -> usize {
		self.predicted_ids.len()
	}

	/// Widest step of the run.
	pub fn beam_width(&self) -> usize {
		self.predicted_ids.iter().map(|step| step.len()).max().unwrap_or(0)
	}
}

/// A full trace file after parsing: the shared vocab plus one record per
/// decoded sentence.
#[derive(Debug, Clone, Default)]
pub struct BeamBatch {
	pub vocab: Option<Vocab>,
	pub records: Vec<BeamRecord>,
}

/// Token id → display text, keyed by the string form of the id (that is how
/// the decoder dumps it). Looking up an unknown id is a hard error upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocab(HashMap<String, String>);

impl Vocab {
	pub fn new(entries: HashMap<String, String>) -> Self {
		Self(entries)
	}

	pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
		self.0.insert(id.into(), text.into());
	}

	pub fn get(&self, id: i64) -> Option<&str> {
		self.0.get(&id.to_string()).map(String::as_str)
	}
}

/// Node identity within one hypothesis tree. Level 0 holds only the synthetic
/// root; level `s + 1` holds the slots decoded at step `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
	pub level: usize,
	pub slot: usize,
}

impl NodeId {
	pub const ROOT: NodeId = NodeId { level: 0, slot: 0 };

	pub fn new(level: usize, slot: usize) -> Self {
		Self { level, slot }
	}
}

/// Display attributes of one hypothesis node, fixed at construction. The root
/// carries a name only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
	pub name: String,
	pub score: Option<String>,
	pub size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
	pub id: String,
	pub steps: usize,
	pub beam_width: usize,
	pub nodes: usize,
	pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizResult {
	pub pages: Vec<PageResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tabled)]
struct SummaryRow {
	id: String,
	steps: usize,
	beam: usize,
	nodes: usize,
	page: String,
}

impl VizResult {
	pub fn summary_table(&self) -> String {
		let rows: Vec<SummaryRow> = self.pages.iter().map(|p| {
			SummaryRow {
				id: p.id.clone(),
				steps: p.steps,
				beam: p.beam_width,
				nodes: p.nodes,
				page: p.path.display().to_string(),
			}
		}).collect();

		let table = Table::new(rows).to_string();

		let total_nodes: usize = self.pages.iter().map(|p| p.nodes).sum();
		let summary_text = format!(
			"Pages: {}  Nodes: {}",
			self.pages.len(),
			total_nodes
		);

		format!("{}\n\n{}\n", table, summary_text)
	}
}
