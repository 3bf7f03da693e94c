use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::assets;
use crate::datasource::BeamSource;
use crate::page::{page_file_name, render_page, PageContext};
use crate::serialize::tree_data;
use crate::tree::build_tree;
use crate::types::{PageResult, VizResult};

pub struct VizBuilder {
	source: Option<Arc<dyn BeamSource>>,
	output_dir: Option<PathBuf>,
	image_dir: Option<String>,
	use_vocab: bool,
}

impl VizBuilder {
	pub fn new() -> Self {
		Self {
			source: None,
			output_dir: None,
			image_dir: None,
			use_vocab: true,
		}
	}

	pub fn source(mut self, source: Arc<dyn BeamSource>) -> Self {
		self.source = Some(source);
		self
	}

	pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.output_dir = Some(dir.into());
		self
	}

	/// Emit an `<img src="<dir>/<id>.jpg">` on each page.
	pub fn image_dir(mut self, dir: impl Into<String>) -> Self {
		self.image_dir = Some(dir.into());
		self
	}

	/// When false, nodes are labelled with raw token ids even if the trace
	/// file carries a vocab.
	pub fn use_vocab(mut self, use_vocab: bool) -> Self {
		self.use_vocab = use_vocab;
		self
	}

	pub fn build(self) -> Result<Viz> {
		Ok(Viz {
			source: self.source.ok_or_else(|| anyhow::anyhow!("source must be set"))?,
			output_dir: self.output_dir.ok_or_else(|| anyhow::anyhow!("output_dir must be set"))?,
			image_dir: self.image_dir,
			use_vocab: self.use_vocab,
		})
	}
}

pub struct Viz {
	source: Arc<dyn BeamSource>,
	output_dir: PathBuf,
	image_dir: Option<String>,
	use_vocab: bool,
}

impl Viz {
	pub fn builder() -> VizBuilder {
		VizBuilder::new()
	}

	/// Render the whole batch: one `NNNNNN.html` page per record plus the
	/// shared assets. Records are processed in input order; the first failure
	/// aborts the batch.
	pub async fn run(&self) -> Result<VizResult> {
		let batch = self.source.load().await?;

		tokio::fs::create_dir_all(&self.output_dir)
			.await
			.with_context(|| format!("Failed to create {:?}", self.output_dir))?;
		write_assets(&self.output_dir).await?;

		let vocab = if self.use_vocab { batch.vocab.as_ref() } else { None };
		let total = batch.records.len();
		let mut pages = Vec::with_capacity(total);

		for (idx, record) in batch.records.iter().enumerate() {
			let tree = build_tree(record, vocab)
				.with_context(|| format!("Record {} ({}): malformed beam trace", idx, record.id))?;
			let json = serde_json::to_string(&tree_data(&tree))?;

			let image_src = self
				.image_dir
				.as_ref()
				.map(|dir| format!("{}/{}.jpg", dir, record.id));
			let html = render_page(&PageContext {
				index: idx,
				total,
				sent: &record.sent,
				image_src,
				tree_json: &json,
			});

			let path = self.output_dir.join(page_file_name(idx));
			tokio::fs::write(&path, html)
				.await
				.with_context(|| format!("Failed to write {:?}", path))?;

			pages.push(PageResult {
				id: record.id.clone(),
				steps: record.num_steps(),
				beam_width: record.beam_width(),
				nodes: tree.node_count(),
				path,
			});
		}

		Ok(VizResult { pages })
	}
}

async fn write_assets(dir: &Path) -> Result<()> {
	for (name, content) in [
		(assets::TREE_CSS_NAME, assets::TREE_CSS),
		(assets::TREE_JS_NAME, assets::TREE_JS),
	] {
		let path = dir.join(name);
		tokio::fs::write(&path, content)
			.await
			.with_context(|| format!("Failed to write {:?}", path))?;
	}
	Ok(())
}
