use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use beamviz_core::{JsonFileSource, Viz};
use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "beamviz", about = "Render beam search traces as HTML tree pages")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	Render(RenderArgs),
}

#[derive(Debug, Clone, Parser)]
struct RenderArgs {
	/// JSON trace file with fields: { "vocab"?, "predicted_ids", "beam_parent_ids", "scores", "ids"?, "sents"? }
	#[arg(short, long)]
	data: PathBuf,

	/// Directory the HTML pages and shared assets are written to
	#[arg(short, long)]
	output_dir: PathBuf,

	/// Link each page to <IMAGE_DIR>/<id>.jpg
	#[arg(long)]
	image_dir: Option<String>,

	/// Label nodes with raw token ids even when the trace carries a vocab
	#[arg(long, action = ArgAction::SetTrue)]
	no_vocab: bool,

	/// Output JSON summary to a file
	#[arg(long)]
	json_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	match cli.command {
		Commands::Render(args) => render(args).await?,
	}
	Ok(())
}

async fn render(args: RenderArgs) -> Result<()> {
	let source = Arc::new(JsonFileSource::new(&args.data));

	let mut builder = Viz::builder()
		.source(source)
		.output_dir(args.output_dir)
		.use_vocab(!args.no_vocab);
	if let Some(dir) = args.image_dir {
		builder = builder.image_dir(dir);
	}

	let viz = builder.build()?;
	let result = viz.run().await?;
	println!("{}", result.summary_table());

	if let Some(path) = args.json_out {
		let json = serde_json::to_string_pretty(&result)?;
		tokio::fs::write(path, json).await?;
	}

	Ok(())
}
