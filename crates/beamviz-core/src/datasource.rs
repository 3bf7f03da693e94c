use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::types::{BeamBatch, BeamRecord, Vocab};

/// Token id the decoder reserves for end-of-sequence.
pub const EOS_ID: &str = "0";
pub const EOS_TOKEN: &str = "<EOS>";

#[async_trait]
pub trait BeamSource: Send + Sync {
    async fn load(&self) -> Result<BeamBatch>;
}

pub struct VecSource {
    batch: BeamBatch,
}

impl VecSource {
    pub fn new(batch: BeamBatch) -> Self {
        Self { batch }
    }
}

#[async_trait]
impl BeamSource for VecSource {
    async fn load(&self) -> Result<BeamBatch> {
        Ok(self.batch.clone())
    }
}

/// Read a column-oriented trace file as dumped by the decoder:
/// - {"vocab"?: {...}, "predicted_ids": [...], "beam_parent_ids": [...],
///    "scores": [...], "ids"?: [...], "sents"?: [...]}
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BeamSource for JsonFileSource {
    async fn load(&self) -> Result<BeamBatch> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        parse_trace(&content)
    }
}

#[derive(Debug, Deserialize)]
struct RawTrace {
    #[serde(default)]
    vocab: Option<HashMap<String, String>>,
    predicted_ids: Vec<Vec<Vec<i64>>>,
    beam_parent_ids: Vec<Vec<Vec<usize>>>,
    scores: Vec<Vec<Vec<Option<f64>>>>,
    #[serde(default)]
    ids: Option<Vec<String>>,
    #[serde(default)]
    sents: Option<Vec<String>>,
}

/// Parse a trace file body into per-record form. Outer columns must agree in
/// length; `ids` falls back to the record index and `sents` to empty when the
/// dump omits them. The reserved id 0 is remapped to `<EOS>` here so the tree
/// builder never sees the decoder's internal marker text.
pub fn parse_trace(content: &str) -> Result<BeamBatch> {
    let raw: RawTrace = serde_json::from_str(content).context("Invalid beam trace JSON")?;

    let total = raw.predicted_ids.len();
    check_len("beam_parent_ids", raw.beam_parent_ids.len(), total)?;
    check_len("scores", raw.scores.len(), total)?;
    if let Some(ids) = &raw.ids {
        check_len("ids", ids.len(), total)?;
    }
    if let Some(sents) = &raw.sents {
        check_len("sents", sents.len(), total)?;
    }

    let vocab = raw.vocab.map(|entries| {
        let mut vocab = Vocab::new(entries);
        vocab.insert(EOS_ID, EOS_TOKEN);
        vocab
    });

    let mut records = Vec::with_capacity(total);
    let iter = raw
        .predicted_ids
        .into_iter()
        .zip(raw.beam_parent_ids)
        .zip(raw.scores)
        .enumerate();
    for (idx, ((predicted_ids, parent_ids), scores)) in iter {
        let id = match &raw.ids {
            Some(ids) => ids[idx].clone(),
            None => idx.to_string(),
        };
        let sent = match &raw.sents {
            Some(sents) => sents[idx].clone(),
            None => String::new(),
        };
        records.push(BeamRecord {
            id,
            sent,
            predicted_ids,
            parent_ids,
            scores,
        });
    }

    Ok(BeamBatch { vocab, records })
}

fn check_len(field: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(anyhow!(
            "'{}' has {} entries, expected {} to match 'predicted_ids'",
            field,
            got,
            expected
        ));
    }
    Ok(())
}
