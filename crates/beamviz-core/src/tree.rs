use std::collections::BTreeMap;

use crate::error::TreeError;
use crate::types::{BeamRecord, NodeId, TreeNode, Vocab};

/// Display weight attached to every non-root node.
pub const NODE_SIZE: u32 = 100;

/// A hypothesis tree rebuilt from flat parent-pointer arrays. Nodes are keyed
/// by `(level, slot)`; adjacency keeps children in slot order, so traversal is
/// deterministic for a given record.
#[derive(Debug, Clone)]
pub struct BeamTree {
    nodes: BTreeMap<NodeId, TreeNode>,
    children: BTreeMap<NodeId, Vec<NodeId>>,
}

impl BeamTree {
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every non-root node has exactly one incoming edge.
    pub fn edge_count(&self) -> usize {
        self.nodes.len() - 1
    }
}

/// Rebuild the hypothesis tree for one record. With a vocab, token ids are
/// resolved to display text (unknown ids fail); without one the raw id is the
/// label. Scores render as `{:.3}`, absent scores as `-inf`. Shape mismatches
/// and out-of-range parent slots fail fast.
pub fn build_tree(record: &BeamRecord, vocab: Option<&Vocab>) -> Result<BeamTree, TreeError> {
    let steps = record.predicted_ids.len();
    check_steps("beam_parent_ids", record.parent_ids.len(), steps)?;
    check_steps("scores", record.scores.len(), steps)?;

    let mut nodes = BTreeMap::new();
    let mut children: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    nodes.insert(
        NodeId::ROOT,
        TreeNode {
            name: "START".to_string(),
            score: None,
            size: None,
        },
    );

    for step in 0..steps {
        let preds = &record.predicted_ids[step];
        let parents = &record.parent_ids[step];
        let scores = &record.scores[step];
        check_slots(step, "beam_parent_ids", parents.len(), preds.len())?;
        check_slots(step, "scores", scores.len(), preds.len())?;

        for (slot, &pred) in preds.iter().enumerate() {
            let name = match vocab {
                Some(vocab) => vocab
                    .get(pred)
                    .ok_or(TreeError::UnknownToken {
                        id: pred,
                        step,
                        slot,
                    })?
                    .to_string(),
                None => pred.to_string(),
            };

            let parent = NodeId::new(step, parents[slot]);
            if !nodes.contains_key(&parent) {
                return Err(TreeError::InvalidParent {
                    step,
                    slot,
                    parent: parents[slot],
                });
            }

            let id = NodeId::new(step + 1, slot);
            nodes.insert(
                id,
                TreeNode {
                    name,
                    score: Some(format_score(scores[slot])),
                    size: Some(NODE_SIZE),
                },
            );
            children.entry(parent).or_default().push(id);
        }
    }

    Ok(BeamTree { nodes, children })
}

pub(crate) fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{s:.3}"),
        None => "-inf".to_string(),
    }
}

fn check_steps(field: &'static str, got: usize, expected: usize) -> Result<(), TreeError> {
    if got != expected {
        return Err(TreeError::StepCountMismatch {
            field,
            expected,
            got,
        });
    }
    Ok(())
}

fn check_slots(
    step: usize,
    field: &'static str,
    got: usize,
    expected: usize,
) -> Result<(), TreeError> {
    if got != expected {
        return Err(TreeError::SlotCountMismatch {
            step,
            field,
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(
        predicted_ids: Vec<Vec<i64>>,
        parent_ids: Vec<Vec<usize>>,
        scores: Vec<Vec<Option<f64>>>,
    ) -> BeamRecord {
        BeamRecord {
            id: "0".to_string(),
            sent: String::new(),
            predicted_ids,
            parent_ids,
            scores,
        }
    }

    fn vocab(entries: &[(&str, &str)]) -> Vocab {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Vocab::new(map)
    }

    #[test]
    fn test_empty_record_is_just_the_root() {
        let tree = build_tree(&record(vec![], vec![], vec![]), None).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.edge_count(), 0);
        let root = tree.node(NodeId::ROOT).unwrap();
        assert_eq!(root.name, "START");
        assert_eq!(root.score, None);
        assert_eq!(root.size, None);
    }

    #[test]
    fn test_root_named_start_with_vocab_present() {
        let r = record(vec![vec![5]], vec![vec![0]], vec![vec![Some(-1.0)]]);
        let v = vocab(&[("5", "cat")]);
        let tree = build_tree(&r, Some(&v)).unwrap();
        assert_eq!(tree.node(NodeId::ROOT).unwrap().name, "START");
    }

    #[test]
    fn test_node_and_edge_counts_match_beam_widths() {
        // Widths 2, 3: 1 + 2 + 3 nodes, 2 + 3 edges.
        let r = record(
            vec![vec![1, 2], vec![3, 4, 5]],
            vec![vec![0, 0], vec![0, 1, 1]],
            vec![
                vec![Some(-0.1), Some(-0.2)],
                vec![Some(-0.3), Some(-0.4), None],
            ],
        );
        let tree = build_tree(&r, None).unwrap();
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.edge_count(), 5);
        assert_eq!(tree.children_of(NodeId::new(1, 1)).len(), 2);
    }

    #[test]
    fn test_score_formatting() {
        assert_eq!(format_score(Some(-2.5)), "-2.500");
        assert_eq!(format_score(Some(0.0)), "0.000");
        assert_eq!(format_score(None), "-inf");
    }

    #[test]
    fn test_vocab_resolution() {
        let r = record(vec![vec![5]], vec![vec![0]], vec![vec![Some(-1.0)]]);
        let v = vocab(&[("5", "cat"), ("0", "<EOS>")]);
        let tree = build_tree(&r, Some(&v)).unwrap();
        assert_eq!(tree.node(NodeId::new(1, 0)).unwrap().name, "cat");
    }

    #[test]
    fn test_raw_ids_without_vocab() {
        let r = record(vec![vec![42]], vec![vec![0]], vec![vec![None]]);
        let tree = build_tree(&r, None).unwrap();
        assert_eq!(tree.node(NodeId::new(1, 0)).unwrap().name, "42");
    }

    #[test]
    fn test_missing_vocab_entry_fails() {
        let r = record(vec![vec![7]], vec![vec![0]], vec![vec![Some(-1.0)]]);
        let v = vocab(&[("5", "cat")]);
        let err = build_tree(&r, Some(&v)).unwrap_err();
        assert_eq!(
            err,
            TreeError::UnknownToken {
                id: 7,
                step: 0,
                slot: 0
            }
        );
    }

    #[test]
    fn test_invalid_parent_fails() {
        // Slot 1 at step 0 points at slot 3 of level 0, which only has the root.
        let r = record(
            vec![vec![1, 2]],
            vec![vec![0, 3]],
            vec![vec![Some(-0.1), Some(-0.2)]],
        );
        let err = build_tree(&r, None).unwrap_err();
        assert_eq!(
            err,
            TreeError::InvalidParent {
                step: 0,
                slot: 1,
                parent: 3
            }
        );
    }

    #[test]
    fn test_step_count_mismatch_fails() {
        let r = record(vec![vec![1]], vec![], vec![vec![None]]);
        let err = build_tree(&r, None).unwrap_err();
        assert_eq!(
            err,
            TreeError::StepCountMismatch {
                field: "beam_parent_ids",
                expected: 1,
                got: 0
            }
        );
    }

    #[test]
    fn test_slot_count_mismatch_fails() {
        let r = record(vec![vec![1, 2]], vec![vec![0, 0]], vec![vec![None]]);
        let err = build_tree(&r, None).unwrap_err();
        assert_eq!(
            err,
            TreeError::SlotCountMismatch {
                step: 0,
                field: "scores",
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_single_step_example() {
        let r = record(
            vec![vec![5, 7]],
            vec![vec![0, 0]],
            vec![vec![Some(-1.2), None]],
        );
        let v = vocab(&[("5", "a"), ("7", "b")]);
        let tree = build_tree(&r, Some(&v)).unwrap();

        assert_eq!(tree.node_count(), 3);
        let kids = tree.children_of(NodeId::ROOT);
        assert_eq!(kids, &[NodeId::new(1, 0), NodeId::new(1, 1)]);

        let first = tree.node(NodeId::new(1, 0)).unwrap();
        assert_eq!(first.name, "a");
        assert_eq!(first.score.as_deref(), Some("-1.200"));
        assert_eq!(first.size, Some(NODE_SIZE));

        let second = tree.node(NodeId::new(1, 1)).unwrap();
        assert_eq!(second.name, "b");
        assert_eq!(second.score.as_deref(), Some("-inf"));
    }
}
