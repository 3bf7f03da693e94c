use serde::Serialize;

use crate::tree::BeamTree;
use crate::types::NodeId;

/// The nested shape `tree.js` consumes: own attributes plus recursively
/// serialized children. `score` and `size` are omitted where absent (the
/// root), so the JSON stays minimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeDatum {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    pub children: Vec<TreeDatum>,
}

/// Flatten the tree rooted at `(0, 0)` into the nested page format. Pure read,
/// children appear in slot order.
pub fn tree_data(tree: &BeamTree) -> TreeDatum {
    datum_at(tree, tree.root())
}

fn datum_at(tree: &BeamTree, id: NodeId) -> TreeDatum {
    let node = tree.node(id).cloned().unwrap_or_default();
    TreeDatum {
        name: node.name,
        score: node.score,
        size: node.size,
        children: tree
            .children_of(id)
            .iter()
            .map(|&child| datum_at(tree, child))
            .collect(),
    }
}
