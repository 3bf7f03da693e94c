//! beamviz-core: turn beam search decoder traces into browsable HTML pages.
//! Compose a beam source with the renderer; one page per decoded sentence,
//! each embedding the run's hypothesis tree.

pub mod assets;
pub mod datasource;
pub mod error;
pub mod page;
pub mod runner;
pub mod serialize;
pub mod tree;
pub mod types;

pub use datasource::{parse_trace, BeamSource, JsonFileSource, VecSource};
pub use error::TreeError;
pub use page::{page_file_name, render_page, PageContext};
pub use runner::{Viz, VizBuilder};
pub use serialize::{tree_data, TreeDatum};
pub use tree::{build_tree, BeamTree, NODE_SIZE};
pub use types::{BeamBatch, BeamRecord, NodeId, PageResult, TreeNode, VizResult, Vocab};
