use thiserror::Error;

/// Failures while rebuilding a hypothesis tree from a beam trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("'{field}' has {got} steps, expected {expected} to match 'predicted_ids'")]
    StepCountMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("step {step}: '{field}' has {got} slots, expected {expected}")]
    SlotCountMismatch {
        step: usize,
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("no vocab entry for token id {id} (step {step}, slot {slot})")]
    UnknownToken { id: i64, step: usize, slot: usize },

    #[error("invalid parent reference: step {step}, slot {slot} points at slot {parent} of the previous level")]
    InvalidParent {
        step: usize,
        slot: usize,
        parent: usize,
    },
}
