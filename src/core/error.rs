use thiserror::Error;

/// Errors raised by the classifiers and the cross-validation engine.
///
/// All of these are deterministic precondition violations; none of them are
/// transient, so callers should not retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("classifier has not been trained")]
    NotTrained,

    #[error("point has {actual} attributes, expected {expected}")]
    AttributeCountMismatch { expected: usize, actual: usize },

    #[error("cannot split {records} records into {folds} folds")]
    InvalidFoldCount { folds: usize, records: usize },

    #[error("record {index} has {actual} attributes, expected {expected}")]
    IrregularRecord {
        index: usize,
        expected: usize,
        actual: usize,
    },
}
