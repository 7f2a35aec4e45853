use thiserror::Error;

/// Contract violations surfaced by tree construction and mutation.
///
/// Every error is raised synchronously at the offending call, before any
/// structural change is applied. There are no partial-failure states.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("model must be an object, got {kind}")]
    ModelNotObject { kind: &'static str },

    #[error("index {index} out of range (max {max})")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("cannot {operation} when a comparator function is configured")]
    ComparatorConflict { operation: &'static str },

    #[error("unknown walk strategy '{0}', valid strategies are 'pre', 'post' and 'breadth'")]
    UnknownStrategy(String),

    #[error("'{name}' is the children property, use the child operations instead")]
    ReservedProperty { name: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
