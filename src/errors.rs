use thiserror::Error;

/// Errors from tree store operations.
///
/// Lookup misses are not errors: the query methods return `None` for an
/// unknown identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("parent not found or not a folder: {0}")]
    InvalidParent(String),

    #[error("node not found or is the root: {0}")]
    NodeNotRemovable(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
