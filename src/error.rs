//! Crate-level error type

use thiserror::Error;

use crate::parser::ParseError;
use crate::semantic::SemanticError;

/// Everything that can abort a split. There is no retry logic anywhere:
/// the pipeline is a one-shot batch transform, and any failure aborts the
/// whole run rather than skipping the offending declaration.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
