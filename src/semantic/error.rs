//! Semantic error types

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised while building or querying the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A lookup or dependency edge against a name that was never
    /// registered. The scan phase registers every name before resolution
    /// runs, so this is a pipeline logic error rather than a user-facing
    /// condition; it is still surfaced as an error instead of a panic.
    #[error("unknown symbol `{name}`")]
    UnknownSymbol { name: SmolStr },

    /// Two top-level declarations share a name.
    #[error("duplicate top-level declaration `{name}`")]
    DuplicateDeclaration { name: SmolStr },
}
