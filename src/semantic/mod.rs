//! # Semantic Analysis
//!
//! Builds the whole-file symbol table and the dependency edges between
//! top-level declarations. Strictly two-phase: the scan walks the
//! statement sequence and registers what exists; resolution then walks
//! each declaration's body and records what it uses. The phases never
//! interleave — [`resolve_all`] takes the context the scan produced, so
//! resolving against a half-built table is not expressible.

mod error;
pub(crate) mod extract;
mod imports;
mod resolver;
mod symbol_table;

pub use error::SemanticError;
pub use extract::scan_module;
pub use imports::ImportTable;
pub use resolver::resolve_all;
pub use symbol_table::{Symbol, SymbolKind, SymbolTable};

/// All per-run state: the parsed statements, the symbol table, and the
/// import record. Constructed once per run by the scan phase and threaded
/// by reference through resolution, header synthesis, and emission —
/// nothing in the pipeline is global.
#[derive(Debug)]
pub struct SplitContext {
    pub unit: crate::parser::SourceUnit,
    pub symbols: SymbolTable,
    pub imports: ImportTable,
}
