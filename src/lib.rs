//! # pysplit
//!
//! Splits a monolithic Python module into a package of
//! one-declaration-per-file modules, each carrying exactly the import
//! statements it needs to be importable in isolation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → package emission (directory layout, file writing)
//!   ↓
//! render    → import header synthesis (global, per-dependency, aggregator)
//!   ↓
//! semantic  → symbol table, declaration scan, reference resolution
//!   ↓
//! parser    → logos lexer, top-level statement parser
//!   ↓
//! base      → primitives (names, byte ranges, line index)
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! source text
//!     ↓ parse       ordered top-level statements with byte ranges
//!     ↓ scan        symbol table + normalized import record
//!     ↓ resolve     dependency edges per declaration (rayon fan-out)
//!     ↓ render      per-file import headers
//!     ↓ emit        <name>.py / constant.py / __init__.py
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → semantic → render → project)
// ============================================================================

/// Foundation types: names, byte ranges, line index
pub mod base;

/// Parser: logos lexer, top-level statement parser
pub mod parser;

/// Semantic analysis: symbol table, scan, reference resolution
pub mod semantic;

/// Import header synthesis
pub mod render;

/// Package emission (filesystem boundary)
pub mod project;

mod error;

pub use error::SplitError;
pub use render::HeaderSynthesizer;
pub use semantic::SplitContext;

use parser::parse_module;
use semantic::{resolve_all, scan_module};

/// Run the parse, scan, and resolve phases over `source`, producing a
/// fully populated context ready for header synthesis and emission.
///
/// The phases are strictly ordered: the scan completes before any
/// declaration is resolved. With `parallel` set, declarations resolve
/// across a rayon pool; results are identical either way.
pub fn split_source(source: &str, parallel: bool) -> Result<SplitContext, SplitError> {
    let unit = parse_module(source)?;
    let mut ctx = scan_module(unit)?;
    resolve_all(&mut ctx, source, parallel)?;
    Ok(ctx)
}
