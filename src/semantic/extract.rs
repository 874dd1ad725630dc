//! Declaration scan — phase one of the pipeline
//!
//! Walks the parsed top-level statements once, in source order, registering
//! every declaration into the symbol table and normalizing every import
//! statement into the import record. Declaration bodies are not inspected;
//! what each declaration *uses* is the resolver's job, after this pass has
//! established what *exists*.

use indexmap::IndexSet;
use tracing::debug;

use crate::parser::{ImportAlias, SourceUnit, StatementKind};

use super::error::SemanticError;
use super::imports::ImportTable;
use super::symbol_table::SymbolTable;
use super::SplitContext;

/// Build the run context from a parsed source unit.
pub fn scan_module(unit: SourceUnit) -> Result<SplitContext, SemanticError> {
    let mut symbols = SymbolTable::new();
    let mut imports = ImportTable::new();
    for statement in unit.statements() {
        match &statement.kind {
            StatementKind::FunctionDef { name } => symbols.register_function(name.clone())?,
            StatementKind::ClassDef { name } => symbols.register_class(name.clone())?,
            StatementKind::Assignment { targets } => {
                // `a = b = 1` registers one constant per target; all of
                // them share the statement's text at extraction time
                for target in targets {
                    symbols.register_constant(target.clone())?;
                }
            }
            StatementKind::Import { aliases } => {
                for alias in aliases {
                    imports.record_import(&alias.render());
                }
            }
            StatementKind::ImportFrom { module, names } => {
                imports.record_from_import(&render_from_import(module, names));
            }
            StatementKind::Other => {}
        }
    }
    debug!(symbols = symbols.len(), "scan complete");
    Ok(SplitContext {
        unit,
        symbols,
        imports,
    })
}

/// Canonical `"module import (a,b as c)"` string for one from-import
/// statement, members deduplicated with first occurrence winning.
fn render_from_import(module: &str, names: &[ImportAlias]) -> String {
    let mut members: IndexSet<String> = IndexSet::new();
    for name in names {
        members.insert(name.render());
    }
    let joined: Vec<&str> = members.iter().map(String::as_str).collect();
    format!("{module} import ({})", joined.join(","))
}
