//! Writes the split package to disk
//!
//! Layout, for a source file `pkg.py` split into directory `pkg/`:
//! - `<name>.py` per function/class: header, two blank lines, declaration
//!   text as written in the source
//! - `constant.py`: every constant assignment, one statement per line;
//!   only created when at least one constant exists
//! - `__init__.py`: re-exports every top-level name, so the package
//!   presents the same flat namespace as the original file
//!
//! Any I/O failure aborts the run; a partially split package would be
//! inconsistent.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::SplitError;
use crate::parser::StatementKind;
use crate::render::{CONSTANT_MODULE, HeaderSynthesizer};
use crate::semantic::SplitContext;

/// Counts of what [`emit_package`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitSummary {
    pub declaration_files: usize,
    pub constants: usize,
}

/// Write the split package for a fully resolved context.
pub fn emit_package(
    ctx: &SplitContext,
    source: &str,
    out_dir: &Path,
) -> Result<EmitSummary, SplitError> {
    fs::create_dir_all(out_dir)?;
    let synthesizer = HeaderSynthesizer::new(ctx);

    let mut declaration_files = 0;
    let mut constant_text = String::new();
    let mut constants = 0;
    for statement in ctx.unit.statements() {
        match &statement.kind {
            StatementKind::FunctionDef { name } | StatementKind::ClassDef { name } => {
                let path = out_dir.join(format!("{name}.py"));
                fs::write(&path, declaration_file(&synthesizer, name, statement.text(source)))?;
                debug!(file = %path.display(), "wrote declaration file");
                declaration_files += 1;
            }
            StatementKind::Assignment { .. } => {
                constant_text.push_str(statement.text(source));
                constant_text.push('\n');
                constants += 1;
            }
            _ => {}
        }
    }

    if constants > 0 {
        let path = out_dir.join(format!("{CONSTANT_MODULE}.py"));
        fs::write(&path, &constant_text)?;
        debug!(file = %path.display(), "wrote constants file");
    }

    fs::write(out_dir.join("__init__.py"), synthesizer.aggregator_header())?;

    info!(
        declarations = declaration_files,
        constants,
        dir = %out_dir.display(),
        "package written"
    );
    Ok(EmitSummary {
        declaration_files,
        constants,
    })
}

/// Header, separator, body. A file with no imports gets the body alone.
fn declaration_file(synthesizer: &HeaderSynthesizer<'_>, name: &str, body: &str) -> String {
    let header = synthesizer.file_header(name);
    let mut content = String::new();
    if !header.is_empty() {
        content.push_str(&header);
        content.push('\n');
        content.push('\n');
    }
    content.push_str(body);
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}
