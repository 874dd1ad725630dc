//! Top-level statement nodes
//!
//! The parser classifies every top-level statement of a source file into
//! one of the kinds below and records its byte range. Statement bodies are
//! never modeled as trees: extraction slices the original source, and
//! reference discovery re-lexes the slice.

use smol_str::SmolStr;
use text_size::TextRange;

/// The ordered top-level statement sequence of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub statements: Vec<Statement>,
}

impl SourceUnit {
    /// Iterate the top-level statements in source order
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }
}

/// One top-level statement with its classification and source range.
///
/// For `def`/`class` the range covers the whole declaration: decorators,
/// header line, and indented body, with trailing blank lines trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub range: TextRange,
}

impl Statement {
    /// Slice this statement's text out of the original source
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[std::ops::Range::<usize>::from(self.range)]
    }

    /// Declaration name, for function and class statements
    pub fn declaration_name(&self) -> Option<&SmolStr> {
        match &self.kind {
            StatementKind::FunctionDef { name } | StatementKind::ClassDef { name } => Some(name),
            _ => None,
        }
    }
}

/// Classification of a top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// `def name(...)` or `async def name(...)`, decorators included
    FunctionDef { name: SmolStr },
    /// `class name(...)`, decorators included
    ClassDef { name: SmolStr },
    /// `a = expr` or `a = b = expr`; plain-identifier targets only
    Assignment { targets: Vec<SmolStr> },
    /// `import mod[, mod as alias, ...]`
    Import { aliases: Vec<ImportAlias> },
    /// `from mod import name[, name as alias, ...]`
    ImportFrom {
        module: SmolStr,
        names: Vec<ImportAlias>,
    },
    /// Anything else; retained for its range but never extracted
    Other,
}

/// One imported name with its optional binding alias.
///
/// For plain imports `name` is the dotted module path; for from-imports it
/// is a single member name (or `*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAlias {
    pub name: SmolStr,
    pub alias: Option<SmolStr>,
}

impl ImportAlias {
    pub fn new(name: impl Into<SmolStr>, alias: Option<SmolStr>) -> Self {
        Self {
            name: name.into(),
            alias,
        }
    }

    /// Canonical `"name"` / `"name as alias"` rendering
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {}", self.name, alias),
            None => self.name.to_string(),
        }
    }
}
