//! Import header synthesis
//!
//! Turns the populated context into the header text each generated file
//! needs: the file-wide external imports, plus one intra-package import
//! line per recorded dependency. Constants route to the shared constants
//! module; every other declaration lives in a module named after itself.

use std::cell::OnceCell;

use crate::semantic::{SplitContext, SymbolKind};

/// Module name of the shared constants file (without extension).
pub const CONSTANT_MODULE: &str = "constant";

/// Renders import headers against a fully populated context.
pub struct HeaderSynthesizer<'a> {
    ctx: &'a SplitContext,
    global: OnceCell<String>,
}

impl<'a> HeaderSynthesizer<'a> {
    pub fn new(ctx: &'a SplitContext) -> Self {
        Self {
            ctx,
            global: OnceCell::new(),
        }
    }

    /// The file-wide external imports: one `import X` line per plain
    /// import, then one `from X import (...)` line per from-import, in
    /// recorded order. Computed once; the import record is immutable by
    /// the time headers are rendered.
    pub fn global_header(&self) -> &str {
        self.global.get_or_init(|| {
            let mut header = String::new();
            for import in self.ctx.imports.plain() {
                header.push_str("import ");
                header.push_str(import);
                header.push('\n');
            }
            for import in self.ctx.imports.from_imports() {
                header.push_str("from ");
                header.push_str(import);
                header.push('\n');
            }
            header
        })
    }

    /// One intra-package import line per recorded dependency of `name`,
    /// in discovery order. Empty for unregistered names.
    pub fn dependency_header(&self, name: &str) -> String {
        let mut header = String::new();
        let Some(symbol) = self.ctx.symbols.get(name) else {
            return header;
        };
        for dep in symbol.dependencies() {
            if let Some(dep_symbol) = self.ctx.symbols.get(dep) {
                push_package_import(&mut header, dep, dep_symbol.kind());
            }
        }
        header
    }

    /// Complete header for one generated declaration file.
    pub fn file_header(&self, name: &str) -> String {
        let mut header = String::from(self.global_header());
        header.push_str(&self.dependency_header(name));
        header
    }

    /// Header of the package `__init__.py`: one re-export line per
    /// registered symbol, in declaration order.
    pub fn aggregator_header(&self) -> String {
        let mut header = String::new();
        for symbol in self.ctx.symbols.iter() {
            push_package_import(&mut header, symbol.name(), symbol.kind());
        }
        header
    }
}

fn push_package_import(out: &mut String, name: &str, kind: SymbolKind) {
    match kind {
        SymbolKind::Constant => {
            out.push_str("from .");
            out.push_str(CONSTANT_MODULE);
            out.push_str(" import ");
        }
        SymbolKind::Function | SymbolKind::Class => {
            out.push_str("from .");
            out.push_str(name);
            out.push_str(" import ");
        }
    }
    out.push_str(name);
    out.push('\n');
}
