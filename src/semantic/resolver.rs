//! Reference resolution — phase two of the pipeline
//!
//! For each function or class declaration, re-lexes the declaration's
//! source slice and records an edge for every identifier that names a
//! sibling top-level declaration. There is no lexical-scope analysis: a
//! local binding that shares a top-level name is indistinguishable from a
//! real reference at token level and is recorded as a dependency. The
//! resolver does skip the binding positions that are cheap to detect:
//! attribute names, the name after `def`/`class`/`as`, whole
//! `import`/`from`/`global`/`nonlocal` lines, and keyword-argument names.
//!
//! After the scan phase the symbol table is read-only except for per-owner
//! dependency lists, so declarations resolve independently and the walk
//! fans out across a rayon pool by default. Each worker computes a pure
//! dependency list; edges are appended serially per owner afterward.

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use text_size::TextRange;
use tracing::debug;

use crate::parser::{Lexer, SyntaxKind, Token, tokenize};

use super::SplitContext;
use super::error::SemanticError;
use super::symbol_table::SymbolTable;

/// Resolve dependency edges for every function and class declaration.
pub fn resolve_all(
    ctx: &mut SplitContext,
    source: &str,
    parallel: bool,
) -> Result<(), SemanticError> {
    let declarations: Vec<(SmolStr, TextRange)> = ctx
        .unit
        .statements()
        .filter_map(|s| s.declaration_name().map(|n| (n.clone(), s.range)))
        .collect();
    let resolved: Vec<(SmolStr, Vec<SmolStr>)> = {
        let symbols = &ctx.symbols;
        let collect = |(name, range): &(SmolStr, TextRange)| {
            let slice = &source[std::ops::Range::<usize>::from(*range)];
            (name.clone(), collect_references(slice, name, symbols))
        };
        if parallel {
            declarations.par_iter().map(collect).collect()
        } else {
            declarations.iter().map(collect).collect()
        }
    };
    for (owner, deps) in &resolved {
        for dep in deps {
            ctx.symbols.add_dependency(owner, dep)?;
        }
    }
    debug!(declarations = declarations.len(), "resolution complete");
    Ok(())
}

/// Walk one declaration's tokens and collect the sibling top-level names
/// it references, in first-seen order, own name excluded.
fn collect_references(slice: &str, own_name: &str, symbols: &SymbolTable) -> Vec<SmolStr> {
    let tokens = tokenize(slice);
    let mut found = Vec::new();
    let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
    let mut prev: Option<SyntaxKind> = None;
    let mut depth: u32 = 0;
    let mut line_head = true;
    let mut binding_line = false;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            k if k.is_trivia() => continue,
            SyntaxKind::NEWLINE => {
                if depth == 0 {
                    line_head = true;
                    binding_line = false;
                    prev = None;
                }
                continue;
            }
            SyntaxKind::SEMICOLON if depth == 0 => {
                line_head = true;
                binding_line = false;
                prev = None;
                continue;
            }
            _ => {}
        }
        if line_head {
            binding_line = matches!(
                token.kind,
                SyntaxKind::IMPORT_KW
                    | SyntaxKind::FROM_KW
                    | SyntaxKind::GLOBAL_KW
                    | SyntaxKind::NONLOCAL_KW
            );
            line_head = false;
        }
        if token.kind.is_open_bracket() {
            depth += 1;
        } else if token.kind.is_close_bracket() {
            depth = depth.saturating_sub(1);
        }
        match token.kind {
            SyntaxKind::IDENT if !binding_line => {
                let after_binder = matches!(
                    prev,
                    Some(
                        SyntaxKind::DOT
                            | SyntaxKind::DEF_KW
                            | SyntaxKind::CLASS_KW
                            | SyntaxKind::AS_KW
                    )
                );
                let keyword_argument = matches!(
                    prev,
                    Some(SyntaxKind::L_PAREN | SyntaxKind::COMMA)
                ) && next_significant_kind(&tokens, i + 1) == Some(SyntaxKind::EQ);
                if !after_binder && !keyword_argument {
                    record(token.text, own_name, symbols, &mut seen, &mut found);
                }
            }
            SyntaxKind::STRING if !binding_line && is_format_string(token.text) => {
                for field in format_string_fields(token.text) {
                    collect_in_expression(&field, own_name, symbols, &mut seen, &mut found);
                }
            }
            _ => {}
        }
        prev = Some(token.kind);
    }
    found
}

/// Collect references inside one f-string interpolation field. Nested
/// format strings inside fields are not scanned.
fn collect_in_expression(
    expr: &str,
    own_name: &str,
    symbols: &SymbolTable,
    seen: &mut FxHashSet<SmolStr>,
    found: &mut Vec<SmolStr>,
) {
    let mut prev: Option<SyntaxKind> = None;
    for token in Lexer::new(expr) {
        if token.kind.is_trivia() || token.kind == SyntaxKind::NEWLINE {
            continue;
        }
        if token.kind == SyntaxKind::IDENT
            && !matches!(prev, Some(SyntaxKind::DOT | SyntaxKind::AS_KW))
        {
            record(token.text, own_name, symbols, seen, found);
        }
        prev = Some(token.kind);
    }
}

fn record(
    name: &str,
    own_name: &str,
    symbols: &SymbolTable,
    seen: &mut FxHashSet<SmolStr>,
    found: &mut Vec<SmolStr>,
) {
    if name != own_name && symbols.contains(name) {
        let name = SmolStr::new(name);
        if seen.insert(name.clone()) {
            found.push(name);
        }
    }
}

fn next_significant_kind(tokens: &[Token<'_>], mut i: usize) -> Option<SyntaxKind> {
    while matches!(tokens.get(i), Some(t) if t.kind.is_trivia()) {
        i += 1;
    }
    tokens.get(i).map(|t| t.kind)
}

/// Check whether a string token carries an `f` prefix.
fn is_format_string(text: &str) -> bool {
    text.chars()
        .take_while(|c| *c != '"' && *c != '\'')
        .any(|c| matches!(c, 'f' | 'F'))
}

/// Extract the interpolation-field expressions of an f-string token.
/// `{{`/`}}` escapes are skipped; conversion suffixes (`!r`), `=` debug
/// markers, and format specs after `:` are dropped from the expression.
fn format_string_fields(text: &str) -> Vec<String> {
    let Some(body) = string_body(text) else {
        return Vec::new();
    };
    let chars: Vec<char> = body.chars().collect();
    let mut fields = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '{' if chars.get(i + 1) == Some(&'{') => i += 2,
            '}' if chars.get(i + 1) == Some(&'}') => i += 2,
            '{' => {
                let (field, next) = read_field(&chars, i + 1);
                if !field.is_empty() {
                    fields.push(field);
                }
                i = next;
            }
            _ => i += 1,
        }
    }
    fields
}

/// The text between a string token's quotes, prefix letters stripped.
fn string_body(text: &str) -> Option<&str> {
    let start = text.find(['"', '\''])?;
    let rest = &text[start..];
    let quote = &rest[..1];
    for delim_len in [3usize, 1] {
        let delim = quote.repeat(delim_len);
        if rest.len() >= delim_len * 2 && rest.starts_with(&delim) && rest.ends_with(&delim) {
            return Some(&rest[delim_len..rest.len() - delim_len]);
        }
    }
    None
}

/// Read one interpolation field starting just after its `{`. Returns the
/// expression text and the index just past the closing `}`.
fn read_field(chars: &[char], start: usize) -> (String, usize) {
    let mut depth: u32 = 0;
    let mut expr = String::new();
    let mut in_spec = false;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '}' if depth == 0 => {
                i += 1;
                break;
            }
            '{' | '[' | '(' => {
                depth += 1;
                if !in_spec {
                    expr.push(c);
                }
            }
            '}' | ']' | ')' => {
                depth = depth.saturating_sub(1);
                if !in_spec {
                    expr.push(c);
                }
            }
            ':' if depth == 0 => in_spec = true,
            '!' if depth == 0
                && matches!(chars.get(i + 1), Some('r' | 's' | 'a'))
                && matches!(chars.get(i + 2), Some(':' | '}') | None) =>
            {
                i += 1; // skip the conversion character as well
            }
            '=' if depth == 0 && matches!(chars.get(i + 1), Some('}' | ':' | '!')) => {}
            '\'' | '"' => {
                // inner string literal: copy verbatim so a `:` inside it
                // cannot start the format spec
                if !in_spec {
                    expr.push(c);
                }
                i += 1;
                while i < chars.len() && chars[i] != c {
                    if !in_spec {
                        expr.push(chars[i]);
                    }
                    i += 1;
                }
                if i < chars.len() && !in_spec {
                    expr.push(c);
                }
            }
            _ => {
                if !in_spec {
                    expr.push(c);
                }
            }
        }
        i += 1;
    }
    (expr, i)
}
