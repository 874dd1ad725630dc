//! Line-oriented top-level statement parser
//!
//! One pass over the token stream. A logical line ends at a newline outside
//! brackets (triple-quoted strings are single tokens, `\`-continuations are
//! trivia), and a top-level statement owns its first logical line plus every
//! following blank or indented line. That one rule covers `def`/`class`
//! bodies and the bodies of ignored compound statements uniformly.
//!
//! Declaration bodies are never inspected here; reference discovery happens
//! in a separate pass over the declaration's source slice.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use tracing::debug;

use super::ast::{ImportAlias, SourceUnit, Statement, StatementKind};
use super::error::ParseError;
use super::lexer::{Token, tokenize};
use super::syntax_kind::SyntaxKind;

/// Parse a source file into its top-level statement sequence.
pub fn parse_module(source: &str) -> Result<SourceUnit, ParseError> {
    Parser::new(source).parse()
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    eof: TextSize,
}

/// The significant tokens of one logical line.
struct Line<'a> {
    tokens: Vec<Token<'a>>,
    range: TextRange,
    /// Line ended at a `;` with more significant tokens after it
    mid_line: bool,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            tokens: tokenize(source),
            pos: 0,
            eof: TextSize::of(source),
        }
    }

    fn parse(mut self) -> Result<SourceUnit, ParseError> {
        let mut statements = Vec::new();
        loop {
            self.skip_blank_lines();
            let Some(first) = self.tokens.get(self.pos) else {
                break;
            };
            if first.kind == SyntaxKind::WHITESPACE {
                return Err(ParseError::new("unexpected indent", first.range()));
            }
            let statement = self.parse_statement()?;
            statements.push(statement);
        }
        debug!(statements = statements.len(), "parsed source file");
        Ok(SourceUnit { statements })
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let first_kind = self.tokens[self.pos].kind;
        let first_offset = self.tokens[self.pos].offset;
        match first_kind {
            SyntaxKind::AT => self.parse_decorated(),
            SyntaxKind::DEF_KW | SyntaxKind::CLASS_KW | SyntaxKind::ASYNC_KW => {
                self.parse_definition(first_offset)
            }
            _ => self.parse_simple(),
        }
    }

    /// `def`/`class`/`async def`, with `start` already covering any
    /// decorators consumed by the caller.
    fn parse_definition(&mut self, start: TextSize) -> Result<Statement, ParseError> {
        if self.tokens[self.pos].kind == SyntaxKind::ASYNC_KW {
            let next = self.next_significant(self.pos + 1);
            if self.kind_at(next) != Some(SyntaxKind::DEF_KW) {
                // `async for` / `async with`: not a declaration
                return self.parse_compound_other(start);
            }
            self.pos = next;
        }
        let keyword = self.tokens[self.pos].kind;
        self.pos += 1;
        let name_token = match keyword {
            SyntaxKind::DEF_KW => self.expect_ident("expected function name after `def`")?,
            _ => self.expect_ident("expected class name after `class`")?,
        };
        let name = SmolStr::new(name_token.text);
        let header = self.line_tokens(false)?;
        let header_end = header.range.end().max(name_token.range().end());
        let end = self.read_block()?.unwrap_or(header_end);
        let kind = match keyword {
            SyntaxKind::DEF_KW => StatementKind::FunctionDef { name },
            _ => StatementKind::ClassDef { name },
        };
        Ok(Statement {
            kind,
            range: TextRange::new(start, end),
        })
    }

    /// One or more `@decorator` lines followed by a `def`/`class`.
    fn parse_decorated(&mut self) -> Result<Statement, ParseError> {
        let start = self.tokens[self.pos].offset;
        loop {
            self.line_tokens(false)?;
            self.skip_blank_lines();
            match self.tokens.get(self.pos) {
                Some(t) if t.kind == SyntaxKind::AT => continue,
                Some(t)
                    if matches!(
                        t.kind,
                        SyntaxKind::DEF_KW | SyntaxKind::CLASS_KW | SyntaxKind::ASYNC_KW
                    ) =>
                {
                    return self.parse_definition(start);
                }
                Some(t) => {
                    return Err(ParseError::new(
                        "expected `def` or `class` after decorator",
                        t.range(),
                    ));
                }
                None => {
                    return Err(ParseError::new(
                        "expected `def` or `class` after decorator",
                        TextRange::empty(self.eof),
                    ));
                }
            }
        }
    }

    /// A statement that is not a declaration but owns an indented block.
    fn parse_compound_other(&mut self, start: TextSize) -> Result<Statement, ParseError> {
        let line = self.line_tokens(false)?;
        let end = self.read_block()?.unwrap_or(line.range.end());
        Ok(Statement {
            kind: StatementKind::Other,
            range: TextRange::new(start, end),
        })
    }

    fn parse_simple(&mut self) -> Result<Statement, ParseError> {
        let first_kind = self.tokens[self.pos].kind;
        let stop_at_semicolon = matches!(
            first_kind,
            SyntaxKind::IDENT | SyntaxKind::IMPORT_KW | SyntaxKind::FROM_KW
        );
        let line = self.line_tokens(stop_at_semicolon)?;
        let kind = match first_kind {
            SyntaxKind::IMPORT_KW => classify_import(&line.tokens)?,
            SyntaxKind::FROM_KW => classify_from_import(&line.tokens)?,
            SyntaxKind::IDENT => classify_assignment(&line.tokens),
            _ => StatementKind::Other,
        };
        let opens_block = matches!(
            first_kind,
            SyntaxKind::IF_KW
                | SyntaxKind::ELIF_KW
                | SyntaxKind::ELSE_KW
                | SyntaxKind::FOR_KW
                | SyntaxKind::WHILE_KW
                | SyntaxKind::WITH_KW
                | SyntaxKind::TRY_KW
                | SyntaxKind::EXCEPT_KW
                | SyntaxKind::FINALLY_KW
        ) || line.tokens.last().map(|t| t.kind) == Some(SyntaxKind::COLON);
        let end = if opens_block {
            self.read_block()?.unwrap_or(line.range.end())
        } else {
            if !line.mid_line {
                self.reject_indent()?;
            }
            line.range.end()
        };
        Ok(Statement {
            kind,
            range: TextRange::new(line.range.start(), end),
        })
    }

    /// Consume tokens to the end of the current logical line, tracking
    /// bracket depth. Newlines inside brackets do not end the line.
    fn line_tokens(&mut self, stop_at_semicolon: bool) -> Result<Line<'a>, ParseError> {
        let Some(first) = self.tokens.get(self.pos) else {
            return Ok(Line {
                tokens: Vec::new(),
                range: TextRange::empty(self.eof),
                mid_line: false,
            });
        };
        let start = first.offset;
        let mut end = start;
        let mut significant = Vec::new();
        let mut depth: u32 = 0;
        let mut mid_line = false;
        while let Some(token) = self.tokens.get(self.pos) {
            let token = token.clone();
            match token.kind {
                k if k.is_trivia() => {
                    self.pos += 1;
                }
                SyntaxKind::NEWLINE => {
                    self.pos += 1;
                    if depth == 0 {
                        break;
                    }
                }
                SyntaxKind::SEMICOLON if depth == 0 && stop_at_semicolon => {
                    self.pos += 1;
                    while matches!(self.tokens.get(self.pos), Some(t) if t.kind.is_trivia()) {
                        self.pos += 1;
                    }
                    match self.tokens.get(self.pos) {
                        Some(t) if t.kind == SyntaxKind::NEWLINE => self.pos += 1,
                        Some(_) => mid_line = true,
                        None => {}
                    }
                    break;
                }
                SyntaxKind::ERROR => {
                    return Err(ParseError::new(
                        format!("unrecognized token `{}`", token.text),
                        token.range(),
                    ));
                }
                kind => {
                    if kind.is_open_bracket() {
                        depth += 1;
                    } else if kind.is_close_bracket() {
                        depth = depth.saturating_sub(1);
                    }
                    end = token.range().end();
                    significant.push(token);
                    self.pos += 1;
                }
            }
        }
        if depth > 0 && self.pos >= self.tokens.len() {
            return Err(ParseError::new(
                "unexpected end of file inside brackets",
                TextRange::empty(self.eof),
            ));
        }
        Ok(Line {
            tokens: significant,
            range: TextRange::new(start, end),
            mid_line,
        })
    }

    /// Consume the blank or indented lines following a compound-statement
    /// header. Returns the end offset of the last significant line, if any;
    /// trailing blank lines never extend a statement's range.
    fn read_block(&mut self) -> Result<Option<TextSize>, ParseError> {
        let mut last_end = None;
        loop {
            let mut j = self.pos;
            while matches!(self.tokens.get(j), Some(t) if t.kind.is_trivia()) {
                j += 1;
            }
            match self.tokens.get(j) {
                None => {
                    self.pos = self.tokens.len();
                    break;
                }
                Some(t) if t.kind == SyntaxKind::NEWLINE => {
                    self.pos = j + 1;
                }
                Some(_) => {
                    if self.tokens[self.pos].kind != SyntaxKind::WHITESPACE {
                        break;
                    }
                    let line = self.line_tokens(false)?;
                    last_end = Some(line.range.end());
                }
            }
        }
        Ok(last_end)
    }

    /// A simple statement must not be followed by an indented line.
    /// Lookahead only; nothing is consumed.
    fn reject_indent(&self) -> Result<(), ParseError> {
        let mut j = self.pos;
        loop {
            let line_start = j;
            let mut k = j;
            while matches!(self.tokens.get(k), Some(t) if t.kind.is_trivia()) {
                k += 1;
            }
            match self.tokens.get(k) {
                Some(t) if t.kind == SyntaxKind::NEWLINE => {
                    j = k + 1;
                }
                Some(_) if self.tokens[line_start].kind == SyntaxKind::WHITESPACE => {
                    return Err(ParseError::new(
                        "unexpected indent",
                        self.tokens[line_start].range(),
                    ));
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consume blank and comment-only lines. Stops before any line that
    /// carries a significant token, indented or not.
    fn skip_blank_lines(&mut self) {
        loop {
            let mut j = self.pos;
            while matches!(self.tokens.get(j), Some(t) if t.kind.is_trivia()) {
                j += 1;
            }
            match self.tokens.get(j) {
                Some(t) if t.kind == SyntaxKind::NEWLINE => self.pos = j + 1,
                None => {
                    self.pos = self.tokens.len();
                    return;
                }
                Some(_) => return,
            }
        }
    }

    fn expect_ident(&mut self, message: &str) -> Result<Token<'a>, ParseError> {
        while matches!(self.tokens.get(self.pos), Some(t) if t.kind.is_trivia()) {
            self.pos += 1;
        }
        match self.tokens.get(self.pos) {
            Some(t) if t.kind == SyntaxKind::IDENT => {
                let token = t.clone();
                self.pos += 1;
                Ok(token)
            }
            Some(t) => Err(ParseError::new(message, t.range())),
            None => Err(ParseError::new(message, TextRange::empty(self.eof))),
        }
    }

    fn next_significant(&self, mut i: usize) -> usize {
        while matches!(self.tokens.get(i), Some(t) if t.kind.is_trivia()) {
            i += 1;
        }
        i
    }

    fn kind_at(&self, i: usize) -> Option<SyntaxKind> {
        self.tokens.get(i).map(|t| t.kind)
    }
}

// ============================================================================
// LOGICAL-LINE CLASSIFICATION
// ============================================================================

/// `a = expr` / `a = b = expr` with plain-identifier targets. Anything
/// else identifier-led (calls, annotated or augmented assignments, tuple
/// targets) is Other.
fn classify_assignment(line: &[Token<'_>]) -> StatementKind {
    let mut targets = Vec::new();
    let mut i = 0;
    while i + 1 < line.len()
        && line[i].kind == SyntaxKind::IDENT
        && line[i + 1].kind == SyntaxKind::EQ
    {
        targets.push(SmolStr::new(line[i].text));
        i += 2;
    }
    if targets.is_empty() || i >= line.len() {
        return StatementKind::Other;
    }
    StatementKind::Assignment { targets }
}

fn classify_import(line: &[Token<'_>]) -> Result<StatementKind, ParseError> {
    let mut aliases = Vec::new();
    let mut i = 1;
    loop {
        let (name, next) = parse_dotted_name(line, i)?;
        i = next;
        let alias = parse_alias(line, &mut i)?;
        aliases.push(ImportAlias::new(name, alias));
        if matches!(line.get(i), Some(t) if t.kind == SyntaxKind::COMMA) {
            i += 1;
        } else {
            break;
        }
    }
    expect_line_end(line, i)?;
    Ok(StatementKind::Import { aliases })
}

fn classify_from_import(line: &[Token<'_>]) -> Result<StatementKind, ParseError> {
    let mut i = 1;
    let mut module = String::new();
    while matches!(line.get(i), Some(t) if matches!(t.kind, SyntaxKind::DOT | SyntaxKind::ELLIPSIS))
    {
        module.push_str(line[i].text);
        i += 1;
    }
    if matches!(line.get(i), Some(t) if t.kind == SyntaxKind::IDENT) {
        let (name, next) = parse_dotted_name(line, i)?;
        module.push_str(&name);
        i = next;
    }
    if module.is_empty() {
        return Err(ParseError::new(
            "expected module name after `from`",
            token_or_end(line, i),
        ));
    }
    match line.get(i) {
        Some(t) if t.kind == SyntaxKind::IMPORT_KW => i += 1,
        _ => {
            return Err(ParseError::new(
                "expected `import` in from-import",
                token_or_end(line, i),
            ));
        }
    }
    let mut names = Vec::new();
    match line.get(i) {
        Some(t) if t.kind == SyntaxKind::STAR => {
            names.push(ImportAlias::new("*", None));
            i += 1;
        }
        Some(t) if t.kind == SyntaxKind::L_PAREN => {
            i += 1;
            loop {
                match line.get(i) {
                    Some(t) if t.kind == SyntaxKind::R_PAREN => {
                        i += 1;
                        break;
                    }
                    Some(t) if t.kind == SyntaxKind::IDENT => {
                        let name = SmolStr::new(t.text);
                        i += 1;
                        let alias = parse_alias(line, &mut i)?;
                        names.push(ImportAlias::new(name, alias));
                        if matches!(line.get(i), Some(t) if t.kind == SyntaxKind::COMMA) {
                            i += 1;
                        }
                    }
                    _ => {
                        return Err(ParseError::new(
                            "expected imported name",
                            token_or_end(line, i),
                        ));
                    }
                }
            }
        }
        Some(t) if t.kind == SyntaxKind::IDENT => loop {
            let token = match line.get(i) {
                Some(t) if t.kind == SyntaxKind::IDENT => t,
                _ => {
                    return Err(ParseError::new(
                        "expected imported name",
                        token_or_end(line, i),
                    ));
                }
            };
            let name = SmolStr::new(token.text);
            i += 1;
            let alias = parse_alias(line, &mut i)?;
            names.push(ImportAlias::new(name, alias));
            if matches!(line.get(i), Some(t) if t.kind == SyntaxKind::COMMA) {
                i += 1;
            } else {
                break;
            }
        },
        _ => {
            return Err(ParseError::new(
                "expected imported names",
                token_or_end(line, i),
            ));
        }
    }
    if names.is_empty() {
        return Err(ParseError::new(
            "from-import has no names",
            token_or_end(line, i),
        ));
    }
    expect_line_end(line, i)?;
    Ok(StatementKind::ImportFrom {
        module: SmolStr::from(module),
        names,
    })
}

/// `IDENT (. IDENT)*`, rendered without any interior whitespace.
fn parse_dotted_name(line: &[Token<'_>], start: usize) -> Result<(SmolStr, usize), ParseError> {
    let mut i = start;
    let first = match line.get(i) {
        Some(t) if t.kind == SyntaxKind::IDENT => t,
        _ => {
            return Err(ParseError::new(
                "expected module name",
                token_or_end(line, i),
            ));
        }
    };
    let mut name = String::from(first.text);
    i += 1;
    while i + 1 < line.len()
        && line[i].kind == SyntaxKind::DOT
        && line[i + 1].kind == SyntaxKind::IDENT
    {
        name.push('.');
        name.push_str(line[i + 1].text);
        i += 2;
    }
    Ok((SmolStr::from(name), i))
}

fn parse_alias(line: &[Token<'_>], i: &mut usize) -> Result<Option<SmolStr>, ParseError> {
    if !matches!(line.get(*i), Some(t) if t.kind == SyntaxKind::AS_KW) {
        return Ok(None);
    }
    *i += 1;
    match line.get(*i) {
        Some(t) if t.kind == SyntaxKind::IDENT => {
            let alias = SmolStr::new(t.text);
            *i += 1;
            Ok(Some(alias))
        }
        _ => Err(ParseError::new(
            "expected name after `as`",
            token_or_end(line, *i),
        )),
    }
}

fn expect_line_end(line: &[Token<'_>], i: usize) -> Result<(), ParseError> {
    match line.get(i) {
        None => Ok(()),
        Some(t) => Err(ParseError::new(
            "unexpected token in import statement",
            t.range(),
        )),
    }
}

fn token_or_end(line: &[Token<'_>], i: usize) -> TextRange {
    match line.get(i) {
        Some(t) => t.range(),
        None => match line.last() {
            Some(t) => TextRange::empty(t.range().end()),
            None => TextRange::empty(TextSize::new(0)),
        },
    }
}
