//! Logos-based lexer for Python sources
//!
//! Fast tokenization using the logos crate. Nothing is skipped: whitespace,
//! newlines, and comments all come through as tokens so the parser can see
//! line structure and the emitter can slice the original text.

use logos::Logos;
use text_size::{TextRange, TextSize};

use super::syntax_kind::SyntaxKind;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// Byte range of this token in the source
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA & LINE STRUCTURE
    // =========================================================================
    #[regex(r"[ \t\f]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"\\\r?\n")]
    LineCont,

    #[regex(r"#[^\n]*")]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+")]
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?[jJ]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[jJ]?")]
    #[regex(r"[0-9][0-9_]*([eE][+-]?[0-9]+)?[jJ]?")]
    Number,

    // All quote forms as single tokens, optional r/b/u/f prefixes included.
    // Triple-quoted bodies may contain newlines, so a logical line never
    // ends inside a string.
    #[regex(r#"[rRbBuUfF]{0,2}"""([^"]|"[^"]|""[^"])*""""#)]
    #[regex(r"[rRbBuUfF]{0,2}'''([^']|'[^']|''[^'])*'''")]
    #[regex(r#"[rRbBuUfF]{0,2}"([^"\\\n]|\\.)*""#)]
    #[regex(r"[rRbBuUfF]{0,2}'([^'\\\n]|\\.)*'")]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    Ellipsis,

    #[token("**=")]
    StarStarEq,

    #[token("//=")]
    SlashSlashEq,

    #[token("<<=")]
    ShlEq,

    #[token(">>=")]
    ShrEq,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("->")]
    Arrow,

    #[token(":=")]
    ColonEq,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("%=")]
    PercentEq,

    #[token("&=")]
    AmpEq,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    #[token("@=")]
    AtEq,

    #[token("**")]
    StarStar,

    #[token("//")]
    SlashSlash,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("@")]
    At,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    // =========================================================================
    // KEYWORDS (hard keywords only; `match`/`case` stay identifiers)
    // =========================================================================
    #[token("and")]
    AndKw,
    #[token("as")]
    AsKw,
    #[token("assert")]
    AssertKw,
    #[token("async")]
    AsyncKw,
    #[token("await")]
    AwaitKw,
    #[token("break")]
    BreakKw,
    #[token("class")]
    ClassKw,
    #[token("continue")]
    ContinueKw,
    #[token("def")]
    DefKw,
    #[token("del")]
    DelKw,
    #[token("elif")]
    ElifKw,
    #[token("else")]
    ElseKw,
    #[token("except")]
    ExceptKw,
    #[token("False")]
    FalseKw,
    #[token("finally")]
    FinallyKw,
    #[token("for")]
    ForKw,
    #[token("from")]
    FromKw,
    #[token("global")]
    GlobalKw,
    #[token("if")]
    IfKw,
    #[token("import")]
    ImportKw,
    #[token("in")]
    InKw,
    #[token("is")]
    IsKw,
    #[token("lambda")]
    LambdaKw,
    #[token("None")]
    NoneKw,
    #[token("nonlocal")]
    NonlocalKw,
    #[token("not")]
    NotKw,
    #[token("or")]
    OrKw,
    #[token("pass")]
    PassKw,
    #[token("raise")]
    RaiseKw,
    #[token("return")]
    ReturnKw,
    #[token("True")]
    TrueKw,
    #[token("try")]
    TryKw,
    #[token("while")]
    WhileKw,
    #[token("with")]
    WithKw,
    #[token("yield")]
    YieldKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia & line structure
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            LineCont => SyntaxKind::LINE_CONT,
            Comment => SyntaxKind::COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            Number => SyntaxKind::NUMBER,
            String => SyntaxKind::STRING,

            // Multi-char punctuation
            Ellipsis => SyntaxKind::ELLIPSIS,
            StarStarEq => SyntaxKind::STAR_STAR_EQ,
            SlashSlashEq => SyntaxKind::SLASH_SLASH_EQ,
            ShlEq => SyntaxKind::SHL_EQ,
            ShrEq => SyntaxKind::SHR_EQ,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            Arrow => SyntaxKind::ARROW,
            ColonEq => SyntaxKind::COLON_EQ,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            PercentEq => SyntaxKind::PERCENT_EQ,
            AmpEq => SyntaxKind::AMP_EQ,
            PipeEq => SyntaxKind::PIPE_EQ,
            CaretEq => SyntaxKind::CARET_EQ,
            AtEq => SyntaxKind::AT_EQ,
            StarStar => SyntaxKind::STAR_STAR,
            SlashSlash => SyntaxKind::SLASH_SLASH,
            Shl => SyntaxKind::SHL,
            Shr => SyntaxKind::SHR,

            // Single-char punctuation
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            Comma => SyntaxKind::COMMA,
            Colon => SyntaxKind::COLON,
            Semicolon => SyntaxKind::SEMICOLON,
            Dot => SyntaxKind::DOT,
            Eq => SyntaxKind::EQ,
            At => SyntaxKind::AT,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            Tilde => SyntaxKind::TILDE,

            // Keywords
            AndKw => SyntaxKind::AND_KW,
            AsKw => SyntaxKind::AS_KW,
            AssertKw => SyntaxKind::ASSERT_KW,
            AsyncKw => SyntaxKind::ASYNC_KW,
            AwaitKw => SyntaxKind::AWAIT_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            DefKw => SyntaxKind::DEF_KW,
            DelKw => SyntaxKind::DEL_KW,
            ElifKw => SyntaxKind::ELIF_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            ExceptKw => SyntaxKind::EXCEPT_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            FinallyKw => SyntaxKind::FINALLY_KW,
            ForKw => SyntaxKind::FOR_KW,
            FromKw => SyntaxKind::FROM_KW,
            GlobalKw => SyntaxKind::GLOBAL_KW,
            IfKw => SyntaxKind::IF_KW,
            ImportKw => SyntaxKind::IMPORT_KW,
            InKw => SyntaxKind::IN_KW,
            IsKw => SyntaxKind::IS_KW,
            LambdaKw => SyntaxKind::LAMBDA_KW,
            NoneKw => SyntaxKind::NONE_KW,
            NonlocalKw => SyntaxKind::NONLOCAL_KW,
            NotKw => SyntaxKind::NOT_KW,
            OrKw => SyntaxKind::OR_KW,
            PassKw => SyntaxKind::PASS_KW,
            RaiseKw => SyntaxKind::RAISE_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            TryKw => SyntaxKind::TRY_KW,
            WhileKw => SyntaxKind::WHILE_KW,
            WithKw => SyntaxKind::WITH_KW,
            YieldKw => SyntaxKind::YIELD_KW,
        }
    }
}
