//! Syntax kinds for the Python token stream
//!
//! Flat enumeration of every token the lexer can produce. The parser only
//! ever sees these kinds; the raw logos variants never leave the lexer.

/// All token kinds in the supported Python subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (never significant to line structure)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,
    LINE_CONT, // backslash-newline

    // =========================================================================
    // LINE STRUCTURE
    // =========================================================================
    NEWLINE,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,
    NUMBER,
    STRING, // every quote form, prefix included, as one token

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,        // (
    R_PAREN,        // )
    L_BRACKET,      // [
    R_BRACKET,      // ]
    L_BRACE,        // {
    R_BRACE,        // }
    COMMA,          // ,
    COLON,          // :
    SEMICOLON,      // ;
    DOT,            // .
    ELLIPSIS,       // ...
    EQ,             // =
    AT,             // @
    ARROW,          // ->
    COLON_EQ,       // :=
    EQ_EQ,          // ==
    BANG_EQ,        // !=
    LT_EQ,          // <=
    GT_EQ,          // >=
    LT,             // <
    GT,             // >
    PLUS,           // +
    MINUS,          // -
    STAR,           // *
    STAR_STAR,      // **
    SLASH,          // /
    SLASH_SLASH,    // //
    PERCENT,        // %
    AMP,            // &
    PIPE,           // |
    CARET,          // ^
    TILDE,          // ~
    SHL,            // <<
    SHR,            // >>
    PLUS_EQ,        // +=
    MINUS_EQ,       // -=
    STAR_EQ,        // *=
    SLASH_EQ,       // /=
    SLASH_SLASH_EQ, // //=
    PERCENT_EQ,     // %=
    STAR_STAR_EQ,   // **=
    AMP_EQ,         // &=
    PIPE_EQ,        // |=
    CARET_EQ,       // ^=
    SHL_EQ,         // <<=
    SHR_EQ,         // >>=
    AT_EQ,          // @=

    // =========================================================================
    // KEYWORDS (the hard keywords; `match`/`case` are soft and lex as IDENT)
    // =========================================================================
    AND_KW,
    AS_KW,
    ASSERT_KW,
    ASYNC_KW,
    AWAIT_KW,
    BREAK_KW,
    CLASS_KW,
    CONTINUE_KW,
    DEF_KW,
    DEL_KW,
    ELIF_KW,
    ELSE_KW,
    EXCEPT_KW,
    FALSE_KW,
    FINALLY_KW,
    FOR_KW,
    FROM_KW,
    GLOBAL_KW,
    IF_KW,
    IMPORT_KW,
    IN_KW,
    IS_KW,
    LAMBDA_KW,
    NONE_KW,
    NONLOCAL_KW,
    NOT_KW,
    OR_KW,
    PASS_KW,
    RAISE_KW,
    RETURN_KW,
    TRUE_KW,
    TRY_KW,
    WHILE_KW,
    WITH_KW,
    YIELD_KW,

    /// Input the lexer could not match
    ERROR,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comment, line continuation)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT | Self::LINE_CONT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::AND_KW as u16) && (self as u16) <= (Self::YIELD_KW as u16)
    }

    /// Check if this token opens a bracket pair
    pub fn is_open_bracket(self) -> bool {
        matches!(self, Self::L_PAREN | Self::L_BRACKET | Self::L_BRACE)
    }

    /// Check if this token closes a bracket pair
    pub fn is_close_bracket(self) -> bool {
        matches!(self, Self::R_PAREN | Self::R_BRACKET | Self::R_BRACE)
    }
}
