use logos::Logos;

/// Tokens produced by the schema expression lexer.
///
/// Whitespace and comments are skipped automatically by logos.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
pub enum Token {
    // -- Keywords --
    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // -- Punctuation --
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(";")]
    Semicolon,

    // -- Literals --
    /// A single- or double-quoted string literal, e.g. `"hello"` or `'hi'`.
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    StringLiteral,

    /// A JSON-style number, e.g. `42`, `-2.5` or `1e3`.
    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    NumberLiteral,

    // -- Identifiers --
    /// Builder, method and bare key names. Keywords above take precedence.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,
}

impl Token {
    /// Returns a human-readable description of this token kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Null => "'null'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Colon => "':'",
            Self::Comma => "','",
            Self::Dot => "'.'",
            Self::Semicolon => "';'",
            Self::StringLiteral => "string literal",
            Self::NumberLiteral => "number literal",
            Self::Ident => "identifier",
        }
    }

    /// Keywords that may still be used as object keys.
    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::True | Self::False | Self::Null)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
