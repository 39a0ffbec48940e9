use std::fmt;

/// A byte-offset span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors that occur while compiling schema source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DslError {
    /// The lexer encountered bytes that do not match any rule.
    InvalidToken { span: Span },

    /// The parser encountered an unexpected token.
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// The parser reached the end of input when more tokens were expected.
    UnexpectedEndOfInput { expected: String },

    /// A builder name such as `strng()` is not part of the language.
    UnknownBuilder { name: String, span: Span },

    /// A chained method name is not part of the language.
    UnknownMethod { name: String, span: Span },

    /// A known method was applied to a node kind that does not support it.
    InvalidMethodTarget {
        method: String,
        kind: String,
        span: Span,
    },

    /// A builder or method received the wrong number of arguments.
    WrongArgumentCount {
        name: String,
        expected: String,
        found: usize,
        span: Span,
    },

    /// A builder or method received an argument of the wrong shape.
    InvalidArgument {
        name: String,
        expected: String,
        span: Span,
    },

    /// A number literal could not be represented.
    InvalidNumberLiteral { text: String, span: Span },

    /// An object shape declares the same key twice.
    DuplicateKey { key: String, span: Span },

    /// `enum([])` has no variants.
    EmptyEnumVariants { span: Span },

    /// Duplicate enum variant found.
    DuplicateEnumVariant { variant: String, span: Span },

    /// `union([...])` was given fewer than two members.
    UnionTooSmall { found: usize, span: Span },

    /// The expression nests deeper than the parser allows.
    NestingTooDeep { limit: usize, span: Span },
}

impl DslError {
    /// The source span this error points at, if any.
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::UnexpectedEndOfInput { .. } => None,
            Self::InvalidToken { span }
            | Self::UnexpectedToken { span, .. }
            | Self::UnknownBuilder { span, .. }
            | Self::UnknownMethod { span, .. }
            | Self::InvalidMethodTarget { span, .. }
            | Self::WrongArgumentCount { span, .. }
            | Self::InvalidArgument { span, .. }
            | Self::InvalidNumberLiteral { span, .. }
            | Self::DuplicateKey { span, .. }
            | Self::EmptyEnumVariants { span }
            | Self::DuplicateEnumVariant { span, .. }
            | Self::UnionTooSmall { span, .. }
            | Self::NestingTooDeep { span, .. } => Some(span),
        }
    }
}

impl fmt::Display for DslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { span } => {
                write!(f, "invalid token at {span}")
            }
            Self::UnexpectedToken {
                expected,
                found,
                span,
            } => {
                write!(
                    f,
                    "unexpected token at {span}: expected {expected}, found {found}"
                )
            }
            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "unexpected end of input: expected {expected}")
            }
            Self::UnknownBuilder { name, span } => {
                write!(f, "unknown builder '{name}' at {span}")
            }
            Self::UnknownMethod { name, span } => {
                write!(f, "unknown method '{name}' at {span}")
            }
            Self::InvalidMethodTarget { method, kind, span } => {
                write!(
                    f,
                    "method '{method}' at {span} cannot be applied to {kind}()"
                )
            }
            Self::WrongArgumentCount {
                name,
                expected,
                found,
                span,
            } => {
                write!(
                    f,
                    "'{name}' at {span} takes {expected} argument(s), found {found}"
                )
            }
            Self::InvalidArgument {
                name,
                expected,
                span,
            } => {
                write!(f, "invalid argument to '{name}' at {span}: expected {expected}")
            }
            Self::InvalidNumberLiteral { text, span } => {
                write!(
                    f,
                    "invalid number literal '{text}' at {span}: expected a finite number"
                )
            }
            Self::DuplicateKey { key, span } => {
                write!(f, "duplicate key '{key}' at {span}")
            }
            Self::EmptyEnumVariants { span } => {
                write!(
                    f,
                    "enum at {span} has no variants; provide at least one quoted string"
                )
            }
            Self::DuplicateEnumVariant { variant, span } => {
                write!(f, "duplicate enum variant '{variant}' at {span}")
            }
            Self::UnionTooSmall { found, span } => {
                write!(
                    f,
                    "union at {span} needs at least two members, found {found}"
                )
            }
            Self::NestingTooDeep { limit, span } => {
                write!(
                    f,
                    "expression at {span} nests deeper than {limit} levels"
                )
            }
        }
    }
}

impl std::error::Error for DslError {}
