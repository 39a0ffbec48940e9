use logos::Logos;

use crate::error::{DslError, Span};
use crate::token::Token;

/// A token paired with its source span.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub text: String,
}

/// Tokenizes schema source text into a sequence of spanned tokens.
///
/// # Errors
///
/// Returns one `DslError::InvalidToken` per run of bytes the lexer cannot
/// match to a token rule.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, Vec<DslError>> {
    let mut tokens = Vec::new();
    let mut errors: Vec<DslError> = Vec::new();

    let lexer = Token::lexer(source);
    for (result, range) in lexer.spanned() {
        let span = Span::new(range.start, range.end);
        match result {
            Ok(token) => {
                tokens.push(SpannedToken {
                    token,
                    span,
                    text: source[range].to_string(),
                });
            }
            Err(()) => match errors.last_mut() {
                Some(DslError::InvalidToken { span: prev }) if prev.end == span.start => {
                    prev.end = span.end;
                }
                _ => errors.push(DslError::InvalidToken { span }),
            },
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}
