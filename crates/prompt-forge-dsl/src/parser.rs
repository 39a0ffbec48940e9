use std::collections::HashSet;

use prompt_forge_core::types::{
    Bound, EnumVariants, LengthChecks, LiteralValue, NodeKind, NumberChecks, ObjectShape,
    SchemaNode, ShapeField, StringChecks, StringFormat, UnknownKeys,
};

use crate::error::{DslError, Span};
use crate::lexer::SpannedToken;
use crate::token::Token;

/// Maximum nesting of expressions, shapes and lists.
pub const MAX_DEPTH: usize = 64;

const METHODS: &[&str] = &[
    "optional",
    "nullable",
    "nullish",
    "describe",
    "default",
    "or",
    "array",
    "min",
    "max",
    "length",
    "nonempty",
    "email",
    "url",
    "uuid",
    "gte",
    "lte",
    "gt",
    "lt",
    "int",
    "positive",
    "negative",
    "nonnegative",
    "nonpositive",
    "strict",
    "passthrough",
    "strip",
    "partial",
];

/// A parsed call argument before it is interpreted by a builder or method.
#[derive(Debug, Clone)]
enum Arg {
    Schema(SchemaNode, Span),
    Shape(ObjectShape, Span),
    List(Vec<Arg>, Span),
    Literal(LiteralValue, Span),
}

impl Arg {
    fn span(&self) -> &Span {
        match self {
            Self::Schema(_, s) | Self::Shape(_, s) | Self::List(_, s) | Self::Literal(_, s) => s,
        }
    }
}

/// Recursive descent parser for the schema expression grammar.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // -- Cursor helpers --

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek().map(|st| &st.token)
    }

    fn peek_token_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|st| &st.token)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<SpannedToken, DslError> {
        match self.advance() {
            Some(st) if st.token == *expected => Ok(st),
            Some(st) => Err(unexpected(expected.description(), &st)),
            None => Err(DslError::UnexpectedEndOfInput {
                expected: expected.description().to_string(),
            }),
        }
    }

    fn current_span(&self) -> Span {
        self.peek().map(|st| st.span.clone()).unwrap_or_else(|| {
            self.tokens
                .last()
                .map(|st| Span::new(st.span.end, st.span.end))
                .unwrap_or(Span::new(0, 0))
        })
    }

    fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|st| st.span.clone())
            .unwrap_or(Span::new(0, 0))
    }

    fn enter(&mut self) -> Result<(), DslError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(DslError::NestingTooDeep {
                limit: MAX_DEPTH,
                span: self.current_span(),
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // -- Grammar productions --

    /// schema = expr [";"] EOF
    fn parse_schema(&mut self) -> Result<SchemaNode, DslError> {
        if self.peek().is_none() {
            return Err(DslError::UnexpectedEndOfInput {
                expected: "schema expression".to_string(),
            });
        }
        let node = self.parse_expr()?;
        if self.peek_token() == Some(&Token::Semicolon) {
            self.advance();
        }
        match self.advance() {
            None => Ok(node),
            Some(st) => Err(unexpected("end of input", &st)),
        }
    }

    /// expr = ["z" "."] builder "(" [args] ")" { "." method "(" [args] ")" }
    fn parse_expr(&mut self) -> Result<SchemaNode, DslError> {
        self.enter()?;
        let start = self.current_span();

        if self.peek().is_some_and(|st| st.token == Token::Ident && st.text == "z")
            && self.peek_token_at(1) == Some(&Token::Dot)
        {
            self.advance();
            self.advance();
        }

        let name_tok = self.expect_name("builder name")?;
        self.expect(&Token::LParen)?;
        let args = self.parse_args(&Token::RParen)?;
        self.expect(&Token::RParen)?;
        let mut node = build(&name_tok, args, start.to(&self.previous_span()))?;

        while self.peek_token() == Some(&Token::Dot) {
            self.advance();
            let method_tok = self.expect_name("method name")?;
            self.expect(&Token::LParen)?;
            let args = self.parse_args(&Token::RParen)?;
            self.expect(&Token::RParen)?;
            let span = method_tok.span.to(&self.previous_span());
            let wraps = is_wrapping(&node, &method_tok.text);
            node = apply_method(node, &method_tok.text, args, span.clone())?;
            if wraps {
                check_depth(&node, &span)?;
            }
        }

        check_depth(&node, &start.to(&self.previous_span()))?;
        self.leave();
        Ok(node)
    }

    /// args = arg { "," arg } [","]
    fn parse_args(&mut self, close: &Token) -> Result<Vec<Arg>, DslError> {
        let mut args = Vec::new();
        while self.peek_token().is_some_and(|t| t != close) {
            args.push(self.parse_arg()?);
            if self.peek_token() == Some(&Token::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(args)
    }

    /// arg = expr | shape | list | literal
    fn parse_arg(&mut self) -> Result<Arg, DslError> {
        let start = self.current_span();
        match self.peek_token() {
            Some(Token::LBrace) => {
                let shape = self.parse_shape()?;
                Ok(Arg::Shape(shape, start.to(&self.previous_span())))
            }
            Some(Token::LBracket) => {
                self.enter()?;
                self.advance();
                let items = self.parse_args(&Token::RBracket)?;
                self.expect(&Token::RBracket)?;
                self.leave();
                Ok(Arg::List(items, start.to(&self.previous_span())))
            }
            Some(Token::Null) if self.peek_token_at(1) == Some(&Token::LParen) => {
                let node = self.parse_expr()?;
                Ok(Arg::Schema(node, start.to(&self.previous_span())))
            }
            Some(Token::Ident) => {
                let node = self.parse_expr()?;
                Ok(Arg::Schema(node, start.to(&self.previous_span())))
            }
            Some(
                Token::StringLiteral
                | Token::NumberLiteral
                | Token::True
                | Token::False
                | Token::Null,
            ) => {
                let literal = self.parse_literal()?;
                Ok(Arg::Literal(literal, start))
            }
            Some(_) => {
                let st = self.advance();
                Err(st.map_or_else(
                    || DslError::UnexpectedEndOfInput {
                        expected: "argument".to_string(),
                    },
                    |st| unexpected("schema expression, object shape, list or literal", &st),
                ))
            }
            None => Err(DslError::UnexpectedEndOfInput {
                expected: "argument".to_string(),
            }),
        }
    }

    /// shape = "{" [ key ":" expr { "," key ":" expr } [","] ] "}"
    fn parse_shape(&mut self) -> Result<ObjectShape, DslError> {
        self.enter()?;
        self.expect(&Token::LBrace)?;

        let mut fields = Vec::new();
        let mut seen = HashSet::new();
        while self.peek_token().is_some_and(|t| *t != Token::RBrace) {
            let key_tok = self.expect_key()?;
            let key = if key_tok.token == Token::StringLiteral {
                unquote_string(&key_tok.text)
            } else {
                key_tok.text.clone()
            };
            if !seen.insert(key.clone()) {
                return Err(DslError::DuplicateKey {
                    key,
                    span: key_tok.span,
                });
            }
            self.expect(&Token::Colon)?;
            let node = self.parse_expr()?;
            fields.push(ShapeField::new(key, node));

            if self.peek_token() == Some(&Token::Comma) {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(&Token::RBrace)?;
        self.leave();
        Ok(ObjectShape::new(fields))
    }

    /// literal = STRING | NUMBER | "true" | "false" | "null"
    fn parse_literal(&mut self) -> Result<LiteralValue, DslError> {
        let tok = self.advance().ok_or_else(|| DslError::UnexpectedEndOfInput {
            expected: "literal".to_string(),
        })?;
        match tok.token {
            Token::StringLiteral => Ok(LiteralValue::String(unquote_string(&tok.text))),
            Token::NumberLiteral => parse_number(&tok.text, &tok.span).map(LiteralValue::Number),
            Token::True => Ok(LiteralValue::Boolean(true)),
            Token::False => Ok(LiteralValue::Boolean(false)),
            Token::Null => Ok(LiteralValue::Null),
            _ => Err(unexpected("literal", &tok)),
        }
    }

    // -- Token expectation helpers --

    /// Builder and method names; `null` is a keyword but also a builder.
    fn expect_name(&mut self, context: &str) -> Result<SpannedToken, DslError> {
        match self.advance() {
            Some(st) if st.token == Token::Ident || st.token == Token::Null => Ok(st),
            Some(st) => Err(unexpected(context, &st)),
            None => Err(DslError::UnexpectedEndOfInput {
                expected: context.to_string(),
            }),
        }
    }

    fn expect_key(&mut self) -> Result<SpannedToken, DslError> {
        match self.advance() {
            Some(st)
                if st.token == Token::Ident
                    || st.token == Token::StringLiteral
                    || st.token.is_keyword() =>
            {
                Ok(st)
            }
            Some(st) => Err(unexpected("object key", &st)),
            None => Err(DslError::UnexpectedEndOfInput {
                expected: "object key".to_string(),
            }),
        }
    }
}

fn unexpected(expected: &str, st: &SpannedToken) -> DslError {
    DslError::UnexpectedToken {
        expected: expected.to_string(),
        found: format!("{} ('{}')", st.token.description(), st.text),
        span: st.span.clone(),
    }
}

// -- Builders --

fn build(name_tok: &SpannedToken, args: Vec<Arg>, span: Span) -> Result<SchemaNode, DslError> {
    let name = name_tok.text.as_str();
    let kind = match name {
        "string" => {
            arity(name, &args, 0, &span)?;
            NodeKind::String(StringChecks::unconstrained())
        }
        "number" => {
            arity(name, &args, 0, &span)?;
            NodeKind::Number(NumberChecks::unconstrained())
        }
        "boolean" => {
            arity(name, &args, 0, &span)?;
            NodeKind::Boolean
        }
        "null" => {
            arity(name, &args, 0, &span)?;
            NodeKind::Null
        }
        "any" => {
            arity(name, &args, 0, &span)?;
            NodeKind::Any
        }
        "unknown" => {
            arity(name, &args, 0, &span)?;
            NodeKind::Unknown
        }
        "object" => {
            arity(name, &args, 1, &span)?;
            match args.into_iter().next() {
                Some(Arg::Shape(shape, _)) => NodeKind::Object(shape),
                other => return Err(invalid_arg(name, "an object shape", other.as_ref(), &span)),
            }
        }
        "array" => {
            arity(name, &args, 1, &span)?;
            let element = schema_arg(name, args.into_iter().next(), &span)?;
            NodeKind::Array {
                element: Box::new(element),
                length: LengthChecks::unconstrained(),
            }
        }
        "enum" => {
            arity(name, &args, 1, &span)?;
            NodeKind::Enum(enum_variants(args.into_iter().next(), &span)?)
        }
        "literal" => {
            arity(name, &args, 1, &span)?;
            match args.into_iter().next() {
                Some(Arg::Literal(value, _)) => NodeKind::Literal(value),
                other => return Err(invalid_arg(name, "a literal", other.as_ref(), &span)),
            }
        }
        "union" => {
            arity(name, &args, 1, &span)?;
            let (items, list_span) = match args.into_iter().next() {
                Some(Arg::List(items, s)) => (items, s),
                other => {
                    return Err(invalid_arg(name, "a list of schemas", other.as_ref(), &span))
                }
            };
            if items.len() < 2 {
                return Err(DslError::UnionTooSmall {
                    found: items.len(),
                    span: list_span,
                });
            }
            let members = items
                .into_iter()
                .map(|item| schema_arg(name, Some(item), &span))
                .collect::<Result<Vec<_>, _>>()?;
            NodeKind::Union(members)
        }
        "record" => {
            if args.is_empty() || args.len() > 2 {
                return Err(DslError::WrongArgumentCount {
                    name: name.to_string(),
                    expected: "1 or 2".to_string(),
                    found: args.len(),
                    span,
                });
            }
            let mut nodes = args
                .into_iter()
                .map(|arg| schema_arg(name, Some(arg), &span))
                .collect::<Result<Vec<_>, _>>()?;
            let value = nodes.pop().map(Box::new);
            let key = nodes.pop().map(Box::new);
            match value {
                Some(value) => NodeKind::Record { key, value },
                None => return Err(invalid_arg(name, "a value schema", None, &span)),
            }
        }
        _ => {
            return Err(DslError::UnknownBuilder {
                name: name.to_string(),
                span: name_tok.span.clone(),
            })
        }
    };
    Ok(SchemaNode::new(kind))
}

fn enum_variants(arg: Option<Arg>, span: &Span) -> Result<EnumVariants, DslError> {
    let (items, list_span) = match arg {
        Some(Arg::List(items, s)) => (items, s),
        other => return Err(invalid_arg("enum", "a list of strings", other.as_ref(), span)),
    };
    if items.is_empty() {
        return Err(DslError::EmptyEnumVariants { span: list_span });
    }
    let mut variants = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();
    for item in items {
        match item {
            Arg::Literal(LiteralValue::String(s), item_span) => {
                if !seen.insert(s.clone()) {
                    return Err(DslError::DuplicateEnumVariant {
                        variant: s,
                        span: item_span,
                    });
                }
                variants.push(s);
            }
            other => return Err(invalid_arg("enum", "a string literal", Some(&other), span)),
        }
    }
    EnumVariants::new(variants).map_err(|e| DslError::InvalidArgument {
        name: "enum".to_string(),
        expected: e.to_string(),
        span: list_span,
    })
}

// -- Methods --

fn apply_method(
    mut node: SchemaNode,
    method: &str,
    args: Vec<Arg>,
    span: Span,
) -> Result<SchemaNode, DslError> {
    if !METHODS.contains(&method) {
        return Err(DslError::UnknownMethod {
            name: method.to_string(),
            span,
        });
    }

    match method {
        "optional" => {
            arity(method, &args, 0, &span)?;
            node.optional = true;
        }
        "nullable" => {
            arity(method, &args, 0, &span)?;
            node.nullable = true;
        }
        "nullish" => {
            arity(method, &args, 0, &span)?;
            node.nullable = true;
            node.optional = true;
        }
        "describe" => {
            arity(method, &args, 1, &span)?;
            match args.into_iter().next() {
                Some(Arg::Literal(LiteralValue::String(s), _)) => node.description = Some(s),
                other => return Err(invalid_arg(method, "a string", other.as_ref(), &span)),
            }
        }
        "default" => {
            arity(method, &args, 1, &span)?;
            match args.into_iter().next() {
                Some(Arg::Literal(value, _)) => node.default = Some(value),
                other => return Err(invalid_arg(method, "a literal", other.as_ref(), &span)),
            }
        }
        "or" => {
            arity(method, &args, 1, &span)?;
            let other = schema_arg(method, args.into_iter().next(), &span)?;
            let bare = node.is_bare();
            return Ok(match node.kind {
                NodeKind::Union(mut members) if bare => {
                    members.push(other);
                    SchemaNode::new(NodeKind::Union(members))
                }
                kind => SchemaNode::new(NodeKind::Union(vec![
                    SchemaNode { kind, ..node },
                    other,
                ])),
            });
        }
        "array" => {
            arity(method, &args, 0, &span)?;
            return Ok(SchemaNode::new(NodeKind::Array {
                element: Box::new(node),
                length: LengthChecks::unconstrained(),
            }));
        }
        _ => apply_kind_method(&mut node.kind, method, args, span)?,
    }
    Ok(node)
}

/// True when `method` nests `node` one level deeper instead of modifying it.
fn is_wrapping(node: &SchemaNode, method: &str) -> bool {
    match method {
        "array" => true,
        "or" => !(node.is_bare() && matches!(node.kind, NodeKind::Union(_))),
        _ => false,
    }
}

/// Method chains and union members add tree levels the syntactic guard does
/// not see, so the built node is measured as well.
fn check_depth(node: &SchemaNode, span: &Span) -> Result<(), DslError> {
    if node.depth() > MAX_DEPTH {
        return Err(DslError::NestingTooDeep {
            limit: MAX_DEPTH,
            span: span.clone(),
        });
    }
    Ok(())
}

fn apply_kind_method(
    kind: &mut NodeKind,
    method: &str,
    args: Vec<Arg>,
    span: Span,
) -> Result<(), DslError> {
    let target_error = DslError::InvalidMethodTarget {
        method: method.to_string(),
        kind: kind.builder_name().to_string(),
        span: span.clone(),
    };

    match kind {
        NodeKind::String(checks) => match method {
            "min" | "max" | "length" | "nonempty" => {
                apply_length(&mut checks.length, method, args, &span)?
            }
            "email" | "url" | "uuid" => {
                arity(method, &args, 0, &span)?;
                checks.format = Some(match method {
                    "email" => StringFormat::Email,
                    "url" => StringFormat::Url,
                    _ => StringFormat::Uuid,
                });
            }
            _ => return Err(target_error),
        },
        NodeKind::Number(checks) => match method {
            "int" => {
                arity(method, &args, 0, &span)?;
                checks.integer = true;
            }
            "min" | "gte" => checks.lower = Some(Bound::inclusive(number_arg(method, args, &span)?)),
            "gt" => checks.lower = Some(Bound::exclusive(number_arg(method, args, &span)?)),
            "max" | "lte" => checks.upper = Some(Bound::inclusive(number_arg(method, args, &span)?)),
            "lt" => checks.upper = Some(Bound::exclusive(number_arg(method, args, &span)?)),
            "positive" | "nonnegative" => {
                arity(method, &args, 0, &span)?;
                checks.lower = Some(if method == "positive" {
                    Bound::exclusive(0.0)
                } else {
                    Bound::inclusive(0.0)
                });
            }
            "negative" | "nonpositive" => {
                arity(method, &args, 0, &span)?;
                checks.upper = Some(if method == "negative" {
                    Bound::exclusive(0.0)
                } else {
                    Bound::inclusive(0.0)
                });
            }
            _ => return Err(target_error),
        },
        NodeKind::Array { length, .. } => match method {
            "min" | "max" | "length" | "nonempty" => apply_length(length, method, args, &span)?,
            _ => return Err(target_error),
        },
        NodeKind::Object(shape) => {
            let mode = match method {
                "strict" => Some(UnknownKeys::Strict),
                "passthrough" => Some(UnknownKeys::Passthrough),
                "strip" => Some(UnknownKeys::Strip),
                "partial" => None,
                _ => return Err(target_error),
            };
            arity(method, &args, 0, &span)?;
            match mode {
                Some(mode) => shape.unknown_keys = mode,
                None => shape.make_partial(),
            }
        }
        _ => return Err(target_error),
    }
    Ok(())
}

fn apply_length(
    length: &mut LengthChecks,
    method: &str,
    args: Vec<Arg>,
    span: &Span,
) -> Result<(), DslError> {
    if method == "nonempty" {
        arity(method, &args, 0, span)?;
        length.min = Some(1);
        return Ok(());
    }
    let n = count_arg(method, args, span)?;
    match method {
        "min" => length.min = Some(n),
        "max" => length.max = Some(n),
        _ => length.exact = Some(n),
    }
    Ok(())
}

// -- Argument helpers --

fn arity(name: &str, args: &[Arg], expected: usize, span: &Span) -> Result<(), DslError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(DslError::WrongArgumentCount {
            name: name.to_string(),
            expected: expected.to_string(),
            found: args.len(),
            span: span.clone(),
        })
    }
}

fn invalid_arg(name: &str, expected: &str, arg: Option<&Arg>, span: &Span) -> DslError {
    DslError::InvalidArgument {
        name: name.to_string(),
        expected: expected.to_string(),
        span: arg.map_or_else(|| span.clone(), |a| a.span().clone()),
    }
}

fn schema_arg(name: &str, arg: Option<Arg>, span: &Span) -> Result<SchemaNode, DslError> {
    match arg {
        Some(Arg::Schema(node, _)) => Ok(node),
        other => Err(invalid_arg(name, "a schema expression", other.as_ref(), span)),
    }
}

fn number_arg(name: &str, args: Vec<Arg>, span: &Span) -> Result<f64, DslError> {
    arity(name, &args, 1, span)?;
    match args.into_iter().next() {
        Some(Arg::Literal(LiteralValue::Number(n), _)) => Ok(n),
        other => Err(invalid_arg(name, "a number", other.as_ref(), span)),
    }
}

fn count_arg(name: &str, args: Vec<Arg>, span: &Span) -> Result<usize, DslError> {
    arity(name, &args, 1, span)?;
    match args.into_iter().next() {
        Some(Arg::Literal(LiteralValue::Number(n), _))
            if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 =>
        {
            Ok(n as usize)
        }
        other => Err(invalid_arg(
            name,
            "a non-negative integer",
            other.as_ref(),
            span,
        )),
    }
}

fn parse_number(text: &str, span: &Span) -> Result<f64, DslError> {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(DslError::InvalidNumberLiteral {
            text: text.to_string(),
            span: span.clone(),
        }),
    }
}

/// Remove surrounding quotes from a string literal and handle escape sequences.
fn unquote_string(s: &str) -> String {
    let inner = &s[1..s.len() - 1];
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('b') => result.push('\u{8}'),
            Some('f') => result.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        result.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    _ => result.push_str("\\u"),
                }
            }
            Some(other @ ('\\' | '"' | '\'' | '/')) => result.push(other),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Parse schema source text into a schema node.
///
/// # Errors
///
/// Returns every lexer error, or the first parse error.
pub fn parse(source: &str) -> Result<SchemaNode, Vec<DslError>> {
    let tokens = crate::lexer::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    parser.parse_schema().map_err(|e| vec![e])
}
