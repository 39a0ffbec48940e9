//! # prompt-forge-dsl
//!
//! The schema expression language and the schema engine built on it.
//!
//! This crate provides:
//! - A lexer that tokenizes schema source (`object({ result: string() })`)
//! - A recursive descent parser producing a `SchemaNode` AST, with no code
//!   execution and a fixed nesting limit
//! - A printer that renders the AST back as canonical source
//! - The engine operations: `compile`, `validate`, `extract_top_level_fields`
//!   and `check_examples`
//!
//! # Example
//!
//! ```
//! use prompt_forge_dsl::{compile, validate};
//!
//! let validator = compile("z.object({ result: z.string() })").expect("valid schema");
//!
//! assert!(validate(&validator, r#"{"result":"ok"}"#).valid);
//!
//! let failed = validate(&validator, r#"{"other":"ok"}"#);
//! assert_eq!(failed.error.as_deref(), Some("result: Required"));
//! ```

pub mod engine;
pub mod error;
mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use engine::{
    check_examples, compile, extract_top_level_fields, try_compile, validate, CompiledValidator,
    ExampleCheck,
};
pub use error::{DslError, Span};
pub use parser::parse;
pub use printer::print;
