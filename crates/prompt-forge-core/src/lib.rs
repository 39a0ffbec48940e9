//! # prompt-forge-core
//!
//! Core types and pure logic for the PromptForge workbench.
//!
//! This crate provides:
//! - The prompt data model: [`types::PromptSpec`], [`types::ExamplePair`],
//!   [`types::UserInput`] and the Version-shaped record payload
//! - The schema AST ([`types::SchemaNode`]) and its JSON value checker
//! - The Prompt Assembler, rendering a spec into canonical sectioned text
//! - Markup escaping for user-controlled text
//! - Records, TypeID identifiers and a typed event bus for the surrounding
//!   record layer
//!
//! # Example
//!
//! ```
//! use prompt_forge_core::assembler::assemble;
//! use prompt_forge_core::types::{ExamplePair, PromptSpec};
//!
//! let spec = PromptSpec::new()
//!     .with_agent_role("You are a helpful assistant.")
//!     .with_example(ExamplePair::new("2 + 2", r#"{"result":"4"}"#))
//!     .with_input("input", "3 + 5");
//!
//! let prompt = assemble(&spec);
//! assert!(prompt.starts_with("<agent_role>"));
//! assert!(prompt.ends_with("</user_input>"));
//! ```

pub mod assembler;
pub mod check;
pub mod error;
pub mod escape;
pub mod events;
pub mod slug;
pub mod types;

pub use assembler::assemble;
pub use error::CoreError;
