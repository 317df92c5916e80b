//! # contractgen
//!
//! A library and CLI tool for rendering contract documents from rich-text
//! templates with `{{variable}}` placeholders.

pub mod cli;
pub mod document;
pub mod error;
pub mod interactive;
pub mod masks;
pub mod records;
pub mod template;

// Re-exports
pub use cli::{Cli, Commands};
pub use document::ContractDocument;
pub use error::{ContractError, Result};
pub use records::{final_values, ClientRecord, ContractRecord, ContractStatus};
pub use template::{
    extract_variables, prepare_for_substitution, render, synthesize, Escape, SampleData,
    TemplateRenderer, ValueMap,
};
