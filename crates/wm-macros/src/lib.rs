//! Line-based wiki macro preprocessor.
//!
//! Scans document source line by line for bracketed macro directives such as
//! `[toc]` or `[article_list depth:2]`, dispatches them to allow-listed
//! handlers and substitutes the handler output for the line.
//!
//! # Architecture
//!
//! - [`grammar`]: pure functions detecting a directive on a line and parsing
//!   its `name:value` / `name:'quoted value'` keyword arguments.
//! - [`MacroRegistry`]: allow-list plus the name to handler mapping. Built once
//!   and shared read-only between runs.
//! - [`MacroProcessor`]: applies the grammar to each line and invokes handlers.
//! - [`Stash`]: per-run store for pre-rendered markup. Handlers put HTML in the
//!   stash and emit a placeholder token, the host resolves tokens after the
//!   rest of its pipeline ran.
//!
//! # Example
//!
//! ```
//! use wm_macros::{
//!     ArticleNode, DocumentSource, MacroProcessor, MacroRegistry,
//! };
//!
//! struct Page;
//!
//! impl DocumentSource for Page {
//!     fn title(&self) -> &str { "Home" }
//!     fn children(&self, _depth: usize) -> Vec<ArticleNode> { Vec::new() }
//! }
//!
//! let registry = MacroRegistry::new(["toc"]).with_builtins();
//! let processor = MacroProcessor::new(registry);
//!
//! let processed = processor.process_text("before\n[toc]\nafter\n", &Page).unwrap();
//! assert_eq!(processed.render(), "before\n[TOC]\nafter\n");
//! ```

mod args;
pub mod builtin;
mod context;
mod error;
pub mod grammar;
mod handler;
mod output;
mod processor;
mod registry;
mod stash;

pub use args::{ArgValue, MacroArgs};
pub use context::{ArticleNode, DocumentSource, MacroContext};
pub use error::{MacroError, ProcessError};
pub use grammar::DirectiveInvocation;
pub use handler::{MacroHandler, MacroMeta};
pub use output::MacroOutput;
pub use processor::{MacroProcessor, ProcessedDocument};
pub use registry::{DEFAULT_ALLOWED, MacroRegistry, is_macro_name};
pub use stash::{HtmlStash, Stash};
