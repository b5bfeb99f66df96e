//! # Introduction
//!
//! vkscript is the front end for VkScript, a tiny imperative scripting
//! language. It turns source text into tokens and tokens into a syntax tree,
//! reporting the first (or, in recovery mode, every) syntax error with its
//! position. A terminal explorer built with [ratatui](https://docs.rs/ratatui)
//! shows the source, the token stream and the tree side by side.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → (outline / token dump / TUI)
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST.
//! 2. [`ui`]: ratatui-based explorer; not part of the stable library API.
//!
//! ## Language
//!
//! ```text
//! var a = 1.8;
//! if (b) { a = 4; } else { a = 5; }
//! while (a > 0 and b) { a = a - 1; }
//! return -a;
//! ```
//!
//! Whitespace separates tokens and is otherwise insignificant. There are no
//! comments and no string literals.

pub mod parser;
pub mod ui;
