//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes of the
//! explorer, one module per pane.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with token-driven highlighting
//! - [`tokens`]: The token stream, one token per row
//! - [`tree`]: Program outline and the list of syntax errors
//! - [`status`]: Status bar with keybindings and parse state
//!
//! # Architecture
//!
//! Each pane module exports:
//! - A primary `render_*_pane()` function (`render_status_bar` for the status bar)
//! - Associated state types (e.g., `ScrollState`, `RenderData`)

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tokens::{render_tokens_pane, TokensRenderData, TokensScrollState};
pub use tree::{render_tree_pane, TreeRenderData};
