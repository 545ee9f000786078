//! # stylnav
//!
//! Go-to-definition for indentation-nested stylesheets with BEM-style
//! `&` combinators.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → AnalysisHost, goto-definition ranking, cursor tokens
//!   ↓
//! project  → Project roots, configuration, workspace loading
//!   ↓
//! hir      → Per-file symbol tables and the multi-file index
//!   ↓
//! syntax   → Selector extraction, line classification, <style> blocks
//!   ↓
//! base     → Primitives (NormalizedPath, LineCol, LineIndex)
//! ```

/// Foundation types: NormalizedPath, LineCol, LineIndex
pub mod base;

/// Selector extraction from stylesheet text
pub mod syntax;

/// Symbol tables and the multi-file index
pub mod hir;

/// Project roots, configuration and workspace loading
pub mod project;

/// IDE features: goto-definition, cursor tokens, change handling
pub mod ide;

// Re-export foundation types
pub use base::{LineCol, LineIndex, NormalizedPath, TextRange, TextSize};
pub use hir::{FileEntry, Symbol, SymbolIndex};
pub use ide::{AnalysisHost, Match, MatchKind};
pub use project::{ProjectConfig, ProjectRootResolver};
