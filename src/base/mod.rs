//! Foundation types for stylnav.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`NormalizedPath`] - Case-folded, slash-normalized index keys
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//!
//! This module has NO dependencies on other stylnav modules.

mod path;
mod span;

pub use path::NormalizedPath;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
