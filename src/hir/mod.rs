//! Symbol tables: per-file [`FileEntry`]s and the [`SymbolIndex`] that
//! owns them.

mod index;
mod input;

pub use crate::syntax::Symbol;
pub use index::SymbolIndex;
pub use input::FileEntry;
