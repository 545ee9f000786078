//! IDE features — the API an editor extension calls.
//!
//! ## Design Principles
//!
//! 1. **Explicit session state**: everything lives in an [`AnalysisHost`]
//! 2. **No editor types**: positions are [`LineCol`](crate::LineCol), paths
//!    are `std::path`; conversion happens in the extension
//! 3. **Cancellable queries**: goto-definition takes a `CancellationToken`
//!
//! ## Usage
//!
//! ```
//! use std::path::Path;
//! use stylnav::ide::{AnalysisHost, Document};
//! use stylnav::{LineCol, ProjectConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! let host = AnalysisHost::with_config(ProjectConfig::default().with_workspace_folder("/app"));
//! host.set_file_content("/app/src/card.styl", ".card\n  &--active", false);
//!
//! let doc = Document { path: Path::new("/app/src/Card.vue"), text: "<div class=\"card--active\">", version: 1 };
//! let result = host
//!     .analysis()
//!     .goto_definition(doc, LineCol::new(0, 14), &CancellationToken::new())
//!     .unwrap();
//! assert_eq!(result.targets()[0].selector, ".card--active");
//! ```

mod analysis;
pub mod goto;
mod token;

pub use analysis::{Analysis, AnalysisHost, Document, FileChange};
pub use goto::{GotoError, GotoResult, GotoTarget, Match, MatchKind, MatchRanker};
pub use token::{SelectorToken, token_at, token_at_position};
