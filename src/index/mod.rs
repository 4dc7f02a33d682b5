//! Client-side access to the pre-generated content index.
//!
//! The site generator emits two JSON collections:
//!
//! | Path | Description |
//! |------|-------------|
//! | `/index.json` | All posts with metadata and rendered body |
//! | `/talks/pages.json` | Standalone pages (about, talks, ...) |
//!
//! Both are fetched at most once per session and shared read-only by the
//! overlay renderer, the link interceptor, search and the post list loader.

mod store;
mod types;

pub use store::{Collection, ContentIndex, Entries, IndexError};
pub use types::ContentEntry;
