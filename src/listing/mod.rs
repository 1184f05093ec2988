//! Country list pipeline: filter by keyword, then sort by a numeric column.
//!
//! ```text
//! countries ──filter_countries(keyword)──▶ filtered ──sort_countries(key, order)──▶ sorted
//! ```
//!
//! The visible list is `sorted` when it is non-empty and `filtered` otherwise.
//! Filtering runs on the plugin thread after the search debounce settles;
//! sorting runs in the background worker.

pub mod filter;
pub mod sort;

pub use filter::{filter_countries, match_range};
pub use sort::{sort_countries, top_countries};
