//! Domain layer for covidash.
//!
//! Plain data types with no dependency on Zellij or rendering concerns.
//!
//! - [`error`]: Error types and result alias
//! - [`summary`]: Statistics payload model
//! - [`sort`]: Tri-state sort state

pub mod error;
pub mod sort;
pub mod summary;

pub use error::{CovidashError, Result};
pub use sort::{SortKey, SortOrder, SortState};
pub use summary::{Country, GlobalStats, Summary};
