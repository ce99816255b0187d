//! Word list for Flashword
//!
//! This module provides:
//! - The `WordEntry` flashcard model and tag helpers
//! - Displayed-list projections (sort orders, tag filter)
//! - `WordStore`, the single writer of the canonical list

pub mod models;
pub mod store;
pub mod view;

pub use models::*;
pub use store::{WordError, WordStore};
pub use view::{SortOrder, ViewMode};
