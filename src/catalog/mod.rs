//! Hanja character catalog
//!
//! This module provides:
//! - Exam grade tiers and grade filters
//! - Character records backed by a local SQLite store
//! - Paginated search and uniform random sampling
//! - Seed import from the CSV character list

pub mod import;
pub mod meaning;
pub mod models;
pub mod storage;

pub use import::{initialize, ImportError, ImportSummary};
pub use models::*;
pub use storage::{CatalogError, CatalogStore};
