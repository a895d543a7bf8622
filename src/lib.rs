pub mod catalog;
pub mod config;
pub mod study;
pub mod worksheet;

pub use catalog::{CatalogStore, CharacterRecord, Grade, GradeFilter, SearchPage};
pub use config::AppConfig;
