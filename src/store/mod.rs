//! Store module orchestrator following the RSB module specification.

mod core;

pub use self::core::{JsonFileStore, MemoryPageStore, PageStore, validate_for_save};
