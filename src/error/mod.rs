//! Error module orchestrator following the RSB module specification.
//!
//! Downstream code imports the unified error type from here while the
//! implementation lives in the private `types` module.

mod types;

pub use self::types::{BoardError, Result};
