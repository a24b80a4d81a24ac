//! Placement module orchestrator following the RSB module specification.

mod core;

pub use self::core::{add_panel, delete_panel};
