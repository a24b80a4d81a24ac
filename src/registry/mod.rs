//! Registry module orchestrator following the RSB module specification.

mod core;

pub use self::core::{PanelDescriptor, PanelRegistry};
