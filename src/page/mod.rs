//! Page module orchestrator following the RSB module specification.

mod core;

pub use self::core::{CardId, CardSettings, Page, PageId, Panel, PanelConfig, PanelKind};
