use std::collections::HashMap;

use crate::error::{BoardError, Result};
use crate::page::{Panel, PanelConfig, PanelKind};

/// Display metadata and default configuration for one panel kind.
#[derive(Debug, Clone)]
pub struct PanelDescriptor {
    pub kind: PanelKind,
    pub title: String,
    pub default_config: PanelConfig,
}

/// Registry mapping panel kinds to their descriptors.
///
/// The grid engine consumes this as a narrow contract: a stable identifier
/// per kind plus default display metadata. Content rendering for a kind is
/// someone else's problem.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    entries: HashMap<PanelKind, PanelDescriptor>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every built-in panel kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PanelDescriptor {
            kind: PanelKind::Bookmarks,
            title: "Bookmarks".to_string(),
            default_config: PanelConfig::Bookmarks { folder_id: None },
        });
        registry.register(PanelDescriptor {
            kind: PanelKind::RecentTabs,
            title: "Recent Tabs".to_string(),
            default_config: PanelConfig::RecentTabs { max_items: 10 },
        });
        registry.register(PanelDescriptor {
            kind: PanelKind::Github,
            title: "GitHub".to_string(),
            default_config: PanelConfig::Github {
                owner: String::new(),
                repo: String::new(),
            },
        });
        registry.register(PanelDescriptor {
            kind: PanelKind::AzureDevOps,
            title: "Azure DevOps".to_string(),
            default_config: PanelConfig::AzureDevOps {
                organization: String::new(),
                project: String::new(),
            },
        });
        registry
    }

    /// Register or replace the descriptor for a kind.
    pub fn register(&mut self, descriptor: PanelDescriptor) {
        self.entries.insert(descriptor.kind, descriptor);
    }

    pub fn descriptor(&self, kind: PanelKind) -> Result<&PanelDescriptor> {
        self.entries
            .get(&kind)
            .ok_or_else(|| BoardError::UnknownPanelKind(kind.to_string()))
    }

    /// Display title for a kind, falling back to the wire identifier when the
    /// kind was never registered.
    pub fn title(&self, kind: PanelKind) -> String {
        self.entries
            .get(&kind)
            .map(|d| d.title.clone())
            .unwrap_or_else(|| kind.to_string())
    }

    /// Build a new panel of the given kind from its registered defaults.
    pub fn create_panel(&self, id: impl Into<String>, kind: PanelKind) -> Result<Panel> {
        let descriptor = self.descriptor(kind)?;
        Ok(Panel::new(id, descriptor.default_config.clone()))
    }

    pub fn kinds(&self) -> Vec<PanelKind> {
        let mut kinds: Vec<_> = self.entries.keys().copied().collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds
    }
}
