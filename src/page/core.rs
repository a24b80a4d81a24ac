use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::grid::{GridModel, PanelId, reset_to_default};

pub type PageId = String;
pub type CardId = String;

/// The panel kinds the dashboard knows how to display. The wire identifier
/// for each kind is stable; content rendering for a kind lives outside this
/// crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelKind {
    Bookmarks,
    RecentTabs,
    Github,
    AzureDevOps,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Bookmarks,
        PanelKind::RecentTabs,
        PanelKind::Github,
        PanelKind::AzureDevOps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bookmarks => "bookmarks",
            Self::RecentTabs => "recentTabs",
            Self::Github => "github",
            Self::AzureDevOps => "azureDevOps",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelKind {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BoardError::UnknownPanelKind(s.to_string()))
    }
}

/// Kind-tagged panel configuration. Serializes as the sibling `kind` and
/// `options` keys of the persisted panel object, so loading a page resolves
/// the open option bag into a typed variant up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "options", rename_all = "camelCase")]
pub enum PanelConfig {
    #[serde(rename_all = "camelCase")]
    Bookmarks { folder_id: Option<String> },
    #[serde(rename_all = "camelCase")]
    RecentTabs { max_items: u32 },
    #[serde(rename_all = "camelCase")]
    Github { owner: String, repo: String },
    #[serde(rename_all = "camelCase")]
    AzureDevOps { organization: String, project: String },
}

impl PanelConfig {
    pub fn kind(&self) -> PanelKind {
        match self {
            Self::Bookmarks { .. } => PanelKind::Bookmarks,
            Self::RecentTabs { .. } => PanelKind::RecentTabs,
            Self::Github { .. } => PanelKind::Github,
            Self::AzureDevOps { .. } => PanelKind::AzureDevOps,
        }
    }
}

/// Per-card display settings carried by a panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSettings {
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One user-placed panel. `id` is stable across edits and doubles as the
/// cell value / area name in the grid; `config` is immutable in kind once
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    #[serde(flatten)]
    pub config: PanelConfig,
    #[serde(rename = "cardSettingsMap", default)]
    pub card_settings: HashMap<CardId, CardSettings>,
}

impl Panel {
    pub fn new(id: impl Into<PanelId>, config: PanelConfig) -> Self {
        Self {
            id: id.into(),
            config,
            card_settings: HashMap::new(),
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.config.kind()
    }
}

/// One dashboard page: its panels plus the grid that places them. Exactly one
/// page per store is active at a time; that invariant belongs to the store,
/// not to this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub panels: Vec<Panel>,
    pub grid: GridModel,
}

impl Page {
    /// A page seeded with the canonical default layout: one `Auto` row and
    /// one `Auto` column per initial panel, each column fully assigned.
    pub fn seeded(id: impl Into<PageId>, name: impl Into<String>, panels: Vec<Panel>) -> Self {
        let ids: Vec<PanelId> = panels.iter().map(|p| p.id.clone()).collect();
        let grid = if ids.is_empty() {
            GridModel::empty()
        } else {
            reset_to_default(&GridModel::empty(), &ids)
        };
        Self {
            id: id.into(),
            name: name.into(),
            is_active: false,
            panels,
            grid,
        }
    }

    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.panels.iter().map(|p| p.id.clone()).collect()
    }

    pub fn panel(&self, panel_id: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == panel_id)
    }
}
