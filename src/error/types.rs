use thiserror::Error;

/// Unified result type for the gridboard crate.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors surfaced by the grid engine and its collaborators.
///
/// Validation failures carry their offending ids as data so an editing UI can
/// display them without unwinding the edit session.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("page `{0}` not found")]
    PageNotFound(String),
    #[error("panel `{0}` not found")]
    PanelNotFound(String),
    #[error("unknown panel kind `{0}`")]
    UnknownPanelKind(String),
    #[error("cannot save page: panels not assigned to the grid: {}", .0.join(", "))]
    UnassignedPanels(Vec<String>),
    #[error("cannot save page: grid references missing panels: {}", .0.join(", "))]
    DanglingCells(Vec<String>),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
