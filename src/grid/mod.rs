//! Grid module orchestrator following the RSB module specification.
//!
//! The canonical layout model and its query predicates live in the private
//! `core` module; the pure editing transformations and the committed/draft
//! session wrapper live alongside it.

mod core;
mod editor;
mod session;

pub use self::core::{Cell, GridModel, PanelId, Track, TrackParseError};
pub use editor::{
    Axis, ColumnEdge, RowEdge, add_column, add_row, delete_column, delete_row, reset_to_default,
    set_cell, set_track_size,
};
pub use session::EditSession;
