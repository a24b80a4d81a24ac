//! Grid layout engine for a panel dashboard.
//!
//! Pages place user-created panels on a resizable row/column grid. The crate
//! owns the canonical grid model and its invariants, the pure editing
//! transformations, panel placement reflow, and the resolver that turns a
//! grid into renderer-ready track sizes and an area template. Panel content
//! rendering stays outside; the engine talks to it through the panel
//! registry and the page store only.

pub mod board;
pub mod error;
pub mod grid;
pub mod logging;
pub mod metrics;
pub mod page;
pub mod placement;
pub mod registry;
pub mod resolve;
pub mod store;

pub use board::{BoardConfig, BoardService};
pub use error::{BoardError, Result};
pub use grid::{
    Axis, Cell, ColumnEdge, EditSession, GridModel, PanelId, RowEdge, Track, TrackParseError,
    add_column, add_row, delete_column, delete_row, reset_to_default, set_cell, set_track_size,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, event_with_fields, json_kv,
};
pub use metrics::{EditMetrics, MetricSnapshot};
pub use page::{CardId, CardSettings, Page, PageId, Panel, PanelConfig, PanelKind};
pub use placement::{add_panel, delete_panel};
pub use registry::{PanelDescriptor, PanelRegistry};
pub use resolve::{GAP_PX, ResolvedLayout, resolve};
pub use store::{JsonFileStore, MemoryPageStore, PageStore, validate_for_save};
