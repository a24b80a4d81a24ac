//! Orchestrates the grid engine against its collaborators: panels come from
//! the registry, pages live in the store, edits flow through an
//! [`EditSession`], and every render asks the resolver for track strings.
//!
//! The service itself holds no grid state between calls; it wires pure
//! operations to persistence and emits structured log events and metrics
//! along the way.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::json;

use crate::error::{BoardError, Result};
use crate::grid::{EditSession, GridModel};
use crate::logging::{Logger, LogLevel, event_with_fields, json_kv};
use crate::metrics::{EditMetrics, MetricSnapshot};
use crate::page::{Page, PageId, Panel, PanelKind};
use crate::placement;
use crate::registry::PanelRegistry;
use crate::resolve::{ResolvedLayout, resolve};
use crate::store::PageStore;

/// Configuration knobs for the board service.
#[derive(Clone)]
pub struct BoardConfig {
    /// Optional structured logger for lifecycle events.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with whoever wants snapshots.
    pub metrics: Option<Arc<Mutex<EditMetrics>>>,
    /// Target field used when emitting log events.
    pub log_target: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            log_target: "gridboard::board".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(EditMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<EditMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

pub struct BoardService<S: PageStore> {
    store: S,
    registry: PanelRegistry,
    config: BoardConfig,
    started_at: Instant,
}

impl<S: PageStore> BoardService<S> {
    pub fn new(store: S, registry: PanelRegistry) -> Self {
        Self {
            store,
            registry,
            config: BoardConfig::default(),
            started_at: Instant::now(),
        }
    }

    pub fn config_mut(&mut self) -> &mut BoardConfig {
        &mut self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    /// Create and persist a page seeded with one panel per requested kind.
    /// The first page in the store becomes active.
    pub fn create_page(
        &mut self,
        page_id: impl Into<PageId>,
        name: impl Into<String>,
        kinds: &[PanelKind],
    ) -> Result<Page> {
        let page_id = page_id.into();
        let mut panels: Vec<Panel> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let ordinal = kinds[..panels.len()]
                .iter()
                .filter(|k| *k == kind)
                .count()
                + 1;
            let id = format!("{}-{}", kind.as_str(), ordinal);
            panels.push(self.registry.create_panel(id, *kind)?);
        }

        let mut page = Page::seeded(page_id.clone(), name, panels);
        if self.store.page_ids().is_empty() {
            page.is_active = true;
        }
        self.store.save(&page)?;
        self.log(
            LogLevel::Info,
            "page_created",
            [
                json_kv("page", json!(page.id)),
                json_kv("panels", json!(page.panels.len())),
            ],
        );
        Ok(page)
    }

    pub fn set_active_page(&mut self, page_id: &str) -> Result<()> {
        self.store.set_active(page_id)?;
        self.log(
            LogLevel::Info,
            "page_activated",
            [json_kv("page", json!(page_id))],
        );
        Ok(())
    }

    pub fn active_page(&self) -> Option<Page> {
        self.store.active_page()
    }

    /// Add a fresh panel of the given kind to a page. The placement policy
    /// joins it to every row as a new rightmost column, so the result is
    /// immediately saveable.
    pub fn add_panel(&mut self, page_id: &str, kind: PanelKind) -> Result<Page> {
        let page = self.store.load(page_id)?;
        let panel = self
            .registry
            .create_panel(next_panel_id(&page, kind), kind)?;
        let panel_id = panel.id.clone();
        let next = placement::add_panel(&page, panel);
        self.store.save(&next)?;
        self.record(|m| m.record_placement());
        self.log(
            LogLevel::Info,
            "panel_added",
            [
                json_kv("page", json!(page_id)),
                json_kv("panel", json!(panel_id)),
                json_kv("kind", json!(kind.as_str())),
            ],
        );
        Ok(next)
    }

    /// Delete a panel and persist the reflowed page.
    pub fn delete_panel(&mut self, page_id: &str, panel_id: &str) -> Result<Page> {
        let page = self.store.load(page_id)?;
        if page.panel(panel_id).is_none() {
            return Err(BoardError::PanelNotFound(panel_id.to_string()));
        }
        let next = placement::delete_panel(&page, panel_id);
        self.store.save(&next)?;
        self.record(|m| m.record_placement());
        self.log(
            LogLevel::Info,
            "panel_deleted",
            [
                json_kv("page", json!(page_id)),
                json_kv("panel", json!(panel_id)),
                json_kv("rows", json!(next.grid.row_count())),
                json_kv("cols", json!(next.grid.col_count())),
            ],
        );
        Ok(next)
    }

    /// Open an editing session on a page's committed grid.
    pub fn open_session(&self, page_id: &str) -> Result<EditSession> {
        let page = self.store.load(page_id)?;
        Ok(EditSession::new(page.grid))
    }

    /// Stage one editor transformation into a session, with bookkeeping.
    pub fn stage_edit<F>(&mut self, session: &mut EditSession, op: F)
    where
        F: FnOnce(&GridModel) -> GridModel,
    {
        session.stage(op);
        self.record(|m| m.record_edit());
    }

    /// Commit a session's draft back into the page and persist it. A refused
    /// commit reports the offending panels by display title and leaves both
    /// the session draft and the stored page untouched.
    pub fn commit_session(&mut self, page_id: &str, session: &mut EditSession) -> Result<Page> {
        let mut page = self.store.load(page_id)?;
        let panel_ids: Vec<String> = page.panel_ids();

        match session.commit(panel_ids.iter().map(|s| s.as_str())) {
            Ok(committed) => {
                page.grid = committed.clone();
                self.store.save(&page)?;
                self.record(|m| m.record_commit(false));
                self.log(
                    LogLevel::Info,
                    "grid_committed",
                    [
                        json_kv("page", json!(page_id)),
                        json_kv("rows", json!(page.grid.row_count())),
                        json_kv("cols", json!(page.grid.col_count())),
                    ],
                );
                Ok(page)
            }
            Err(BoardError::UnassignedPanels(ids)) => {
                let titles: Vec<String> = ids
                    .iter()
                    .map(|id| self.panel_title(&page, id))
                    .collect();
                self.record(|m| m.record_commit(true));
                self.log(
                    LogLevel::Warn,
                    "commit_blocked",
                    [
                        json_kv("page", json!(page_id)),
                        json_kv("unassigned", json!(titles)),
                    ],
                );
                Err(BoardError::UnassignedPanels(titles))
            }
            Err(other) => Err(other),
        }
    }

    /// Resolve a page's committed grid for rendering.
    pub fn resolve_page(&mut self, page_id: &str) -> Result<ResolvedLayout> {
        let page = self.store.load(page_id)?;
        Ok(self.resolve_grid(&page.grid))
    }

    /// Resolve any grid the caller holds, committed or draft.
    pub fn resolve_grid(&mut self, grid: &GridModel) -> ResolvedLayout {
        let resolved = resolve(grid);
        self.record(|m| m.record_resolve());
        self.log(
            LogLevel::Debug,
            "layout_resolved",
            [
                json_kv("rows", json!(grid.row_count())),
                json_kv("cols", json!(grid.col_count())),
            ],
        );
        resolved
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.started_at.elapsed()))
    }

    /// Emit the current metrics snapshot through the configured logger.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(snapshot)) =
            (self.config.logger.as_ref(), self.metrics_snapshot())
        {
            let _ = logger.log_event(snapshot.to_log_event(&self.config.log_target));
        }
    }

    fn panel_title(&self, page: &Page, panel_id: &str) -> String {
        match page.panel(panel_id) {
            Some(panel) => self.registry.title(panel.kind()),
            None => panel_id.to_string(),
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn record<F>(&self, update: F)
    where
        F: FnOnce(&mut EditMetrics),
    {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }
}

/// First free id of the form `{kind}-{n}` on the page.
fn next_panel_id(page: &Page, kind: PanelKind) -> String {
    let mut n = page.panels.iter().filter(|p| p.kind() == kind).count() + 1;
    loop {
        let candidate = format!("{}-{}", kind.as_str(), n);
        if page.panel(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}
