use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use blake3::Hash;

use crate::error::{BoardError, Result};
use crate::page::{Page, PageId};

/// Save-blocking validation: every panel must occupy at least one cell and
/// every non-blank cell must reference an existing panel. The only hard gate
/// in the engine; failures come back as values listing the offending ids.
pub fn validate_for_save(page: &Page) -> Result<()> {
    let ids: Vec<&str> = page.panels.iter().map(|p| p.id.as_str()).collect();

    let unassigned = page
        .grid
        .find_unassigned_panel_ids(ids.iter().copied());
    if !unassigned.is_empty() {
        return Err(BoardError::UnassignedPanels(unassigned));
    }

    let dangling = page.grid.find_dangling_cell_ids(&ids);
    if !dangling.is_empty() {
        return Err(BoardError::DanglingCells(dangling));
    }

    Ok(())
}

/// Persistence boundary for pages. Implementations own the exactly-one-active
/// invariant and change notification; the grid engine treats the persisted
/// page as an opaque blob.
pub trait PageStore {
    fn page_ids(&self) -> Vec<PageId>;

    fn load(&self, page_id: &str) -> Result<Page>;

    /// Persist a page, returning `false` when the stored content was already
    /// identical. Runs the save gate first.
    fn save(&mut self, page: &Page) -> Result<bool>;

    fn delete(&mut self, page_id: &str) -> Result<()>;

    /// Mark one page active and clear the flag everywhere else.
    fn set_active(&mut self, page_id: &str) -> Result<()>;

    fn active_page(&self) -> Option<Page>;

    /// Drain the ids of pages whose stored content changed since the last
    /// call. This is the store's change notification to the core.
    fn take_dirty(&mut self) -> Vec<PageId>;
}

/// In-memory store. Content hashes decide whether a save is a real change, so
/// rewriting an identical page neither dirties it nor notifies anyone.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: Vec<Page>,
    hashes: HashMap<PageId, Hash>,
    dirty: HashSet<PageId>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with previously persisted pages, verbatim. The save
    /// gate applies to new writes only; a stored page that would fail it
    /// today is accepted as-is rather than repaired.
    pub fn with_pages(pages: Vec<Page>) -> Result<Self> {
        let mut store = Self::new();
        for page in pages {
            let hash = Self::page_hash(&page)?;
            store.hashes.insert(page.id.clone(), hash);
            store.pages.push(page);
        }
        Ok(store)
    }

    fn index_of(&self, page_id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == page_id)
    }

    fn page_hash(page: &Page) -> Result<Hash> {
        let bytes = serde_json::to_vec(page)?;
        Ok(blake3::hash(&bytes))
    }
}

impl PageStore for MemoryPageStore {
    fn page_ids(&self) -> Vec<PageId> {
        self.pages.iter().map(|p| p.id.clone()).collect()
    }

    fn load(&self, page_id: &str) -> Result<Page> {
        self.pages
            .iter()
            .find(|p| p.id == page_id)
            .cloned()
            .ok_or_else(|| BoardError::PageNotFound(page_id.to_string()))
    }

    fn save(&mut self, page: &Page) -> Result<bool> {
        validate_for_save(page)?;

        let new_hash = Self::page_hash(page)?;
        if self.hashes.get(&page.id) == Some(&new_hash) {
            return Ok(false);
        }

        match self.index_of(&page.id) {
            Some(idx) => self.pages[idx] = page.clone(),
            None => self.pages.push(page.clone()),
        }
        self.hashes.insert(page.id.clone(), new_hash);
        self.dirty.insert(page.id.clone());
        Ok(true)
    }

    fn delete(&mut self, page_id: &str) -> Result<()> {
        let idx = self
            .index_of(page_id)
            .ok_or_else(|| BoardError::PageNotFound(page_id.to_string()))?;
        let was_active = self.pages[idx].is_active;
        self.pages.remove(idx);
        self.hashes.remove(page_id);
        self.dirty.remove(page_id);

        // Deleting the active page promotes the first remaining one.
        if was_active {
            if let Some(first) = self.pages.first_mut() {
                first.is_active = true;
                let id = first.id.clone();
                self.dirty.insert(id);
            }
        }
        Ok(())
    }

    fn set_active(&mut self, page_id: &str) -> Result<()> {
        if self.index_of(page_id).is_none() {
            return Err(BoardError::PageNotFound(page_id.to_string()));
        }
        for page in &mut self.pages {
            let should_be = page.id == page_id;
            if page.is_active != should_be {
                page.is_active = should_be;
                self.dirty.insert(page.id.clone());
            }
        }
        Ok(())
    }

    fn active_page(&self) -> Option<Page> {
        self.pages.iter().find(|p| p.is_active).cloned()
    }

    fn take_dirty(&mut self) -> Vec<PageId> {
        let mut ids: Vec<_> = self.dirty.drain().collect();
        ids.sort();
        ids
    }
}

/// File-backed store: the whole page collection serialized as one JSON
/// document, rewritten on every real change. Loading tolerates a missing
/// file (fresh install) but not malformed JSON.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryPageStore,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let pages = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            inner: MemoryPageStore::with_pages(pages)?,
        })
    }

    fn flush(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.inner.pages)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl PageStore for JsonFileStore {
    fn page_ids(&self) -> Vec<PageId> {
        self.inner.page_ids()
    }

    fn load(&self, page_id: &str) -> Result<Page> {
        self.inner.load(page_id)
    }

    fn save(&mut self, page: &Page) -> Result<bool> {
        let changed = self.inner.save(page)?;
        if changed {
            self.flush()?;
        }
        Ok(changed)
    }

    fn delete(&mut self, page_id: &str) -> Result<()> {
        self.inner.delete(page_id)?;
        self.flush()
    }

    fn set_active(&mut self, page_id: &str) -> Result<()> {
        self.inner.set_active(page_id)?;
        self.flush()
    }

    fn active_page(&self) -> Option<Page> {
        self.inner.active_page()
    }

    fn take_dirty(&mut self) -> Vec<PageId> {
        self.inner.take_dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Panel, PanelConfig};

    fn page(id: &str, panel_ids: &[&str]) -> Page {
        Page::seeded(
            id,
            format!("Page {id}"),
            panel_ids
                .iter()
                .map(|pid| Panel::new(*pid, PanelConfig::Bookmarks { folder_id: None }))
                .collect(),
        )
    }

    #[test]
    fn save_gate_blocks_unassigned_panels() {
        let mut store = MemoryPageStore::new();
        let mut p = page("p1", &["A"]);
        p.panels.push(Panel::new("B", PanelConfig::RecentTabs { max_items: 5 }));
        let err = store.save(&p).unwrap_err();
        match err {
            BoardError::UnassignedPanels(ids) => assert_eq!(ids, vec!["B".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.page_ids().is_empty());
    }

    #[test]
    fn save_gate_blocks_dangling_cells() {
        let mut store = MemoryPageStore::new();
        let mut p = page("p1", &["A"]);
        p.panels.clear();
        let err = store.save(&p).unwrap_err();
        assert!(matches!(err, BoardError::DanglingCells(_)));
    }

    #[test]
    fn identical_saves_are_skipped() {
        let mut store = MemoryPageStore::new();
        let p = page("p1", &["A"]);
        assert!(store.save(&p).unwrap());
        assert_eq!(store.take_dirty(), vec!["p1".to_string()]);
        assert!(!store.save(&p).unwrap());
        assert!(store.take_dirty().is_empty());
    }

    #[test]
    fn set_active_clears_other_pages() {
        let mut store = MemoryPageStore::new();
        store.save(&page("p1", &["A"])).unwrap();
        store.save(&page("p2", &["B"])).unwrap();
        store.set_active("p1").unwrap();
        store.set_active("p2").unwrap();

        assert_eq!(store.active_page().unwrap().id, "p2");
        let active: Vec<_> = store
            .page_ids()
            .iter()
            .filter(|id| store.load(id).unwrap().is_active)
            .cloned()
            .collect();
        assert_eq!(active, vec!["p2".to_string()]);
    }

    #[test]
    fn set_active_on_missing_page_errors() {
        let mut store = MemoryPageStore::new();
        assert!(matches!(
            store.set_active("nope").unwrap_err(),
            BoardError::PageNotFound(_)
        ));
    }

    #[test]
    fn deleting_the_active_page_promotes_the_first_remaining() {
        let mut store = MemoryPageStore::new();
        store.save(&page("p1", &["A"])).unwrap();
        store.save(&page("p2", &["B"])).unwrap();
        store.set_active("p2").unwrap();
        store.take_dirty();

        store.delete("p2").unwrap();
        assert_eq!(store.active_page().unwrap().id, "p1");
        assert_eq!(store.take_dirty(), vec!["p1".to_string()]);
    }

    #[test]
    fn file_store_round_trips_pages() {
        let path = std::env::temp_dir().join(format!(
            "gridboard-store-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.save(&page("p1", &["A", "B"])).unwrap();
            store.set_active("p1").unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.page_ids(), vec!["p1".to_string()]);
        let loaded = reopened.active_page().unwrap();
        assert_eq!(loaded.panels.len(), 2);
        assert_eq!(loaded.grid.col_sizes.len(), 2);

        let _ = fs::remove_file(&path);
    }
}
