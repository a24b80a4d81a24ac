use crate::error::{BoardError, Result};

use super::core::GridModel;

/// Editing session holding the last committed grid alongside the in-progress
/// draft. The draft is replaced wholesale by each staged transformation;
/// `discard` reverts to the committed value and `commit` promotes the draft
/// after the unassigned-panels gate passes.
#[derive(Debug, Clone)]
pub struct EditSession {
    committed: GridModel,
    draft: GridModel,
}

impl EditSession {
    pub fn new(committed: GridModel) -> Self {
        let draft = committed.clone();
        Self { committed, draft }
    }

    pub fn committed(&self) -> &GridModel {
        &self.committed
    }

    pub fn draft(&self) -> &GridModel {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.committed != self.draft
    }

    /// Apply one editor transformation to the draft.
    pub fn stage<F>(&mut self, op: F) -> &GridModel
    where
        F: FnOnce(&GridModel) -> GridModel,
    {
        self.draft = op(&self.draft);
        &self.draft
    }

    /// Revert the draft to the committed grid.
    pub fn discard(&mut self) {
        self.draft = self.committed.clone();
    }

    /// Promote the draft to committed, refusing when any panel in
    /// `all_panel_ids` is left without a cell. The draft survives a refused
    /// commit so the user can keep editing.
    pub fn commit<'a, I>(&mut self, all_panel_ids: I) -> Result<&GridModel>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let unassigned = self.draft.find_unassigned_panel_ids(all_panel_ids);
        if !unassigned.is_empty() {
            return Err(BoardError::UnassignedPanels(unassigned));
        }
        self.committed = self.draft.clone();
        Ok(&self.committed)
    }
}
