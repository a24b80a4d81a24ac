//! Pure grid transformations. Every operation takes a [`GridModel`] by
//! reference and returns a fresh value; the caller decides whether the result
//! becomes the draft or is discarded.
//!
//! No operation here validates assignments. Conflict resolution is the
//! caller's job via [`GridModel::available_values_for_cell`], and deleting the
//! last row or column is a silent no-op rather than an error, as are
//! out-of-bounds indices.

use super::core::{Cell, GridModel, PanelId, Track};

/// Edge at which a new row is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEdge {
    Top,
    Bottom,
}

/// Edge at which a new column is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEdge {
    Left,
    Right,
}

/// Axis selector for track-size edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

/// Insert one row of blank cells at the requested edge, with an `Auto` track.
pub fn add_row(model: &GridModel, edge: RowEdge) -> GridModel {
    let mut next = model.clone();
    let blanks = vec![Cell::Blank; next.col_sizes.len()];
    match edge {
        RowEdge::Top => {
            next.row_sizes.insert(0, Track::Auto);
            next.layout.insert(0, blanks);
        }
        RowEdge::Bottom => {
            next.row_sizes.push(Track::Auto);
            next.layout.push(blanks);
        }
    }
    next
}

/// Insert one blank column at the requested edge, with an `Auto` track.
pub fn add_column(model: &GridModel, edge: ColumnEdge) -> GridModel {
    let mut next = model.clone();
    match edge {
        ColumnEdge::Left => {
            next.col_sizes.insert(0, Track::Auto);
            for row in &mut next.layout {
                row.insert(0, Cell::Blank);
            }
        }
        ColumnEdge::Right => {
            next.col_sizes.push(Track::Auto);
            for row in &mut next.layout {
                row.push(Cell::Blank);
            }
        }
    }
    next
}

/// Remove one row and its track. At least one row always remains: deleting
/// from a single-row grid returns the model unchanged.
pub fn delete_row(model: &GridModel, index: usize) -> GridModel {
    if model.layout.len() <= 1 || index >= model.layout.len() {
        return model.clone();
    }
    let mut next = model.clone();
    next.layout.remove(index);
    next.row_sizes.remove(index);
    next
}

/// Remove one column and its track. No-op when only one column remains.
pub fn delete_column(model: &GridModel, index: usize) -> GridModel {
    if model.col_sizes.len() <= 1 || index >= model.col_sizes.len() {
        return model.clone();
    }
    let mut next = model.clone();
    next.col_sizes.remove(index);
    for row in &mut next.layout {
        if index < row.len() {
            row.remove(index);
        }
    }
    next
}

/// Replace a single cell's value. No neighbor or uniqueness validation.
pub fn set_cell(model: &GridModel, row: usize, col: usize, value: Cell) -> GridModel {
    let mut next = model.clone();
    if let Some(slot) = next.layout.get_mut(row).and_then(|r| r.get_mut(col)) {
        *slot = value;
    }
    next
}

/// Replace one track-size entry on the given axis. Any enumerated `Track`
/// value is accepted; nothing is rejected.
// TODO: cross-axis size validation (percent totals vs. auto tracks) is still
// unimplemented, matching the editor UI which accepts any combination.
pub fn set_track_size(model: &GridModel, axis: Axis, index: usize, track: Track) -> GridModel {
    let mut next = model.clone();
    let sizes = match axis {
        Axis::Row => &mut next.row_sizes,
        Axis::Col => &mut next.col_sizes,
    };
    if let Some(slot) = sizes.get_mut(index) {
        *slot = track;
    }
    next
}

/// Discard the layout and produce the canonical recovery shape: a single
/// `Auto` row with one `Auto` column per panel, in the given order.
pub fn reset_to_default(_model: &GridModel, panel_ids_in_order: &[PanelId]) -> GridModel {
    GridModel {
        row_sizes: vec![Track::Auto],
        col_sizes: vec![Track::Auto; panel_ids_in_order.len()],
        layout: vec![
            panel_ids_in_order
                .iter()
                .map(|id| Cell::panel(id.clone()))
                .collect(),
        ],
    }
}
