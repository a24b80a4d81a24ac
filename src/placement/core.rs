//! Couples panel lifecycle to the grid: adding a panel auto-extends the grid,
//! deleting one collapses wholly-emptied tracks or blanks the leftover cells.
//! Both operations are pure; the caller persists the returned page when it
//! chooses to.

use crate::grid::{Cell, GridModel, Track};
use crate::page::{Page, Panel};

/// Append a new panel to the page and join it to the grid.
///
/// Idempotent on duplicate panel ids. The first panel seeds a 1x1 `Auto`
/// grid; every later panel becomes a new rightmost `Auto` column assigned in
/// every row, so new panels never require manual placement. The user can
/// reassign them afterward through the grid editor.
pub fn add_panel(page: &Page, new_panel: Panel) -> Page {
    if page.panels.iter().any(|p| p.id == new_panel.id) {
        return page.clone();
    }

    let mut next = page.clone();
    if next.grid.is_empty() {
        next.grid = GridModel {
            row_sizes: vec![Track::Auto],
            col_sizes: vec![Track::Auto],
            layout: vec![vec![Cell::panel(new_panel.id.clone())]],
        };
    } else {
        next.grid.col_sizes.push(Track::Auto);
        for row in &mut next.grid.layout {
            row.push(Cell::panel(new_panel.id.clone()));
        }
    }
    next.panels.push(new_panel);
    next
}

/// Remove a panel and reflow the grid.
///
/// When the last panel goes, the grid goes fully empty. Otherwise a single
/// pass runs: drop the first row consumed by the deleted panel (every cell
/// the panel or blank, so an all-blank row qualifies), then the first such
/// column, then blank any remaining cells still holding the panel id. Row
/// collapse is attempted before column collapse and at most one of each is
/// removed; this is deliberately not a fixed-point compaction.
pub fn delete_panel(page: &Page, panel_id: &str) -> Page {
    let mut next = page.clone();
    next.panels.retain(|p| p.id != panel_id);

    if next.panels.is_empty() {
        next.grid = GridModel::empty();
        return next;
    }

    let grid = &mut next.grid;

    if let Some(row_idx) = find_consumed_row(&grid.layout, panel_id) {
        grid.layout.remove(row_idx);
        if row_idx < grid.row_sizes.len() {
            grid.row_sizes.remove(row_idx);
        }
    }

    if let Some(col_idx) = find_consumed_column(&grid.layout, panel_id) {
        for row in &mut grid.layout {
            if col_idx < row.len() {
                row.remove(col_idx);
            }
        }
        if col_idx < grid.col_sizes.len() {
            grid.col_sizes.remove(col_idx);
        }
    }

    for cell in grid.layout.iter_mut().flatten() {
        if cell.panel_id() == Some(panel_id) {
            *cell = Cell::Blank;
        }
    }

    next
}

fn cell_consumed_by(cell: &Cell, panel_id: &str) -> bool {
    cell.is_blank() || cell.panel_id() == Some(panel_id)
}

fn find_consumed_row(layout: &[Vec<Cell>], panel_id: &str) -> Option<usize> {
    layout.iter().position(|row| {
        !row.is_empty() && row.iter().all(|c| cell_consumed_by(c, panel_id))
    })
}

fn find_consumed_column(layout: &[Vec<Cell>], panel_id: &str) -> Option<usize> {
    let width = layout.iter().map(|row| row.len()).min().unwrap_or(0);
    (0..width).find(|&col| {
        !layout.is_empty() && layout.iter().all(|row| cell_consumed_by(&row[col], panel_id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PanelConfig;

    fn panel(id: &str) -> Panel {
        Panel::new(id, PanelConfig::Bookmarks { folder_id: None })
    }

    fn page_with_grid(panels: &[&str], layout: &[&[&str]]) -> Page {
        let mut page = Page::seeded("p1", "Test", panels.iter().map(|id| panel(id)).collect());
        let rows: Vec<Vec<Cell>> = layout
            .iter()
            .map(|row| {
                row.iter()
                    .map(|s| {
                        if *s == "." {
                            Cell::Blank
                        } else {
                            Cell::panel(*s)
                        }
                    })
                    .collect()
            })
            .collect();
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        page.grid = GridModel {
            row_sizes: vec![Track::Auto; rows.len()],
            col_sizes: vec![Track::Auto; cols],
            layout: rows,
        };
        page
    }

    #[test]
    fn first_panel_seeds_a_unit_grid() {
        let page = Page::seeded("p1", "Test", Vec::new());
        let next = add_panel(&page, panel("A"));
        assert_eq!(next.grid.row_sizes, vec![Track::Auto]);
        assert_eq!(next.grid.col_sizes, vec![Track::Auto]);
        assert_eq!(next.grid.layout, vec![vec![Cell::panel("A")]]);
    }

    #[test]
    fn later_panels_join_every_row_as_a_new_column() {
        let page = page_with_grid(&["A", "B"], &[&["A", "B"], &["A", "."]]);
        let next = add_panel(&page, panel("C"));
        assert_eq!(next.grid.col_sizes.len(), 3);
        assert_eq!(next.grid.layout[0][2], Cell::panel("C"));
        assert_eq!(next.grid.layout[1][2], Cell::panel("C"));
        assert!(next.grid.dimensions_consistent());
    }

    #[test]
    fn add_panel_is_idempotent_on_duplicate_ids() {
        let page = page_with_grid(&["A"], &[&["A"]]);
        let next = add_panel(&page, panel("A"));
        assert_eq!(next, page);
    }

    #[test]
    fn deleting_the_last_panel_empties_the_grid() {
        let page = page_with_grid(&["A"], &[&["A"]]);
        let next = delete_panel(&page, "A");
        assert!(next.panels.is_empty());
        assert_eq!(next.grid, GridModel::empty());
    }

    #[test]
    fn full_row_collapses() {
        let page = page_with_grid(&["A", "B"], &[&["A", "A"], &["B", "B"]]);
        let next = delete_panel(&page, "A");
        assert_eq!(next.grid.layout, vec![vec![Cell::panel("B"), Cell::panel("B")]]);
        assert_eq!(next.grid.row_sizes, vec![Track::Auto]);
        assert_eq!(next.grid.col_sizes, vec![Track::Auto, Track::Auto]);
    }

    #[test]
    fn full_column_collapses() {
        let page = page_with_grid(&["A", "B"], &[&["A", "B"], &["A", "B"]]);
        let next = delete_panel(&page, "B");
        assert_eq!(
            next.grid.layout,
            vec![vec![Cell::panel("A")], vec![Cell::panel("A")]]
        );
        assert_eq!(next.grid.col_sizes, vec![Track::Auto]);
        assert_eq!(next.grid.row_sizes.len(), 2);
    }

    #[test]
    fn partial_occupancy_leaves_blanks() {
        let page = page_with_grid(&["A", "B", "C"], &[&["A", "B"], &["A", "C"]]);
        let next = delete_panel(&page, "B");
        assert_eq!(
            next.grid.layout,
            vec![
                vec![Cell::panel("A"), Cell::Blank],
                vec![Cell::panel("A"), Cell::panel("C")],
            ]
        );
        assert_eq!(next.grid.row_sizes.len(), 2);
        assert_eq!(next.grid.col_sizes.len(), 2);
    }

    #[test]
    fn only_the_first_consumed_row_is_removed() {
        let page = page_with_grid(
            &["A", "B"],
            &[&["A", "A"], &["B", "B"], &["A", "."]],
        );
        let next = delete_panel(&page, "A");
        // First consumed row (index 0) collapses; the second becomes blanks.
        assert_eq!(
            next.grid.layout,
            vec![
                vec![Cell::panel("B"), Cell::panel("B")],
                vec![Cell::Blank, Cell::Blank],
            ]
        );
        assert_eq!(next.grid.row_sizes.len(), 2);
    }

    #[test]
    fn all_blank_row_counts_as_consumed() {
        let page = page_with_grid(&["A", "B"], &[&[".", "."], &["A", "B"]]);
        let next = delete_panel(&page, "A");
        // The blank row is the first consumed match and collapses; column 0
        // then holds only "A" and collapses too.
        assert_eq!(next.grid.layout, vec![vec![Cell::panel("B")]]);
        assert_eq!(next.grid.row_sizes.len(), 1);
        assert_eq!(next.grid.col_sizes.len(), 1);
    }

    #[test]
    fn all_blank_column_counts_as_consumed() {
        let page = page_with_grid(&["A", "B", "C"], &[&["A", ".", "B"], &["A", ".", "C"]]);
        let next = delete_panel(&page, "A");
        // Column 0 is the first consumed column after no row qualifies; the
        // blank column at index 1 survives because only one column collapses
        // per deletion.
        assert_eq!(
            next.grid.layout,
            vec![
                vec![Cell::Blank, Cell::panel("B")],
                vec![Cell::Blank, Cell::panel("C")],
            ]
        );
        assert_eq!(next.grid.col_sizes.len(), 2);
    }

    #[test]
    fn row_collapse_runs_before_column_collapse() {
        // "A" consumes both its row and a column. The row goes first, and the
        // column scan then runs against the already-shrunk layout, so both
        // tracks collapse in one deletion.
        let page = page_with_grid(&["A", "B"], &[&["A", "A"], &["A", "B"]]);
        let next = delete_panel(&page, "A");
        assert_eq!(next.grid.layout, vec![vec![Cell::panel("B")]]);
        assert_eq!(next.grid.row_sizes.len(), 1);
        assert_eq!(next.grid.col_sizes.len(), 1);
    }
}
