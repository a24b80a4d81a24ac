use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Identifier of a panel placed on the grid.
pub type PanelId = String;

/// Size specification for one row or column track.
///
/// `Auto` renders as a proportional `1fr` unit. `Percent` carries a value
/// from the enumerated set {5, 10, ..., 100}; percentage tracks are sized
/// against the full container and need gap compensation at resolve time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Auto,
    Percent(u8),
}

impl Track {
    /// Create a percentage track.
    ///
    /// # Panics
    /// Panics unless `n` is a multiple of 5 in 5..=100.
    pub fn percent(n: u8) -> Self {
        assert!(
            n >= 5 && n <= 100 && n % 5 == 0,
            "Percent must be a multiple of 5 in 5..=100"
        );
        Self::Percent(n)
    }
}

/// Failure to parse a persisted track-size string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid track size `{0}`")]
pub struct TrackParseError(pub String);

impl FromStr for Track {
    type Err = TrackParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" | "1fr" => Ok(Self::Auto),
            _ => {
                let digits = s
                    .strip_suffix('%')
                    .ok_or_else(|| TrackParseError(s.to_string()))?;
                let n: u8 = digits
                    .parse()
                    .map_err(|_| TrackParseError(s.to_string()))?;
                if n >= 5 && n <= 100 && n % 5 == 0 {
                    Ok(Self::Percent(n))
                } else {
                    Err(TrackParseError(s.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "1fr"),
            Self::Percent(n) => write!(f, "{}%", n),
        }
    }
}

impl Serialize for Track {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Track {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One slot of the layout matrix: a panel id or the blank marker `"."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Panel(PanelId),
}

impl Cell {
    pub fn panel(id: impl Into<PanelId>) -> Self {
        Self::Panel(id.into())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    pub fn panel_id(&self) -> Option<&str> {
        match self {
            Self::Blank => None,
            Self::Panel(id) => Some(id),
        }
    }

    /// The name this cell contributes to an area template row.
    pub fn area_name(&self) -> &str {
        match self {
            Self::Blank => ".",
            Self::Panel(id) => id,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.area_name())
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.area_name())
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == "." {
            Self::Blank
        } else {
            Self::Panel(raw)
        })
    }
}

/// Canonical grid layout: ordered track sizes for both axes plus a
/// rectangular matrix of cell assignments.
///
/// Dimension invariant: `layout.len() == row_sizes.len()` and every row has
/// `col_sizes.len()` cells. Every editor transformation preserves it, and
/// [`GridModel::dimensions_consistent`] checks it for loaded data. A persisted
/// grid that violates it is accepted as-is; no repair routine exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    #[serde(rename = "rowSizes")]
    pub row_sizes: Vec<Track>,
    #[serde(rename = "colSizes")]
    pub col_sizes: Vec<Track>,
    pub layout: Vec<Vec<Cell>>,
}

impl GridModel {
    /// A grid with no tracks and no cells, the state of a page whose last
    /// panel was deleted.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.layout.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_sizes.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.layout.get(row).and_then(|r| r.get(col))
    }

    /// Dimension invariant predicate for loaded grids.
    pub fn dimensions_consistent(&self) -> bool {
        self.layout.len() == self.row_sizes.len()
            && self
                .layout
                .iter()
                .all(|row| row.len() == self.col_sizes.len())
    }

    /// Whether `panel_id` occupies at least one cell.
    pub fn contains_panel(&self, panel_id: &str) -> bool {
        self.layout
            .iter()
            .flatten()
            .any(|cell| cell.panel_id() == Some(panel_id))
    }

    /// Every id in `all_panel_ids` that appears nowhere in the layout, in the
    /// order given. Non-empty results block saving.
    pub fn find_unassigned_panel_ids<'a, I>(&self, all_panel_ids: I) -> Vec<PanelId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        all_panel_ids
            .into_iter()
            .filter(|id| !self.contains_panel(id))
            .map(|id| id.to_string())
            .collect()
    }

    /// Panel ids referenced by cells that are not in `all_panel_ids`.
    pub fn find_dangling_cell_ids(&self, all_panel_ids: &[&str]) -> Vec<PanelId> {
        let mut dangling = Vec::new();
        for cell in self.layout.iter().flatten() {
            if let Some(id) = cell.panel_id() {
                if !all_panel_ids.contains(&id) && !dangling.iter().any(|d| d == id) {
                    dangling.push(id.to_string());
                }
            }
        }
        dangling
    }

    /// Candidate values for one cell during interactive editing: the current
    /// value, the blank marker, every unassigned panel id, and the value of
    /// each in-bounds orthogonal neighbor. A UX affordance, not a constraint;
    /// callers may still set any value via the editor, including ones that
    /// produce a disconnected region for a panel.
    pub fn available_values_for_cell<'a, I>(
        &self,
        row: usize,
        col: usize,
        all_panel_ids: I,
    ) -> Vec<Cell>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut options: Vec<Cell> = Vec::new();
        let mut push = |cell: Cell| {
            if !options.contains(&cell) {
                options.push(cell);
            }
        };

        if let Some(current) = self.cell(row, col) {
            push(current.clone());
        }
        push(Cell::Blank);
        for id in self.find_unassigned_panel_ids(all_panel_ids) {
            push(Cell::Panel(id));
        }

        let neighbors = [
            row.checked_sub(1).map(|r| (r, col)),
            Some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
            Some((row, col + 1)),
        ];
        for (r, c) in neighbors.into_iter().flatten() {
            if let Some(cell) = self.cell(r, c) {
                push(cell.clone());
            }
        }

        options
    }

    /// Optional validator for the best-effort rectangularity invariant: true
    /// when `panel_id`'s cells form a single filled axis-aligned rectangle.
    /// Advisory only; edits are never blocked on it.
    pub fn is_rectangular(&self, panel_id: &str) -> bool {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        let mut occupied = 0usize;

        for (r, row) in self.layout.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.panel_id() == Some(panel_id) {
                    occupied += 1;
                    bounds = Some(match bounds {
                        None => (r, r, c, c),
                        Some((top, bottom, left, right)) => {
                            (top.min(r), bottom.max(r), left.min(c), right.max(c))
                        }
                    });
                }
            }
        }

        match bounds {
            None => false,
            Some((top, bottom, left, right)) => {
                occupied == (bottom - top + 1) * (right - left + 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(row: &[&str]) -> Vec<Cell> {
        row.iter()
            .map(|s| {
                if *s == "." {
                    Cell::Blank
                } else {
                    Cell::panel(*s)
                }
            })
            .collect()
    }

    fn model(rows: &[&[&str]]) -> GridModel {
        let layout: Vec<Vec<Cell>> = rows.iter().map(|r| cells(r)).collect();
        let cols = layout.first().map(|r| r.len()).unwrap_or(0);
        GridModel {
            row_sizes: vec![Track::Auto; layout.len()],
            col_sizes: vec![Track::Auto; cols],
            layout,
        }
    }

    #[test]
    fn track_parses_persisted_strings() {
        assert_eq!("1fr".parse::<Track>().unwrap(), Track::Auto);
        assert_eq!("auto".parse::<Track>().unwrap(), Track::Auto);
        assert_eq!("45%".parse::<Track>().unwrap(), Track::Percent(45));
        assert!("0%".parse::<Track>().is_err());
        assert!("33%".parse::<Track>().is_err());
        assert!("105%".parse::<Track>().is_err());
        assert!("px".parse::<Track>().is_err());
    }

    #[test]
    fn track_displays_renderer_syntax() {
        assert_eq!(Track::Auto.to_string(), "1fr");
        assert_eq!(Track::percent(30).to_string(), "30%");
    }

    #[test]
    #[should_panic(expected = "Percent must be a multiple of 5 in 5..=100")]
    fn track_percent_rejects_off_step_values() {
        Track::percent(33);
    }

    #[test]
    fn dimensions_consistent_detects_ragged_layout() {
        let mut grid = model(&[&["A", "B"], &["A", "C"]]);
        assert!(grid.dimensions_consistent());
        grid.layout[1].pop();
        assert!(!grid.dimensions_consistent());
    }

    #[test]
    fn unassigned_detection() {
        let grid = model(&[&["A", "."]]);
        assert_eq!(
            grid.find_unassigned_panel_ids(["A", "B"]),
            vec!["B".to_string()]
        );
    }

    #[test]
    fn dangling_detection() {
        let grid = model(&[&["A", "ghost"]]);
        assert_eq!(
            grid.find_dangling_cell_ids(&["A"]),
            vec!["ghost".to_string()]
        );
    }

    #[test]
    fn cell_options_include_current_blank_unassigned_and_neighbors() {
        let grid = model(&[&["A", "B"], &["C", "D"]]);
        let options = grid.available_values_for_cell(0, 0, ["A", "B", "C", "D", "E"]);
        assert_eq!(
            options,
            vec![
                Cell::panel("A"),
                Cell::Blank,
                Cell::panel("E"),
                Cell::panel("C"),
                Cell::panel("B"),
            ]
        );
    }

    #[test]
    fn cell_options_deduplicate_neighbors() {
        let grid = model(&[&["A", "A"], &["A", "B"]]);
        let options = grid.available_values_for_cell(0, 0, ["A", "B"]);
        assert_eq!(options, vec![Cell::panel("A"), Cell::Blank]);

        let options = grid.available_values_for_cell(1, 0, ["A", "B"]);
        assert_eq!(options, vec![Cell::panel("A"), Cell::Blank, Cell::panel("B")]);
    }

    #[test]
    fn rectangularity_validator() {
        let grid = model(&[&["A", "A"], &["A", "B"]]);
        assert!(!grid.is_rectangular("A"));
        assert!(grid.is_rectangular("B"));
        assert!(!grid.is_rectangular("missing"));

        let solid = model(&[&["A", "A"], &["A", "A"]]);
        assert!(solid.is_rectangular("A"));
    }

    #[test]
    fn grid_serde_round_trip_matches_wire_shape() {
        let grid = GridModel {
            row_sizes: vec![Track::Auto],
            col_sizes: vec![Track::percent(50), Track::Auto],
            layout: vec![cells(&["A", "."])],
        };
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rowSizes": ["1fr"],
                "colSizes": ["50%", "1fr"],
                "layout": [["A", "."]],
            })
        );
        let back: GridModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, grid);
    }
}
