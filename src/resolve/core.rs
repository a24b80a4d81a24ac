//! Turns a grid model into renderer-ready track sizes and an area template.
//!
//! Resolution is unrelated to persistence: it runs on whatever model the
//! caller holds, committed or draft, on every render.

use crate::grid::{GridModel, Track};

/// Fixed inter-cell gap consumed between adjacent tracks.
pub const GAP_PX: u32 = 10;

/// Renderer-facing output of a resolved grid. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    pub column_tracks: Vec<String>,
    pub row_tracks: Vec<String>,
    pub area_template: String,
}

/// Resolve a grid into track-size strings and a grid-template-areas value.
///
/// `Auto` tracks pass through as `1fr`; proportional units absorb gap space
/// implicitly. Percentage tracks are sized against the full container, so
/// each one gives back its even share of the total gap space:
/// `calc(P% - ((n - 1) * GAP_PX) / n)` for an axis of `n` tracks.
pub fn resolve(model: &GridModel) -> ResolvedLayout {
    ResolvedLayout {
        column_tracks: resolve_axis(&model.col_sizes),
        row_tracks: resolve_axis(&model.row_sizes),
        area_template: area_template(model),
    }
}

fn resolve_axis(sizes: &[Track]) -> Vec<String> {
    let count = sizes.len();
    sizes.iter().map(|track| track_size(*track, count)).collect()
}

fn track_size(track: Track, axis_count: usize) -> String {
    match track {
        Track::Auto => "1fr".to_string(),
        Track::Percent(p) => {
            if axis_count <= 1 {
                // Sole track on the axis: no gaps, nothing to give back.
                format!("{}%", p)
            } else {
                format!(
                    "calc({}% - ({} * {}px) / {})",
                    p,
                    axis_count - 1,
                    GAP_PX,
                    axis_count
                )
            }
        }
    }
}

/// Row-major area template: each layout row becomes one double-quoted,
/// space-joined string of area names (blank cells use the `.` no-cell
/// token), rows concatenated with no separator.
fn area_template(model: &GridModel) -> String {
    model
        .layout
        .iter()
        .map(|row| {
            let names: Vec<&str> = row.iter().map(|cell| cell.area_name()).collect();
            format!("\"{}\"", names.join(" "))
        })
        .collect()
}
