//! Arc layout for the world picker
//!
//! Non-selected worlds fan out from the selected-world control along
//! concentric quarter arcs. Rows fill in order; a row only receives items once
//! the previous row is full, and placement stops as soon as every item has a
//! slot, even mid-row.
//!
//! Within a row of `k` items, item `i` sits at `t = i / (k - 1)` (or `0.5` for
//! a lone item), swept over 0..90 degrees. Coordinates are the top-left corner
//! of an icon, relative to the picker container.

/// Width/height of a picker icon, in px.
pub const ICON_SIZE: f64 = 40.0;
/// Width/height of the selected-world control, in px.
pub const SELECTED_SIZE: f64 = 48.0;
/// Spacing between rows, in px.
pub const ARC_GAP: f64 = 4.0;

const ROW_CAPACITIES: [usize; 5] = [2, 3, 5, 6, 6];
const OVERFLOW_ROW_CAPACITY: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPosition {
    pub x: f64,
    pub y: f64,
    pub row: usize,
}

/// Maximum items in `row`. Rows past the fifth keep the last capacity.
pub fn row_capacity(row: usize) -> usize {
    ROW_CAPACITIES
        .get(row)
        .copied()
        .unwrap_or(OVERFLOW_ROW_CAPACITY)
}

/// Arc radius of `row`: 28, 72, 116, 160, 204, ...
pub fn row_radius(row: usize) -> f64 {
    let r = row as f64;
    ICON_SIZE * (r + 0.5) + ARC_GAP * (r + 1.0) + 4.0
}

/// Arc center, anchored at the selected-world control.
pub fn origin() -> (f64, f64) {
    (SELECTED_SIZE / 2.0 + 15.0, SELECTED_SIZE)
}

/// Place `count` items. Pure and deterministic.
pub fn layout(count: usize) -> Vec<ArcPosition> {
    let (origin_x, origin_y) = origin();
    let mut positions = Vec::with_capacity(count);

    let mut row = 0;
    while positions.len() < count {
        let in_row = row_capacity(row).min(count - positions.len());
        let radius = row_radius(row);

        for i in 0..in_row {
            let t = if in_row > 1 {
                i as f64 / (in_row - 1) as f64
            } else {
                0.5
            };
            let angle = t * std::f64::consts::FRAC_PI_2;

            positions.push(ArcPosition {
                x: origin_x + angle.cos() * radius - ICON_SIZE / 2.0,
                y: origin_y + angle.sin() * radius - ICON_SIZE / 2.0,
                row,
            });
        }
        row += 1;
    }

    positions
}

/// Where a closed picker parks every item: under the selected control.
pub fn collapsed_anchor() -> (f64, f64) {
    (SELECTED_SIZE / 2.0 - ICON_SIZE / 2.0, SELECTED_SIZE)
}

/// Style values for one picker item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerPlacement {
    pub left: f64,
    pub top: f64,
    pub scale: f64,
    pub opacity: f64,
    pub delay_secs: f64,
}

impl PickerPlacement {
    pub fn style(&self) -> String {
        format!(
            "left: {:.2}px; top: {:.2}px; transform: scale({}); opacity: {}; transition-delay: {:.2}s;",
            self.left, self.top, self.scale, self.opacity, self.delay_secs
        )
    }
}

/// Placements for `count` picker items. Opening staggers items by row and
/// column; closing collapses them all at once.
pub fn picker_placements(open: bool, count: usize) -> Vec<PickerPlacement> {
    if !open {
        let (left, top) = collapsed_anchor();
        return vec![
            PickerPlacement {
                left,
                top,
                scale: 0.0,
                opacity: 0.0,
                delay_secs: 0.0,
            };
            count
        ];
    }

    layout(count)
        .into_iter()
        .enumerate()
        .map(|(i, pos)| PickerPlacement {
            left: pos.x,
            top: pos.y,
            scale: 1.0,
            opacity: 1.0,
            delay_secs: pos.row as f64 * 0.06 + (i % 5) as f64 * 0.02,
        })
        .collect()
}
