//! Card layout: fixed zone geometry plus dynamic vertical extent
//!
//! All zone positions are release constants; the only content-driven
//! geometry is the vertical growth caused by non-empty "Alternatives"
//! lists and the resulting canvas height.

use crate::models::NormalizedPreset;

/// Margin around the card content.
pub const GUTTER: i32 = 15;

/// Fixed canvas width: the two side-by-side grids plus margins.
pub const CANVAS_WIDTH: u32 = 510 + 2 * GUTTER as u32;

/// Height of the title band at the top of the card.
pub const HEADER_HEIGHT: i32 = 50;

/// Width of the decorative panel under the header band.
pub const PANEL_WIDTH: u32 = 510;

/// Width of one support-item list column (integer half of the content
/// width minus the three gutters).
pub const LIST_COLUMN_WIDTH: u32 = (CANVAS_WIDTH - 3 * GUTTER as u32) / 2;

pub const LIST_ROW_HEIGHT: u32 = 32;
pub const LIST_ROW_GAP: u32 = 10;

/// Vertical distance from one list row origin to the next.
pub const LIST_ROW_STEP: i32 = (LIST_ROW_HEIGHT + LIST_ROW_GAP) as i32;

/// Nominal primary row capacity of the relic list.
pub const RELIC_NOMINAL_ROWS: usize = 3;

/// Nominal primary row capacity of the familiar list.
pub const FAMILIAR_NOMINAL_ROWS: usize = 1;

/// Offset of the "Alternatives" sub-header below the nominal primary
/// block bottom, before the empty-row lift is applied.
pub const ALT_LABEL_OFFSET: i32 = 37;

/// Offset of the first alternate row below the sub-header.
pub const ALT_FIRST_ROW_OFFSET: i32 = 15;

/// A rectangle on the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

/// A named rectangular region with grid parameters for sub-cell
/// placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub origin_x: i32,
    pub origin_y: i32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub column_gap: u32,
    pub row_gap: u32,
}

impl Zone {
    /// Rectangle of the i-th cell, in row-major order.
    pub fn cell_rect(&self, index: usize) -> Rect {
        let col = index as u32 % self.columns;
        let row = index as u32 / self.columns;
        Rect {
            x: self.origin_x + (col * (self.cell_width + self.column_gap)) as i32,
            y: self.origin_y + (row * (self.cell_height + self.row_gap)) as i32,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Bounding rectangle of the full grid.
    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.origin_x,
            y: self.origin_y,
            width: self.columns * self.cell_width + (self.columns - 1) * self.column_gap,
            height: self.rows * self.cell_height + (self.rows - 1) * self.row_gap,
        }
    }
}

/// Geometry of a conditionally-rendered "Alternatives" sub-block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AltBlock {
    /// Horizontal center of the sub-header text.
    pub label_x: i32,
    /// Top of the sub-header text.
    pub label_y: i32,
    /// One row per filled alternate entry.
    pub zone: Zone,
}

/// A support-item list zone: nominal primary rows plus an optional
/// alternates sub-block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBlock {
    pub zone: Zone,
    pub alternates: Option<AltBlock>,
    /// Bottom edge of the block, or `None` when the list is entirely
    /// empty and contributes nothing to the canvas height.
    pub bottom: Option<i32>,
}

/// Every zone of the card plus the final canvas dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub header: Rect,
    pub panel: Rect,
    pub inventory: Zone,
    pub equipment: Zone,
    pub relics: ListBlock,
    pub familiars: ListBlock,
}

fn inventory_zone() -> Zone {
    Zone {
        origin_x: GUTTER + 10,
        origin_y: HEADER_HEIGHT + 8,
        cell_width: 36,
        cell_height: 32,
        columns: 7,
        rows: 4,
        column_gap: 7,
        row_gap: 4,
    }
}

fn equipment_zone() -> Zone {
    Zone {
        origin_x: 345,
        origin_y: HEADER_HEIGHT + 8,
        cell_width: 32,
        cell_height: 32,
        columns: 4,
        rows: 4,
        column_gap: 14,
        row_gap: 6,
    }
}

fn list_block(
    origin_x: i32,
    origin_y: i32,
    nominal_rows: usize,
    filled_primary: usize,
    alt_count: usize,
) -> ListBlock {
    let zone = Zone {
        origin_x,
        origin_y,
        cell_width: LIST_COLUMN_WIDTH,
        cell_height: LIST_ROW_HEIGHT,
        columns: 1,
        rows: nominal_rows as u32,
        column_gap: 0,
        row_gap: LIST_ROW_GAP,
    };
    let nominal_bottom = zone.bounds().bottom();

    // The alternates block abuts the last *filled* primary row: every
    // unfilled primary row lifts it by one full row step.
    let empty_rows = (nominal_rows - filled_primary.min(nominal_rows)) as i32;
    let alternates = (alt_count > 0).then(|| {
        let label_y = nominal_bottom + ALT_LABEL_OFFSET - empty_rows * LIST_ROW_STEP;
        AltBlock {
            label_x: origin_x + LIST_COLUMN_WIDTH as i32 / 2,
            label_y,
            zone: Zone {
                origin_y: label_y + ALT_FIRST_ROW_OFFSET,
                rows: alt_count as u32,
                ..zone
            },
        }
    });

    let bottom = match &alternates {
        Some(alt) => Some(alt.label_y + ALT_FIRST_ROW_OFFSET + alt_count as i32 * LIST_ROW_STEP),
        None if filled_primary > 0 => Some(nominal_bottom),
        None => None,
    };

    ListBlock {
        zone,
        alternates,
        bottom,
    }
}

/// Compute every zone rectangle and the final canvas size for a preset.
///
/// `panel_height` is the height of the decorative panel artwork; the
/// support-item lists start one gutter below it. Purely arithmetic, no
/// failure paths.
pub fn compute_layout(preset: &NormalizedPreset, panel_height: u32) -> Layout {
    let inventory = inventory_zone();
    let equipment = equipment_zone();

    let list_top = HEADER_HEIGHT + panel_height as i32 + GUTTER;
    let relics = list_block(
        GUTTER,
        list_top,
        RELIC_NOMINAL_ROWS,
        preset.relics.filled_primary().len(),
        preset.relics.filled_alternative().len(),
    );
    let familiars = list_block(
        2 * GUTTER + LIST_COLUMN_WIDTH as i32,
        list_top,
        FAMILIAR_NOMINAL_ROWS,
        preset.familiars.filled_primary().len(),
        preset.familiars.filled_alternative().len(),
    );

    let content_bottom = [
        Some(inventory.bounds().bottom()),
        Some(equipment.bounds().bottom()),
        relics.bottom,
        familiars.bottom,
    ]
    .into_iter()
    .flatten()
    .max()
    .unwrap_or(0);

    Layout {
        canvas_width: CANVAS_WIDTH,
        canvas_height: (content_bottom + GUTTER) as u32,
        header: Rect {
            x: 0,
            y: 0,
            width: CANVAS_WIDTH,
            height: HEADER_HEIGHT as u32,
        },
        panel: Rect {
            x: GUTTER,
            y: HEADER_HEIGHT,
            width: PANEL_WIDTH,
            height: panel_height,
        },
        inventory,
        equipment,
        relics,
        familiars,
    }
}
