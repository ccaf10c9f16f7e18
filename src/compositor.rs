//! Pixel assembly of the preset card
//!
//! Painting is strictly synchronous and single-threaded; everything that
//! can fail (asset fetches, store reads) happens before `composite` is
//! called. Draw order is back to front: tiled backdrop, panel artwork,
//! title, grid icons, then the list rows with their chrome.

use std::path::Path;

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::fetch::DrawTask;
use crate::layout::{Layout, ListBlock, Rect, Zone};
use crate::text::{draw_text, draw_text_centered, GLYPH_SIZE};

/// Stroke color for list row outlines.
pub const BORDER_COLOR: Rgba<u8> = Rgba([0x48, 0x59, 0x68, 0xff]);

/// Color for the title, row names and sub-headers.
pub const TEXT_COLOR: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Stroke color for the debug zone overlay.
const DEBUG_COLOR: Rgba<u8> = Rgba([0xff, 0x00, 0xff, 0xff]);

/// Side length of the fitted icon inside a list row.
const LIST_ICON_SIZE: u32 = 24;

/// Inset of the fitted icon from the row corner.
const LIST_ICON_INSET: i32 = 4;

/// Horizontal offset of the row name from the row's left edge.
const LIST_NAME_OFFSET: i32 = 36;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("cannot load theme asset '{name}': {source}")]
    Asset {
        name: &'static str,
        source: image::ImageError,
    },
}

/// The card's static artwork, loaded once from the assets directory.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Backdrop texture, tiled across the whole canvas.
    pub background: RgbaImage,
    /// Panel artwork behind the inventory and equipment grids. Its
    /// height fixes where the support-item lists start.
    pub panel: RgbaImage,
    /// Sprite stretched under each filled equipment cell.
    pub slot: RgbaImage,
}

impl Theme {
    /// Load the three card assets from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ThemeError> {
        let load = |name: &'static str| {
            image::open(dir.join(name))
                .map(|img| img.to_rgba8())
                .map_err(|source| ThemeError::Asset { name, source })
        };
        Ok(Self {
            background: load("bgMain.png")?,
            panel: load("bgInventAndEquipment.png")?,
            slot: load("bg.png")?,
        })
    }

    pub fn panel_height(&self) -> u32 {
        self.panel.height()
    }
}

/// Alpha-blend `src` onto `canvas` with its top-left corner at (x, y),
/// clipping at the canvas edges.
pub fn overlay_alpha(canvas: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let dx = x + sx as i32;
        let dy = y + sy as i32;
        if dx < 0 || dy < 0 || dx as u32 >= canvas.width() || dy as u32 >= canvas.height() {
            continue;
        }
        let alpha = pixel.0[3] as u32;
        if alpha == 0 {
            continue;
        }
        let dst = canvas.get_pixel_mut(dx as u32, dy as u32);
        if alpha == 255 {
            *dst = *pixel;
            continue;
        }
        for channel in 0..3 {
            let s = pixel.0[channel] as u32;
            let d = dst.0[channel] as u32;
            dst.0[channel] = ((s * alpha + d * (255 - alpha)) / 255) as u8;
        }
        dst.0[3] = dst.0[3].max(pixel.0[3]);
    }
}

/// Draw `src` at natural size, centered within `rect`.
pub fn draw_centered(canvas: &mut RgbaImage, src: &RgbaImage, rect: &Rect) {
    let x = rect.x + (rect.width as i32 - src.width() as i32) / 2;
    let y = rect.y + (rect.height as i32 - src.height() as i32) / 2;
    overlay_alpha(canvas, src, x, y);
}

/// Draw `src` within a `width` x `height` box at (x, y), scaling down
/// to fit while preserving aspect ratio. Never scales up.
pub fn draw_fitted(
    canvas: &mut RgbaImage,
    src: &RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
) {
    let ratio = (width as f32 / src.width() as f32)
        .min(height as f32 / src.height() as f32)
        .min(1.0);
    if ratio < 1.0 {
        let scaled_w = ((src.width() as f32 * ratio) as u32).max(1);
        let scaled_h = ((src.height() as f32 * ratio) as u32).max(1);
        let scaled = image::imageops::resize(src, scaled_w, scaled_h, FilterType::Triangle);
        overlay_alpha(canvas, &scaled, x, y);
    } else {
        overlay_alpha(canvas, src, x, y);
    }
}

/// Stretch `src` to exactly fill `rect`.
fn draw_stretched(canvas: &mut RgbaImage, src: &RgbaImage, rect: &Rect) {
    if src.width() == rect.width && src.height() == rect.height {
        overlay_alpha(canvas, src, rect.x, rect.y);
        return;
    }
    let scaled = image::imageops::resize(src, rect.width, rect.height, FilterType::Triangle);
    overlay_alpha(canvas, &scaled, rect.x, rect.y);
}

/// Stroke a one-pixel rectangle outline.
pub fn stroke_rect(canvas: &mut RgbaImage, rect: &Rect, color: Rgba<u8>) {
    let put = |canvas: &mut RgbaImage, x: i32, y: i32| {
        if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    };
    let right = rect.x + rect.width as i32 - 1;
    let bottom = rect.y + rect.height as i32 - 1;
    for x in rect.x..=right {
        put(canvas, x, rect.y);
        put(canvas, x, bottom);
    }
    for y in rect.y..=bottom {
        put(canvas, rect.x, y);
        put(canvas, right, y);
    }
}

fn tile_background(canvas: &mut RgbaImage, tile: &RgbaImage) {
    if tile.width() == 0 || tile.height() == 0 {
        return;
    }
    let mut y = 0;
    while y < canvas.height() {
        let mut x = 0;
        while x < canvas.width() {
            overlay_alpha(canvas, tile, x as i32, y as i32);
            x += tile.width();
        }
        y += tile.height();
    }
}

fn draw_list_row(canvas: &mut RgbaImage, task: &DrawTask) {
    stroke_rect(canvas, &task.rect, BORDER_COLOR);
    draw_fitted(
        canvas,
        &task.image,
        task.rect.x + LIST_ICON_INSET,
        task.rect.y + LIST_ICON_INSET,
        LIST_ICON_SIZE,
        LIST_ICON_SIZE,
    );
    if let Some(name) = &task.label {
        let text_y = task.rect.y + (task.rect.height as i32 - GLYPH_SIZE as i32) / 2;
        draw_text(
            canvas,
            name,
            task.rect.x + LIST_NAME_OFFSET,
            text_y,
            1,
            TEXT_COLOR,
        );
    }
}

fn draw_alt_header(canvas: &mut RgbaImage, block: &ListBlock) {
    if let Some(alt) = &block.alternates {
        draw_text_centered(
            canvas,
            "Alternatives",
            alt.label_x,
            alt.label_y,
            1,
            TEXT_COLOR,
        );
    }
}

fn stroke_zone_cells(canvas: &mut RgbaImage, zone: &Zone) {
    stroke_rect(canvas, &zone.bounds(), DEBUG_COLOR);
    for index in 0..(zone.columns * zone.rows) as usize {
        stroke_rect(canvas, &zone.cell_rect(index), DEBUG_COLOR);
    }
}

/// Paint the whole card and return the finished surface.
///
/// Draw tasks are already positioned; `layout` supplies the chrome
/// geometry (header band, panel, sub-header positions). The debug
/// overlay strokes every zone and cell outline on top of the normal
/// output without changing the canvas size.
pub fn composite(
    layout: &Layout,
    theme: &Theme,
    title: &str,
    inventory: &[DrawTask],
    equipment: &[DrawTask],
    relics: &[DrawTask],
    familiars: &[DrawTask],
    debug_overlay: bool,
) -> RgbaImage {
    let mut canvas = RgbaImage::new(layout.canvas_width, layout.canvas_height);

    tile_background(&mut canvas, &theme.background);
    overlay_alpha(&mut canvas, &theme.panel, layout.panel.x, layout.panel.y);

    let title_y = layout.header.y + (layout.header.height as i32 - 2 * GLYPH_SIZE as i32) / 2;
    draw_text_centered(
        &mut canvas,
        title,
        layout.canvas_width as i32 / 2,
        title_y,
        2,
        TEXT_COLOR,
    );

    for task in inventory {
        draw_centered(&mut canvas, &task.image, &task.rect);
    }
    for task in equipment {
        draw_stretched(&mut canvas, &theme.slot, &task.rect);
        draw_centered(&mut canvas, &task.image, &task.rect);
    }

    draw_alt_header(&mut canvas, &layout.relics);
    draw_alt_header(&mut canvas, &layout.familiars);
    for task in relics.iter().chain(familiars) {
        draw_list_row(&mut canvas, task);
    }

    if debug_overlay {
        stroke_zone_cells(&mut canvas, &layout.inventory);
        stroke_zone_cells(&mut canvas, &layout.equipment);
        stroke_zone_cells(&mut canvas, &layout.relics.zone);
        stroke_zone_cells(&mut canvas, &layout.familiars.zone);
        for block in [&layout.relics, &layout.familiars] {
            if let Some(alt) = &block.alternates {
                stroke_zone_cells(&mut canvas, &alt.zone);
            }
        }
    }

    canvas
}
