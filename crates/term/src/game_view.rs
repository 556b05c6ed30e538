//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, GameStatus, GRID_HEIGHT, GRID_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Vertical placement of the grid inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen position of the grid's top-left corner and its size in columns/rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Draws the walled grid, a side panel and status overlays.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

const PANEL_GAP: u16 = 3;
const PANEL_MIN_WIDTH: u16 = 10;

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Where the grid lands for `viewport`.
    pub fn grid_rect(&self, viewport: Viewport) -> GridRect {
        let width = (GRID_WIDTH as u16) * self.cell_w;
        let height = (GRID_HEIGHT as u16) * self.cell_h;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(height) / 2,
            AnchorY::Top => 0,
        };
        GridRect {
            x: viewport.width.saturating_sub(width) / 2,
            y,
            width,
            height,
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let rect = self.grid_rect(viewport);
        let dimmed = snap.status != GameStatus::Playing;

        for y in 0..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                let cell = snap.cell(x, y);
                self.draw_grid_cell(fb, rect, x as u16, y as u16, cell, dimmed);
            }
        }

        self.draw_side_panel(fb, snap, viewport, rect);

        match snap.status {
            GameStatus::Playing => {}
            GameStatus::Paused => self.draw_overlay_text(fb, rect, 0, "PAUSED"),
            GameStatus::GameOver => {
                self.draw_overlay_text(fb, rect, 0, "GAME OVER");
                self.draw_overlay_text(fb, rect, 2, "SPACE: again");
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        rect: GridRect,
        x: u16,
        y: u16,
        cell: Cell,
        dimmed: bool,
    ) {
        let color = if dimmed {
            cell.color().darker()
        } else {
            cell.color()
        };
        let (ch, style) = match cell {
            Cell::Empty => (
                '·',
                CellStyle {
                    fg: Rgb::new(60, 60, 70),
                    bg: color,
                    bold: false,
                },
            ),
            Cell::Wall | Cell::Filled(_) => ('█', CellStyle::solid(color)),
        };
        let px = rect.x + x * self.cell_w;
        let py = rect.y + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        rect: GridRect,
    ) {
        let panel_x = rect.x.saturating_add(rect.width).saturating_add(PANEL_GAP);
        if panel_x.saturating_add(PANEL_MIN_WIDTH) > viewport.width {
            return;
        }

        let label = CellStyle::text(Rgb::new(220, 220, 220), true);
        let value = CellStyle::text(Rgb::new(200, 200, 200), false);

        let mut y = rect.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines_cleared),
            ("GAME", snap.games_played),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, snap.status.as_str(), value);
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, rect: GridRect, row_offset: u16, text: &str) {
        let y = rect.y.saturating_add(rect.height / 2).saturating_add(row_offset);
        let text_w = text.chars().count() as u16;
        let x = rect.x.saturating_add(rect.width.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, CellStyle::text(Rgb::new(255, 255, 255), true));
    }
}
