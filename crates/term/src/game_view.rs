//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Style};
use crate::types::{Color, Phase};

const BLACK: Color = Color::new(0, 0, 0);
const WELL_BG: Color = Color::new(30, 30, 40);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Draws the well, the active piece, the score panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a board cell in most terminal fonts.
        Self::new(2, 1)
    }
}

/// Top-left of the well frame in terminal coordinates.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

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

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers reuse one framebuffer across frames; nothing here allocates
    /// unless the viewport grew.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let frame = self.frame_for(snap, viewport);
        let well = Style::new(Color::new(80, 80, 90), WELL_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', well);
        draw_border(fb, frame, Style::new(Color::new(200, 200, 200), BLACK));

        for y in 0..snap.rows {
            for x in 0..snap.columns {
                match snap.cell(x, y) {
                    Some(color) => self.draw_block(fb, frame, x, y, color),
                    None => self.fill_cell(fb, frame, x, y, '·', well.dim()),
                }
            }
        }

        if let Some(active) = &snap.active {
            for (x, y) in active.cells() {
                // Rows above the well are not drawn.
                if x >= 0 && y >= 0 && (x as u16) < snap.columns && (y as u16) < snap.rows {
                    self.draw_block(fb, frame, x as u16, y as u16, active.color);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.phase == Phase::GameOver {
            draw_centered(fb, frame, frame.h / 2, "GAME OVER");
            draw_centered(fb, frame, frame.h / 2 + 1, "ENTER: restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame_for(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = snap.columns.saturating_mul(self.cell_w).saturating_add(2);
        let h = snap.rows.saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: Color) {
        self.fill_cell(fb, frame, x, y, '█', Style::new(color, WELL_BG).bold());
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: Style) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Color::new(200, 200, 200), BLACK);
        let hint = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "STATE", label);
        fb.put_str(panel_x, y + 1, snap.phase.as_str(), value);
        y += 3;

        for line in ["←/→ move", "↑ rotate", "space drop", "q quit"] {
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, f: Frame, style: Style) {
    if f.w < 2 || f.h < 2 {
        return;
    }
    let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

    fb.put_char(f.x, f.y, '┌', style);
    fb.put_char(right, f.y, '┐', style);
    fb.put_char(f.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);

    for x in f.x + 1..right {
        fb.put_char(x, f.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in f.y + 1..bottom {
        fb.put_char(f.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, f: Frame, dy: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
    fb.put_str(x, f.y.saturating_add(dy), text, Style::new(Color::new(255, 255, 255), BLACK).bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedShapes, Session};
    use crate::types::{Command, ShapeKind};

    fn session() -> Session<ScriptedShapes> {
        Session::with_source(GameConfig::default(), ScriptedShapes::new([ShapeKind::O])).unwrap()
    }

    #[test]
    fn test_frame_size_follows_board() {
        let snap = session().snapshot();
        let fb = GameView::default()
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(60, 24));
        // 10 columns * 2 + borders = 22 wide, centered in 60.
        let x0 = (60 - 22) / 2;
        assert_eq!(fb.get(x0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(x0 + 21, 0).unwrap().ch, '┐');
        assert_eq!(fb.get(x0, 21).unwrap().ch, '└');
    }

    #[test]
    fn test_active_piece_is_drawn_with_its_color() {
        let snap = session().snapshot();
        let fb = GameView::default()
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(60, 24));
        let x0 = (60 - 22) / 2;
        // O spawns at column 4, row 0.
        let g = fb.get(x0 + 1 + 4 * 2, 1).unwrap();
        assert_eq!(g.ch, '█');
        assert_eq!(g.style.fg, ShapeKind::O.default_color());
        assert_eq!(fb.get(x0 + 1, 1).unwrap().ch, '·');
    }

    #[test]
    fn test_side_panel_shows_score() {
        let snap = session().snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(60, 24));
        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("LINES"));
        assert!(fb.contains_text("playing"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut s = session();
        let mut guard = 0;
        while !s.is_game_over() {
            s.tick(&[Command::HardDrop]).unwrap();
            guard += 1;
            assert!(guard < 100_000);
        }
        let fb = GameView::default().render(&s.snapshot(), Viewport::new(60, 24));
        assert!(fb.contains_text("GAME OVER"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = session().snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
