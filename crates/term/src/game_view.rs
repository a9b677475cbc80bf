//! GameView: maps a `core::GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each tile covers 2x2 grid cells. One grid column is `cell_w` terminal columns
//! and one grid row is `cell_h` lines, so with the default 2x1 cells a tile is 4
//! columns wide and 2 lines tall. Stacked tiles are shifted one column left per
//! level and one line up every second level.

use crate::core::{paint_order, GameSession, GameStatus};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Category, Position, Tile};

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

const PANEL_W: u16 = 22;

const BACKGROUND: Rgb = Rgb::new(20, 40, 30);
const FACE: Rgb = Rgb::new(235, 228, 205);
const FACE_LOW: Rgb = Rgb::new(205, 196, 170);
const EDGE: Rgb = Rgb::new(150, 138, 110);
const SELECTED: Rgb = Rgb::new(250, 210, 80);
const CARET: Rgb = Rgb::new(130, 200, 235);

/// Where the board lands inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    /// Columns reserved on the left for the per-level shift.
    shift_x: u16,
    /// Lines reserved on top for the per-level shift.
    shift_y: u16,
}

/// A lightweight terminal renderer for the mahjong board.
pub struct GameView {
    /// Grid column width in terminal columns.
    cell_w: u16,
    /// Grid row height in terminal rows.
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

    fn tile_w(&self) -> u16 {
        self.cell_w * 2
    }

    fn tile_h(&self) -> u16 {
        self.cell_h * 2
    }

    /// Compute the framed board rectangle for `session` inside `viewport`.
    pub fn layout(&self, session: &GameSession, viewport: Viewport) -> BoardLayout {
        let board = session.board();
        let top = board
            .occupied_positions()
            .iter()
            .map(|p| p.height as u16)
            .max()
            .unwrap_or(0);
        let shift_x = top;
        let shift_y = top / 2;

        // A tile at column c spans columns c and c + 1, so the last column is covered.
        let grid_w = board.cols() as u16 * self.cell_w;
        let grid_h = board.rows() as u16 * self.cell_h;
        let width = grid_w + shift_x + 2;
        let height = grid_h + shift_y + 2;

        let total_w = width + PANEL_W;
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(height) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            x,
            y,
            width,
            height,
            shift_x,
            shift_y,
        }
    }

    /// Top-left terminal cell of the tile at `pos`.
    pub fn tile_origin(&self, layout: &BoardLayout, pos: Position) -> (u16, u16) {
        let x = layout.x + 1 + layout.shift_x + pos.col as u16 * self.cell_w - pos.height as u16;
        let y = layout.y + 1 + layout.shift_y + pos.row as u16 * self.cell_h - pos.height as u16 / 2;
        (x, y)
    }

    /// Render the session into an existing framebuffer.
    pub fn render_into(&self, session: &GameSession, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_notice(session, None, viewport, fb);
    }

    /// Render with an optional one-line notice under the status panel.
    pub fn render_into_with_notice(
        &self,
        session: &GameSession,
        notice: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(session, viewport);
        let bg = CellStyle::new(Rgb::new(80, 90, 80), BACKGROUND);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.width.saturating_sub(2),
            layout.height.saturating_sub(2),
            ' ',
            bg,
        );
        self.draw_border(fb, layout.x, layout.y, layout.width, layout.height, border);

        let selected = session.selection_position();
        let caret = session.caret_position();
        let board = session.board();
        for pos in paint_order(board) {
            let highlight = if Some(pos) == selected {
                Some(SELECTED)
            } else if Some(pos) == caret {
                Some(CARET)
            } else {
                None
            };
            self.draw_tile(fb, &layout, pos, board.get(pos), highlight);
        }

        self.draw_side_panel(fb, session, notice, viewport, &layout);

        match session.status() {
            GameStatus::Won => self.draw_overlay_text(fb, &layout, "WIN"),
            GameStatus::Lost => self.draw_overlay_text(fb, &layout, "NO MORE MOVES"),
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, session: &GameSession, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(session, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        pos: Position,
        tile: Tile,
        highlight: Option<Rgb>,
    ) {
        let (x, y) = self.tile_origin(layout, pos);
        let (w, h) = (self.tile_w(), self.tile_h());

        if tile.is_blocker() {
            let style = CellStyle::new(Rgb::new(120, 120, 120), Rgb::new(50, 50, 50));
            fb.fill_rect(x, y, w, h, '▓', style);
            return;
        }

        let face = highlight.unwrap_or(FACE);
        let low = highlight.unwrap_or(FACE_LOW);
        fb.fill_rect(x, y, w - 1, 1, ' ', CellStyle::new(face, face));
        fb.fill_rect(x, y + 1, w - 1, h - 1, ' ', CellStyle::new(low, low));
        // Right edge gives the stack some depth.
        fb.fill_rect(x + w - 1, y, 1, h, '▐', CellStyle::new(EDGE, face));

        let mut text = CellStyle::new(tile_color(tile), face).bold();
        if highlight == Some(CARET) {
            text = text.underline();
        }
        let label = tile_label(tile);
        let lx = if w >= 4 { x + 1 } else { x };
        fb.put_char(lx, y, label[0], text);
        fb.put_char(lx + 1, y, label[1], text);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        session: &GameSession,
        notice: Option<&str>,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.x.saturating_add(layout.width).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = layout.y;
        fb.put_str(panel_x, y, "MAP", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, session.map_name(), value);
        y = y.saturating_add(2);

        let counters = [
            ("TILES", session.tiles_left()),
            ("MOVES", session.moves_left()),
            ("UNDO", session.undo_stack().len() / 2),
        ];
        for (name, count) in counters {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, count as u32, value);
            y = y.saturating_add(2);
        }

        const HELP: [&str; 7] = [
            "arrows/hjkl move",
            "space  select",
            "u      undo",
            "?      hint",
            "n      new game",
            "m      next map",
            "q      quit",
        ];
        for line in HELP {
            if y >= viewport.height {
                return;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }

        if let Some(text) = notice {
            y = y.saturating_add(1);
            let notice_style = CellStyle::new(Rgb::new(240, 180, 90), Rgb::new(0, 0, 0));
            fb.put_str(panel_x, y, text, notice_style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &BoardLayout, text: &str) {
        let mid_y = layout.y.saturating_add(layout.height / 2);
        let text_w = text.chars().count() as u16 + 2;
        let x = layout.x.saturating_add(layout.width.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_char(x, mid_y, ' ', style);
        let end = fb.put_str(x + 1, mid_y, text, style);
        fb.put_char(end, mid_y, ' ', style);
    }
}

/// Two-character face label.
pub fn tile_label(tile: Tile) -> [char; 2] {
    let rank = char::from_digit(tile.rank() as u32, 10).unwrap_or('?');
    match tile.category() {
        Some(Category::Character) => [rank, 'c'],
        Some(Category::Dots) => [rank, 'd'],
        Some(Category::Bamboo) => [rank, 'b'],
        Some(Category::Winds) => match tile.rank() {
            1 => ['E', ' '],
            2 => ['S', ' '],
            3 => ['W', ' '],
            4 => ['N', ' '],
            _ => ['?', ' '],
        },
        Some(Category::Dragons) => match tile.rank() {
            1 => ['R', 'd'],
            2 => ['G', 'd'],
            3 => ['W', 'd'],
            _ => ['?', 'd'],
        },
        Some(Category::Seasons) => ['S', rank],
        Some(Category::Flowers) => ['F', rank],
        Some(Category::Blocker) => ['▓', '▓'],
        None => ['?', '?'],
    }
}

fn tile_color(tile: Tile) -> Rgb {
    match tile.category() {
        Some(Category::Character) => Rgb::new(170, 30, 30),
        Some(Category::Dots) => Rgb::new(30, 70, 170),
        Some(Category::Bamboo) => Rgb::new(20, 120, 50),
        Some(Category::Winds) => Rgb::new(30, 30, 30),
        Some(Category::Dragons) => match tile.rank() {
            1 => Rgb::new(190, 20, 20),
            2 => Rgb::new(20, 130, 40),
            _ => Rgb::new(40, 60, 140),
        },
        Some(Category::Seasons) => Rgb::new(160, 60, 150),
        Some(Category::Flowers) => Rgb::new(200, 100, 20),
        Some(Category::Blocker) | None => Rgb::new(90, 90, 90),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, UndoStack};

    fn p(row: u8, col: u8, height: u8) -> Position {
        Position::new(row, col, height)
    }

    fn session(tiles: &[(Position, Tile)]) -> GameSession {
        let mut board = Board::with_dimensions(6, 12);
        for &(pos, tile) in tiles {
            board.set(pos, tile);
        }
        board.recount();
        GameSession::from_board("test", board, UndoStack::new())
    }

    #[test]
    fn labels_cover_every_category() {
        assert_eq!(tile_label(Tile::new(Category::Character, 1)), ['1', 'c']);
        assert_eq!(tile_label(Tile::new(Category::Dots, 9)), ['9', 'd']);
        assert_eq!(tile_label(Tile::new(Category::Bamboo, 5)), ['5', 'b']);
        assert_eq!(tile_label(Tile::new(Category::Winds, 4)), ['N', ' ']);
        assert_eq!(tile_label(Tile::new(Category::Dragons, 2)), ['G', 'd']);
        assert_eq!(tile_label(Tile::new(Category::Seasons, 3)), ['S', '3']);
        assert_eq!(tile_label(Tile::new(Category::Flowers, 1)), ['F', '1']);
        assert_eq!(tile_label(Tile::BLOCKER), ['▓', '▓']);
    }

    #[test]
    fn higher_levels_shift_left_and_up() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let s = session(&[
            (p(2, 2, 0), Tile::new(Category::Dots, 1)),
            (p(2, 2, 1), Tile::new(Category::Dots, 1)),
            (p(2, 2, 2), Tile::new(Category::Dots, 2)),
        ]);
        let layout = view.layout(&s, Viewport::new(80, 24));
        let (x0, y0) = view.tile_origin(&layout, p(2, 2, 0));
        assert_eq!(view.tile_origin(&layout, p(2, 2, 1)), (x0 - 1, y0));
        assert_eq!(view.tile_origin(&layout, p(2, 2, 2)), (x0 - 2, y0 - 1));
    }

    #[test]
    fn top_tile_label_is_visible() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let s = session(&[
            (p(2, 2, 0), Tile::new(Category::Dots, 1)),
            (p(2, 2, 1), Tile::new(Category::Bamboo, 7)),
            (p(2, 8, 0), Tile::new(Category::Dots, 3)),
        ]);
        let viewport = Viewport::new(80, 24);
        let fb = view.render(&s, viewport);
        let layout = view.layout(&s, viewport);

        let (x, y) = view.tile_origin(&layout, p(2, 2, 1));
        assert_eq!(fb.get(x + 1, y).map(|c| c.ch), Some('7'));
        assert_eq!(fb.get(x + 2, y).map(|c| c.ch), Some('b'));
        let (x, y) = view.tile_origin(&layout, p(2, 8, 0));
        assert_eq!(fb.get(x + 1, y).map(|c| c.ch), Some('3'));
    }

    #[test]
    fn blockers_render_as_shade() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let s = session(&[
            (p(1, 0, 0), Tile::new(Category::Winds, 1)),
            (p(1, 4, 0), Tile::BLOCKER),
        ]);
        let viewport = Viewport::new(80, 24);
        let layout = view.layout(&s, viewport);
        let fb = view.render(&s, viewport);
        let (x, y) = view.tile_origin(&layout, p(1, 4, 0));
        for dx in 0..4 {
            assert_eq!(fb.get(x + dx, y).map(|c| c.ch), Some('▓'));
        }
    }

    #[test]
    fn status_panel_and_overlay() {
        let view = GameView::default();
        let s = session(&[
            (p(1, 0, 0), Tile::new(Category::Dots, 1)),
            (p(1, 4, 0), Tile::new(Category::Dots, 2)),
        ]);
        assert_eq!(s.status(), GameStatus::Lost);
        let fb = view.render(&s, Viewport::new(80, 24));
        assert!(fb.contains_text("MAP"));
        assert!(fb.contains_text("TILES"));
        assert!(fb.contains_text("NO MORE MOVES"));

        let won = session(&[(p(1, 4, 0), Tile::BLOCKER)]);
        let fb = view.render(&won, Viewport::new(80, 24));
        assert!(fb.contains_text("WIN"));
    }

    #[test]
    fn notice_is_shown() {
        let view = GameView::default();
        let s = session(&[
            (p(1, 0, 0), Tile::new(Category::Dots, 1)),
            (p(1, 4, 0), Tile::new(Category::Dots, 1)),
        ]);
        let mut fb = FrameBuffer::new(1, 1);
        view.render_into_with_notice(&s, Some("saved"), Viewport::new(80, 30), &mut fb);
        assert_eq!((fb.width(), fb.height()), (80, 30));
        assert!(fb.contains_text("saved"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let s = session(&[(p(5, 11, 15), Tile::new(Category::Dots, 1))]);
        let fb = view.render(&s, Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
