use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use petscene::canvas::Affine;
use petscene::{PixelCanvas, Vec2};
use std::io::{self, Write};

/// Rows kept free for the HUD: title on top, key help at the bottom.
pub(crate) const HUD_TOP: u16 = 1;
pub(crate) const HUD_BOTTOM: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }

    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }

    pub(crate) fn clear(&mut self, bg: Color) {
        for c in &mut self.cells {
            *c = Cell {
                bg,
                ..Cell::default()
            };
        }
    }
}

/// Where the stage lands inside the braille pixel grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StageView {
    pub(crate) offset: Vec2,
    pub(crate) scale: f32,
}

impl StageView {
    /// Fit a `stage` sized area into the pixel grid below the HUD,
    /// centered, keeping the aspect ratio.
    pub(crate) fn fit(stage: Vec2, px_w: u32, px_h: u32) -> Self {
        let top = (HUD_TOP as u32 * 4) as f32;
        let avail_h = (px_h as f32 - top - (HUD_BOTTOM as u32 * 4) as f32).max(1.0);
        let avail_w = (px_w as f32).max(1.0);
        let scale = (avail_w / stage.x).min(avail_h / stage.y);
        let offset = Vec2::new(
            (avail_w - stage.x * scale) / 2.0,
            top + (avail_h - stage.y * scale) / 2.0,
        );
        Self { offset, scale }
    }

    pub(crate) fn transform(&self) -> Affine {
        Affine::trs(self.offset, 0.0, self.scale, self.scale)
    }

    /// Stage position under the center of a terminal cell.
    pub(crate) fn cell_to_stage(&self, col: u16, row: u16) -> Vec2 {
        let px = Vec2::new(col as f32 * 2.0 + 1.0, row as f32 * 4.0 + 2.0);
        (px - self.offset) * (1.0 / self.scale)
    }
}

pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
    pub(crate) canvas: PixelCanvas,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
            // braille: 2×4 pixels per cell
            canvas: PixelCanvas::new(cols as u32 * 2, rows as u32 * 4),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            DisableMouseCapture,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        self.canvas = PixelCanvas::new(c as u32 * 2, r as u32 * 4);
        Ok(true)
    }

    pub(crate) fn present(&mut self, diff_only: bool) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if diff_only && c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

fn braille_bit(dx: u32, dy: u32) -> u8 {
    // (0,0)=1 (0,1)=2 (0,2)=4 (0,3)=64
    // (1,0)=8 (1,1)=16 (1,2)=32 (1,3)=128
    match (dx, dy) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0x00,
    }
}

/// Pack 2×4 pixel blocks into braille cells, colored by the average ink.
pub(crate) fn canvas_to_cells(canvas: &PixelCanvas, out: &mut CellBuffer, enable_color: bool, bg: Color) {
    for cy in 0..out.h as u32 {
        for cx in 0..out.w as u32 {
            let mut mask: u8 = 0;
            let (mut r, mut g, mut b, mut ink) = (0u32, 0u32, 0u32, 0u32);

            for dy in 0..4 {
                for dx in 0..2 {
                    let Some(p) = canvas.get(cx * 2 + dx, cy * 4 + dy) else {
                        continue;
                    };
                    if p.a >= 32 {
                        mask |= braille_bit(dx, dy);
                        r += p.r as u32;
                        g += p.g as u32;
                        b += p.b as u32;
                        ink += 1;
                    }
                }
            }
            if mask == 0 {
                continue;
            }

            let ch = char::from_u32(0x2800 + mask as u32).unwrap_or(' ');
            let fg = if enable_color {
                Color::Rgb {
                    r: (r / ink) as u8,
                    g: (g / ink) as u8,
                    b: (b / ink) as u8,
                }
            } else {
                Color::White
            };
            out.set(cx as u16, cy as u16, Cell { ch, fg, bg });
        }
    }
}

/// Print rasterizer labels ("nom", "!") as real text over the braille art.
pub(crate) fn labels_to_cells(canvas: &PixelCanvas, out: &mut CellBuffer, enable_color: bool, bg: Color) {
    for label in canvas.labels() {
        if label.color.a < 40 || label.at.x < 0.0 || label.at.y < 0.0 {
            continue;
        }
        let x = (label.at.x / 2.0) as u16;
        let y = (label.at.y / 4.0) as u16;
        let fg = if enable_color {
            Color::Rgb {
                r: label.color.r,
                g: label.color.g,
                b: label.color.b,
            }
        } else {
            Color::White
        };
        draw_text(out, x, y, &label.text, fg, bg);
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg });
    }
}

pub(crate) fn draw_box(buf: &mut CellBuffer, title: &str, body: &str) {
    let (w, h) = (buf.w, buf.h);
    let bw = 60.min(w.saturating_sub(4));
    let bh = (body.lines().count() as u16 + 5).min(h.saturating_sub(2));
    if bw < 4 || bh < 4 {
        return;
    }
    let x0 = (w - bw) / 2;
    let y0 = (h - bh) / 2;
    let (fg, bg) = (Color::White, Color::Black);

    for y in y0..y0 + bh {
        for x in x0..x0 + bw {
            let edge_x = x == x0 || x == x0 + bw - 1;
            let edge_y = y == y0 || y == y0 + bh - 1;
            let ch = match (edge_x, edge_y) {
                (true, true) => match (x == x0, y == y0) {
                    (true, true) => '┌',
                    (false, true) => '┐',
                    (true, false) => '└',
                    (false, false) => '┘',
                },
                (true, false) => '│',
                (false, true) => '─',
                (false, false) => ' ',
            };
            buf.set(x, y, Cell { ch, fg, bg });
        }
    }

    draw_text(buf, x0 + 2, y0 + 1, title, fg, bg);
    let mut yy = y0 + 3;
    for line in body.lines() {
        if yy >= y0 + bh - 1 {
            break;
        }
        draw_text(buf, x0 + 2, yy, line, fg, bg);
        yy += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petscene::{v2, Canvas2D};

    #[test]
    fn one_lit_pixel_sets_one_braille_dot() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(v2(1.0, 2.0), 1.0, 1.0, petscene::Color::hex(0xFF0000));
        let mut cells = CellBuffer::new(2, 1);
        canvas_to_cells(&canvas, &mut cells, true, Color::Black);
        assert_eq!(cells.cells[0].ch, '\u{2820}');
        assert_eq!(cells.cells[0].fg, Color::Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(cells.cells[1].ch, ' ');
    }

    #[test]
    fn clicks_map_back_onto_the_stage() {
        let view = StageView::fit(v2(400.0, 300.0), 200, 160);
        let p = view.cell_to_stage(50, 20);
        let back = view.transform().apply(p);
        assert!((back.x - 101.0).abs() < 1e-3);
        assert!((back.y - 82.0).abs() < 1e-3);
    }

    #[test]
    fn box_fits_small_screens() {
        let mut buf = CellBuffer::new(20, 8);
        draw_box(&mut buf, "t", "a\nb\nc\nd\ne\nf\ng");
        assert_eq!(buf.cells[buf.idx(2, 1)].ch, '┌');
    }
}
