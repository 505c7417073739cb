//! Terminal rendering; all terminal I/O of the runner lives here.
//!
//! `TerminalSurface` maps canvas pixels onto terminal cells so the core's
//! draw pass can run unchanged; the HUD, pause modal and hints are drawn on
//! top by `render`.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use wave_shooter::entities::Vec2;
use wave_shooter::render::{Rgb, Surface};
use wave_shooter::{GameState, GameStatus};

use crate::ScoreBoard;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_STAGE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_MODAL: Color = Color::White;

/// Rows reserved above the play area for the HUD.
const HUD_ROWS: u16 = 1;
/// Rows reserved below the play area for the controls hint.
const HINT_ROWS: u16 = 1;

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

// ── Surface adapter ───────────────────────────────────────────────────────────

pub struct TerminalSurface<'a, W: Write> {
    out: &'a mut W,
    canvas: Vec2,
    /// Cells per pixel on each axis.
    scale: Vec2,
    cols: u16,
    rows: u16,
    fill: Color,
    stroke: Color,
}

impl<'a, W: Write> TerminalSurface<'a, W> {
    pub fn new(out: &'a mut W, canvas: Vec2, width: u16, height: u16) -> Self {
        let rows = height.saturating_sub(HUD_ROWS + HINT_ROWS).max(1);
        let cols = width.max(1);
        TerminalSurface {
            out,
            canvas,
            scale: Vec2::new(cols as f32 / canvas.x, rows as f32 / canvas.y),
            cols,
            rows,
            fill: Color::White,
            stroke: Color::White,
        }
    }

    /// Terminal cell for a canvas point, if it lies inside the play area.
    fn cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let c = p * self.scale;
        if c.x < 0.0 || c.y < 0.0 {
            return None;
        }
        let (col, row) = (c.x as u16, c.y as u16);
        (col < self.cols && row < self.rows).then_some((col, row + HUD_ROWS))
    }

    fn put(&mut self, at: (u16, u16), glyph: &str, color: Color) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(at.0, at.1))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(glyph))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<'_, W> {
    fn set_fill(&mut self, color: Rgb) {
        self.fill = to_color(color);
    }

    fn set_stroke(&mut self, color: Rgb) {
        self.stroke = to_color(color);
    }

    fn set_line_width(&mut self, _width: f32) {}

    fn fill_rect(&mut self, min: Vec2, size: Vec2) -> std::io::Result<()> {
        // The screen is cleared every frame; a full-canvas fill is the background.
        if min == Vec2::ZERO && size == self.canvas {
            return Ok(());
        }
        if let Some(at) = self.cell(min + size / 2.0) {
            self.put(at, "•", self.fill)?;
        }
        Ok(())
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2) -> std::io::Result<()> {
        let (Some((l, t)), Some((r, b))) = (self.cell(min), self.cell(min + size - Vec2::ONE)) else {
            return Ok(());
        };
        let inner = r.saturating_sub(l + 1) as usize;
        let color = self.stroke;
        self.put((l, t), &format!("┌{}┐", "─".repeat(inner)), color)?;
        self.put((l, b), &format!("└{}┘", "─".repeat(inner)), color)?;
        for row in t + 1..b {
            self.put((l, row), "│", color)?;
            self.put((r, row), "│", color)?;
        }
        Ok(())
    }

    fn fill_path(&mut self, points: &[Vec2]) -> std::io::Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
        let top = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        // A single apex on top reads as a ship pointing up.
        let apexes = points.iter().filter(|p| p.y == top).count();
        let glyph = if apexes == 1 { "▲" } else { "▼" };
        if let Some(at) = self.cell(centroid) {
            self.put(at, glyph, self.fill)?;
        }
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Vec2) -> std::io::Result<()> {
        if let Some((col, row)) = self.cell(at) {
            let col = col.saturating_sub(text.chars().count() as u16 / 2);
            self.put((col, row), text, self.fill)?;
        }
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, board: &ScoreBoard) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    {
        let mut surface = TerminalSurface::new(out, state.canvas(), width, height);
        state.draw(&mut surface)?;
    }

    draw_hud(out, state, board, width)?;
    draw_controls_hint(out, height)?;
    if board.modal_open {
        draw_modal(out, width, height)?;
    }
    if state.status() == GameStatus::GameOver {
        draw_restart_hint(out, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, board: &ScoreBoard, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", board.score)))?;

    let stage_str = format!("[ STAGE {} ]", state.waves().stage());
    let sx = (width / 2).saturating_sub(stage_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STAGE))?;
    out.queue(Print(&stage_str))?;

    let hearts: String = "♥".repeat(state.player().lives() as usize);
    let lives_str = format!("Lives:{}", hearts);
    let lx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ESC : Pause   Q : Quit"))?;
    Ok(())
}

// ── Pause modal ───────────────────────────────────────────────────────────────

fn draw_modal<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let lines = [
        "╔════════════════════╗",
        "║       PAUSED       ║",
        "║   ESC  to resume   ║",
        "╚════════════════════╝",
    ];
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(C_MODAL))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

// ── Game-over hint ────────────────────────────────────────────────────────────

fn draw_restart_hint<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let hint = "R - Play Again  Q - Quit";
    let col = (width / 2).saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, height.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    Ok(())
}
