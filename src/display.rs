/// Rendering layer — all terminal I/O lives here.
///
/// Each frame receives a mutable writer and a read-only [`FrameSnapshot`].
/// No game logic is performed; this module only scales the pixel-space
/// snapshot onto the terminal grid and translates it into commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use alien_invasion::entities::{FrameSnapshot, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Black;
const C_HUD_LEVEL: Color = Color::DarkBlue;
const C_HUD_LIVES: Color = Color::DarkRed;
const C_SHIP: Color = Color::DarkBlue;
const C_ALIEN: Color = Color::DarkGreen;
const C_HINT: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::Red;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   P : Restart   Q : Quit";

// ── Pixel → cell mapping ──────────────────────────────────────────────────────

/// Maps screen pixels onto the play area: every terminal row except the HUD
/// (row 0) and the controls hint (last row).
struct Viewport {
    cols: u16,
    rows: u16,
    screen_width: i32,
    screen_height: i32,
}

impl Viewport {
    const TOP: u16 = 1;

    fn new(cols: u16, rows: u16, snap: &FrameSnapshot) -> Self {
        Viewport {
            cols: cols.max(1),
            rows: rows.saturating_sub(2).max(1),
            screen_width: snap.screen_width.max(1),
            screen_height: snap.screen_height.max(1),
        }
    }

    fn col(&self, x: i32) -> u16 {
        let x = x.clamp(0, self.screen_width - 1) as i64;
        (x * self.cols as i64 / self.screen_width as i64) as u16
    }

    fn row(&self, y: i32) -> u16 {
        let y = y.clamp(0, self.screen_height - 1) as i64;
        Self::TOP + (y * self.rows as i64 / self.screen_height as i64) as u16
    }

    /// Width in cells of a `width`-pixel box, never less than one.
    fn span(&self, width: i32) -> usize {
        let cells = (width as i64 * self.cols as i64 + self.screen_width as i64 / 2)
            / self.screen_width as i64;
        cells.max(1) as usize
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols` x `rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    snap: &FrameSnapshot,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let view = Viewport::new(cols, rows, snap);

    out.queue(style::SetBackgroundColor(rgb(snap.bg_color)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, snap, cols)?;

    for alien in &snap.aliens {
        draw_alien(out, &view, alien)?;
    }
    for bullet in &snap.bullets {
        draw_bullet(out, &view, bullet, snap.bullet_color)?;
    }
    draw_ship(out, &view, &snap.ship)?;
    draw_controls_hint(out, rows)?;

    if !snap.game_active {
        draw_game_over(out, snap, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &FrameSnapshot, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", snap.score)))?;

    let level_str = format!("[ LEVEL {} ]", snap.level);
    let lx = (cols / 2).saturating_sub(level_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let lives_str = format!("Lives:{}", "♥".repeat(snap.lives as usize));
    let rx = cols.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, view: &Viewport, ship: &Rect) -> std::io::Result<()> {
    //    ▲       ← nose, on the top row of the ship
    //  █████     ← hull, on the bottom row
    out.queue(style::SetForegroundColor(C_SHIP))?;

    let hull_row = view.row(ship.bottom() - 1);
    let nose_row = view.row(ship.top());
    if nose_row < hull_row {
        out.queue(cursor::MoveTo(view.col(ship.centerx()), nose_row))?;
        out.queue(Print("▲"))?;
    }
    out.queue(cursor::MoveTo(view.col(ship.left()), hull_row))?;
    out.queue(Print("█".repeat(view.span(ship.width))))?;
    Ok(())
}

fn draw_alien<W: Write>(out: &mut W, view: &Viewport, alien: &Rect) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_ALIEN))?;
    out.queue(cursor::MoveTo(view.col(alien.left()), view.row(alien.top())))?;
    out.queue(Print("▓".repeat(view.span(alien.width))))?;
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    view: &Viewport,
    bullet: &Rect,
    color: [u8; 3],
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(view.col(bullet.centerx()), view.row(bullet.top())))?;
    out.queue(style::SetForegroundColor(rgb(color)))?;
    out.queue(Print("║"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    snap: &FrameSnapshot,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}   Level: {}", snap.score, snap.level);
    let lines: [(&str, Color); 4] = [
        ("╔════════════════════╗", C_GAME_OVER),
        ("║    GAME  OVER      ║", C_GAME_OVER),
        ("╚════════════════════╝", C_GAME_OVER),
        (score_line.as_str(), C_HUD_SCORE),
    ];
    let hint = "P - Play Again  Q - Quit";

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub((lines.len() as u16 + 1) / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + lines.len() as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    Ok(())
}
