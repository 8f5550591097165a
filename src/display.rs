/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// world.  No game logic is performed; this module only maps the
/// 1280x720 simulation space onto the terminal cell grid and translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use just_guard::entities::GuardFeedback;
use just_guard::sim::World;
use just_guard::tuning::{Tuning, WORLD_HEIGHT, WORLD_WIDTH};

// ── Color palette ─────────────────────────────────────────────────────────────

const C_PLAYER_NEUTRAL: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_PLAYER_PARRIED: Color = Color::Cyan;
const C_ENEMY: Color = Color::Blue;
const C_HUD: Color = Color::White;
const C_PROMPT: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Rows reserved above the playfield (the HUD line).
const PLAY_TOP: u16 = 1;
/// Rows reserved below the playfield (the controls hint).
const HINT_ROWS: u16 = 1;

/// World-space height at which the guard prompt sits.
const PROMPT_WORLD_Y: f32 = 600.0;

// ── World-to-cell mapping ─────────────────────────────────────────────────────

/// The terminal area the playfield is squeezed into.  Each axis scales
/// independently, so circles render as blobs rather than true circles
/// on most cell aspect ratios.
struct Viewport {
    cols: u16,
    play_rows: u16,
}

impl Viewport {
    fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            play_rows: rows.saturating_sub(PLAY_TOP + HINT_ROWS),
        }
    }

    fn col(&self, x: f32) -> i32 {
        (x * self.cols as f32 / WORLD_WIDTH) as i32
    }

    fn row(&self, y: f32) -> i32 {
        PLAY_TOP as i32 + (y * self.play_rows as f32 / WORLD_HEIGHT) as i32
    }

    /// World-space y at the vertical center of a cell row.
    fn row_center_y(&self, row: i32) -> f32 {
        ((row - PLAY_TOP as i32) as f32 + 0.5) * WORLD_HEIGHT / self.play_rows as f32
    }

    /// First row past the bottom of the playfield.
    fn bottom(&self) -> i32 {
        (PLAY_TOP + self.play_rows) as i32
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World, tuning: &Tuning) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (cols, rows) = terminal::size()?;
    let vp = Viewport::new(cols, rows);

    draw_hud(out, &vp, world, tuning)?;

    // Enemy first so an overlapping player draws on top
    draw_circle(out, &vp, world.enemy.pos, world.enemy.radius, C_ENEMY)?;
    draw_circle(
        out,
        &vp,
        world.player.pos,
        world.player.radius,
        player_color(&world.player.feedback),
    )?;

    draw_guard_prompt(out, &vp, world, tuning)?;
    draw_controls_hint(out, rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn player_color(feedback: &GuardFeedback) -> Color {
    match feedback {
        GuardFeedback::Neutral => C_PLAYER_NEUTRAL,
        GuardFeedback::Hit => C_PLAYER_HIT,
        GuardFeedback::Parried => C_PLAYER_PARRIED,
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    vp: &Viewport,
    world: &World,
    tuning: &Tuning,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HUD))?;

    // Knockback flag, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(format!("knockback: {}", world.enemy.in_knockback())))?;

    // Guard-window counters, right
    let counters = format!(
        "frames in range {:>3} : {}",
        world.frames_in_range, tuning.just_guard_window_frames
    );
    let col = vp.cols.saturating_sub(counters.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(Print(&counters))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw a solid circle as one run of block glyphs per cell row: the row
/// is mapped back to world space, the chord at that height computed,
/// and its endpoints mapped to a column span.  Anything outside the
/// playfield is clipped, never an error.
fn draw_circle<W: Write>(
    out: &mut W,
    vp: &Viewport,
    center: Vec2,
    radius: f32,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;

    let top = vp.row(center.y - radius).max(PLAY_TOP as i32);
    let bottom = vp.row(center.y + radius).min(vp.bottom() - 1);

    for row in top..=bottom {
        let dy = vp.row_center_y(row) - center.y;
        if dy.abs() >= radius {
            continue;
        }
        let half_chord = (radius * radius - dy * dy).sqrt();
        let first = vp.col(center.x - half_chord).max(0);
        let last = vp.col(center.x + half_chord).min(vp.cols as i32 - 1);
        if first > last {
            continue;
        }
        out.queue(cursor::MoveTo(first as u16, row as u16))?;
        out.queue(Print("█".repeat((last - first + 1) as usize)))?;
    }

    Ok(())
}

// ── Guard prompt ──────────────────────────────────────────────────────────────

/// Flashes while the attacking enemy is inside the warning band, well
/// before the guard band proper.  Cosmetic only.
fn draw_guard_prompt<W: Write>(
    out: &mut W,
    vp: &Viewport,
    world: &World,
    tuning: &Tuning,
) -> std::io::Result<()> {
    if !world.enemy.is_attacking() {
        return Ok(());
    }
    let reach = world.player.radius + world.enemy.radius + tuning.warning_band_margin;
    if world.distance >= reach {
        return Ok(());
    }

    let text = "JustGuard!!!";
    let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    let row = vp.row(PROMPT_WORLD_Y).max(PLAY_TOP as i32).min(vp.bottom() - 1) as u16;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PROMPT))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "WASD / arrows : Move   SPACE : Guard   R : Attack run   Q : Quit",
    ))?;
    Ok(())
}
