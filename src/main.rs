mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;

use just_guard::input::{Button, ButtonSnapshot, InputFrame};
use just_guard::sim::{advance_frame, World};
use just_guard::tuning::Tuning;

/// The guard window is counted in these ticks, so the rate is pinned.
const FRAME: Duration = Duration::from_micros(16_667); // 60 ticks/s

/// A key is considered "held" if its last press/repeat event arrived
/// within this many frames.  Covers terminals that don't emit
/// key-release events: the OS key-repeat rate is >= 15 Hz, so a window
/// of 8 frames (~133 ms) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Key bindings ──────────────────────────────────────────────────────────────

/// Physical keys mapped onto one abstract button.
fn button_keys(button: Button) -> &'static [KeyCode] {
    match button {
        Button::Left => &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        Button::Right => &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        Button::Up => &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
        Button::Down => &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
        Button::Guard => &[KeyCode::Char(' ')],
        Button::Reset => &[KeyCode::Char('r'), KeyCode::Char('R')],
        Button::Quit => &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')],
    }
}

/// Build this tick's button snapshot from the live-key map.
fn poll_buttons(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> ButtonSnapshot {
    let mut snapshot = ButtonSnapshot::default();
    for button in Button::ALL {
        if button_keys(button)
            .iter()
            .any(|key| is_held(key_frame, key, frame))
        {
            snapshot = snapshot.press(button);
        }
    }
    snapshot
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we
/// maintain a `key_frame` map that records the frame number of the last
/// press/repeat event for every key.  Each frame the live keys become a
/// `ButtonSnapshot`, and the simulation sees only the snapshot pair
/// (current + previous) for held/edge decisions.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events, so keys drop out on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW`
///   frames of silence, which is shorter than the OS repeat interval,
///   so a held key stays live while it is actively generating repeats.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    let mut input = InputFrame::default();

    // Maps each held key to the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                }
                // Repeat: refresh timestamp so the key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: remove the key immediately (enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input = input.advance(poll_buttons(&key_frame, frame));
        if input.just_pressed(Button::Quit) {
            return Ok(());
        }

        world = advance_frame(&world, &input, &tuning);
        display::render(out, &world, &tuning)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back
    // to the hold-window expiry.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped, program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    info!("session started");
    let result = game_loop(&mut out, &rx);
    info!("session ended");

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
