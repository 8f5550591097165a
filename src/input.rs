/// Input model: per-tick button snapshots and the two-snapshot diff used
/// for edge detection.
///
/// The host maps real keys onto the abstract buttons once per tick; the
/// simulation only ever sees snapshots and never a key code.

/// Buttons the simulation distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Guard,
    /// Arms (or restarts) the enemy attack run.
    Reset,
    /// Observed by the host loop only; the simulation ignores it.
    Quit,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Guard,
        Button::Reset,
        Button::Quit,
    ];
}

/// Which buttons are down during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonSnapshot {
    bits: u8,
}

impl ButtonSnapshot {
    pub fn press(mut self, button: Button) -> Self {
        self.bits |= 1 << button as u8;
        self
    }

    pub fn held(&self, button: Button) -> bool {
        self.bits & (1 << button as u8) != 0
    }
}

/// The current tick's snapshot together with the previous tick's.
/// Edges are the diff between the two; no "was pressed" flag is kept
/// anywhere else.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputFrame {
    pub current: ButtonSnapshot,
    pub previous: ButtonSnapshot,
}

impl InputFrame {
    /// True while the button is down this tick.
    pub fn held(&self, button: Button) -> bool {
        self.current.held(button)
    }

    /// True only on the tick the button goes from up to down.
    pub fn just_pressed(&self, button: Button) -> bool {
        self.current.held(button) && !self.previous.held(button)
    }

    /// Shift in the next tick's snapshot; the old current becomes the
    /// new previous.
    pub fn advance(&self, next: ButtonSnapshot) -> Self {
        Self {
            current: next,
            previous: self.current,
        }
    }
}
