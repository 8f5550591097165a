/// Gameplay constants: one named set, fixed for the whole session.

use glam::Vec2;

/// World extent in simulation units.  Screen-like axes: origin top-left,
/// +y points down.
pub const WORLD_WIDTH: f32 = 1280.0;
pub const WORLD_HEIGHT: f32 = 720.0;

#[derive(Clone, Debug)]
pub struct Tuning {
    /// Per-axis distance the player covers each tick a direction is held.
    pub player_step: Vec2,
    pub player_spawn: Vec2,
    pub player_radius: f32,
    /// Where the enemy stands at session start and after a reset.
    pub enemy_spawn: Vec2,
    pub enemy_radius: f32,
    /// Distance the enemy covers per tick while attacking.
    pub chase_speed: f32,
    /// Distance the enemy covers per tick while knocked back.
    pub knockback_speed: f32,
    /// Total knockback travel before the enemy comes to rest.
    pub knockback_max_distance: f32,
    /// Consecutive in-reach ticks during which a guard press still parries.
    /// Counted in 60 ticks/s frames; rescale if the tick rate changes.
    pub just_guard_window_frames: u32,
    /// Extra reach beyond the radius sum for the guard proximity band.
    pub proximity_margin: f32,
    /// Extra reach beyond the radius sum for the on-screen warning prompt.
    pub warning_band_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_step: Vec2::new(7.0, 7.0),
            player_spawn: Vec2::new(360.0, 360.0),
            player_radius: 64.0,
            enemy_spawn: Vec2::new(800.0, 360.0),
            enemy_radius: 64.0,
            chase_speed: 7.0,
            knockback_speed: 10.0,
            knockback_max_distance: 200.0,
            just_guard_window_frames: 2,
            proximity_margin: 2.0,
            warning_band_margin: 90.0,
        }
    }
}
