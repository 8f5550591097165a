/// The per-tick simulation step.
///
/// `advance_frame` takes an immutable reference to the current `World`
/// and the tick's input and returns a brand-new `World`.  The stage
/// order below is load-bearing: the distance sample feeds the guard
/// window, the parry reads post-chase positions, and the knockback
/// moves in the same tick the parry lands.

use log::debug;

use crate::enemy::{advance_chase, advance_knockback};
use crate::entities::{center_distance, is_colliding, Enemy, EnemyPhase, GuardFeedback, Player};
use crate::guard::try_just_guard;
use crate::input::{Button, InputFrame};
use crate::tuning::Tuning;

/// Everything that changes from tick to tick.  Cloneable so the update
/// can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub enemy: Enemy,
    /// Consecutive ticks the attacking enemy has stayed inside the
    /// guard band.  Resets to 0 the tick the band test fails.
    pub frames_in_range: u32,
    /// Player-enemy center distance, sampled once per tick after player
    /// movement and before the chase step.
    pub distance: f32,
    pub frame: u64,
}

impl World {
    /// Session-start state: both entities at their spawn points, the
    /// enemy idle until the first reset press arms an attack run.
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player: Player::spawn(tuning),
            enemy: Enemy::spawn(tuning),
            frames_in_range: 0,
            distance: 0.0,
            frame: 0,
        }
    }
}

/// Advance the simulation by one tick.
pub fn advance_frame(world: &World, input: &InputFrame, tuning: &Tuning) -> World {
    let frame = world.frame + 1;

    // ── 1. Held-direction player movement ────────────────────────────────────
    // Each axis applies independently; held diagonals sum both steps
    // unnormalized, so diagonal movement is faster than axis-aligned.
    let mut pos = world.player.pos;
    if input.held(Button::Right) {
        pos.x += world.player.step.x;
    }
    if input.held(Button::Left) {
        pos.x -= world.player.step.x;
    }
    if input.held(Button::Down) {
        pos.y += world.player.step.y;
    }
    if input.held(Button::Up) {
        pos.y -= world.player.step.y;
    }
    let player = Player {
        pos,
        ..world.player.clone()
    };

    // ── 2. Reset edge: (re)start the attack run from the spawn point ─────────
    let enemy = if input.just_pressed(Button::Reset) {
        debug!("attack run armed at frame {frame}");
        Enemy {
            pos: tuning.enemy_spawn,
            phase: EnemyPhase::Attacking,
            ..world.enemy.clone()
        }
    } else {
        world.enemy.clone()
    };

    // ── 3. One distance sample, then chase while the attack run is live ──────
    // The guard-window counter reads this pre-chase distance; the parry
    // below re-measures after the chase step.
    let distance = center_distance(&player, &enemy);
    let guard_band = player.radius + enemy.radius + tuning.proximity_margin;
    let (enemy, frames_in_range) = if enemy.is_attacking() {
        let frames = if distance < guard_band {
            world.frames_in_range + 1
        } else {
            0
        };
        (advance_chase(&player, &enemy, tuning.chase_speed), frames)
    } else {
        (enemy, 0)
    };

    // ── 4. Collision feedback ────────────────────────────────────────────────
    // An ongoing knockback suppresses the neutral reset so the parry
    // flash survives until the enemy comes to rest.
    let feedback = if is_colliding(&player, &enemy) {
        GuardFeedback::Hit
    } else if enemy.in_knockback() {
        world.player.feedback.clone()
    } else {
        GuardFeedback::Neutral
    };

    // ── 5. Parry resolution ──────────────────────────────────────────────────
    let (player, enemy, frames_in_range) = match try_just_guard(
        &player,
        &enemy,
        input,
        frames_in_range,
        tuning.just_guard_window_frames,
        tuning.proximity_margin,
    ) {
        Some(parried) => {
            debug!("parry landed at frame {frame}");
            (
                Player {
                    feedback: GuardFeedback::Parried,
                    ..player
                },
                parried,
                0,
            )
        }
        None => (Player { feedback, ..player }, enemy, frames_in_range),
    };

    // ── 6. Knockback moves in the same tick the parry lands ──────────────────
    let enemy = if enemy.in_knockback() {
        let launched = advance_knockback(
            &enemy,
            tuning.knockback_speed,
            tuning.knockback_max_distance,
        );
        if !launched.in_knockback() {
            debug!("knockback finished at frame {frame}");
        }
        launched
    } else {
        enemy
    };

    World {
        player,
        enemy,
        frames_in_range,
        distance,
        frame,
    }
}
