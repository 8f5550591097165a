/// The just-guard resolver: decides whether a guard press this tick
/// parries the enemy's attack.

use crate::entities::{center_distance, Enemy, EnemyPhase, Player};
use crate::input::{Button, InputFrame};

/// Resolve a parry attempt.
///
/// Gates, checked in order: the enemy must be attacking, within the
/// guard band (radius sum plus `proximity_margin`, strict), the
/// in-range frame count must not have exceeded `window_frames`, and the
/// guard button must have gone down this very tick.  A held button
/// never parries.
///
/// On success the returned enemy has flipped from attacking straight
/// into knockback, launched away from the player with zero distance
/// accrued.  `None` means no parry; the caller keeps its enemy.
pub fn try_just_guard(
    player: &Player,
    enemy: &Enemy,
    input: &InputFrame,
    frames_in_range: u32,
    window_frames: u32,
    proximity_margin: f32,
) -> Option<Enemy> {
    if !enemy.is_attacking() {
        return None;
    }

    // Re-checked here against the freshest positions, after the chase
    // step has already run this tick.
    let reach = player.radius + enemy.radius + proximity_margin;
    if center_distance(player, enemy) >= reach {
        return None;
    }

    if frames_in_range > window_frames {
        return None;
    }

    if !input.just_pressed(Button::Guard) {
        return None;
    }

    // Launch direction away from the player; coincident centers fall
    // back to the zero vector, same policy as the chase.
    let direction = (enemy.pos - player.pos).normalize_or_zero();
    Some(Enemy {
        phase: EnemyPhase::Knockback {
            direction,
            traveled: 0.0,
        },
        ..enemy.clone()
    })
}
