/// Enemy behavior updates: the chase step and the knockback step.
///
/// Both take the current state by reference and return the enemy's next
/// state; neither decides *whether* it applies this tick (the frame
/// orchestrator does that).

use glam::Vec2;

use crate::entities::{Enemy, EnemyPhase, Player};

/// One chase step toward the player at `speed` units per tick.
///
/// The direction is re-aimed every tick.  When the centers coincide the
/// direction falls back to the zero vector and the enemy stays put for
/// the tick.  The step is never shortened, so a close enemy overshoots
/// and re-aims on the next tick.
pub fn advance_chase(player: &Player, enemy: &Enemy, speed: f32) -> Enemy {
    let direction = (player.pos - enemy.pos).normalize_or_zero();
    let velocity = direction * speed;
    Enemy {
        pos: enemy.pos + velocity,
        velocity,
        ..enemy.clone()
    }
}

/// One knockback step along the direction captured at parry time.
///
/// No-op unless the enemy is in knockback.  The direction is never
/// re-aimed or renormalized: this is a straight-line launch.  Travel
/// accrues by the actual displacement length, and the step that reaches
/// `max_distance` still moves before the enemy comes to rest.  The
/// velocity field is only touched at termination, where it is zeroed.
pub fn advance_knockback(enemy: &Enemy, speed: f32, max_distance: f32) -> Enemy {
    match enemy.phase {
        EnemyPhase::Knockback { direction, traveled } => {
            let displacement = direction * speed;
            let pos = enemy.pos + displacement;
            let traveled = traveled + displacement.length();
            if traveled >= max_distance {
                Enemy {
                    pos,
                    velocity: Vec2::ZERO,
                    phase: EnemyPhase::Idle,
                    ..enemy.clone()
                }
            } else {
                Enemy {
                    pos,
                    phase: EnemyPhase::Knockback { direction, traveled },
                    ..enemy.clone()
                }
            }
        }
        _ => enemy.clone(),
    }
}
