/// Game entity types and the circle geometry they share.

use glam::Vec2;

use crate::tuning::Tuning;

/// Visual feedback state driving the player's draw color.
#[derive(Clone, Debug, PartialEq)]
pub enum GuardFeedback {
    Neutral,
    /// The enemy circle overlaps the player circle.
    Hit,
    /// A just guard landed; kept alive for the whole knockback.
    Parried,
}

/// What the enemy is currently doing.  One tag, so attacking and
/// knockback can never overlap.
#[derive(Clone, Debug, PartialEq)]
pub enum EnemyPhase {
    /// At rest, waiting for the next attack run to be armed.
    Idle,
    /// Chasing the player at chase speed.
    Attacking,
    /// Launched along a fixed direction after a parry.
    Knockback {
        /// Unit vector away from the player, captured at parry time and
        /// never re-aimed.  Zero when the parry happened with coincident
        /// centers, in which case no travel accrues.
        direction: Vec2,
        /// Distance covered so far, compared against the travel cap.
        traveled: f32,
    },
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    /// Per-axis step applied while a direction input is held.  A step
    /// size, not a true velocity.
    pub step: Vec2,
    pub radius: f32,
    pub feedback: GuardFeedback,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    /// Last computed movement step; zeroed when a knockback ends.
    pub velocity: Vec2,
    pub radius: f32,
    pub phase: EnemyPhase,
}

impl Player {
    /// Player at its spawn point with neutral feedback.
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.player_spawn,
            step: tuning.player_step,
            radius: tuning.player_radius,
            feedback: GuardFeedback::Neutral,
        }
    }
}

impl Enemy {
    /// Enemy at its spawn point, idle until an attack run is armed.
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.enemy_spawn,
            velocity: Vec2::ZERO,
            radius: tuning.enemy_radius,
            phase: EnemyPhase::Idle,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.phase == EnemyPhase::Attacking
    }

    pub fn in_knockback(&self) -> bool {
        matches!(self.phase, EnemyPhase::Knockback { .. })
    }
}

/// Distance between the two entity centers.
pub fn center_distance(player: &Player, enemy: &Enemy) -> f32 {
    player.pos.distance(enemy.pos)
}

/// Circle overlap test.  Strict: circles that exactly touch do not
/// collide.  Purely informational, overlap never blocks movement.
pub fn is_colliding(player: &Player, enemy: &Enemy) -> bool {
    center_distance(player, enemy) < player.radius + enemy.radius
}
