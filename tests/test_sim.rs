use glam::Vec2;
use just_guard::entities::{EnemyPhase, GuardFeedback};
use just_guard::input::{Button, ButtonSnapshot, InputFrame};
use just_guard::sim::{advance_frame, World};
use just_guard::tuning::Tuning;

fn snap(buttons: &[Button]) -> ButtonSnapshot {
    buttons
        .iter()
        .fold(ButtonSnapshot::default(), |s, &b| s.press(b))
}

/// Buttons freshly pressed this tick.
fn edge(buttons: &[Button]) -> InputFrame {
    InputFrame::default().advance(snap(buttons))
}

/// Buttons down both this tick and the last: held, no edges.
fn held(buttons: &[Button]) -> InputFrame {
    let s = snap(buttons);
    InputFrame {
        current: s,
        previous: s,
    }
}

fn idle() -> InputFrame {
    InputFrame::default()
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// Default geometry throughout: player (360, 360) r64, enemy spawn
// (800, 360) r64, guard band 130, chase 7/tick, knockback 10/tick.

// ── Session start and the frame counter ───────────────────────────────────────

#[test]
fn new_world_matches_the_tuning() {
    let tuning = Tuning::default();
    let world = World::new(&tuning);
    assert_eq!(world.player.pos, tuning.player_spawn);
    assert_eq!(world.enemy.pos, tuning.enemy_spawn);
    assert_eq!(world.enemy.phase, EnemyPhase::Idle);
    assert_eq!(world.frames_in_range, 0);
    assert_eq!(world.frame, 0);
}

#[test]
fn frame_counter_advances_every_tick() {
    let tuning = Tuning::default();
    let world = World::new(&tuning);
    let world = advance_frame(&world, &idle(), &tuning);
    let world = advance_frame(&world, &idle(), &tuning);
    assert_eq!(world.frame, 2);
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn each_direction_moves_one_step() {
    let tuning = Tuning::default();
    let start = World::new(&tuning);

    let next = advance_frame(&start, &held(&[Button::Right]), &tuning);
    assert_eq!(next.player.pos, Vec2::new(367.0, 360.0));

    let next = advance_frame(&start, &held(&[Button::Left]), &tuning);
    assert_eq!(next.player.pos, Vec2::new(353.0, 360.0));

    let next = advance_frame(&start, &held(&[Button::Down]), &tuning);
    assert_eq!(next.player.pos, Vec2::new(360.0, 367.0));

    let next = advance_frame(&start, &held(&[Button::Up]), &tuning);
    assert_eq!(next.player.pos, Vec2::new(360.0, 353.0));
}

#[test]
fn held_diagonal_applies_both_axes_in_full() {
    // Axes stack unnormalized, so a diagonal covers step * sqrt(2)
    let tuning = Tuning::default();
    let world = World::new(&tuning);
    let next = advance_frame(&world, &held(&[Button::Right, Button::Down]), &tuning);
    assert_eq!(next.player.pos, Vec2::new(367.0, 367.0));
}

#[test]
fn opposing_directions_cancel() {
    let tuning = Tuning::default();
    let world = World::new(&tuning);
    let next = advance_frame(&world, &held(&[Button::Left, Button::Right]), &tuning);
    assert_eq!(next.player.pos, Vec2::new(360.0, 360.0));
}

#[test]
fn movement_is_level_triggered() {
    // No edge anywhere in sight; holding is enough, every tick
    let tuning = Tuning::default();
    let world = World::new(&tuning);
    let world = advance_frame(&world, &held(&[Button::Right]), &tuning);
    let world = advance_frame(&world, &held(&[Button::Right]), &tuning);
    assert_eq!(world.player.pos, Vec2::new(374.0, 360.0));
}

// ── Reset ─────────────────────────────────────────────────────────────────────

#[test]
fn reset_edge_arms_the_attack_run() {
    let tuning = Tuning::default();
    let world = World::new(&tuning);
    let next = advance_frame(&world, &edge(&[Button::Reset]), &tuning);

    // Armed from the spawn point, then the same tick's chase step runs
    assert!(next.enemy.is_attacking());
    assert!(close(next.enemy.pos.x, 793.0));
    assert_eq!(next.enemy.pos.y, 360.0);
    assert_eq!(next.distance, 440.0);
    assert_eq!(next.frames_in_range, 0);
}

#[test]
fn reset_requires_a_fresh_press() {
    let tuning = Tuning::default();
    let world = World::new(&tuning);
    let next = advance_frame(&world, &held(&[Button::Reset]), &tuning);
    assert_eq!(next.enemy.phase, EnemyPhase::Idle);
    assert_eq!(next.enemy.pos, tuning.enemy_spawn);
}

#[test]
fn reset_cancels_an_ongoing_knockback() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.enemy.pos = Vec2::new(1000.0, 360.0);
    world.enemy.phase = EnemyPhase::Knockback {
        direction: Vec2::new(1.0, 0.0),
        traveled: 50.0,
    };

    let next = advance_frame(&world, &edge(&[Button::Reset]), &tuning);
    assert!(next.enemy.is_attacking());
    assert!(close(next.enemy.pos.x, 793.0));
}

#[test]
fn reset_mid_run_restarts_from_the_spawn_point() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world = advance_frame(&world, &edge(&[Button::Reset]), &tuning);
    for _ in 0..10 {
        world = advance_frame(&world, &idle(), &tuning);
    }
    assert!(world.enemy.pos.x < 740.0);

    let next = advance_frame(&world, &edge(&[Button::Reset]), &tuning);
    assert!(close(next.enemy.pos.x, 793.0));
}

#[test]
fn idle_enemy_stays_put() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    for _ in 0..5 {
        world = advance_frame(&world, &idle(), &tuning);
    }
    assert_eq!(world.enemy.pos, tuning.enemy_spawn);
    assert_eq!(world.enemy.phase, EnemyPhase::Idle);
    assert_eq!(world.frames_in_range, 0);
    assert_eq!(world.distance, 440.0);
}

// ── Distance sample and the guard-window counter ──────────────────────────────

#[test]
fn distance_is_sampled_before_the_chase() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.enemy.pos = Vec2::new(460.0, 360.0);
    world.enemy.phase = EnemyPhase::Attacking;

    let next = advance_frame(&world, &idle(), &tuning);
    // The sample sees the enemy where the tick started, not where it
    // chased to
    assert_eq!(next.distance, 100.0);
    assert!(close(next.enemy.pos.x, 453.0));
}

#[test]
fn counter_counts_consecutive_in_reach_ticks() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.enemy.pos = Vec2::new(460.0, 360.0); // distance 100, inside 130
    world.enemy.phase = EnemyPhase::Attacking;

    let world = advance_frame(&world, &idle(), &tuning);
    assert_eq!(world.frames_in_range, 1);
    let world = advance_frame(&world, &idle(), &tuning);
    assert_eq!(world.frames_in_range, 2);
}

#[test]
fn counter_resets_the_tick_reach_is_lost() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.enemy.pos = Vec2::new(600.0, 360.0); // distance 240
    world.enemy.phase = EnemyPhase::Attacking;
    world.frames_in_range = 5;

    let next = advance_frame(&world, &idle(), &tuning);
    assert_eq!(next.frames_in_range, 0);
}

#[test]
fn counter_stays_zero_unless_attacking() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.enemy.pos = Vec2::new(460.0, 360.0);
    world.frames_in_range = 3;

    // Idle in reach
    let next = advance_frame(&world, &idle(), &tuning);
    assert_eq!(next.frames_in_range, 0);

    // Knocked back in reach
    world.enemy.phase = EnemyPhase::Knockback {
        direction: Vec2::new(1.0, 0.0),
        traveled: 0.0,
    };
    let next = advance_frame(&world, &idle(), &tuning);
    assert_eq!(next.frames_in_range, 0);
}

// ── Guard feedback ────────────────────────────────────────────────────────────

#[test]
fn overlap_reads_as_hit() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.enemy.pos = Vec2::new(400.0, 360.0); // distance 40 < 128
    let next = advance_frame(&world, &idle(), &tuning);
    assert_eq!(next.player.feedback, GuardFeedback::Hit);
}

#[test]
fn clear_of_contact_reads_as_neutral() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.player.feedback = GuardFeedback::Hit;
    let next = advance_frame(&world, &idle(), &tuning);
    assert_eq!(next.player.feedback, GuardFeedback::Neutral);
}

#[test]
fn parried_flash_survives_the_knockback_flight() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.player.feedback = GuardFeedback::Parried;
    world.enemy.pos = Vec2::new(600.0, 360.0);
    world.enemy.phase = EnemyPhase::Knockback {
        direction: Vec2::new(1.0, 0.0),
        traveled: 0.0,
    };

    let next = advance_frame(&world, &idle(), &tuning);
    assert_eq!(next.player.feedback, GuardFeedback::Parried);
    assert_eq!(next.enemy.pos, Vec2::new(610.0, 360.0));
}

#[test]
fn contact_overrides_the_parried_flash() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.player.feedback = GuardFeedback::Parried;
    world.enemy.pos = Vec2::new(420.0, 360.0); // still overlapping
    world.enemy.phase = EnemyPhase::Knockback {
        direction: Vec2::new(1.0, 0.0),
        traveled: 0.0,
    };

    let next = advance_frame(&world, &idle(), &tuning);
    assert_eq!(next.player.feedback, GuardFeedback::Hit);
}

#[test]
fn flash_clears_once_the_enemy_rests() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.player.feedback = GuardFeedback::Parried;
    // Enemy already back at rest, out of contact
    let next = advance_frame(&world, &idle(), &tuning);
    assert_eq!(next.player.feedback, GuardFeedback::Neutral);
}

// ── Parry resolution inside the tick ──────────────────────────────────────────

#[test]
fn parry_tick_settles_every_field_at_once() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.enemy.pos = Vec2::new(460.0, 360.0);
    world.enemy.phase = EnemyPhase::Attacking;

    let next = advance_frame(&world, &edge(&[Button::Guard]), &tuning);

    // Chase ran first (460 -> 453), then the parry flipped the phase and
    // the knockback already moved 10 back out
    assert_eq!(next.player.feedback, GuardFeedback::Parried);
    assert!(next.enemy.in_knockback());
    assert!(close(next.enemy.pos.x, 463.0));
    assert_eq!(next.enemy.pos.y, 360.0);
    // Chase velocity is left in place until the knockback ends
    assert!(close(next.enemy.velocity.x, -7.0));
    assert_eq!(next.frames_in_range, 0);
    assert_eq!(next.distance, 100.0);
}

#[test]
fn press_after_the_window_is_a_whiff() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.enemy.pos = Vec2::new(460.0, 360.0);
    world.enemy.phase = EnemyPhase::Attacking;
    world.frames_in_range = 3;

    let next = advance_frame(&world, &edge(&[Button::Guard]), &tuning);
    assert!(next.enemy.is_attacking());
    assert_eq!(next.frames_in_range, 4);
    // Overlapping after the chase, so the whiff shows as a hit
    assert_eq!(next.player.feedback, GuardFeedback::Hit);
}

#[test]
fn held_guard_does_not_parry() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);
    world.enemy.pos = Vec2::new(460.0, 360.0);
    world.enemy.phase = EnemyPhase::Attacking;

    let next = advance_frame(&world, &held(&[Button::Guard]), &tuning);
    assert!(next.enemy.is_attacking());
    assert_ne!(next.player.feedback, GuardFeedback::Parried);
}

#[test]
fn quit_is_invisible_to_the_simulation() {
    let tuning = Tuning::default();
    let world = World::new(&tuning);
    let next = advance_frame(&world, &edge(&[Button::Quit]), &tuning);
    assert_eq!(next.player.pos, world.player.pos);
    assert_eq!(next.enemy.phase, EnemyPhase::Idle);
    assert_eq!(next.enemy.pos, world.enemy.pos);
}

// ── A whole round, scripted ───────────────────────────────────────────────────

#[test]
fn full_round_from_reset_to_rest() {
    let tuning = Tuning::default();
    let mut world = World::new(&tuning);

    // Arm the run, then wait for the enemy to chase into reach
    world = advance_frame(&world, &edge(&[Button::Reset]), &tuning);
    assert!(world.enemy.is_attacking());
    while world.frames_in_range == 0 {
        assert!(world.frame < 120, "enemy never reached the guard band");
        world = advance_frame(&world, &idle(), &tuning);
    }
    assert!(world.distance < 130.0);

    // Guard on the next tick, still inside the window
    world = advance_frame(&world, &edge(&[Button::Guard]), &tuning);
    assert_eq!(world.player.feedback, GuardFeedback::Parried);
    assert!(world.enemy.in_knockback());
    assert_eq!(world.frames_in_range, 0);

    // Ride the knockback out; 200 units at 10 per tick, the first 10
    // already covered on the parry tick itself
    let mut steps = 0;
    while world.enemy.in_knockback() {
        assert!(steps < 25, "knockback never came to rest");
        world = advance_frame(&world, &idle(), &tuning);
        steps += 1;
    }
    assert!((19..=20).contains(&steps));
    assert_eq!(world.enemy.phase, EnemyPhase::Idle);
    assert_eq!(world.enemy.velocity, Vec2::ZERO);

    // One more tick out of contact settles the feedback
    world = advance_frame(&world, &idle(), &tuning);
    assert_eq!(world.player.feedback, GuardFeedback::Neutral);
}
