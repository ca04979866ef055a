//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by exactly one rendered frame.
//! There is no fixed timestep: the host calls `advance` once per animation
//! frame and the frame counter is the only clock.

use rand::Rng;

use super::collision::{self, GroundContact};
use super::state::{GameEvent, GameState, Gate, Lifecycle};
use crate::consts::*;

/// Gap between a gate's barriers for a given score
///
/// Step function: the higher the score, the tighter the gap.
pub fn gap_for_score(score: u32, height: f64) -> f64 {
    let ratio = GAP_BANDS
        .iter()
        .find(|(limit, _)| score < *limit)
        .map(|(_, ratio)| *ratio)
        .unwrap_or(GAP_RATIO_FLOOR);
    height * ratio
}

/// Advance the game by one frame
///
/// Background always scrolls and the frame counter always ticks; physics and
/// gates only move while running. Whether the frame is a running frame is
/// decided once, up front, so a collision in the avatar update still lets the
/// gates finish this frame.
pub fn advance(state: &mut GameState) {
    scroll_background(state);

    if state.is_running() {
        update_avatar(state);
        if state
            .frame_counter
            .is_multiple_of(state.tuning.spawn_interval_frames)
        {
            spawn_gate(state);
        }
        advance_gates(state);
    }

    state.frame_counter += 1;
}

fn scroll_background(state: &mut GameState) {
    state.bg_offset -= state.tuning.bg_scroll_speed(&state.viewport);
    if state.bg_offset <= -state.viewport.width {
        state.bg_offset = 0.0;
    }
}

/// Integrate gravity and check the ground and ceiling
pub fn update_avatar(state: &mut GameState) {
    let avatar = &mut state.avatar;
    avatar.velocity += state.tuning.gravity;
    avatar.y += avatar.velocity;

    if let GroundContact::Hit { resting_y } = collision::ground_contact(&state.avatar, &state.viewport)
    {
        state.avatar.y = resting_y;
        trigger_game_over(state);
    }

    // No clamp at the ceiling, the run is over anyway
    if collision::hits_ceiling(&state.avatar) {
        trigger_game_over(state);
    }
}

/// Append a new gate at the right edge of the screen
///
/// The gap is fixed here from the current score and never recomputed.
pub fn spawn_gate(state: &mut GameState) {
    let height = state.viewport.height;
    let gap = gap_for_score(state.score, height);
    let top_edge = state.rng().random::<f64>() * (height * GATE_TOP_RANGE_RATIO);
    let gate = Gate::new(state.viewport.width, top_edge, gap);

    log::debug!(
        "Spawned gate at frame {}: top {:.1}, gap {:.1}",
        state.frame_counter,
        gate.top_edge,
        gap
    );
    state.gates.push(gate);
}

/// Move every gate, then collide, score and cull it, in one pass
///
/// Survivors are collected into a fresh list so culling never skips the
/// next gate.
pub fn advance_gates(state: &mut GameState) {
    let speed = state.tuning.pipe_speed(&state.viewport);
    let gate_width = state.viewport.gate_width();

    let gates = std::mem::take(&mut state.gates);
    let mut survivors = Vec::with_capacity(gates.len());

    for mut gate in gates {
        gate.x -= speed;

        if collision::hits_gate(&state.avatar, &gate, gate_width) {
            trigger_game_over(state);
        }

        if !gate.passed && collision::gate_cleared(&state.avatar, &gate, gate_width) {
            gate.passed = true;
            state.score += 1;
            state.push_event(GameEvent::Scored { score: state.score });
        }

        if !collision::gate_offscreen(&gate, gate_width) {
            survivors.push(gate);
        }
    }

    state.gates = survivors;
}

/// End the run. Only the first call of a run has any effect.
pub fn trigger_game_over(state: &mut GameState) {
    if state.lifecycle != Lifecycle::Running {
        return;
    }
    state.lifecycle = Lifecycle::GameOver;
    log::info!("Game over at frame {} with score {}", state.frame_counter, state.score);
    state.push_event(GameEvent::GameOver {
        final_score: state.score,
    });
}

/// Clear the board and begin a new run
pub fn reset(state: &mut GameState) {
    state.gates.clear();
    let viewport = state.viewport;
    state.avatar.reset(&viewport);
    state.score = 0;
    state.frame_counter = 0;
    state.lifecycle = Lifecycle::Running;
    state.push_event(GameEvent::RunStarted);
    log::info!(
        "Run started ({} tuning)",
        viewport.device_class().as_str()
    );
}

/// Start input: begins a run from Idle or GameOver, ignored while running
///
/// Returns true if a new run began.
pub fn start(state: &mut GameState) -> bool {
    if state.is_running() {
        return false;
    }
    reset(state);
    true
}

/// Flap input: only has an effect while running
///
/// Returns true if the impulse was applied.
pub fn flap(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    let impulse = state.tuning.jump_impulse;
    state.avatar.flap(impulse);
    true
}

/// The single action key/tap: start if needed, then flap
///
/// A press that starts a run also flaps on the same input.
pub fn press(state: &mut GameState) {
    start(state);
    flap(state);
}

/// Demo pilot: flap when falling below the middle of the next gap
///
/// Aims a little low since a flap throws the avatar upward.
pub fn autopilot_wants_flap(state: &GameState) -> bool {
    if !state.is_running() {
        return false;
    }

    let gate_width = state.viewport.gate_width();
    let avatar = &state.avatar;
    let target_y = state
        .gates
        .iter()
        .find(|g| g.right_edge(gate_width) >= avatar.x - avatar.radius)
        .map(|g| (g.top_edge + g.bottom_edge) / 2.0 + g.gap() * 0.15)
        .unwrap_or(state.viewport.height / 2.0);

    avatar.y > target_y && avatar.velocity >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Viewport;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), 12345);
        assert!(start(&mut state));
        state.drain_events();
        state
    }

    #[test]
    fn test_gap_for_score_bands() {
        let h = 600.0;
        assert!((gap_for_score(0, h) - 0.30 * h).abs() < 1e-9);
        assert!((gap_for_score(99, h) - 0.30 * h).abs() < 1e-9);
        assert!((gap_for_score(100, h) - 0.25 * h).abs() < 1e-9);
        assert!((gap_for_score(150, h) - 0.25 * h).abs() < 1e-9);
        assert!((gap_for_score(250, h) - 0.20 * h).abs() < 1e-9);
        assert!((gap_for_score(400, h) - 0.17 * h).abs() < 1e-9);
        assert!((gap_for_score(499, h) - 0.17 * h).abs() < 1e-9);
        assert!((gap_for_score(500, h) - 0.14 * h).abs() < 1e-9);
        assert!((gap_for_score(999, h) - 0.14 * h).abs() < 1e-9);
    }

    #[test]
    fn test_gap_at_score_50_on_800x600() {
        assert!((gap_for_score(50, 600.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_gate_spawns_on_frame_zero_and_scrolls() {
        let mut state = running_state();
        assert_eq!(state.frame_counter, 0);

        advance(&mut state);
        assert_eq!(state.gates.len(), 1);
        assert!((state.gates[0].gap() - 180.0).abs() < 1e-9);
        assert!(state.gates[0].top_edge >= 0.0 && state.gates[0].top_edge < 300.0);

        for _ in 0..9 {
            advance(&mut state);
        }
        assert_eq!(state.frame_counter, 10);
        assert_eq!(state.gates.len(), 1);
        assert!((state.gates[0].x - 768.0).abs() < 1e-9);
        assert_eq!(state.lifecycle, Lifecycle::Running);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = running_state();
        // Keep the avatar hovering so the run survives long enough
        for _ in 0..=100 {
            state.avatar.velocity = 0.0;
            state.avatar.y = 300.0;
            advance(&mut state);
        }
        // Frames 0 and 100 spawned
        assert_eq!(state.frame_counter, 101);
        assert_eq!(state.gates.len(), 2);
    }

    #[test]
    fn test_gravity_integration() {
        let mut state = running_state();
        update_avatar(&mut state);
        assert!((state.avatar.velocity - 0.25).abs() < 1e-12);
        assert!((state.avatar.y - 300.25).abs() < 1e-12);
        update_avatar(&mut state);
        assert!((state.avatar.velocity - 0.5).abs() < 1e-12);
        assert!((state.avatar.y - 300.75).abs() < 1e-12);
    }

    #[test]
    fn test_ceiling_collision_does_not_clamp() {
        let mut state = running_state();
        state.avatar.y = 0.0;
        state.avatar.velocity = -1.0;
        assert!((state.avatar.radius - 18.0).abs() < 1e-9);

        update_avatar(&mut state);
        assert_eq!(state.lifecycle, Lifecycle::GameOver);
        assert!((state.avatar.y - -0.75).abs() < 1e-12);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver { final_score: 0 }]
        );
    }

    #[test]
    fn test_ground_collision_clamps() {
        let mut state = running_state();
        state.avatar.y = 530.0;
        state.avatar.velocity = 0.0;

        update_avatar(&mut state);
        assert_eq!(state.lifecycle, Lifecycle::GameOver);
        assert!((state.avatar.y - 522.0).abs() < 1e-9);
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut state = running_state();
        state.score = 7;
        trigger_game_over(&mut state);
        trigger_game_over(&mut state);
        assert_eq!(state.lifecycle, Lifecycle::GameOver);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver { final_score: 7 }]
        );
    }

    #[test]
    fn test_simultaneous_collisions_end_run_once() {
        let mut state = running_state();
        // Falling into the ground while inside a gate's columns and above its gap
        state.avatar.y = 535.0;
        state.gates.push(Gate::new(150.0, 600.0, 10.0));
        state.gates.push(Gate::new(140.0, 600.0, 10.0));
        state.frame_counter = 1;

        advance(&mut state);
        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(state.lifecycle, Lifecycle::GameOver);

        // Later frames never trigger it again
        advance(&mut state);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_game_over_freezes_physics_but_not_clock() {
        let mut state = running_state();
        trigger_game_over(&mut state);
        state.gates.push(Gate::new(500.0, 100.0, 180.0));
        let avatar = state.avatar;

        advance(&mut state);
        advance(&mut state);
        assert_eq!(state.avatar, avatar);
        assert_eq!(state.gates[0].x, 500.0);
        assert_eq!(state.frame_counter, 2);
    }

    #[test]
    fn test_idle_frames_tick_clock_only() {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), 1);
        for expected in 1..=5 {
            advance(&mut state);
            assert_eq!(state.frame_counter, expected);
        }
        assert!(state.gates.is_empty());
        assert_eq!(state.avatar.y, 300.0);
        assert_eq!(state.lifecycle, Lifecycle::Idle);
    }

    #[test]
    fn test_flap_while_idle_is_ignored() {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), 1);
        assert!(!flap(&mut state));
        assert_eq!(state.lifecycle, Lifecycle::Idle);
        assert_eq!(state.avatar.velocity, 0.0);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_flap_while_game_over_is_ignored() {
        let mut state = running_state();
        trigger_game_over(&mut state);
        state.avatar.velocity = 3.0;
        assert!(!flap(&mut state));
        assert_eq!(state.avatar.velocity, 3.0);
    }

    #[test]
    fn test_flap_sets_velocity_without_cooldown() {
        let mut state = running_state();
        state.avatar.velocity = 2.0;
        assert!(flap(&mut state));
        assert_eq!(state.avatar.velocity, -6.0);
        update_avatar(&mut state);
        assert!(flap(&mut state));
        assert_eq!(state.avatar.velocity, -6.0);
    }

    #[test]
    fn test_start_while_running_does_not_restart() {
        let mut state = running_state();
        state.score = 5;
        state.frame_counter = 42;
        assert!(!start(&mut state));
        assert_eq!(state.score, 5);
        assert_eq!(state.frame_counter, 42);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_restart_from_game_over_resets_everything() {
        let mut state = running_state();
        state.score = 12;
        state.frame_counter = 999;
        state.avatar.y = 17.0;
        state.avatar.velocity = 4.0;
        state.gates.push(Gate::new(300.0, 10.0, 100.0));
        trigger_game_over(&mut state);
        state.drain_events();

        assert!(start(&mut state));
        assert_eq!(state.score, 0);
        assert_eq!(state.frame_counter, 0);
        assert!(state.gates.is_empty());
        assert_eq!(state.avatar.velocity, 0.0);
        assert_eq!(state.avatar.y, 300.0);
        assert_eq!(state.lifecycle, Lifecycle::Running);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_press_from_idle_starts_and_flaps() {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), 1);
        press(&mut state);
        assert_eq!(state.lifecycle, Lifecycle::Running);
        assert_eq!(state.avatar.velocity, -6.0);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_press_while_running_only_flaps() {
        let mut state = running_state();
        state.score = 3;
        press(&mut state);
        assert_eq!(state.score, 3);
        assert_eq!(state.avatar.velocity, -6.0);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_press_from_game_over_restarts_and_flaps() {
        let mut state = running_state();
        state.score = 7;
        state.gates.push(Gate::new(400.0, 100.0, 180.0));
        trigger_game_over(&mut state);
        state.drain_events();

        press(&mut state);
        assert_eq!(state.lifecycle, Lifecycle::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame_counter, 0);
        assert!(state.gates.is_empty());
        assert_eq!(state.avatar.y, 300.0);
        assert_eq!(state.avatar.velocity, -6.0);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_gate_collides_before_it_scores() {
        let mut state = running_state();
        // After moving 3.2 px the right edge sits at 150: behind the avatar
        // center (160) but still inside its radius, with the gap far below
        state.gates.push(Gate::new(73.2, 400.0, 100.0));

        advance_gates(&mut state);
        assert_eq!(state.lifecycle, Lifecycle::GameOver);
        assert_eq!(state.score, 1);
        assert!(state.gates[0].passed);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::GameOver { final_score: 0 },
                GameEvent::Scored { score: 1 },
            ]
        );
    }

    #[test]
    fn test_scoring_happens_once_per_gate() {
        let mut state = running_state();
        // Right edge at 161, just ahead of the avatar center at 160
        state.gates.push(Gate::new(81.0, 200.0, 180.0));

        advance_gates(&mut state);
        assert_eq!(state.score, 1);
        assert!(state.gates[0].passed);
        assert_eq!(state.lifecycle, Lifecycle::Running);
        assert_eq!(state.drain_events(), vec![GameEvent::Scored { score: 1 }]);

        for _ in 0..10 {
            advance_gates(&mut state);
        }
        assert_eq!(state.score, 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_culling_does_not_skip_next_gate() {
        let mut state = running_state();
        state.gates.push(Gate::new(-79.0, 0.0, 100.0));
        state.gates.push(Gate::new(-78.0, 0.0, 100.0));
        state.gates.push(Gate::new(500.0, 100.0, 180.0));

        advance_gates(&mut state);
        assert_eq!(state.gates.len(), 1);
        assert!((state.gates[0].x - 496.8).abs() < 1e-9);
    }

    #[test]
    fn test_gap_is_fixed_at_spawn() {
        let mut state = running_state();
        state.score = 50;
        spawn_gate(&mut state);
        state.score = 150;
        spawn_gate(&mut state);

        assert!((state.gates[0].gap() - 180.0).abs() < 1e-9);
        assert!((state.gates[1].gap() - 150.0).abs() < 1e-9);
        assert_eq!(state.gates[0].x, 800.0);
        assert!(!state.gates[0].passed);
    }

    #[test]
    fn test_same_seed_same_gates() {
        let mut a = running_state();
        let mut b = running_state();
        for _ in 0..5 {
            spawn_gate(&mut a);
            spawn_gate(&mut b);
        }
        assert_eq!(a.gates, b.gates);
    }

    #[test]
    fn test_background_wraps_at_one_width() {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), 1);
        // 1.2 px per frame on a regular viewport
        advance(&mut state);
        assert!((state.bg_offset - -1.2).abs() < 1e-9);

        state.bg_offset = -799.0;
        advance(&mut state);
        assert_eq!(state.bg_offset, 0.0);
    }

    #[test]
    fn test_compact_viewport_uses_compact_tuning() {
        let mut state = GameState::new(Viewport::new(400.0, 800.0), 1);
        press(&mut state);
        assert_eq!(state.avatar.velocity, -5.0);
        update_avatar(&mut state);
        assert!((state.avatar.velocity - -4.82).abs() < 1e-12);
    }

    #[test]
    fn test_autopilot() {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), 1);
        assert!(!autopilot_wants_flap(&state));

        start(&mut state);
        state.gates.push(Gate::new(400.0, 100.0, 200.0));
        // Target is 200 + 30 = 230
        state.avatar.y = 250.0;
        state.avatar.velocity = 1.0;
        assert!(autopilot_wants_flap(&state));

        state.avatar.velocity = -1.0;
        assert!(!autopilot_wants_flap(&state));

        state.avatar.y = 200.0;
        state.avatar.velocity = 1.0;
        assert!(!autopilot_wants_flap(&state));
    }

    proptest! {
        #[test]
        fn prop_gap_never_widens_with_score(a in 0u32..2000, b in 0u32..2000, h in 1.0f64..4000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(gap_for_score(hi, h) <= gap_for_score(lo, h));
        }

        #[test]
        fn prop_frame_invariants(
            seed in any::<u64>(),
            width in 320.0f64..1920.0,
            height in 320.0f64..1200.0,
            presses in proptest::collection::vec(any::<bool>(), 1..400),
        ) {
            let mut state = GameState::new(Viewport::new(width, height), seed);
            let gate_width = state.viewport.gate_width();

            for pressed in presses {
                if pressed {
                    press(&mut state);
                }
                let before = state.frame_counter;
                let score_before = state.score;
                advance(&mut state);

                prop_assert_eq!(state.frame_counter, before + 1);
                prop_assert!(state.score >= score_before);
                for gate in &state.gates {
                    prop_assert!(gate.right_edge(gate_width) >= 0.0);
                    let gap = gate.gap();
                    prop_assert!(
                        [0.30, 0.25, 0.20, 0.17, 0.14]
                            .iter()
                            .any(|r| (gap - r * height).abs() < 1e-6)
                    );
                }
            }

            // Every game over closes a run that a RunStarted opened
            let mut run_open = false;
            for event in state.drain_events() {
                match event {
                    GameEvent::RunStarted => run_open = true,
                    GameEvent::GameOver { .. } => {
                        prop_assert!(run_open);
                        run_open = false;
                    }
                    GameEvent::Scored { .. } => {}
                }
            }
        }
    }
}
