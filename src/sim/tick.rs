//! Fixed timestep simulation tick
//!
//! One call advances the whole match by one step: player (may strike the
//! ball) -> ball flight and scoring -> opponent AI (may strike back) ->
//! camera follow. The draw pass is separate; see [`GameState::draw`].

use glam::Vec3;
use rand::Rng;

use crate::consts::*;

use super::ball::{Outcome, Side};
use super::state::{GameEvent, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_forward: bool,
    pub move_back: bool,
    /// Edge: jump key went down this tick
    pub jump_pressed: bool,
    /// Held: softens gravity for a higher jump
    pub float_held: bool,
    /// Held: swing wind-up
    pub swing_held: bool,
    /// Edge: swing key came up this tick - the swing itself
    pub swing_released: bool,
    /// Edge: serve key went down this tick
    pub serve_pressed: bool,
    /// Idle/demo mode - a scripted stand-in plays the player's side
    pub idle_mode: bool,
}

/// Advance the match by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        drive_idle_player(state, &mut input);
    }
    let input = &input;

    state.player.update(dt, input, Some(&mut state.ball));

    if state.ball.is_active() {
        match state.ball.update(dt) {
            Outcome::PointTo(side) => award_point(state, side),
            Outcome::InPlay => {}
        }
        update_enemy(state, dt);
    } else {
        if input.serve_pressed {
            let from = state.player.entity().transform().position();
            state.ball.serve(from);
            log::info!("serve from x = {:.1}", from.x);
        }
        // the server stays pinned to the baseline between points
        let mut pos = state.player.entity().transform().position();
        pos.z = -COURT_HALF_HEIGHT - 0.5;
        state.player.entity_mut().transform_mut().set_position(pos);
    }

    state
        .camera
        .follow(state.player.entity().transform().position());
}

fn award_point(state: &mut GameState, side: Side) {
    let match_over = state.score.score_point(side);
    let title = state.title();
    log::info!("point to {side:?} - {title}");
    state.events.push(GameEvent::PointScored {
        side,
        title: title.clone(),
    });
    if match_over {
        log::info!("game over, scores reset");
        state.events.push(GameEvent::MatchOver { title });
    }
}

/// Opponent AI: chase the ball's x, jump for deep lobs, swat anything that
/// drifts into the hitting window.
fn update_enemy(state: &mut GameState, dt: f32) {
    let ball_pos = state.ball.position();
    let pos = state.enemy.transform().position();

    // proportional pursuit with a dead-zone so the enemy doesn't jitter
    if pos.x > ball_pos.x + ENEMY_DEADZONE {
        state
            .enemy
            .transform_mut()
            .move_absolute(Vec3::new(-ENEMY_SPEED * dt, 0.0, 0.0));
    } else if pos.x < ball_pos.x - ENEMY_DEADZONE {
        state
            .enemy
            .transform_mut()
            .move_absolute(Vec3::new(ENEMY_SPEED * dt, 0.0, 0.0));
    }

    // rise to intercept a deep, high ball that is still above the enemy;
    // settle back down once it is gone
    if ball_pos.z > COURT_HALF_HEIGHT - ENEMY_JUMP_DEPTH
        && ball_pos.y > ENEMY_JUMP_MIN_Y
        && ball_pos.y > pos.y
    {
        state
            .enemy
            .transform_mut()
            .move_absolute(Vec3::new(0.0, 2.0 * ENEMY_SPEED * dt, 0.0));
    } else if pos.y > ENEMY_REST_Y {
        state
            .enemy
            .transform_mut()
            .move_absolute(Vec3::new(0.0, -2.0 * ENEMY_SPEED * dt, 0.0));
    }

    // rackets mirror the body on both sides
    let pos = state.enemy.transform().position();
    let [left_handle, right_handle, left_head, right_head] = &mut state.enemy_rackets;
    left_handle
        .transform_mut()
        .set_position(pos + Vec3::new(-RACKET_HANDLE_X, 0.0, 0.0));
    right_handle
        .transform_mut()
        .set_position(pos + Vec3::new(RACKET_HANDLE_X, 0.0, 0.0));
    left_head
        .transform_mut()
        .set_position(pos + Vec3::new(-RACKET_HEAD_X, 0.0, 0.0));
    right_head
        .transform_mut()
        .set_position(pos + Vec3::new(RACKET_HEAD_X, 0.0, 0.0));

    // swat the ball once it drifts into the hitting window
    if (ball_pos.z - COURT_HALF_HEIGHT).abs() < ENEMY_HIT_DEPTH
        && (ball_pos.x - pos.x).abs() < ENEMY_HIT_X
        && (ball_pos.y - pos.y).abs() < ENEMY_HIT_Y
    {
        // returns are biased cross-court, away from the side the enemy
        // stands on
        let cross_bias = if pos.x > 0.0 { -1.0 } else { 1.0 };
        let vx = state.rng.random::<f32>() * 8.0 - 4.0 + cross_bias;
        state
            .ball
            .hit(Vec3::new(vx, ENEMY_RETURN_VY, -ENEMY_RETURN_VZ), false);
    }
}

/// Stand-in player for the self-playing demo: serve when the ball is dead,
/// shadow its x, swing when it comes into reach.
fn drive_idle_player(state: &GameState, input: &mut TickInput) {
    if !state.ball.is_active() {
        input.serve_pressed = true;
        return;
    }

    let ball_pos = state.ball.position();
    let pos = state.player.entity().transform().position();
    if ball_pos.x > pos.x + 0.5 {
        input.move_right = true;
    } else if ball_pos.x < pos.x - 0.5 {
        input.move_left = true;
    }

    let facing = if state.player.facing_right() { 1.0 } else { -1.0 };
    let reach = pos + Vec3::new(facing * SWING_REACH_X, 0.0, SWING_REACH_Z);
    if (ball_pos - reach).length_squared() < SWING_RADIUS_SQ {
        input.swing_released = true;
    }
}
