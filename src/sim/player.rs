//! The human-controlled player
//!
//! Movement is acceleration-driven with per-frame ground friction, a speed
//! cap, and a jump with variable height (holding the float key softens
//! gravity). The racket swing resolves on key *release*: a reach point is
//! mirrored by the facing side and tested against the ball by squared
//! distance, with grounded swings producing a topspin groundstroke and
//! airborne swings a spike. Two racket entities trail the body every frame.

use glam::Vec3;

use crate::consts::*;
use crate::camera::Camera;
use crate::render::DrawContext;
use crate::{add_length, set_length};

use super::ball::Ball;
use super::entity::Entity;
use super::tick::TickInput;

#[derive(Debug, Clone)]
pub struct Player {
    entity: Entity,
    velocity: Vec3,
    facing_right: bool,
    /// Time left on the last swing's cooldown. Ticks down every frame;
    /// informational only, it does not gate the next swing.
    swing_cooldown: f32,
    racket_head: Entity,
    racket_handle: Entity,
}

impl Player {
    pub fn new(body: Entity, racket_head: Entity, racket_handle: Entity) -> Self {
        Self {
            entity: body,
            velocity: Vec3::ZERO,
            facing_right: true,
            swing_cooldown: 0.0,
            racket_head,
            racket_handle,
        }
    }

    pub fn update(&mut self, dt: f32, input: &TickInput, mut ball: Option<&mut Ball>) {
        // accelerate from input; diagonals are normalized to the same
        // acceleration magnitude before being added
        let mut move_direction = Vec3::ZERO;
        if input.move_forward {
            move_direction.z += 1.0;
        }
        if input.move_back {
            move_direction.z -= 1.0;
        }
        if input.move_left {
            move_direction.x -= 1.0;
        }
        if input.move_right {
            move_direction.x += 1.0;
        }

        // mid-swing direction input must not flip the racket side
        let swinging = input.swing_held || input.swing_released;
        if !swinging {
            if input.move_right {
                self.facing_right = true;
            } else if input.move_left {
                self.facing_right = false;
            }
        }

        if move_direction != Vec3::ZERO {
            self.velocity += set_length(move_direction, PLAYER_ACCEL * dt);
        }

        let grounded = self.entity.transform().position().y <= PLAYER_MIN_Y;

        if grounded {
            // shed speed toward zero; the dot-product check catches the
            // frame where friction would push the velocity past zero
            let last_velocity = self.velocity;
            self.velocity = add_length(self.velocity, -GROUND_FRICTION);
            if last_velocity.dot(self.velocity) < 0.0 {
                self.velocity = Vec3::ZERO;
            }
        } else {
            let gravity_scale = if input.float_held { FLOAT_GRAVITY_SCALE } else { 1.0 };
            self.velocity.y -= GRAVITY * gravity_scale * dt;
        }

        // cap horizontal speed; winding up a swing slows the strafe
        let max_speed = if input.swing_held {
            PLAYER_SWING_MAX_SPEED
        } else {
            PLAYER_MAX_SPEED
        };
        let horizontal = Vec3::new(self.velocity.x, 0.0, self.velocity.z);
        if horizontal.length() > max_speed {
            let capped = set_length(horizontal, max_speed);
            self.velocity.x = capped.x;
            self.velocity.z = capped.z;
        }

        if grounded && input.jump_pressed {
            self.velocity.y = JUMP_SPEED;
        }

        // move in local space
        let step = self.velocity * dt;
        self.entity.transform_mut().move_relative(step);

        // keep the body inside the court box: floor, side walls, the
        // forbidden zone at the net, and the back wall
        let mut pos = self.entity.transform().position();
        if pos.y < PLAYER_MIN_Y {
            pos.y = PLAYER_MIN_Y;
            self.velocity.y = 0.0;
        }
        pos.x = pos.x.clamp(-AREA_HALF_WIDTH, AREA_HALF_WIDTH);
        pos.z = pos.z.clamp(-AREA_HALF_HEIGHT, -NET_STANDOFF);
        self.entity.transform_mut().set_position(pos);

        self.swing_cooldown = (self.swing_cooldown - dt).max(0.0);

        // the swing lands on key release, not key press
        if input.swing_released {
            self.swing_cooldown = SWING_COOLDOWN;
            if let Some(ball) = ball.as_deref_mut() {
                self.try_hit(pos, input, ball);
            }
        }

        // rackets trail the body, mirrored by facing
        let facing = self.facing_sign();
        self.racket_handle
            .transform_mut()
            .set_position(pos + Vec3::new(facing * RACKET_HANDLE_X, 0.0, 0.0));
        self.racket_head
            .transform_mut()
            .set_position(pos + Vec3::new(facing * RACKET_HEAD_X, 0.0, 0.0));
    }

    fn try_hit(&self, pos: Vec3, input: &TickInput, ball: &mut Ball) {
        if !ball.is_active() {
            return;
        }

        let reach = pos + Vec3::new(self.facing_sign() * SWING_REACH_X, 0.0, SWING_REACH_Z);
        if (ball.position() - reach).length_squared() >= SWING_RADIUS_SQ {
            return;
        }

        let aim_x = if input.move_left {
            -AIM_NUDGE
        } else if input.move_right {
            AIM_NUDGE
        } else {
            0.0
        };

        let grounded = pos.y <= PLAYER_MIN_Y;
        let impulse = if grounded {
            // topspin groundstroke with a fixed vertical launch
            Vec3::new(aim_x, GROUNDSTROKE_VY, GROUNDSTROKE_VZ)
        } else {
            // spike: flatter and deeper the higher the contact point
            Vec3::new(aim_x, SPIKE_BASE_VY - pos.y, SPIKE_BASE_VZ + pos.y * 0.5)
        };
        ball.hit(impulse, true);
    }

    pub fn draw(&mut self, ctx: &mut dyn DrawContext, camera: &Camera) {
        self.entity.draw(ctx, camera);
        self.racket_head.draw(ctx, camera);
        self.racket_handle.draw(ctx, camera);
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn swing_cooldown(&self) -> f32 {
        self.swing_cooldown
    }

    pub fn racket_head(&self) -> &Entity {
        &self.racket_head
    }

    pub fn racket_handle(&self) -> &Entity {
        &self.racket_handle
    }

    fn facing_sign(&self) -> f32 {
        if self.facing_right { 1.0 } else { -1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::entity::{MaterialId, MeshId};

    fn test_player() -> Player {
        let mut body = Entity::new(MeshId(0), MaterialId(0));
        body.transform_mut()
            .set_position(Vec3::new(0.0, PLAYER_MIN_Y, -COURT_HALF_HEIGHT - 0.5));
        Player::new(
            body,
            Entity::new(MeshId(1), MaterialId(1)),
            Entity::new(MeshId(2), MaterialId(1)),
        )
    }

    fn test_ball_at(pos: Vec3) -> Ball {
        let mut ball = Ball::new(MeshId(3), MaterialId(2));
        ball.serve(Vec3::ZERO);
        ball.entity_mut().transform_mut().set_position(pos);
        ball
    }

    #[test]
    fn test_grounded_swing_hits_with_groundstroke() {
        let mut player = test_player();
        let body = player.entity().transform().position();
        // ball sitting right on the racket's reach point (facing right)
        let mut ball = test_ball_at(body + Vec3::new(SWING_REACH_X, 0.0, SWING_REACH_Z));

        let input = TickInput {
            swing_released: true,
            ..Default::default()
        };
        player.update(SIM_DT, &input, Some(&mut ball));

        assert!(ball.last_hit_by_player());
        let v = ball.velocity();
        assert_eq!(v.y, GROUNDSTROKE_VY);
        assert_eq!(v.z, GROUNDSTROKE_VZ);
        assert_eq!(v.x, 0.0);
        assert_eq!(player.swing_cooldown(), SWING_COOLDOWN);
    }

    #[test]
    fn test_swing_misses_out_of_reach_ball() {
        let mut player = test_player();
        let mut ball = test_ball_at(Vec3::new(10.0, 5.0, 5.0));
        let before = ball.velocity();

        let input = TickInput {
            swing_released: true,
            ..Default::default()
        };
        player.update(SIM_DT, &input, Some(&mut ball));
        assert_eq!(ball.velocity(), before);
    }

    #[test]
    fn test_airborne_swing_spikes() {
        let mut player = test_player();
        let mut pos = player.entity().transform().position();
        pos.y = 3.0;
        player.entity_mut().transform_mut().set_position(pos);
        let mut ball = test_ball_at(pos + Vec3::new(SWING_REACH_X, 0.0, SWING_REACH_Z));

        let input = TickInput {
            swing_released: true,
            ..Default::default()
        };
        player.update(SIM_DT, &input, Some(&mut ball));

        let v = ball.velocity();
        // one tick of fall happens before the swing resolves
        assert!((v.y - (SPIKE_BASE_VY - 3.0)).abs() < 0.05);
        assert!((v.z - (SPIKE_BASE_VZ + 1.5)).abs() < 0.05);
    }

    #[test]
    fn test_aim_nudge_from_held_direction() {
        let mut player = test_player();
        let body = player.entity().transform().position();
        let mut ball = test_ball_at(body + Vec3::new(SWING_REACH_X, 0.0, SWING_REACH_Z));

        let input = TickInput {
            swing_released: true,
            move_left: true,
            ..Default::default()
        };
        player.update(SIM_DT, &input, Some(&mut ball));
        assert_eq!(ball.velocity().x, -AIM_NUDGE);
        // holding left during the swing must not flip the facing
        assert!(player.facing_right());
    }

    #[test]
    fn test_facing_follows_input_when_not_swinging() {
        let mut player = test_player();
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        player.update(SIM_DT, &input, None);
        assert!(!player.facing_right());
        assert!(player.racket_head().transform().position().x < -1.0);
    }

    #[test]
    fn test_speed_caps_and_side_wall_clamp() {
        let mut player = test_player();
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..600 {
            player.update(SIM_DT, &input, None);
        }
        assert!((player.velocity().x - PLAYER_MAX_SPEED).abs() < 0.1);
        assert_eq!(player.entity().transform().position().x, AREA_HALF_WIDTH);
    }

    #[test]
    fn test_net_standoff_clamp() {
        let mut player = test_player();
        let input = TickInput {
            move_forward: true,
            ..Default::default()
        };
        for _ in 0..600 {
            player.update(SIM_DT, &input, None);
        }
        assert_eq!(player.entity().transform().position().z, -NET_STANDOFF);
    }

    #[test]
    fn test_jump_and_float_fall_slower() {
        let jump = TickInput {
            jump_pressed: true,
            ..Default::default()
        };

        let mut floater = test_player();
        floater.update(SIM_DT, &jump, None);
        assert_eq!(floater.velocity().y, JUMP_SPEED);

        let mut dropper = test_player();
        dropper.update(SIM_DT, &jump, None);

        let float_input = TickInput {
            float_held: true,
            ..Default::default()
        };
        for _ in 0..30 {
            floater.update(SIM_DT, &float_input, None);
            dropper.update(SIM_DT, &TickInput::default(), None);
        }
        // softened gravity leaves the floater higher and still rising faster
        assert!(floater.velocity().y > dropper.velocity().y);
        assert!(
            floater.entity().transform().position().y > dropper.entity().transform().position().y
        );
    }

    #[test]
    fn test_friction_stops_at_zero() {
        let mut player = test_player();
        // one burst of input, then let friction drain it
        let push = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            player.update(SIM_DT, &push, None);
        }
        for _ in 0..60 {
            player.update(SIM_DT, &TickInput::default(), None);
        }
        assert_eq!(player.velocity(), Vec3::ZERO);
    }
}
