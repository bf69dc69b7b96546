//! The tennis ball
//!
//! A ball is either inactive (between points, neither simulated nor drawn)
//! or active. While active it carries two bookkeeping flags: who hit it
//! last, and whether the current rally leg has already bounced once. Every
//! point-ending branch deactivates the ball; [`Ball::serve`] puts it back
//! in play.
//!
//! Scoring quirk, kept on purpose: a double bounce awards the point to the
//! *last hitter* (the opponent failed to return in one bounce), while
//! out-of-bounds and own-half landings award it to whoever did *not* hit
//! last (the hitter's error). The asymmetry is game design, not a bug.

use glam::Vec3;

use crate::consts::*;

use super::entity::{Entity, MaterialId, MeshId};

/// Which side of the net a point goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Result of one ball update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    InPlay,
    PointTo(Side),
}

#[derive(Debug, Clone)]
pub struct Ball {
    entity: Entity,
    velocity: Vec3,
    /// Who hit it last: true = player, false = enemy.
    player_hit: bool,
    /// Whether this rally leg has bounced once already - the next bounce
    /// ends the point.
    has_bounced: bool,
    active: bool,
}

impl Ball {
    pub fn new(mesh: MeshId, material: MaterialId) -> Self {
        Self {
            entity: Entity::new(mesh, material),
            velocity: Vec3::ZERO,
            player_hit: false,
            has_bounced: false,
            active: false,
        }
    }

    /// Put the ball back in play above and forward of the server, tossed
    /// straight up. A serve gets no free bounce: landing untouched ends the
    /// point on the very next floor contact.
    pub fn serve(&mut self, from: Vec3) {
        self.entity
            .transform_mut()
            .set_position(from + Vec3::new(0.0, SERVE_HEIGHT, SERVE_REACH));
        self.velocity = Vec3::new(0.0, SERVE_SPEED, 0.0);
        self.player_hit = false;
        self.has_bounced = true;
        self.active = true;
    }

    /// Strike the ball: velocity is replaced by the racket impulse and the
    /// opponent gets a fresh double-bounce budget.
    pub fn hit(&mut self, impulse: Vec3, from_player: bool) {
        self.velocity = impulse;
        self.player_hit = from_player;
        self.has_bounced = false;
    }

    /// Advance the flight by one timestep and report any point scored.
    pub fn update(&mut self, dt: f32) -> Outcome {
        if !self.active {
            return Outcome::InPlay;
        }

        // A huge dt (debugger pause, dropped frames) must not inject a
        // gravity impulse.
        if dt < 1.0 {
            self.velocity.y -= GRAVITY * dt;
        }
        self.entity.transform_mut().move_absolute(self.velocity * dt);

        let mut pos = self.entity.transform().position();

        // floor bounce and the scoring that hangs off it
        if pos.y < BALL_FLOOR_Y && self.velocity.y < 0.0 {
            pos.y = BALL_FLOOR_Y;
            self.entity.transform_mut().set_position(pos);
            self.velocity.y = -self.velocity.y;

            if self.has_bounced {
                // second bounce: the last hitter forced it
                return self.end_point(self.last_hitter());
            }
            self.has_bounced = true;

            let out = pos.x.abs() > COURT_HALF_WIDTH + OUT_BUFFER
                || pos.z.abs() > COURT_HALF_HEIGHT + OUT_BUFFER;
            if out {
                return self.end_point(self.last_hitter().opponent());
            }

            let own_half = if self.player_hit { pos.z < 0.0 } else { pos.z > 0.0 };
            if own_half {
                return self.end_point(self.last_hitter().opponent());
            }
        }

        // side and back walls of the bounding area reflect the ball
        if pos.x.abs() > AREA_HALF_WIDTH {
            pos.x = pos.x.clamp(-AREA_HALF_WIDTH, AREA_HALF_WIDTH);
            self.entity.transform_mut().set_position(pos);
            self.velocity.x = -self.velocity.x;
        }
        if pos.z.abs() > AREA_HALF_HEIGHT {
            pos.z = pos.z.clamp(-AREA_HALF_HEIGHT, AREA_HALF_HEIGHT);
            self.entity.transform_mut().set_position(pos);
            self.velocity.z = -self.velocity.z;
        }

        // into the net, regardless of bounce state
        if pos.z.abs() < NET_HALF_DEPTH && pos.y < NET_TOP_Y {
            return self.end_point(self.last_hitter().opponent());
        }

        Outcome::InPlay
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vec3 {
        self.entity.transform().position()
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn last_hit_by_player(&self) -> bool {
        self.player_hit
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn last_hitter(&self) -> Side {
        if self.player_hit { Side::Player } else { Side::Enemy }
    }

    fn end_point(&mut self, side: Side) -> Outcome {
        self.active = false;
        Outcome::PointTo(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ball() -> Ball {
        Ball::new(MeshId(0), MaterialId(0))
    }

    /// Run updates until a point ends, with a tick cap so a broken sim
    /// fails the test instead of hanging it.
    fn play_out(ball: &mut Ball) -> Side {
        for _ in 0..10_000 {
            if let Outcome::PointTo(side) = ball.update(SIM_DT) {
                return side;
            }
        }
        panic!("ball never ended the point");
    }

    #[test]
    fn test_missed_serve_ends_point_on_first_landing() {
        let mut ball = test_ball();
        ball.serve(Vec3::new(0.0, 1.0, -COURT_HALF_HEIGHT - 0.5));
        assert!(ball.is_active());

        // nobody touches it: the untouched serve counts as a double bounce,
        // and with player_hit = false the "last hitter" is the enemy
        let side = play_out(&mut ball);
        assert_eq!(side, Side::Enemy);
        assert!(!ball.is_active());
    }

    #[test]
    fn test_double_bounce_rewards_last_hitter() {
        let mut ball = test_ball();
        ball.serve(Vec3::new(0.0, 1.0, -COURT_HALF_HEIGHT - 0.5));
        // clean return into the far court, then left alone
        ball.hit(Vec3::new(0.0, 5.0, 12.0), true);

        let side = play_out(&mut ball);
        assert_eq!(side, Side::Player);
        assert!(!ball.is_active());
    }

    #[test]
    fn test_first_bounce_out_wide_gives_non_hitter() {
        let mut ball = test_ball();
        ball.serve(Vec3::new(0.0, 1.0, -COURT_HALF_HEIGHT - 0.5));
        // sprayed way out to the side, lands past the lines on bounce one
        ball.hit(Vec3::new(16.0, 2.0, 8.0), true);

        let side = play_out(&mut ball);
        assert_eq!(side, Side::Enemy);
    }

    #[test]
    fn test_landing_in_own_half_gives_non_hitter() {
        let mut ball = test_ball();
        ball.serve(Vec3::new(0.0, 1.0, -COURT_HALF_HEIGHT - 0.5));
        // weak poke that drops on the hitter's own side of the net
        ball.hit(Vec3::new(0.0, 2.0, 2.0), true);

        let side = play_out(&mut ball);
        assert_eq!(side, Side::Enemy);
    }

    #[test]
    fn test_enemy_landing_own_half_gives_player_point() {
        let mut ball = test_ball();
        ball.serve(Vec3::ZERO);
        ball.entity_mut()
            .transform_mut()
            .set_position(Vec3::new(0.0, 2.0, 12.0));
        ball.hit(Vec3::new(0.0, 2.0, 2.0), false);

        let side = play_out(&mut ball);
        assert_eq!(side, Side::Player);
    }

    #[test]
    fn test_net_collision_gives_non_hitter() {
        let mut ball = test_ball();
        ball.serve(Vec3::ZERO);
        ball.entity_mut()
            .transform_mut()
            .set_position(Vec3::new(0.0, 1.0, -2.0));
        // flat drive straight into the tape
        ball.hit(Vec3::new(0.0, 0.0, 10.0), true);

        let side = play_out(&mut ball);
        assert_eq!(side, Side::Enemy);
    }

    #[test]
    fn test_ball_clears_net_above_tape() {
        let mut ball = test_ball();
        ball.serve(Vec3::ZERO);
        ball.entity_mut()
            .transform_mut()
            .set_position(Vec3::new(0.0, 5.0, -2.0));
        // fast and high: crosses z = 0 well above the net top
        ball.hit(Vec3::new(0.0, 1.0, 20.0), true);

        for _ in 0..30 {
            assert_eq!(ball.update(SIM_DT), Outcome::InPlay);
        }
        assert!(ball.position().z > NET_HALF_DEPTH);
    }

    #[test]
    fn test_side_wall_reflects_velocity() {
        let mut ball = test_ball();
        ball.serve(Vec3::ZERO);
        ball.entity_mut()
            .transform_mut()
            .set_position(Vec3::new(AREA_HALF_WIDTH - 0.1, 5.0, -5.0));
        ball.hit(Vec3::new(30.0, 0.0, 0.0), true);

        let _ = ball.update(SIM_DT);
        assert!(ball.velocity().x < 0.0);
        assert!(ball.position().x <= AREA_HALF_WIDTH);
    }

    #[test]
    fn test_large_dt_skips_gravity() {
        let mut ball = test_ball();
        ball.serve(Vec3::ZERO);
        ball.entity_mut()
            .transform_mut()
            .set_position(Vec3::new(0.0, 50.0, -5.0));
        ball.hit(Vec3::new(1.0, 0.0, 1.0), true);

        let _ = ball.update(2.0);
        // vertical velocity untouched by the dt spike
        assert_eq!(ball.velocity().y, 0.0);
    }

    #[test]
    fn test_inactive_ball_is_not_simulated() {
        let mut ball = test_ball();
        ball.entity_mut()
            .transform_mut()
            .set_position(Vec3::new(0.0, 10.0, 0.0));
        let before = ball.position();
        assert_eq!(ball.update(SIM_DT), Outcome::InPlay);
        assert_eq!(ball.position(), before);
    }
}
