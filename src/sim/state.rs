//! Game state and score bookkeeping
//!
//! [`GameState`] is the single owner of every entity in the match: the court
//! dressing, both players, the ball, the follow camera, the seeded RNG and
//! the score. Everything else borrows from it for the duration of a frame.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::camera::Camera;
use crate::consts::*;
use crate::render::DrawContext;

use super::ball::{Ball, Side};
use super::entity::{Entity, MaterialId, MeshId};
use super::player::Player;

/// Mesh and material handles the external renderer resolves. The simulation
/// only ever passes them through.
pub mod assets {
    use super::{MaterialId, MeshId};

    pub const CUBE: MeshId = MeshId(0);
    pub const SPHERE: MeshId = MeshId(1);
    pub const CYLINDER: MeshId = MeshId(2);

    pub const COURT: MaterialId = MaterialId(0);
    pub const LINE: MaterialId = MaterialId(1);
    pub const WOOD: MaterialId = MaterialId(2);
    pub const PAINT: MaterialId = MaterialId(3);
    pub const BALL_GREEN: MaterialId = MaterialId(4);
    pub const ROCK: MaterialId = MaterialId(5);
}

/// Scale that gives the unit cube mesh a radius of 1
const CUBE_SCALER: f32 = 0.502;
const LINE_WIDTH: f32 = 0.2;
const ALLEY_WIDTH: f32 = 3.0;
/// Lines sit slightly above the court surface
const LINE_HEIGHT: f32 = -0.49;
/// Decorative asteroids drifting alongside the court
const ROCKS_PER_SIDE: u32 = 20;

/// Tennis score for one game, both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub player: u32,
    pub enemy: u32,
}

impl MatchScore {
    /// Award a point. Tennis counts 0/15/30/40, so the third point would
    /// land on 45 and gets snapped back. Returns true when the game is won
    /// and both scores reset.
    pub fn score_point(&mut self, side: Side) -> bool {
        let tally = match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        };
        *tally += 15;
        if *tally == 45 {
            *tally = 40; // because tennis is silly
        }

        if self.player >= 50 || self.enemy >= 50 {
            self.player = 0;
            self.enemy = 0;
            return true;
        }
        false
    }
}

/// Pure formatter for the score display collaborator.
pub fn score_title(label: &str, score: MatchScore) -> String {
    format!("{}: {} - {}", label, score.player, score.enemy)
}

/// Things the embedder reacts to (title updates, sounds, UI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PointScored { side: Side, title: String },
    MatchOver { title: String },
}

/// Complete match state, exclusively owned by the simulation thread.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: MatchScore,
    /// Label prefixed to every score title
    pub label: String,
    /// Court dressing: surface, lines, net, scenery
    pub court: Vec<Entity>,
    pub player: Player,
    pub enemy: Entity,
    /// Enemy rackets: left handle, right handle, left head, right head
    pub enemy_rackets: [Entity; 4],
    pub ball: Ball,
    pub camera: Camera,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Build the opening layout: court surface, lines and net, players at
    /// their baselines, ball waiting to be served.
    pub fn new(seed: u64, label: &str, aspect_ratio: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut court = Vec::new();

        // playing surface
        court.push(court_piece(
            assets::CUBE,
            assets::COURT,
            Vec3::new(AREA_HALF_WIDTH * 4.0, 1.0, 2.0 * AREA_HALF_HEIGHT),
            Vec3::new(0.0, -0.5, 0.0),
        ));

        // singles and doubles sidelines
        for x in [
            -COURT_HALF_WIDTH,
            COURT_HALF_WIDTH,
            -COURT_HALF_WIDTH - ALLEY_WIDTH,
            COURT_HALF_WIDTH + ALLEY_WIDTH,
        ] {
            court.push(court_piece(
                assets::CUBE,
                assets::LINE,
                Vec3::new(LINE_WIDTH, 1.0, COURT_HALF_HEIGHT * 2.0),
                Vec3::new(x, LINE_HEIGHT, 0.0),
            ));
        }

        // center line
        court.push(court_piece(
            assets::CUBE,
            assets::LINE,
            Vec3::new(LINE_WIDTH, 1.0, COURT_HALF_HEIGHT),
            Vec3::new(0.0, LINE_HEIGHT, 0.0),
        ));

        // baselines
        for z in [-COURT_HALF_HEIGHT, COURT_HALF_HEIGHT] {
            court.push(court_piece(
                assets::CUBE,
                assets::LINE,
                Vec3::new(COURT_HALF_WIDTH * 2.0 + 2.0 * ALLEY_WIDTH, 1.0, LINE_WIDTH),
                Vec3::new(0.0, LINE_HEIGHT, z),
            ));
        }

        // service lines
        for z in [-COURT_HALF_HEIGHT / 2.0, COURT_HALF_HEIGHT / 2.0] {
            court.push(court_piece(
                assets::CUBE,
                assets::LINE,
                Vec3::new(COURT_HALF_WIDTH * 2.0, 1.0, LINE_WIDTH),
                Vec3::new(0.0, LINE_HEIGHT, z),
            ));
        }

        // the net
        court.push(court_piece(
            assets::CUBE,
            assets::LINE,
            Vec3::new(28.0, NET_TOP_Y, 0.2),
            Vec3::new(0.0, NET_TOP_Y / 2.0, 0.0),
        ));

        // scenery asteroids on both flanks
        for _ in 0..ROCKS_PER_SIDE {
            for flank in [-1.0f32, 1.0] {
                let mut rock = Entity::new(assets::SPHERE, assets::ROCK);
                let x = flank * (rng.random::<f32>() * 20.0 + COURT_HALF_WIDTH + 5.0);
                let z = rng.random::<f32>() * 2.0 * AREA_HALF_HEIGHT - AREA_HALF_HEIGHT;
                rock.transform_mut().set_position(Vec3::new(x, 0.0, z));
                rock.transform_mut().scale_by(Vec3::new(
                    rng.random::<f32>() * 3.0,
                    rng.random::<f32>() * 3.0,
                    rng.random::<f32>() * 3.0,
                ));
                court.push(rock);
            }
        }

        // player and their racket
        let mut body = Entity::new(assets::CUBE, assets::PAINT);
        body.transform_mut()
            .scale_by(Vec3::new(CUBE_SCALER, 2.0 * CUBE_SCALER, CUBE_SCALER));
        body.transform_mut()
            .set_position(Vec3::new(0.0, PLAYER_MIN_Y, -COURT_HALF_HEIGHT - 0.5));
        let player = Player::new(body, racket_head(), racket_handle());

        // opponent, parked on the far baseline
        let mut enemy = Entity::new(assets::CUBE, assets::PAINT);
        enemy
            .transform_mut()
            .scale_by(Vec3::new(CUBE_SCALER, 2.0 * CUBE_SCALER, CUBE_SCALER));
        enemy
            .transform_mut()
            .set_position(Vec3::new(0.0, ENEMY_REST_Y, COURT_HALF_HEIGHT));

        let enemy_rackets = [
            racket_handle(),
            racket_handle(),
            racket_head(),
            racket_head(),
        ];

        let mut ball = Ball::new(assets::SPHERE, assets::BALL_GREEN);
        ball.entity_mut()
            .transform_mut()
            .scale_by(Vec3::splat(0.8));

        let camera = Camera::new(aspect_ratio, Vec3::new(0.0, CAMERA_HEIGHT, -18.0));

        Self {
            seed,
            rng,
            score: MatchScore::default(),
            label: label.to_owned(),
            court,
            player,
            enemy,
            enemy_rackets,
            ball,
            camera,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Hand the queued events to the embedder.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn title(&self) -> String {
        score_title(&self.label, self.score)
    }

    /// One render pass: every entity through the draw boundary, skipping the
    /// ball while it is out of play.
    pub fn draw(&mut self, ctx: &mut dyn DrawContext) {
        for entity in &mut self.court {
            entity.draw(ctx, &self.camera);
        }
        self.player.draw(ctx, &self.camera);
        self.enemy.draw(ctx, &self.camera);
        for racket in &mut self.enemy_rackets {
            racket.draw(ctx, &self.camera);
        }
        if self.ball.is_active() {
            self.ball.entity_mut().draw(ctx, &self.camera);
        }
    }
}

fn court_piece(mesh: MeshId, material: MaterialId, dimensions: Vec3, position: Vec3) -> Entity {
    let mut piece = Entity::new(mesh, material);
    piece.transform_mut().scale_by(Vec3::splat(CUBE_SCALER));
    piece.transform_mut().scale_by(dimensions);
    piece.transform_mut().set_position(position);
    piece
}

fn racket_handle() -> Entity {
    let mut handle = Entity::new(assets::CUBE, assets::WOOD);
    handle.transform_mut().scale_by(Vec3::splat(CUBE_SCALER));
    handle.transform_mut().scale_by(Vec3::new(1.0, 0.2, 0.2));
    handle
}

fn racket_head() -> Entity {
    let mut head = Entity::new(assets::CYLINDER, assets::WOOD);
    head.transform_mut()
        .rotate(Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0));
    head.transform_mut().scale_by(Vec3::new(0.8, 0.1, 0.5));
    head
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;

    #[test]
    fn test_tennis_increments_skip_45() {
        let mut score = MatchScore::default();
        assert!(!score.score_point(Side::Player));
        assert_eq!(score.player, 15);
        assert!(!score.score_point(Side::Player));
        assert_eq!(score.player, 30);
        assert!(!score.score_point(Side::Player));
        assert_eq!(score.player, 40);
    }

    #[test]
    fn test_fourth_point_wins_and_resets() {
        let mut score = MatchScore::default();
        for _ in 0..3 {
            assert!(!score.score_point(Side::Enemy));
        }
        assert!(score.score_point(Side::Enemy));
        assert_eq!(score, MatchScore::default());
    }

    #[test]
    fn test_score_title_format() {
        let score = MatchScore {
            player: 30,
            enemy: 15,
        };
        assert_eq!(score_title("Space Tennis", score), "Space Tennis: 30 - 15");
    }

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(7, "Space Tennis", 16.0 / 9.0);
        // surface + 4 sidelines + center + 2 baselines + 2 service lines
        // + net + 40 rocks
        assert_eq!(state.court.len(), 51);
        assert!(!state.ball.is_active());
        let player_pos = state.player.entity().transform().position();
        assert_eq!(player_pos.z, -COURT_HALF_HEIGHT - 0.5);
        let enemy_pos = state.enemy.transform().position();
        assert_eq!(enemy_pos.z, COURT_HALF_HEIGHT);
    }

    #[test]
    fn test_same_seed_same_scenery() {
        let mut a = GameState::new(42, "t", 1.0);
        let mut b = GameState::new(42, "t", 1.0);
        for (ea, eb) in a.court.iter_mut().zip(b.court.iter_mut()) {
            assert_eq!(
                ea.transform_mut().world_matrix(),
                eb.transform_mut().world_matrix()
            );
        }
    }

    #[test]
    fn test_draw_pass_skips_inactive_ball() {
        let mut state = GameState::new(1, "t", 1.0);
        let mut ctx = NullRenderer::default();
        state.draw(&mut ctx);
        // 51 court pieces + player body + 2 player rackets + enemy
        // + 4 enemy rackets, no ball
        assert_eq!(ctx.draws, 59);

        let serve_from = state.player.entity().transform().position();
        state.ball.serve(serve_from);
        let mut ctx = NullRenderer::default();
        state.draw(&mut ctx);
        assert_eq!(ctx.draws, 60);
    }
}
