//! Per-tick match orchestration
//!
//! [`MatchController`] owns the ball, both paddles, and the arena, and
//! advances them one fixed timestep at a time. The host calls [`step`]
//! once per frame, feeds paddle targets through [`apply_paddle_input`],
//! and signals [`start`] to begin or restart a match.
//!
//! [`step`]: MatchController::step
//! [`apply_paddle_input`]: MatchController::apply_paddle_input
//! [`start`]: MatchController::start

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{axis_offset_bounce, normal_reflect_bounce};
use super::state::{Arena, ArenaEdge, Ball, BallTint, MatchEvent, MatchPhase, Paddle, Side};
use crate::config::{ConfigError, EdgeBehavior, MatchConfig, ReflectionStrategy};

/// Ball view for the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallView {
    pub center: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub tint: BallTint,
}

/// Paddle view for the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddleView {
    pub center: Vec2,
    pub score: u32,
}

/// Everything the host needs after one tick: positions to draw, scores to
/// bind, and the transition events of the tick for side effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub phase: MatchPhase,
    pub tick: u64,
    pub ball: BallView,
    pub player: PaddleView,
    pub opponent: PaddleView,
    pub events: Vec<MatchEvent>,
}

/// The match: one ball, two paddles, one arena, and the phase machine
#[derive(Debug, Clone)]
pub struct MatchController {
    config: MatchConfig,
    arena: Arena,
    ball: Ball,
    player: Paddle,
    opponent: Paddle,
    phase: MatchPhase,
    serve_to: Side,
    tick: u64,
}

impl MatchController {
    /// Build a match from a validated configuration. Construction is the
    /// only fallible operation; a match that exists cannot error mid-tick.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let arena = Arena::new(config.arena_width, config.arena_height);
        let ball = Ball::new(arena.center(), config.ball_radius());
        let half = config.paddle_half_extent();
        let mid_x = arena.width / 2.0;
        let player = Paddle::new(
            Side::Player,
            Vec2::new(mid_x, config.paddle_center_y(Side::Player)),
            half,
        );
        let opponent = Paddle::new(
            Side::Opponent,
            Vec2::new(mid_x, config.paddle_center_y(Side::Opponent)),
            half,
        );

        Ok(Self {
            serve_to: config.first_serve,
            config,
            arena,
            ball,
            player,
            opponent,
            phase: MatchPhase::Idle,
            tick: 0,
        })
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// External begin/restart signal. Legal in every phase; this is the only
    /// way out of `GameOver` and the only allowed cancellation of a rally.
    pub fn start(&mut self) {
        self.player.score = 0;
        self.opponent.score = 0;
        self.ball.center = self.arena.center();
        self.ball.velocity = Vec2::ZERO;
        self.serve_to = self.config.first_serve;
        self.phase = MatchPhase::Serving;
        log::info!("match started, first serve toward {:?}", self.serve_to);
    }

    /// Steer one paddle toward a horizontal center. The move is clamped so
    /// the paddle stays fully inside the arena and rejected outright when the
    /// input is not finite or when the ball is within one radius of the
    /// paddle's defending face (the no-tunneling rule of the original's
    /// touch handler). Returns whether the move was applied.
    pub fn apply_paddle_input(&mut self, side: Side, desired_center_x: f32) -> bool {
        if !desired_center_x.is_finite() {
            log::debug!("rejected non-finite paddle input for {side:?}");
            return false;
        }

        let (edge_gap, half_w) = {
            let paddle = self.paddle(side);
            let gap = match side {
                Side::Player => self.ball.center.y - paddle.defending_edge_y(),
                Side::Opponent => paddle.defending_edge_y() - self.ball.center.y,
            };
            (gap, paddle.rect.half.x)
        };
        if edge_gap <= self.ball.radius {
            log::debug!("rejected paddle input for {side:?}: ball at the defending face");
            return false;
        }

        let clamped = desired_center_x.clamp(half_w, self.arena.width - half_w);
        self.paddle_mut(side).rect.center.x = clamped;
        true
    }

    /// Advance the match by one tick and report the resulting state.
    ///
    /// Velocities are per-tick displacements, so the nominal dt is
    /// [`crate::consts::SIM_DT`] (1.0); hosts with a variable clock may pass
    /// a scaled dt instead.
    pub fn step(&mut self, dt: f32) -> SimulationSnapshot {
        let mut events = Vec::new();
        match self.phase {
            MatchPhase::Idle | MatchPhase::GameOver => {}
            MatchPhase::Serving => {
                self.serve(&mut events);
                self.phase = MatchPhase::Playing;
                self.tick += 1;
                self.run_rally(dt, &mut events);
            }
            MatchPhase::Playing | MatchPhase::PointScored => {
                self.tick += 1;
                self.run_rally(dt, &mut events);
            }
        }
        self.snapshot(events)
    }

    fn serve(&mut self, events: &mut Vec<MatchEvent>) {
        let speed = self.config.serve_speed;
        let vy = match self.serve_to {
            Side::Player => -speed,
            Side::Opponent => speed,
        };
        self.ball.center = self.arena.center();
        self.ball.velocity = Vec2::new(speed, vy);
        log::debug!("serve toward {:?}", self.serve_to);
        events.push(MatchEvent::Serve { to: self.serve_to });
    }

    /// One tick of rally physics, in the order of the original's update
    /// loop: move, player bounce, opponent bounce, side walls, scoring edges.
    fn run_rally(&mut self, dt: f32, events: &mut Vec<MatchEvent>) {
        self.ball.advance(dt);

        // The player's paddle is tested first; a corner hit under the axis
        // strategy goes to whichever test runs first (known inexactness).
        if bounce(&mut self.ball, &self.player, &self.config) {
            events.push(MatchEvent::PaddleBounce { side: Side::Player });
        }
        if bounce(&mut self.ball, &self.opponent, &self.config) {
            events.push(MatchEvent::PaddleBounce {
                side: Side::Opponent,
            });
        }

        if self.arena.clip_and_reflect_sides(&mut self.ball) {
            events.push(MatchEvent::WallBounce);
        }

        match self.config.scoring_edges {
            EdgeBehavior::Walled => {
                if self.arena.clip_and_reflect_vertical(&mut self.ball) {
                    events.push(MatchEvent::WallBounce);
                }
            }
            EdgeBehavior::TopBottom => {
                if let Some(edge) = self.arena.crossed_edge(&self.ball) {
                    let scorer = match edge {
                        ArenaEdge::Top => Side::Player,
                        ArenaEdge::Bottom => Side::Opponent,
                    };
                    self.award_point(scorer, events);
                }
            }
        }
    }

    fn award_point(&mut self, scorer: Side, events: &mut Vec<MatchEvent>) {
        self.phase = MatchPhase::PointScored;
        let score = {
            let paddle = self.paddle_mut(scorer);
            paddle.score += 1;
            paddle.score
        };
        events.push(MatchEvent::PointScored { side: scorer });
        log::info!(
            "point to {:?} ({} - {})",
            scorer,
            self.player.score,
            self.opponent.score
        );

        self.ball.center = self.arena.center();
        self.ball.velocity = Vec2::ZERO;

        if score >= self.config.winning_score {
            self.phase = MatchPhase::GameOver;
            events.push(MatchEvent::GameOver { winner: scorer });
            log::info!("game over, {scorer:?} wins");
        } else {
            self.serve_to = scorer.other();
            self.phase = MatchPhase::Serving;
        }
    }

    fn snapshot(&self, events: Vec<MatchEvent>) -> SimulationSnapshot {
        SimulationSnapshot {
            phase: self.phase,
            tick: self.tick,
            ball: BallView {
                center: self.ball.center,
                velocity: self.ball.velocity,
                radius: self.ball.radius,
                tint: self.arena.tint_for(&self.ball),
            },
            player: PaddleView {
                center: self.player.rect.center,
                score: self.player.score,
            },
            opponent: PaddleView {
                center: self.opponent.rect.center,
                score: self.opponent.score,
            },
            events,
        }
    }

    fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }
}

fn bounce(ball: &mut Ball, paddle: &Paddle, config: &MatchConfig) -> bool {
    match config.reflection_strategy {
        ReflectionStrategy::AxisOffset => axis_offset_bounce(
            ball,
            paddle,
            config.speed_multiplier,
            config.speed_ceiling,
            config.speed_gate,
        ),
        ReflectionStrategy::NormalReflect => {
            normal_reflect_bounce(ball, paddle, config.speed_multiplier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn default_match() -> MatchController {
        MatchController::new(MatchConfig::default()).expect("default config must validate")
    }

    #[test]
    fn test_idle_is_noop() {
        let mut game = default_match();
        let before = game.ball.center;
        let snap = game.step(SIM_DT);
        assert_eq!(snap.phase, MatchPhase::Idle);
        assert_eq!(game.ball.center, before);
        assert!(snap.events.is_empty());
        assert_eq!(snap.tick, 0);
    }

    #[test]
    fn test_start_serves_and_plays_same_tick() {
        let mut game = default_match();
        game.start();
        assert_eq!(game.phase(), MatchPhase::Serving);

        let snap = game.step(SIM_DT);
        assert_eq!(snap.phase, MatchPhase::Playing);
        assert!(
            snap.events
                .contains(&MatchEvent::Serve { to: Side::Player })
        );
        // Served from center at (4, -4), then advanced once
        assert_eq!(snap.ball.center, Vec2::new(204.0, 296.0));
        assert_eq!(snap.ball.velocity, Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_free_flight_is_exact() {
        let mut game = default_match();
        game.start();
        game.step(SIM_DT);

        game.ball.center = Vec2::new(200.0, 300.0);
        game.ball.velocity = Vec2::new(1.0, 2.0);
        let snap = game.step(SIM_DT);
        assert_eq!(snap.ball.center, Vec2::new(201.0, 302.0));
        assert_eq!(snap.ball.velocity, Vec2::new(1.0, 2.0));
        assert!(snap.events.is_empty());
    }

    #[test]
    fn test_side_wall_flips_vx_exactly_once() {
        let mut game = default_match();
        game.start();
        game.step(SIM_DT);

        game.ball.center = Vec2::new(12.0, 300.0);
        game.ball.velocity = Vec2::new(-4.0, 1.0);
        let snap = game.step(SIM_DT);
        assert!(snap.events.contains(&MatchEvent::WallBounce));
        assert_eq!(snap.ball.velocity.x, 4.0);
        // Clamped back inside the bound
        assert_eq!(snap.ball.center.x, 10.0);
    }

    /// The documented scenario: 400x600 arena, ball r=10 falling from
    /// (200, 300) at (0, -4) with the lane cleared. Scores on the tick the
    /// ball is fully past the bottom edge, then re-serves from center.
    #[test]
    fn test_bottom_crossing_scores_for_opponent() {
        let mut game = default_match();
        game.start();
        game.step(SIM_DT);

        assert!(game.apply_paddle_input(Side::Player, 50.0));
        game.ball.center = Vec2::new(200.0, 300.0);
        game.ball.velocity = Vec2::new(0.0, -4.0);

        let mut prev_ball_y = game.ball.center.y;
        let mut scored = None;
        for _ in 0..200 {
            let snap = game.step(SIM_DT);
            if snap
                .events
                .contains(&MatchEvent::PointScored {
                    side: Side::Opponent,
                })
            {
                scored = Some(snap);
                break;
            }
            prev_ball_y = snap.ball.center.y;
        }
        let snap = scored.unwrap();

        // The tick before the crossing the ball was not yet fully out
        assert!(prev_ball_y + 10.0 >= 0.0);
        assert_eq!(snap.opponent.score, 1);
        assert_eq!(snap.player.score, 0);
        // Same-tick transient resolved to Serving, ball re-centered and held
        assert_eq!(snap.phase, MatchPhase::Serving);
        assert_eq!(snap.ball.center, Vec2::new(200.0, 300.0));
        assert_eq!(snap.ball.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_reserve_favors_conceder() {
        let mut game = default_match();
        game.start();
        game.step(SIM_DT);
        assert!(game.apply_paddle_input(Side::Player, 50.0));
        game.ball.center = Vec2::new(200.0, 300.0);
        game.ball.velocity = Vec2::new(0.0, -4.0);

        for _ in 0..200 {
            if game.phase() == MatchPhase::Serving {
                break;
            }
            game.step(SIM_DT);
        }
        assert_eq!(game.phase(), MatchPhase::Serving);

        // The player conceded the bottom edge, so the serve travels down
        let snap = game.step(SIM_DT);
        assert!(
            snap.events
                .contains(&MatchEvent::Serve { to: Side::Player })
        );
        assert!(snap.ball.velocity.y < 0.0);
    }

    #[test]
    fn test_match_terminates_and_gameover_is_sticky() {
        let mut game = default_match();
        game.start();
        game.step(SIM_DT);
        // Clear the player's lane so every rally is a miss
        assert!(game.apply_paddle_input(Side::Player, 50.0));

        let mut winner = None;
        for _ in 0..2000 {
            let snap = game.step(SIM_DT);
            if let Some(MatchEvent::GameOver { winner: side }) = snap
                .events
                .iter()
                .find(|e| matches!(e, MatchEvent::GameOver { .. }))
            {
                winner = Some(*side);
                break;
            }
        }
        assert_eq!(winner, Some(Side::Opponent));
        assert_eq!(game.opponent.score, 3);
        assert_eq!(game.player.score, 0);
        assert_eq!(game.phase(), MatchPhase::GameOver);

        // Sticky until start(): further steps change nothing
        let snap = game.step(SIM_DT);
        assert_eq!(snap.phase, MatchPhase::GameOver);
        assert!(snap.events.is_empty());
        assert_eq!(snap.opponent.score, 3);

        game.start();
        assert_eq!(game.phase(), MatchPhase::Serving);
        assert_eq!(game.player.score, 0);
        assert_eq!(game.opponent.score, 0);
    }

    #[test]
    fn test_walled_edges_never_score() {
        let config = MatchConfig {
            scoring_edges: EdgeBehavior::Walled,
            ..Default::default()
        };
        let mut game = MatchController::new(config).expect("walled config must validate");
        game.start();

        for _ in 0..2000 {
            let snap = game.step(SIM_DT);
            assert_eq!(snap.player.score, 0);
            assert_eq!(snap.opponent.score, 0);
            assert!(
                !snap
                    .events
                    .iter()
                    .any(|e| matches!(e, MatchEvent::PointScored { .. }))
            );
        }
        assert_eq!(game.phase(), MatchPhase::Playing);
        // Clamping keeps the ball inside the walls
        assert!(game.ball.center.x >= 0.0 && game.ball.center.x <= 400.0);
        assert!(game.ball.center.y >= 0.0 && game.ball.center.y <= 600.0);
    }

    #[test]
    fn test_input_rejects_nan() {
        let mut game = default_match();
        game.start();
        let before = game.player.rect.center.x;
        assert!(!game.apply_paddle_input(Side::Player, f32::NAN));
        assert_eq!(game.player.rect.center.x, before);
    }

    #[test]
    fn test_input_clamps_to_arena() {
        let mut game = default_match();
        game.start();
        let half_w = game.player.rect.half.x;

        assert!(game.apply_paddle_input(Side::Player, -100.0));
        assert_eq!(game.player.rect.center.x, half_w);

        assert!(game.apply_paddle_input(Side::Player, 1000.0));
        assert_eq!(game.player.rect.center.x, 400.0 - half_w);
    }

    #[test]
    fn test_input_rejected_when_ball_at_defending_face() {
        let mut game = default_match();
        game.start();
        game.step(SIM_DT);

        // Ball within one radius of the player's top face: move rejected
        game.ball.center = Vec2::new(200.0, game.player.rect.top() + 5.0);
        let before = game.player.rect.center.x;
        assert!(!game.apply_paddle_input(Side::Player, 300.0));
        assert_eq!(game.player.rect.center.x, before);

        // Opponent is far from the ball, its paddle still moves
        assert!(game.apply_paddle_input(Side::Opponent, 300.0));
    }

    #[test]
    fn test_normal_reflect_strategy_in_match() {
        let config = MatchConfig {
            reflection_strategy: ReflectionStrategy::NormalReflect,
            speed_multiplier: 1.2,
            ..Default::default()
        };
        let mut game = MatchController::new(config).expect("normal-reflect config must validate");
        game.start();
        game.step(SIM_DT);

        // Drop the ball straight onto the player's paddle
        game.ball.center = Vec2::new(200.0, 70.0);
        game.ball.velocity = Vec2::new(0.0, -4.0);
        let snap = game.step(SIM_DT);
        assert!(
            snap.events
                .contains(&MatchEvent::PaddleBounce { side: Side::Player })
        );
        // Reflected off the top face and boosted by 1.2
        assert!((snap.ball.velocity.y - 4.8).abs() < 1e-4);
        assert!(snap.ball.velocity.x.abs() < 1e-4);
    }

    #[test]
    fn test_snapshot_reports_tint() {
        let mut game = default_match();
        game.start();
        let snap = game.step(SIM_DT);
        // Serve toward the player puts the ball just below the midline
        assert_eq!(snap.ball.tint, BallTint::Light);
    }
}
