//! Match state and core simulation types
//!
//! Plain owned data, no widget hierarchy: the host reads positions out of a
//! snapshot after each tick instead of observing property changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which paddle a value refers to. The player defends the bottom edge, the
/// opponent the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Sign of the vertical direction pointing away from this side's paddle
    pub fn away_sign(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        }
    }
}

/// Current phase of the match
///
/// `Serving` and `PointScored` are same-tick transients: `PointScored` is
/// passed through while resolving a rally and never survives into a snapshot,
/// which reports the point via [`MatchEvent::PointScored`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the external start signal
    Idle,
    /// Ball centered, next tick serves and plays
    Serving,
    /// Active rally
    Playing,
    /// A scoring edge was crossed this tick
    PointScored,
    /// Terminal until the external start signal
    GameOver,
}

/// Render hint: which half of the arena the ball is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallTint {
    /// Upper half (the opponent's side)
    Dark,
    /// Lower half, and the exact midline
    Light,
}

/// Horizontal arena edges (the scoring edges in the two-paddle layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaEdge {
    Top,
    Bottom,
}

/// Transition events emitted during a tick
///
/// Hosts hang side effects off these (the original vibrated on every point
/// and hid the menu on serve).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    Serve { to: Side },
    PaddleBounce { side: Side },
    WallBounce,
    PointScored { side: Side },
    GameOver { winner: Side },
}

/// Axis-aligned rectangle stored as center plus half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half.y
    }

    pub fn width(&self) -> f32 {
        self.half.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half.y * 2.0
    }

    /// Axis-aligned overlap test (closed on the boundary)
    pub fn overlaps(&self, other: &Rect) -> bool {
        (self.center.x - other.center.x).abs() <= self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() <= self.half.y + other.half.y
    }

    /// Nearest point on this rectangle to the given point. A point inside
    /// the rectangle maps to itself.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.bottom(), self.top()),
        )
    }
}

/// The ball: straight-line motion, everything else happens to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub center: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            velocity: Vec2::ZERO,
            radius,
        }
    }

    /// Advance along the current velocity. Velocity is per-tick displacement,
    /// so the nominal dt is 1.0.
    pub fn advance(&mut self, dt: f32) {
        self.center += self.velocity * dt;
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.radius
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.radius
    }

    /// Axis-aligned bounding box
    pub fn bounds(&self) -> Rect {
        Rect::new(self.center, Vec2::splat(self.radius))
    }
}

/// One of the two paddles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub score: u32,
    pub side: Side,
}

impl Paddle {
    pub fn new(side: Side, center: Vec2, half: Vec2) -> Self {
        Self {
            rect: Rect::new(center, half),
            score: 0,
            side,
        }
    }

    /// Height of the face the ball strikes: the top face for the player's
    /// paddle, the bottom face for the opponent's.
    pub fn defending_edge_y(&self) -> f32 {
        match self.side {
            Side::Player => self.rect.top(),
            Side::Opponent => self.rect.bottom(),
        }
    }
}

/// Fixed rectangular playfield. Side walls reflect; the top and bottom edges
/// are reported to the controller, which decides whether they score or wall.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn mid_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Reflect the ball off the left/right walls, clamping it back inside so
    /// the same crossing cannot re-trigger next tick. Returns true on a hit.
    pub fn clip_and_reflect_sides(&self, ball: &mut Ball) -> bool {
        if ball.left() < 0.0 {
            ball.velocity.x = -ball.velocity.x;
            ball.center.x = ball.radius;
            true
        } else if ball.right() > self.width {
            ball.velocity.x = -ball.velocity.x;
            ball.center.x = self.width - ball.radius;
            true
        } else {
            false
        }
    }

    /// Reflect the ball off the top/bottom edges (walled configuration)
    pub fn clip_and_reflect_vertical(&self, ball: &mut Ball) -> bool {
        if ball.bottom() < 0.0 {
            ball.velocity.y = -ball.velocity.y;
            ball.center.y = ball.radius;
            true
        } else if ball.top() > self.height {
            ball.velocity.y = -ball.velocity.y;
            ball.center.y = self.height - ball.radius;
            true
        } else {
            false
        }
    }

    /// Scoring-edge crossing: the ball must be fully past the edge
    pub fn crossed_edge(&self, ball: &Ball) -> Option<ArenaEdge> {
        if ball.top() < 0.0 {
            Some(ArenaEdge::Bottom)
        } else if ball.bottom() > self.height {
            Some(ArenaEdge::Top)
        } else {
            None
        }
    }

    /// Tint hint from the ball's half of the arena
    pub fn tint_for(&self, ball: &Ball) -> BallTint {
        if ball.center.y > self.mid_y() {
            BallTint::Dark
        } else {
            BallTint::Light
        }
    }
}
