//! Match configuration and validation
//!
//! All tunables the host can set before constructing a match. Validation is
//! fail-fast: a bad configuration never makes it into a running match.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Side;

/// How the top and bottom arena edges behave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EdgeBehavior {
    /// Crossing the top or bottom edge ends the rally and awards a point
    #[default]
    TopBottom,
    /// Top and bottom reflect like the side walls (single-ball screensaver
    /// variant, no scoring ever happens)
    Walled,
}

/// Which paddle-bounce resolution the match uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReflectionStrategy {
    /// Force the vertical velocity away from the paddle and steer the
    /// horizontal velocity by the contact offset
    #[default]
    AxisOffset,
    /// Reflect the velocity about the normal of the nearest point on the
    /// paddle rectangle
    NormalReflect,
}

/// Which measure the speed ceiling gates on (Strategy A only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedGate {
    /// Gate on |velocity.y|
    #[default]
    Vertical,
    /// Gate on |velocity|
    Total,
}

/// Errors from match construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("winning score must be at least 1, got {0}")]
    WinningScore(u32),

    #[error("arena dimensions must be positive and finite, got {width}x{height}")]
    ArenaDimensions { width: f32, height: f32 },

    #[error("speed multiplier must be finite and at least 1, got {0}")]
    SpeedMultiplier(f32),

    #[error("speed ceiling must be positive and finite, got {0}")]
    SpeedCeiling(f32),

    #[error("serve speed must be positive and finite, got {0}")]
    ServeSpeed(f32),
}

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Arena width (side walls at x = 0 and x = width)
    pub arena_width: f32,
    /// Arena height (scoring edges at y = 0 and y = height)
    pub arena_height: f32,
    /// Points needed to win the match
    pub winning_score: u32,
    /// Top/bottom edge behavior
    pub scoring_edges: EdgeBehavior,
    /// Paddle bounce resolution
    pub reflection_strategy: ReflectionStrategy,
    /// Post-bounce speed boost (>= 1)
    pub speed_multiplier: f32,
    /// Speed above which the boost stops applying (Strategy A)
    pub speed_ceiling: f32,
    /// Axis the ceiling is measured on (Strategy A)
    pub speed_gate: SpeedGate,
    /// Serve velocity component magnitude; the serve is (serve_speed, ±serve_speed)
    pub serve_speed: f32,
    /// Side the very first serve travels toward
    pub first_serve: Side,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            winning_score: WINNING_SCORE,
            scoring_edges: EdgeBehavior::default(),
            reflection_strategy: ReflectionStrategy::default(),
            speed_multiplier: SPEED_MULTIPLIER,
            speed_ceiling: SPEED_CEILING,
            speed_gate: SpeedGate::default(),
            serve_speed: SERVE_SPEED,
            first_serve: Side::Player,
        }
    }
}

impl MatchConfig {
    /// Validate the configuration. Called once by match construction; a
    /// failure here is not recoverable and never surfaces mid-match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.winning_score == 0 {
            return Err(ConfigError::WinningScore(self.winning_score));
        }
        if !(self.arena_width.is_finite() && self.arena_width > 0.0)
            || !(self.arena_height.is_finite() && self.arena_height > 0.0)
        {
            return Err(ConfigError::ArenaDimensions {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !(self.speed_multiplier.is_finite() && self.speed_multiplier >= 1.0) {
            return Err(ConfigError::SpeedMultiplier(self.speed_multiplier));
        }
        if !(self.speed_ceiling.is_finite() && self.speed_ceiling > 0.0) {
            return Err(ConfigError::SpeedCeiling(self.speed_ceiling));
        }
        if !(self.serve_speed.is_finite() && self.serve_speed > 0.0) {
            return Err(ConfigError::ServeSpeed(self.serve_speed));
        }
        Ok(())
    }

    /// Ball radius derived from arena height
    pub fn ball_radius(&self) -> f32 {
        self.arena_height * BALL_RADIUS_FRAC
    }

    /// Paddle half-extents derived from arena size
    pub fn paddle_half_extent(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.arena_width * PADDLE_HALF_WIDTH_FRAC,
            self.arena_height * PADDLE_HALF_HEIGHT_FRAC,
        )
    }

    /// Paddle center height for a side (player defends the bottom edge)
    pub fn paddle_center_y(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.arena_height * PADDLE_INSET_FRAC,
            Side::Opponent => self.arena_height * (1.0 - PADDLE_INSET_FRAC),
        }
    }
}
