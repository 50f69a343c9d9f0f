//! Duel Pong - a two-paddle pong simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball motion, paddle collisions, match state)
//! - `config`: Match configuration and validation
//!
//! The crate is pure state plus a step function: a host drives
//! [`sim::MatchController::step`] once per frame and renders whatever the
//! returned snapshot says. No rendering, input devices, or clocks live here.

pub mod config;
pub mod sim;

pub use config::{ConfigError, EdgeBehavior, MatchConfig, ReflectionStrategy, SpeedGate};
pub use sim::{MatchController, MatchEvent, MatchPhase, Side, SimulationSnapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. Velocities are expressed in per-tick
    /// displacement, so the nominal dt is one tick.
    pub const SIM_DT: f32 = 1.0;

    /// Arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 400.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Ball radius as a fraction of arena height (ball diameter is height/30)
    pub const BALL_RADIUS_FRAC: f32 = 1.0 / 60.0;

    /// Paddle half-extents as fractions of arena size
    /// (full paddle is width/6 wide and height/36 tall)
    pub const PADDLE_HALF_WIDTH_FRAC: f32 = 1.0 / 12.0;
    pub const PADDLE_HALF_HEIGHT_FRAC: f32 = 1.0 / 72.0;
    /// Paddle center distance from its defended edge, as a fraction of height
    pub const PADDLE_INSET_FRAC: f32 = 1.0 / 12.0;

    /// Serve velocity component magnitude (per tick)
    pub const SERVE_SPEED: f32 = 4.0;

    /// Post-bounce speed boost (multiplicative)
    pub const SPEED_MULTIPLIER: f32 = 1.1;
    /// Vertical speed above which the boost is no longer applied
    pub const SPEED_CEILING: f32 = 10.0;

    /// Points needed to win a match
    pub const WINNING_SCORE: u32 = 3;
}
