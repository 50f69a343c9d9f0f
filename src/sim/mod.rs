//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable per-tick evaluation order (ball, player, opponent, walls, edges)
//! - No rendering, clock, or input-device dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{axis_offset_bounce, normal_reflect_bounce, reflect_velocity};
pub use state::{Arena, Ball, BallTint, MatchEvent, MatchPhase, Paddle, Rect, Side};
pub use tick::{BallView, MatchController, PaddleView, SimulationSnapshot};
