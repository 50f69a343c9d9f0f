//! Ball-vs-paddle collision and reflection
//!
//! The tricky part of the sim. Two bounce resolutions shipped in different
//! builds of the original game and they are not equivalent, so both are kept
//! as selectable strategies:
//!
//! - **Axis offset**: force the vertical velocity away from the paddle and
//!   steer the horizontal velocity by where on the paddle the ball struck.
//! - **Normal reflect**: mirror the velocity about the normal of the nearest
//!   point on the paddle rectangle.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::config::SpeedGate;

/// Standard reflection: v' = v - 2(v·n)n
///
/// Length-preserving when `normal` is a unit vector.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Axis-aligned bounce with offset steering
///
/// A face hit requires the ball to be moving into the paddle with its leading
/// edge inside the paddle's vertical span; it flips the vertical velocity
/// away from the paddle, adds the contact offset (in [-1, 1] for ordinary
/// hits) to the horizontal velocity, then boosts the whole velocity by
/// `multiplier` while the gate stays under `ceiling`. Any other overlap is a
/// side hit and only reflects the horizontal velocity.
///
/// Corner hits are ambiguous under this strategy: whichever paddle is tested
/// first claims the bounce. Callers keep the player-before-opponent order of
/// the original.
pub fn axis_offset_bounce(
    ball: &mut Ball,
    paddle: &Paddle,
    multiplier: f32,
    ceiling: f32,
    gate: SpeedGate,
) -> bool {
    if !ball.bounds().overlaps(&paddle.rect) {
        return false;
    }

    let moving_in = match paddle.side {
        Side::Player => ball.velocity.y < 0.0,
        Side::Opponent => ball.velocity.y > 0.0,
    };
    let leading_edge = match paddle.side {
        Side::Player => ball.bottom(),
        Side::Opponent => ball.top(),
    };
    let face_hit =
        moving_in && leading_edge >= paddle.rect.bottom() && leading_edge <= paddle.rect.top();

    if face_hit {
        ball.velocity.y = ball.velocity.y.abs() * paddle.side.away_sign();
        let offset = (ball.center.y - paddle.rect.center.y) / paddle.rect.half.y;
        ball.velocity.x += offset;

        let under_ceiling = match gate {
            SpeedGate::Vertical => ball.velocity.y.abs() < ceiling,
            SpeedGate::Total => ball.velocity.length() < ceiling,
        };
        if under_ceiling {
            ball.velocity *= multiplier;
        }
    } else {
        // Caught the paddle's left or right edge
        ball.velocity.x = -ball.velocity.x;
    }
    true
}

/// Nearest-point normal reflection
///
/// Reflects the velocity about the normal from the closest point on the
/// paddle to the ball center, then boosts by `multiplier` while the reflected
/// vertical speed stays under the paddle height. A ball center lying exactly
/// on its closest point has no defined normal; that degenerate hit leaves the
/// velocity unchanged.
pub fn normal_reflect_bounce(ball: &mut Ball, paddle: &Paddle, multiplier: f32) -> bool {
    if !ball.bounds().overlaps(&paddle.rect) {
        return false;
    }

    let closest = paddle.rect.closest_point(ball.center);
    let normal = (ball.center - closest).normalize_or_zero();
    if normal == Vec2::ZERO {
        return true;
    }

    let mut reflected = reflect_velocity(ball.velocity, normal);
    if reflected.y.abs() < paddle.rect.height() {
        reflected *= multiplier;
    }
    ball.velocity = reflected;
    true
}
