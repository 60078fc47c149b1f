//! Math types for Roomtone
//!
//! The scene lives in the x/y plane. Angles are radians, measured from +x
//! counter-clockwise, and every public angle is kept in (-pi, pi].

pub use glam::Vec2;

/// A position in the plane plus a facing angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2 {
    pub position: Vec2,
    /// Facing angle in radians, normalized to (-pi, pi]
    pub facing: f32,
}

impl Pose2 {
    pub fn new(position: Vec2, facing: f32) -> Self {
        Self {
            position,
            facing: normalize_angle(facing),
        }
    }

    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            facing: 0.0,
        }
    }

    /// Unit vector along the facing direction.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.facing.cos(), self.facing.sin())
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.position.distance(other.position)
    }

    /// Turn in place to face `target`.
    pub fn look_at(&mut self, target: Vec2) {
        self.facing = angle_to(self.position, target);
    }
}

impl Default for Pose2 {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle of the vector from `from` to `to`.
///
/// Coincident points yield 0 rather than NaN.
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Wraps an arbitrary angle into (-pi, pi]. Idempotent.
pub fn normalize_angle(theta: f32) -> f32 {
    theta.sin().atan2(theta.cos())
}

/// Strict segment intersection: true only when `p1..p2` and `q1..q2`
/// properly cross.
///
/// Parallel segments, collinear overlap and segments that merely touch at
/// an endpoint all return false. Degenerate (zero-length) segments never
/// intersect anything.
pub fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    // Signed areas: which side of q1->q2 each p endpoint lies on, and
    // which side of p1->p2 each q endpoint lies on.
    let d1 = (q2 - q1).perp_dot(p1 - q1);
    let d2 = (q2 - q1).perp_dot(p2 - q1);
    let d3 = (p2 - p1).perp_dot(q1 - p1);
    let d4 = (p2 - p1).perp_dot(q2 - p1);

    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}
