//! Newtonian gravity with softening.
//!
//! Direct O(n^2) pair summation, no spatial partitioning; fine for the
//! hundreds-to-low-thousands of bodies this simulation targets. Forces for
//! a step are always computed from an immutable snapshot of the previous
//! frame, never from partially-integrated positions.

use crate::simulation::states::Body;
use crate::simulation::vec2::Vec2;

/// Universal gravitational constant.
pub const G: f64 = 6.673e-11;

/// Softening parameter (epsilon, meters): floors the denominator of the
/// force law so that forces stay finite at very short separations.
pub const EPS: f64 = 3e4;

/// Gravitational force exerted on `body` by `other`, in Newtons.
///
/// Two safeguards keep the result finite: the separation is clamped to at
/// least the sum of the two radii, and `EPS^2` is added to the squared
/// separation. The clamp alone is not enough since both radii can be zero
/// for point bodies.
#[must_use]
pub fn gravitational_force(body: &Body, other: &Body) -> Vec2 {
    let dist = (body.radius + other.radius)
        .max(body.position.metric_distance(&other.position));

    // Coincident point bodies leave the clamp at zero and define no
    // direction; the pair contributes nothing and merges in the overlap
    // phase instead.
    if dist == 0.0 {
        return Vec2::zeros();
    }

    let magnitude = (G * body.mass * other.mass) / (dist * dist + EPS * EPS);

    (other.position - body.position) / dist * magnitude
}

/// Net gravitational force on `body` from every other body in `others`.
///
/// `others` may include `body` itself; it is skipped by id, so a lone body
/// ends up with zero net force.
#[must_use]
pub fn net_force(body: &Body, others: &[Body]) -> Vec2 {
    let mut net = Vec2::zeros();

    for other in others {
        if other.id == body.id {
            continue;
        }
        net += gravitational_force(body, other);
    }

    net
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::BodyId;

    fn body(id: u64, x: f64, mass: f64, radius: f64) -> Body {
        Body {
            id: BodyId(id),
            position: Vec2::new(x, 0.0),
            velocity: Vec2::zeros(),
            force: Vec2::zeros(),
            radius,
            mass,
        }
    }

    #[test]
    fn force_is_attractive() {
        let a = body(0, 0.0, 1e20, 0.0);
        let b = body(1, 1e6, 1e20, 0.0);

        let on_a = gravitational_force(&a, &b);
        assert!(on_a.x > 0.0, "force on a should point toward b");
        assert!(on_a.y.abs() < 1e-30);
    }

    #[test]
    fn equal_and_opposite() {
        let a = body(0, -5e5, 3e22, 0.0);
        let b = body(1, 7e5, 8e21, 0.0);

        let on_a = gravitational_force(&a, &b);
        let on_b = gravitational_force(&b, &a);

        assert!((on_a + on_b).norm() < on_a.norm() * 1e-12);
    }

    #[test]
    fn lone_body_feels_nothing() {
        let a = body(0, 0.0, 1e24, 10.0);
        assert_eq!(net_force(&a, &[a]), Vec2::zeros());
    }

    #[test]
    fn coincident_point_bodies_contribute_no_force() {
        // Zero radii and identical positions leave no defined direction;
        // the contribution must be zero, not NaN.
        let a = body(0, 0.0, 1e24, 0.0);
        let b = body(1, 0.0, 1e24, 0.0);

        assert_eq!(gravitational_force(&a, &b), Vec2::zeros());
        assert_eq!(net_force(&a, &[a, b]), Vec2::zeros());
    }

    #[test]
    fn clamped_distance_bounds_force() {
        // Coincident point bodies: distance clamps to the radius sum (0),
        // so the softening term alone bounds the magnitude.
        let a = body(0, 0.0, 1e10, 0.0);
        let mut b = body(1, 0.0, 1e10, 0.0);
        b.position = Vec2::new(1e-9, 0.0);

        let f = gravitational_force(&a, &b);
        let bound = G * a.mass * b.mass / (EPS * EPS);
        assert!(f.norm() <= bound);
        assert!(f.norm().is_finite());
    }
}
