//! Circles and circular arcs.
//!
//! Arc angles are in degrees, swept counter-clockwise from `start_angle` to `end_angle`
//! with y pointing up.

use crate::scalar::Scalar;
use crate::utils::{from_polar, no_revolutions, round_to, DEFAULT_ROUNDING_ACCURACY};
use crate::{point, Angle, Box2D, Point, Vector};

/// A full circle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Circle<S> {
    pub center: Point<S>,
    pub radius: S,
}

impl<S: Scalar> Circle<S> {
    #[inline]
    pub fn new(center: Point<S>, radius: S) -> Self {
        debug_assert!(radius > S::ZERO);
        Circle { center, radius }
    }

    /// Point of the circle at the given angle in degrees.
    #[inline]
    pub fn point_at_angle(&self, angle_in_degrees: S) -> Point<S> {
        self.center + from_polar(angle_in_degrees, self.radius)
    }

    #[inline]
    pub fn translate(&self, by: Vector<S>) -> Self {
        Circle {
            center: self.center + by,
            radius: self.radius,
        }
    }

    pub fn bounding_box(&self) -> Box2D<S> {
        Box2D {
            min: point(self.center.x - self.radius, self.center.y - self.radius),
            max: point(self.center.x + self.radius, self.center.y + self.radius),
        }
    }

    pub fn length(&self) -> S {
        S::TWO * S::PI() * self.radius
    }
}

/// A circular arc.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CircularArc<S> {
    pub center: Point<S>,
    pub radius: S,
    /// In degrees.
    pub start_angle: S,
    /// In degrees.
    pub end_angle: S,
}

impl<S: Scalar> CircularArc<S> {
    #[inline]
    pub fn new(center: Point<S>, radius: S, start_angle: S, end_angle: S) -> Self {
        debug_assert!(radius > S::ZERO);
        CircularArc {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle<S> {
        Circle {
            center: self.center,
            radius: self.radius,
        }
    }

    /// The end angle, moved by whole revolutions so that it is not less than the start angle.
    pub fn unwrapped_end_angle(&self) -> S {
        if self.end_angle < self.start_angle {
            let full = S::value(360.0);
            let revolutions = S::ceil((self.start_angle - self.end_angle) / full);
            return revolutions * full + self.end_angle;
        }

        self.end_angle
    }

    /// Angular extent of the arc in degrees, within `[0, 360]`.
    pub fn span(&self) -> S {
        let span = self.unwrapped_end_angle() - self.start_angle;
        if round_to(span, S::from_f64(DEFAULT_ROUNDING_ACCURACY)) > S::value(360.0) {
            return no_revolutions(span);
        }

        span
    }

    /// Same as `span`, as an angle in radians.
    #[inline]
    pub fn sweep_angle(&self) -> Angle<S> {
        Angle::radians(self.span().to_radians())
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.center + from_polar(self.start_angle, self.radius)
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.center + from_polar(self.end_angle, self.radius)
    }

    /// Sample the arc at t, `0` being the start and `1` the end of the sweep.
    pub fn sample(&self, t: S) -> Point<S> {
        self.center + from_polar(self.start_angle + self.span() * t, self.radius)
    }

    #[inline]
    pub fn mid_point(&self) -> Point<S> {
        self.sample(S::HALF)
    }

    /// Whether the sweep of the arc covers the given angle in degrees.
    pub fn covers_angle(&self, angle_in_degrees: S) -> bool {
        let offset = no_revolutions(angle_in_degrees - self.start_angle);
        offset <= self.span()
    }

    #[inline]
    pub fn translate(&self, by: Vector<S>) -> Self {
        CircularArc {
            center: self.center + by,
            ..*self
        }
    }

    pub fn length(&self) -> S {
        self.radius * self.span().to_radians()
    }

    /// Returns the smallest rectangle that contains the arc.
    pub fn bounding_box(&self) -> Box2D<S> {
        let from = self.from();
        let to = self.to();
        let mut bounds = Box2D {
            min: from.min(to),
            max: from.max(to),
        };

        for quadrant in 0..4 {
            let angle = S::value(90.0 * quadrant as f32);
            if self.covers_angle(angle) {
                let p = self.circle().point_at_angle(angle);
                bounds.min = bounds.min.min(p);
                bounds.max = bounds.max.max(p);
            }
        }

        bounds
    }
}

#[cfg(test)]
fn fuzzy_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn arc_span() {
    let arc = CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 90.0);
    assert_eq!(arc.span(), 90.0);

    let wrapping = CircularArc::new(point(0.0, 0.0), 1.0, 270.0, 45.0);
    assert_eq!(wrapping.span(), 135.0);
    assert_eq!(wrapping.unwrapped_end_angle(), 405.0);

    let many_turns = CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 810.0);
    assert_eq!(many_turns.span(), 90.0);

    assert!(fuzzy_eq(arc.sweep_angle().radians, core::f64::consts::FRAC_PI_2));
}

#[test]
fn arc_end_points() {
    let arc = CircularArc::new(point(1.0, 1.0), 2.0, 90.0, 180.0);

    assert!(fuzzy_eq(arc.from().x, 1.0));
    assert!(fuzzy_eq(arc.from().y, 3.0));
    assert!(fuzzy_eq(arc.to().x, -1.0));
    assert!(fuzzy_eq(arc.to().y, 1.0));
    assert!(fuzzy_eq(arc.length(), core::f64::consts::PI));
}

#[test]
fn arc_bounding_box() {
    // Crosses the 0° direction.
    let arc = CircularArc::new(point(0.0, 0.0), 1.0, 315.0, 45.0);
    let bounds = arc.bounding_box();
    let h = 0.5f64.sqrt();

    assert!(fuzzy_eq(bounds.max.x, 1.0));
    assert!(fuzzy_eq(bounds.min.x, h));
    assert!(fuzzy_eq(bounds.min.y, -h));
    assert!(fuzzy_eq(bounds.max.y, h));

    let circle = arc.circle().translate(crate::vector(1.0, 0.0));
    assert_eq!(
        circle.bounding_box(),
        Box2D {
            min: point(0.0, -1.0),
            max: point(2.0, 1.0),
        }
    );
}
