use crate::scalar::Scalar;
use crate::segment::{BoundingBox, Segment};
use crate::utils::{min_max, round_to, DEFAULT_ROUNDING_ACCURACY};
use crate::{point, vector, Box2D, CubicBezierSegment, Point, Vector};

use core::ops::Range;

/// A linear segment.
///
/// For equality purposes in drawings a segment is undirected; `PartialEq` here is the
/// exact, directed comparison.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    /// Sample the x coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn x(&self, t: S) -> S {
        self.from.x * (S::ONE - t) + self.to.x * t
    }

    /// Sample the y coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn y(&self, t: S) -> S {
        self.from.y * (S::ONE - t) + self.to.y * t
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    #[inline]
    pub fn derivative(&self, _t: S) -> Vector<S> {
        self.to_vector()
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Return the sub-segment inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        LineSegment {
            from: self.from.lerp(self.to, t_range.start),
            to: self.from.lerp(self.to, t_range.end),
        }
    }

    /// Split this curve into two sub-segments.
    #[inline]
    pub fn split(&self, t: S) -> (Self, Self) {
        let split_point = self.sample(t);

        (
            LineSegment {
                from: self.from,
                to: split_point,
            },
            LineSegment {
                from: split_point,
                to: self.to,
            },
        )
    }

    /// Split this segment, or `None` if `t` is outside of `[0, 1]`.
    #[inline]
    pub fn split_at(&self, t: S) -> Option<(Self, Self)> {
        if t < S::ZERO || t > S::ONE {
            return None;
        }

        Some(self.split(t))
    }

    /// Return the segment before the split point.
    #[inline]
    pub fn before_split(&self, t: S) -> Self {
        LineSegment {
            from: self.from,
            to: self.sample(t),
        }
    }

    /// Return the segment after the split point.
    #[inline]
    pub fn after_split(&self, t: S) -> Self {
        LineSegment {
            from: self.sample(t),
            to: self.to,
        }
    }

    /// Return the smallest rectangle containing this segment.
    #[inline]
    pub fn bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.bounding_range_x();
        let (min_y, max_y) = self.bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    #[inline]
    fn bounding_range_x(&self) -> (S, S) {
        min_max(self.from.x, self.to.x)
    }

    #[inline]
    fn bounding_range_y(&self) -> (S, S) {
        min_max(self.from.y, self.to.y)
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// Returns the line containing this segment.
    #[inline]
    pub fn to_line(&self) -> Line<S> {
        Line {
            point: self.from,
            vector: self.to - self.from,
        }
    }

    /// The canonical cubic form of this segment, control points at a third and two thirds.
    pub fn to_cubic(&self) -> CubicBezierSegment<S> {
        CubicBezierSegment {
            from: self.from,
            ctrl1: self.from.lerp(self.to, S::ONE / S::THREE),
            ctrl2: self.from.lerp(self.to, S::TWO / S::THREE),
            to: self.to,
        }
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    /// Computes the squared length of this segment.
    #[inline]
    pub fn square_length(&self) -> S {
        self.to_vector().square_length()
    }

    /// Computes the mid-point of this segment.
    #[inline]
    pub fn mid_point(&self) -> Point<S> {
        self.from.lerp(self.to, S::HALF)
    }

    #[inline]
    pub fn translate(&self, by: Vector<S>) -> Self {
        LineSegment {
            from: self.from + by,
            to: self.to + by,
        }
    }

    /// Computes the intersection (if any) between this segment and another one.
    ///
    /// The result is provided in the form of the `t` parameter of each
    /// segment. To get the intersection point, sample one of the segments
    /// at the corresponding value.
    #[allow(clippy::suspicious_operation_groupings)]
    pub fn intersection_t(&self, other: &Self) -> Option<(S, S)> {
        if self.to == other.to
            || self.from == other.from
            || self.from == other.to
            || self.to == other.from
        {
            return None;
        }

        let v1 = self.to_vector();
        let v2 = other.to_vector();

        let v1_cross_v2 = v1.cross(v2);

        if v1_cross_v2 == S::ZERO {
            // The segments are parallel
            return None;
        }

        let sign_v1_cross_v2 = S::signum(v1_cross_v2);
        let abs_v1_cross_v2 = S::abs(v1_cross_v2);

        let v3 = other.from - self.from;

        // t and u should be divided by v1_cross_v2, but we postpone that to not lose precision.
        // We have to respect the sign of v1_cross_v2 (and therefore t and u) so we apply it now and
        // will use the absolute value of v1_cross_v2 afterwards.
        let t = v3.cross(v2) * sign_v1_cross_v2;
        let u = v3.cross(v1) * sign_v1_cross_v2;

        if t < S::ZERO || t > abs_v1_cross_v2 || u < S::ZERO || u > abs_v1_cross_v2 {
            return None;
        }

        Some((t / abs_v1_cross_v2, u / abs_v1_cross_v2))
    }

    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Point<S>> {
        self.intersection_t(other).map(|(t, _)| self.sample(t))
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection_t(other).is_some()
    }

    /// Computes the distance between this segment and a point.
    #[inline]
    pub fn distance_to_point(&self, p: Point<S>) -> S {
        self.square_distance_to_point(p).sqrt()
    }

    /// Computes the squared distance between this segment and a point.
    #[inline]
    pub fn square_distance_to_point(&self, p: Point<S>) -> S {
        (self.closest_point(p) - p).square_length()
    }

    /// Computes the closest point on this segment to `p`.
    #[inline]
    pub fn closest_point(&self, p: Point<S>) -> Point<S> {
        let v1 = self.to - self.from;
        let v2 = p - self.from;
        let t = S::min(S::max(v2.dot(v1) / v1.dot(v1), S::ZERO), S::ONE);

        self.from + v1 * t
    }

    /// Slope information of the line containing this segment.
    #[inline]
    pub fn slope(&self) -> Slope<S> {
        Slope::of(self)
    }

    #[inline]
    pub fn to_f64(&self) -> LineSegment<f64> {
        LineSegment {
            from: self.from.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

impl<S: Scalar> Segment for LineSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for LineSegment<S> {
    type Scalar = S;
    fn bounding_range_x(&self) -> (S, S) {
        self.bounding_range_x()
    }
    fn bounding_range_y(&self) -> (S, S) {
        self.bounding_range_y()
    }
    fn fast_bounding_range_x(&self) -> (S, S) {
        self.bounding_range_x()
    }
    fn fast_bounding_range_y(&self) -> (S, S) {
        self.bounding_range_y()
    }
}

/// An infinite line defined by a point and a vector.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Line<S> {
    pub point: Point<S>,
    pub vector: Vector<S>,
}

impl<S: Scalar> Line<S> {
    pub fn intersection(&self, other: &Self) -> Option<Point<S>> {
        let det = self.vector.cross(other.vector);
        if S::abs(det) <= S::EPSILON {
            // The lines are very close to parallel
            return None;
        }
        let inv_det = S::ONE / det;
        let self_p2 = self.point + self.vector;
        let other_p2 = other.point + other.vector;
        let a = self.point.to_vector().cross(self_p2.to_vector());
        let b = other.point.to_vector().cross(other_p2.to_vector());

        Some(point(
            (b * self.vector.x - a * other.vector.x) * inv_det,
            (b * self.vector.y - a * other.vector.y) * inv_det,
        ))
    }

    pub fn distance_to_point(&self, p: &Point<S>) -> S {
        S::abs(self.signed_distance_to_point(p))
    }

    pub fn signed_distance_to_point(&self, p: &Point<S>) -> S {
        let v = *p - self.point;
        self.vector.cross(v) / self.vector.length()
    }

    pub fn equation(&self) -> LineEquation<S> {
        let a = -self.vector.y;
        let b = self.vector.x;
        let c = -(a * self.point.x + b * self.point.y);

        LineEquation::new(a, b, c)
    }
}

/// A line defined by the equation
/// `a * x + b * y + c = 0; a * a + b * b = 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineEquation<S> {
    a: S,
    b: S,
    c: S,
}

impl<S: Scalar> LineEquation<S> {
    pub fn new(a: S, b: S, c: S) -> Self {
        debug_assert!(a != S::ZERO || b != S::ZERO);
        let div = S::ONE / S::sqrt(a * a + b * b);
        LineEquation {
            a: a * div,
            b: b * div,
            c: c * div,
        }
    }

    #[inline]
    pub fn a(&self) -> S {
        self.a
    }

    #[inline]
    pub fn b(&self) -> S {
        self.b
    }

    #[inline]
    pub fn c(&self) -> S {
        self.c
    }

    #[inline]
    pub fn signed_distance_to_point(&self, p: &Point<S>) -> S {
        self.a * p.x + self.b * p.y + self.c
    }

    #[inline]
    pub fn distance_to_point(&self, p: &Point<S>) -> S {
        S::abs(self.signed_distance_to_point(p))
    }

    #[inline]
    pub fn normal(&self) -> Vector<S> {
        vector(self.a, self.b)
    }
}

/// Slope and y-intercept of the line containing a segment.
///
/// Derived on demand for parallel and coincidence tests, never stored with the segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Slope<S> {
    pub line: LineSegment<S>,
    /// `false` for vertical lines, in which case `slope` and `y_intercept` are meaningless.
    pub has_slope: bool,
    pub slope: S,
    pub y_intercept: S,
}

impl<S: Scalar> Slope<S> {
    pub fn of(line: &LineSegment<S>) -> Self {
        let dx = line.to.x - line.from.x;
        if round_to(dx, S::from_f64(DEFAULT_ROUNDING_ACCURACY)) == S::ZERO {
            return Slope {
                line: *line,
                has_slope: false,
                slope: S::ZERO,
                y_intercept: S::ZERO,
            };
        }

        let slope = (line.to.y - line.from.y) / dx;

        Slope {
            line: *line,
            has_slope: true,
            slope,
            y_intercept: line.from.y - slope * line.from.x,
        }
    }
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point<f64>, b: Point<f64>, epsilon: f64) -> bool {
    (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon
}

#[test]
fn intersection_touching() {
    let l1 = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 10.0),
    };

    let l2 = LineSegment {
        from: point(10.0, 10.0),
        to: point(10.0, 0.0),
    };

    assert!(!l1.intersects(&l2));
    assert!(l1.intersection(&l2).is_none());
}

#[test]
fn crossing_diagonals() {
    let l1 = LineSegment {
        from: point(0.0, 1.0),
        to: point(10.0, -1.0),
    };
    let l2 = LineSegment {
        from: point(0.0, -1.0),
        to: point(10.0, 1.0),
    };

    assert!(fuzzy_eq_point(
        l1.intersection(&l2).unwrap(),
        point(5.0, 0.0),
        1e-9
    ));
}

#[test]
fn line_to_cubic_is_straight() {
    let l = LineSegment {
        from: point(0.0, 0.0),
        to: point(9.0, 3.0),
    };
    let c = l.to_cubic();

    assert_eq!(c.ctrl1, point(3.0, 1.0));
    assert_eq!(c.ctrl2, point(6.0, 2.0));
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!(fuzzy_eq_point(c.sample(t), l.sample(t), 1e-9));
    }
}

#[test]
fn split_at_out_of_range() {
    let l = LineSegment {
        from: point(0.0, 0.0),
        to: point(1.0, 0.0),
    };

    assert!(l.split_at(-0.1).is_none());
    assert!(l.split_at(1.1).is_none());
    let (a, b) = l.split_at(0.25).unwrap();
    assert_eq!(a.to, point(0.25, 0.0));
    assert_eq!(b.from, point(0.25, 0.0));
}

#[test]
fn slope_of_segments() {
    let vertical = Slope::of(&LineSegment {
        from: point(3.0, 0.0),
        to: point(3.0, 5.0),
    });
    assert!(!vertical.has_slope);

    let diagonal = Slope::of(&LineSegment {
        from: point(1.0, 3.0),
        to: point(2.0, 5.0),
    });
    assert!(diagonal.has_slope);
    assert_eq!(diagonal.slope, 2.0);
    assert_eq!(diagonal.y_intercept, 1.0);
}

#[test]
fn bounding_box() {
    let l = LineSegment {
        from: point(5.0, 5.0),
        to: point(1.0, 1.0),
    };

    assert_eq!(
        l.bounding_box(),
        Box2D {
            min: point(1.0, 1.0),
            max: point(5.0, 5.0),
        }
    );
}
