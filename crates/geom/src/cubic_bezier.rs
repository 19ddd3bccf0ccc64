use crate::cubic_bezier_intersections::{cubic_bezier_intersections_t, IntersectionOptions};
use crate::scalar::Scalar;
use crate::segment::{BoundingBox, Segment};
use crate::utils::{cubic_polynomial_roots, min_max, normalized_tangent};
use crate::{point, Box2D, Point, Vector};
use crate::{Line, LineSegment, QuadraticBezierSegment};
use arrayvec::ArrayVec;

use core::cmp::Ordering;
use core::ops::Range;
use std::vec::Vec;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
///
/// This is the canonical form lines, quadratic curves and circular arcs are converted to
/// before being measured, split, offset or intersected.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Sample the curve at t.
    ///
    /// Values of t outside of `[0, 1]` extrapolate the curve.
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve at each of the provided t values, in order.
    pub fn sample_many(&self, ts: &[S]) -> Vec<Point<S>> {
        ts.iter().map(|t| self.sample(*t)).collect()
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: S) -> S {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from.x * one_t3
            + self.ctrl1.x * S::THREE * one_t2 * t
            + self.ctrl2.x * S::THREE * one_t * t2
            + self.to.x * t3
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: S) -> S {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from.y * one_t3
            + self.ctrl1.y * S::THREE * one_t2 * t
            + self.ctrl2.y * S::THREE * one_t * t2
            + self.to.y * t3
    }

    #[inline]
    fn derivative_coefficients(&self, t: S) -> (S, S, S, S) {
        let t2 = t * t;
        (
            -S::THREE * t2 + S::SIX * t - S::THREE,
            S::NINE * t2 - S::value(12.0) * t + S::THREE,
            -S::NINE * t2 + S::SIX * t,
            S::THREE * t2,
        )
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.to_vector() * c0
            + self.ctrl1.to_vector() * c1
            + self.ctrl2.to_vector() * c2
            + self.to.to_vector() * c3
    }

    /// Direction of the curve at t.
    ///
    /// Unlike the derivative this does not vanish at an end point whose control point is
    /// coincident with it.
    fn direction(&self, t: S) -> Vector<S> {
        let d = self.derivative(t);
        if d.square_length() > S::EPSILON * S::EPSILON {
            return d;
        }

        let fallback = if t < S::HALF {
            self.ctrl2 - self.from
        } else {
            self.to - self.ctrl1
        };
        if fallback.square_length() > S::EPSILON * S::EPSILON {
            return fallback;
        }

        self.to - self.from
    }

    /// Unit normal at t, the direction rotated 90° counter-clockwise.
    ///
    /// Not finite if the whole curve is a single point.
    pub fn normal(&self, t: S) -> Vector<S> {
        normalized_tangent(self.direction(t))
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        let from = self.sample(t0);
        let to = self.sample(t1);

        let d = QuadraticBezierSegment {
            from: (self.ctrl1 - self.from).to_point(),
            ctrl: (self.ctrl2 - self.ctrl1).to_point(),
            to: (self.to - self.ctrl2).to_point(),
        };

        let dt = t1 - t0;
        let ctrl1 = from + d.sample(t0).to_vector() * dt;
        let ctrl2 = to - d.sample(t1).to_vector() * dt;

        CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Split this curve into two sub-curves using de Casteljau's algorithm.
    pub fn split(&self, t: S) -> (CubicBezierSegment<S>, CubicBezierSegment<S>) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Split this curve into `[0, t]` and `[t, 1]`, or `None` if `t` is outside of `[0, 1]`.
    ///
    /// The curve itself is left untouched, callers pick which half replaces it.
    pub fn split_at(&self, t: S) -> Option<(Self, Self)> {
        if t < S::ZERO || t > S::ONE {
            return None;
        }

        Some(self.split(t))
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: S) -> CubicBezierSegment<S> {
        self.split(t).0
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: S) -> CubicBezierSegment<S> {
        self.split(t).1
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Returns true if the curve can be approximated with a single line segment, given
    /// a tolerance threshold.
    pub fn is_linear(&self, tolerance: S) -> bool {
        // Similar to Line::square_distance_to_point, except we keep
        // the sign of c1 and c2 to compute tighter upper bounds.
        let baseline = self.to - self.from;
        let v1 = self.ctrl1 - self.from;
        let v2 = self.ctrl2 - self.from;
        let c1 = baseline.cross(v1);
        let c2 = baseline.cross(v2);
        let inv_baseline_len2 = S::ONE / baseline.square_length();
        let d1 = (c1 * c1) * inv_baseline_len2;
        let d2 = (c2 * c2) * inv_baseline_len2;

        let factor = if (c1 * c2) > S::ZERO {
            S::THREE / S::FOUR
        } else {
            S::FOUR / S::NINE
        };

        let f2 = factor * factor;
        let threshold = tolerance * tolerance;

        d1 * f2 <= threshold && d2 * f2 <= threshold
    }

    /// Returns whether the curve can be approximated with a single point, given
    /// a tolerance threshold.
    pub fn is_a_point(&self, tolerance: S) -> bool {
        let tolerance_squared = tolerance * tolerance;
        // Use <= so that tolerance can be zero.
        (self.from - self.to).square_length() <= tolerance_squared
            && (self.from - self.ctrl1).square_length() <= tolerance_squared
            && (self.to - self.ctrl2).square_length() <= tolerance_squared
    }

    /// Whether offsetting the control polygon gives a faithful parallel curve.
    ///
    /// Both control points must lie on the same side of the baseline and the normals at
    /// the end points must be less than 60° apart.
    pub fn is_simple(&self) -> bool {
        let baseline = self.to - self.from;
        let c1 = baseline.cross(self.ctrl1 - self.from);
        let c2 = baseline.cross(self.ctrl2 - self.from);
        if (c1 > S::ZERO && c2 < S::ZERO) || (c1 < S::ZERO && c2 > S::ZERO) {
            return false;
        }

        let cos = self.normal(S::ZERO).dot(self.normal(S::ONE));
        let angle = S::abs(S::acos(cos.max(-S::ONE).min(S::ONE)));

        angle < S::PI() / S::THREE
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    #[inline]
    pub fn translate(&self, by: Vector<S>) -> Self {
        CubicBezierSegment {
            from: self.from + by,
            ctrl1: self.ctrl1 + by,
            ctrl2: self.ctrl2 + by,
            to: self.to + by,
        }
    }

    /// Arc length of the curve.
    ///
    /// Computed with a 24 points Gauss-Legendre quadrature of the derivative's norm.
    pub fn length(&self) -> S {
        let half = S::HALF;
        let mut sum = S::ZERO;
        for &(abscissa, weight) in &GAUSS_LEGENDRE_24 {
            let x = S::from_f64(abscissa) * half;
            let w = S::from_f64(weight);
            sum += w * self.derivative(half + x).length();
            sum += w * self.derivative(half - x).length();
        }

        sum * half
    }

    /// Invokes a callback for each monotonic part of the segment.
    pub fn for_each_monotonic_range<F>(&self, cb: &mut F)
    where
        F: FnMut(Range<S>),
    {
        let mut extrema: ArrayVec<S, 4> = ArrayVec::new();
        self.for_each_local_x_extremum_t(&mut |t| extrema.push(t));
        self.for_each_local_y_extremum_t(&mut |t| extrema.push(t));
        extrema.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mut t0 = S::ZERO;
        for &t in &extrema {
            if t != t0 {
                cb(t0..t);
                t0 = t;
            }
        }

        cb(t0..S::ONE);
    }

    /// Invokes a callback with the t value of each local x extremum.
    pub fn for_each_local_x_extremum_t<F>(&self, cb: &mut F)
    where
        F: FnMut(S),
    {
        Self::for_each_local_extremum(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x, cb)
    }

    /// Invokes a callback with the t value of each local y extremum.
    pub fn for_each_local_y_extremum_t<F>(&self, cb: &mut F)
    where
        F: FnMut(S),
    {
        Self::for_each_local_extremum(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y, cb)
    }

    fn for_each_local_extremum<F>(p0: S, p1: S, p2: S, p3: S, cb: &mut F)
    where
        F: FnMut(S),
    {
        // The derivative of a cubic bezier curve is a second degree polynomial
        // f(x) = a * x² + b * x + c such as :
        let a = S::THREE * (p3 + S::THREE * (p1 - p2) - p0);
        let b = S::SIX * (p2 - S::TWO * p1 + p0);
        let c = S::THREE * (p1 - p0);

        fn in_range<S: Scalar>(t: S) -> bool {
            t > S::ZERO && t < S::ONE
        }

        // If the derivative is a linear function
        if a == S::ZERO {
            if b != S::ZERO {
                let t = -c / b;
                if in_range(t) {
                    cb(t);
                }
            }
            return;
        }

        let discriminant = b * b - S::FOUR * a * c;

        // There is no Real solution for the equation
        if discriminant < S::ZERO {
            return;
        }

        // There is one Real solution for the equation
        if discriminant == S::ZERO {
            let t = -b / (S::TWO * a);
            if in_range(t) {
                cb(t);
            }
            return;
        }

        // There are two Real solutions for the equation
        let discriminant_sqrt = discriminant.sqrt();

        let (first_extremum, second_extremum) = min_max(
            (-b - discriminant_sqrt) / (S::TWO * a),
            (-b + discriminant_sqrt) / (S::TWO * a),
        );

        if in_range(first_extremum) {
            cb(first_extremum);
        }

        if in_range(second_extremum) {
            cb(second_extremum);
        }
    }

    /// Find the advancement of the y-most position in the curve.
    ///
    /// This returns the advancement along the curve, not the actual y position.
    pub fn y_maximum_t(&self) -> S {
        let mut max_t = S::ZERO;
        let mut max_y = self.from.y;
        if self.to.y > max_y {
            max_t = S::ONE;
            max_y = self.to.y;
        }
        self.for_each_local_y_extremum_t(&mut |t| {
            let y = self.y(t);
            if y > max_y {
                max_t = t;
                max_y = y;
            }
        });

        max_t
    }

    /// Find the advancement of the y-least position in the curve.
    pub fn y_minimum_t(&self) -> S {
        let mut min_t = S::ZERO;
        let mut min_y = self.from.y;
        if self.to.y < min_y {
            min_t = S::ONE;
            min_y = self.to.y;
        }
        self.for_each_local_y_extremum_t(&mut |t| {
            let y = self.y(t);
            if y < min_y {
                min_t = t;
                min_y = y;
            }
        });

        min_t
    }

    /// Find the advancement of the x-most position in the curve.
    pub fn x_maximum_t(&self) -> S {
        let mut max_t = S::ZERO;
        let mut max_x = self.from.x;
        if self.to.x > max_x {
            max_t = S::ONE;
            max_x = self.to.x;
        }
        self.for_each_local_x_extremum_t(&mut |t| {
            let x = self.x(t);
            if x > max_x {
                max_t = t;
                max_x = x;
            }
        });

        max_t
    }

    /// Find the advancement of the x-least position in the curve.
    pub fn x_minimum_t(&self) -> S {
        let mut min_t = S::ZERO;
        let mut min_x = self.from.x;
        if self.to.x < min_x {
            min_t = S::ONE;
            min_x = self.to.x;
        }
        self.for_each_local_x_extremum_t(&mut |t| {
            let x = self.x(t);
            if x < min_x {
                min_t = t;
                min_x = x;
            }
        });

        min_t
    }

    /// Returns a conservative rectangle the curve is contained in.
    ///
    /// This is the bounding box of the control polygon. It is faster than `bounding_box`
    /// but generally larger than the curve.
    pub fn fast_bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.fast_bounding_range_x();
        let (min_y, max_y) = self.fast_bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    #[inline]
    pub fn fast_bounding_range_x(&self) -> (S, S) {
        let min_x = self.from.x.min(self.ctrl1.x).min(self.ctrl2.x).min(self.to.x);
        let max_x = self.from.x.max(self.ctrl1.x).max(self.ctrl2.x).max(self.to.x);

        (min_x, max_x)
    }

    #[inline]
    pub fn fast_bounding_range_y(&self) -> (S, S) {
        let min_y = self.from.y.min(self.ctrl1.y).min(self.ctrl2.y).min(self.to.y);
        let max_y = self.from.y.max(self.ctrl1.y).max(self.ctrl2.y).max(self.to.y);

        (min_y, max_y)
    }

    /// Returns the smallest rectangle that contains the curve.
    #[inline]
    pub fn bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = self.bounding_range_x();
        let (min_y, max_y) = self.bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns the smallest range of x that contains this curve.
    #[inline]
    pub fn bounding_range_x(&self) -> (S, S) {
        let min_x = self.x(self.x_minimum_t());
        let max_x = self.x(self.x_maximum_t());

        (min_x, max_x)
    }

    /// Returns the smallest range of y that contains this curve.
    #[inline]
    pub fn bounding_range_y(&self) -> (S, S) {
        let min_y = self.y(self.y_minimum_t());
        let max_y = self.y(self.y_maximum_t());

        (min_y, max_y)
    }

    /// Returns whether this segment is fully monotonic.
    pub fn is_monotonic(&self) -> bool {
        let mut found = false;
        self.for_each_local_x_extremum_t(&mut |_| found = true);
        self.for_each_local_y_extremum_t(&mut |_| found = true);
        !found
    }

    /// Computes the intersections (if any) between this segment and another one.
    ///
    /// The result is provided in the form of the `t` parameters of each point along the curves,
    /// one pair per distinct intersection. To get the intersection points, sample the curves at
    /// the corresponding values.
    ///
    /// Returns no intersections if either curve is a point, or if the curves are the same.
    pub fn cubic_intersections_t(
        &self,
        curve: &CubicBezierSegment<S>,
        options: &IntersectionOptions<S>,
    ) -> Vec<(S, S)> {
        cubic_bezier_intersections_t(self, curve, options)
    }

    /// Computes the intersection points (if any) between this segment and another one.
    pub fn cubic_intersections(
        &self,
        curve: &CubicBezierSegment<S>,
        options: &IntersectionOptions<S>,
    ) -> Vec<Point<S>> {
        self.cubic_intersections_t(curve, options)
            .into_iter()
            .map(|(t, _)| self.sample(t))
            .collect()
    }

    /// Computes the intersections (if any) between this segment and a line.
    ///
    /// The result is provided in the form of the `t` parameters of each
    /// point along curve, in increasing order.
    pub fn line_intersections_t(&self, line: &Line<S>) -> ArrayVec<S, 3> {
        if line.vector.square_length() < S::EPSILON {
            return ArrayVec::new();
        }

        let from = self.from.to_vector();
        let ctrl1 = self.ctrl1.to_vector();
        let ctrl2 = self.ctrl2.to_vector();
        let to = self.to.to_vector();

        let p1 = to - from + (ctrl1 - ctrl2) * S::THREE;
        let p2 = from * S::THREE + (ctrl2 - ctrl1 * S::TWO) * S::THREE;
        let p3 = (ctrl1 - from) * S::THREE;
        let p4 = from;

        let c = line.point.y * line.vector.x - line.point.x * line.vector.y;

        let roots = cubic_polynomial_roots(
            line.vector.y * p1.x - line.vector.x * p1.y,
            line.vector.y * p2.x - line.vector.x * p2.y,
            line.vector.y * p3.x - line.vector.x * p3.y,
            line.vector.y * p4.x - line.vector.x * p4.y + c,
        );

        let mut result: ArrayVec<S, 3> = ArrayVec::new();

        for root in roots {
            if root >= S::ZERO && root <= S::ONE && !result.contains(&root) {
                result.push(root);
            }
        }

        result.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        result
    }

    /// Computes the intersection points (if any) between this segment and a line.
    pub fn line_intersections(&self, line: &Line<S>) -> ArrayVec<Point<S>, 3> {
        self.line_intersections_t(line)
            .into_iter()
            .map(|t| self.sample(t))
            .collect()
    }

    /// Computes the intersections (if any) between this segment and a line segment.
    ///
    /// The result is provided in the form of the `t` parameters of each
    /// point along curve and segment, ordered along the curve.
    pub fn line_segment_intersections_t(&self, segment: &LineSegment<S>) -> ArrayVec<(S, S), 3> {
        if !self
            .fast_bounding_box()
            .inflate(S::EPSILON, S::EPSILON)
            .intersects(&segment.bounding_box().inflate(S::EPSILON, S::EPSILON))
        {
            return ArrayVec::new();
        }

        let intersections = self.line_intersections_t(&segment.to_line());

        let mut result = ArrayVec::new();
        if intersections.is_empty() {
            return result;
        }

        let seg_is_mostly_vertical =
            S::abs(segment.from.y - segment.to.y) >= S::abs(segment.from.x - segment.to.x);
        let (seg_long_axis_min, seg_long_axis_max) = if seg_is_mostly_vertical {
            min_max(segment.from.y, segment.to.y)
        } else {
            min_max(segment.from.x, segment.to.x)
        };

        for t in intersections {
            let intersection_xy = if seg_is_mostly_vertical {
                self.y(t)
            } else {
                self.x(t)
            };
            if intersection_xy >= seg_long_axis_min && intersection_xy <= seg_long_axis_max {
                let t2 = (self.sample(t) - segment.from).length() / segment.length();
                // Don't take intersections that are on endpoints of both curves at the same time.
                if (t != S::ZERO && t != S::ONE) || (t2 != S::ZERO && t2 != S::ONE) {
                    result.push((t, t2));
                }
            }
        }

        result
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    pub fn to_f64(&self) -> CubicBezierSegment<f64> {
        CubicBezierSegment {
            from: self.from.to_f64(),
            ctrl1: self.ctrl1.to_f64(),
            ctrl2: self.ctrl2.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

impl<S: Scalar> Segment for CubicBezierSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for CubicBezierSegment<S> {
    impl_bounding_box!(S);
}

// Positive abscissae and weights of the 24 points Gauss-Legendre rule on [-1, 1].
const GAUSS_LEGENDRE_24: [(f64, f64); 12] = [
    (0.0640568928626056260850430826247450385909, 0.1279381953467521569740561652246953718517),
    (0.1911188674736163091586398207570696318404, 0.1258374563468282961213753825111836887264),
    (0.3150426796961633743867932913198102407864, 0.1216704729278033912044631534762624256070),
    (0.4337935076260451384870842319133497124524, 0.1155056680537256013533444839067835598622),
    (0.5454214713888395356583756172183723700107, 0.1074442701159656347825773424466062227946),
    (0.6480936519369755692524957869107476266696, 0.0976186521041138882698806644642471544279),
    (0.7401241915785543642438281030999784255232, 0.0861901615319532759171852029837426671850),
    (0.8200019859739029219539498726697452080761, 0.0733464814110803057340336152531165181193),
    (0.8864155270044010342131543419821967550873, 0.0592985849154367807463677585001085845412),
    (0.9382745520027327585236490017087214496548, 0.0442774388174198061686027482113382288593),
    (0.9747285559713094981983919930081690617411, 0.0285313886289336631813078159518782864491),
    (0.9951872199970213601799974097007368118745, 0.0123412297999871995468056670700372915759),
];

#[cfg(test)]
fn fuzzy_eq_point(a: Point<f64>, b: Point<f64>, epsilon: f64) -> bool {
    (a - b).length() <= epsilon
}

#[test]
fn fast_bounding_box_for_cubic_bezier_segment() {
    let a = CubicBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl1: Point::new(0.5, 1.0),
        ctrl2: Point::new(1.5, -1.0),
        to: Point::new(2.0, 0.0),
    };

    let expected_aabb = Box2D {
        min: point(0.0, -1.0),
        max: point(2.0, 1.0),
    };

    assert_eq!(expected_aabb, a.fast_bounding_box())
}

#[test]
fn minimum_bounding_box_for_cubic_bezier_segment() {
    let a = CubicBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl1: Point::new(0.5, 2.0),
        ctrl2: Point::new(1.5, -2.0),
        to: Point::new(2.0, 0.0),
    };

    let expected_bigger_aabb: Box2D<f32> = Box2D {
        min: point(0.0, -0.6),
        max: point(2.0, 0.6),
    };
    let expected_smaller_aabb: Box2D<f32> = Box2D {
        min: point(0.1, -0.5),
        max: point(2.0, 0.5),
    };

    let actual_minimum_aabb = a.bounding_box();

    assert!(expected_bigger_aabb.contains_box(&actual_minimum_aabb));
    assert!(actual_minimum_aabb.contains_box(&expected_smaller_aabb));
}

#[test]
fn y_maximum_t_for_simple_cubic_segment() {
    let a = CubicBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl1: Point::new(0.5, 1.0),
        ctrl2: Point::new(1.5, 1.0),
        to: Point::new(2.0, 2.0),
    };

    assert_eq!(a.y_maximum_t(), 1.0);
    assert_eq!(a.y_minimum_t(), 0.0);
}

#[test]
fn y_extrema_for_simple_cubic_segment() {
    let a = CubicBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl1: Point::new(1.0, 2.0),
        ctrl2: Point::new(2.0, 2.0),
        to: Point::new(3.0, 0.0),
    };

    let mut n: u32 = 0;
    a.for_each_local_y_extremum_t(&mut |t| {
        assert_eq!(t, 0.5);
        n += 1;
    });
    assert_eq!(n, 1);
    assert!(!a.is_monotonic());
}

#[test]
fn derivatives() {
    let c1 = CubicBezierSegment {
        from: Point::new(1.0, 1.0),
        ctrl1: Point::new(1.0, 2.0),
        ctrl2: Point::new(2.0, 1.0),
        to: Point::new(2.0, 2.0),
    };

    assert_eq!(c1.derivative(0.0).x, 0.0);
    assert_eq!(c1.derivative(1.0).x, 0.0);
    assert_eq!(c1.derivative(0.5).y, 0.0);
}

#[test]
fn normal_with_coincident_control_point() {
    let c = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(0.0, 0.0),
        ctrl2: point(10.0, 0.0),
        to: point(10.0, 0.0),
    };

    let n = c.normal(0.0);
    assert!((n.x - 0.0).abs() < 1e-12);
    assert!((n.y - 1.0).abs() < 1e-12);
}

#[test]
fn split_at_joins_at_sample() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 3.0),
        ctrl2: point(4.0, -2.0),
        to: point(5.0, 1.0),
    };

    assert!(curve.split_at(-0.01).is_none());
    assert!(curve.split_at(1.01).is_none());

    for i in 1..10 {
        let t = i as f64 / 10.0;
        let (left, right) = curve.split_at(t).unwrap();
        let expected = curve.sample(t);
        assert!(fuzzy_eq_point(left.sample(1.0), expected, 1e-12));
        assert!(fuzzy_eq_point(right.sample(0.0), expected, 1e-12));
        assert_eq!(left.from, curve.from);
        assert_eq!(right.to, curve.to);
    }
}

#[test]
fn sample_many_preserves_order() {
    let curve = LineSegment {
        from: point(0.0, 0.0),
        to: point(3.0, 0.0),
    }
    .to_cubic();

    let points = curve.sample_many(&[1.0, 0.0, 0.5]);
    assert_eq!(points.len(), 3);
    assert!(fuzzy_eq_point(points[0], point(3.0, 0.0), 1e-12));
    assert!(fuzzy_eq_point(points[1], point(0.0, 0.0), 1e-12));
    assert!(fuzzy_eq_point(points[2], point(1.5, 0.0), 1e-12));
}

#[test]
fn length_of_a_line_in_cubic_form() {
    let line = LineSegment {
        from: point(0.0f64, 0.0),
        to: point(100.0, 0.0),
    };
    assert!((line.to_cubic().length() - 100.0).abs() < 1e-6);

    let weights: f64 = GAUSS_LEGENDRE_24.iter().map(|&(_, w)| w).sum();
    assert!((weights * 2.0 - 2.0).abs() < 1e-12);
}

#[test]
fn length_of_straight_and_curved_segments() {
    let straight = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(1.0, 0.0),
        to: point(2.0, 0.0),
    };
    assert!((straight.length() - 2.0).abs() < 0.0001);

    // Quarter of a unit circle.
    let k = 0.5522847498307936;
    let quarter = CubicBezierSegment {
        from: point(1.0f64, 0.0),
        ctrl1: point(1.0, k),
        ctrl2: point(k, 1.0),
        to: point(0.0, 1.0),
    };
    assert!((quarter.length() - core::f64::consts::FRAC_PI_2).abs() < 0.001);
}

#[test]
fn simple_segments() {
    let arch = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 0.3),
        ctrl2: point(2.0, 0.3),
        to: point(3.0, 0.0),
    };
    assert!(arch.is_simple());

    let s_curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(2.0, -1.0),
        to: point(3.0, 0.0),
    };
    assert!(!s_curve.is_simple());

    let u_turn = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 2.0),
        ctrl2: point(2.0, 2.0),
        to: point(2.0, 0.0),
    };
    assert!(!u_turn.is_simple());
}

#[test]
fn line_intersections_are_sorted() {
    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(1.0, 2.0),
        ctrl2: point(2.0, -2.0),
        to: point(3.0, 0.0),
    };
    let line = Line {
        point: point(0.0, 0.1),
        vector: crate::vector(1.0, 0.0),
    };

    let ts = curve.line_intersections_t(&line);
    assert_eq!(ts.len(), 2);
    assert!(ts[0] < ts[1]);
    for t in ts {
        assert!((curve.y(t) - 0.1).abs() < 1e-9);
    }

    let segment = LineSegment {
        from: point(1.0, -1.0),
        to: point(1.0, 1.0),
    };
    let hits = curve.line_segment_intersections_t(&segment);
    assert_eq!(hits.len(), 1);
    assert!(fuzzy_eq_point(
        curve.sample(hits[0].0),
        segment.sample(hits[0].1),
        1e-9
    ));
}
