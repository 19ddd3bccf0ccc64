//! Conversions between circular arcs and cubic bézier curves.
//!
//! A circular arc of at most 90° is approximated by a single cubic bézier curve with a bounded
//! error. Wider arcs have to be split first, which [`ArcApproximator::arc_to_cubics`] does.
//!
//! The inverse direction, [`cubic_to_arcs`], approximates a cubic bézier curve with a sequence
//! of circular arcs (and line segments where the curve is straight).

use crate::scalar::Scalar;
use crate::utils::{angle_of_point_in_degrees, rotate};
use crate::{point, CircularArc, CubicBezierSegment, Line, LineSegment, Point};

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::vec::Vec;

/// Default maximum distance between a cubic bézier curve and the arcs approximating it.
pub const DEFAULT_ARC_ERROR_THRESHOLD: f64 = 0.001;

/// Widest arc (in degrees) that converts to a single cubic bézier curve.
pub const MAX_CUBIC_ARC_SPAN: f64 = 90.0;

// Upper bound on the bisection steps looking for the end of an arc.
const MAX_FIT_STEPS: u32 = 30;

// Smallest parameter range covered by a fitted segment.
const MIN_FIT_STEP: f64 = 1.0 / 256.0;

/// Converts circular arcs to cubic bézier curves.
///
/// The control point offset only depends on the span of the arc, so it is memoized per span.
/// The cache is never invalidated, entries are a pure function of their key.
#[derive(Debug)]
pub struct ArcApproximator<S> {
    cache: Mutex<HashMap<u64, S>>,
}

impl<S: Scalar> Default for ArcApproximator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar> ArcApproximator<S> {
    pub fn new() -> Self {
        ArcApproximator {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Offset of the control points from the end points, for a unit circle, along the
    /// tangents of an arc spanning `span_in_radians`.
    ///
    /// Computed as `4 * tan(span / 4) / 3`.
    pub fn control_y_for_circular_cubic(&self, span_in_radians: S) -> S {
        let key = span_in_radians.to_f64().unwrap_or(f64::NAN).to_bits();
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        *cache.entry(key).or_insert_with(|| {
            log::trace!("computing the control offset of a {:?} rad arc", span_in_radians);
            S::FOUR * S::tan(span_in_radians / S::FOUR) / S::THREE
        })
    }

    /// Number of distinct spans memoized so far.
    pub fn cached_spans(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The two control points of the cubic bézier curve approximating the arc.
    ///
    /// Only meaningful for arcs of at most 90°.
    pub fn control_points_for_circular_cubic(&self, arc: &CircularArc<S>) -> (Point<S>, Point<S>) {
        let span = arc.span();
        let y = self.control_y_for_circular_cubic(span.to_radians());
        let origin = point(S::ZERO, S::ZERO);

        // Arc starting at 0°, then mirrored on the x axis and rotated by the span for the
        // second control point.
        let c1 = point(arc.radius, arc.radius * y);
        let c2 = rotate(point(c1.x, -c1.y), span, origin);

        (
            arc.center + rotate(c1, arc.start_angle, origin).to_vector(),
            arc.center + rotate(c2, arc.start_angle, origin).to_vector(),
        )
    }

    /// The cubic bézier curve approximating the arc, or `None` if the arc is wider than 90°.
    pub fn arc_to_cubic(&self, arc: &CircularArc<S>) -> Option<CubicBezierSegment<S>> {
        if arc.span() > S::from_f64(MAX_CUBIC_ARC_SPAN) {
            return None;
        }

        Some(self.cubic_for_narrow_arc(arc))
    }

    /// The sequence of cubic bézier curves approximating an arc of any span.
    ///
    /// The arc is split in equal parts of at most 90°.
    pub fn arc_to_cubics(&self, arc: &CircularArc<S>) -> Vec<CubicBezierSegment<S>> {
        let span = arc.span();
        let count = S::ceil(span / S::from_f64(MAX_CUBIC_ARC_SPAN))
            .to_usize()
            .unwrap_or(1)
            .max(1);
        let step = span / S::from_f64(count as f64);

        (0..count)
            .map(|i| {
                let start = arc.start_angle + step * S::from_f64(i as f64);
                self.cubic_for_narrow_arc(&CircularArc {
                    start_angle: start,
                    end_angle: start + step,
                    ..*arc
                })
            })
            .collect()
    }

    fn cubic_for_narrow_arc(&self, arc: &CircularArc<S>) -> CubicBezierSegment<S> {
        let (ctrl1, ctrl2) = self.control_points_for_circular_cubic(arc);

        CubicBezierSegment {
            from: arc.from(),
            ctrl1,
            ctrl2,
            to: arc.to(),
        }
    }
}

/// A piece of the approximation of a curve by [`cubic_to_arcs`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FittedSegment<S> {
    Arc(CircularArc<S>),
    /// A straight part of the curve, where no finite circle fits.
    Line(LineSegment<S>),
}

impl<S: Scalar> FittedSegment<S> {
    pub fn from(&self) -> Point<S> {
        match self {
            FittedSegment::Arc(arc) => arc.from(),
            FittedSegment::Line(line) => line.from,
        }
    }

    pub fn to(&self) -> Point<S> {
        match self {
            FittedSegment::Arc(arc) => arc.to(),
            FittedSegment::Line(line) => line.to,
        }
    }
}

/// Approximates a cubic bézier curve with a sequence of circular arcs.
///
/// Each arc goes through the curve at the start, the middle and the end of the parameter range
/// it covers, and stays within `error_threshold` of the curve at a quarter and three quarters of
/// that range. Ranges are grown greedily, so the sequence is as short as this search allows.
///
/// Arcs are counter-clockwise. Where the curve turns clockwise, the arc's start angle is at the
/// end of the covered range.
///
/// No segment covers less than 1/256th of the parameter range, even if that means exceeding
/// the threshold. Returns an empty sequence if `error_threshold` is not positive.
pub fn cubic_to_arcs<S: Scalar>(
    curve: &CubicBezierSegment<S>,
    error_threshold: S,
) -> Vec<FittedSegment<S>> {
    let mut result = Vec::new();
    if error_threshold.is_nan() || error_threshold <= S::ZERO {
        return result;
    }

    let min_step = S::from_f64(MIN_FIT_STEP);
    let mut t_start = S::ZERO;

    while t_start < S::ONE {
        if let Some(fit) = fit_range(curve, t_start, S::ONE, error_threshold) {
            result.push(fit);
            break;
        }

        // The longest good range ends between `good` and `bad`.
        let mut good = t_start;
        let mut bad = S::ONE;
        let mut best = None;
        for _ in 0..MAX_FIT_STEPS {
            let t = (good + bad) * S::HALF;
            match fit_range(curve, t_start, t, error_threshold) {
                Some(fit) => {
                    good = t;
                    best = Some(fit);
                }
                None => {
                    bad = t;
                }
            }
        }

        match best {
            Some(fit) if good - t_start >= min_step => {
                result.push(fit);
                t_start = good;
            }
            _ => {
                // Nothing fits a reasonable range, settle for the smallest one allowed.
                let t_end = S::min(t_start + min_step, S::ONE);
                result.push(fit_three_points(curve, t_start, t_end));
                t_start = t_end;
            }
        }
    }

    result
}

// The segment through the curve at t0, the middle and t1, if it stays within the threshold.
fn fit_range<S: Scalar>(
    curve: &CubicBezierSegment<S>,
    t0: S,
    t1: S,
    error_threshold: S,
) -> Option<FittedSegment<S>> {
    let fit = fit_three_points(curve, t0, t1);
    let quarter = (t1 - t0) / S::FOUR;
    let samples = [curve.sample(t0 + quarter), curve.sample(t1 - quarter)];

    let error = samples.iter().fold(S::ZERO, |error, p| {
        let distance = match &fit {
            FittedSegment::Arc(arc) => S::abs((*p - arc.center).length() - arc.radius),
            FittedSegment::Line(line) => line.distance_to_point(*p),
        };
        S::max(error, distance)
    });

    if error <= error_threshold {
        Some(fit)
    } else {
        None
    }
}

fn fit_three_points<S: Scalar>(curve: &CubicBezierSegment<S>, t0: S, t1: S) -> FittedSegment<S> {
    let p1 = curve.sample(t0);
    let p2 = curve.sample((t0 + t1) * S::HALF);
    let p3 = curve.sample(t1);

    let v1 = p2 - p1;
    let v2 = p3 - p2;
    let cross = v1.cross(v2);

    let center = if S::abs(cross) <= S::EPSILON * v1.length() * v2.length() {
        None
    } else {
        // Intersection of the perpendicular bisectors of the two chords.
        let bisector1 = Line {
            point: p1.lerp(p2, S::HALF),
            vector: crate::vector(-v1.y, v1.x),
        };
        let bisector2 = Line {
            point: p2.lerp(p3, S::HALF),
            vector: crate::vector(-v2.y, v2.x),
        };
        bisector1.intersection(&bisector2)
    };

    let center = match center {
        Some(center) => center,
        None => return FittedSegment::Line(LineSegment { from: p1, to: p3 }),
    };

    let start = angle_of_point_in_degrees(center, p1);
    let end = angle_of_point_in_degrees(center, p3);
    let (start_angle, end_angle) = if cross > S::ZERO {
        (start, end)
    } else {
        (end, start)
    };

    FittedSegment::Arc(CircularArc {
        center,
        radius: (p1 - center).length(),
        start_angle,
        end_angle,
    })
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point<f64>, b: Point<f64>, epsilon: f64) -> bool {
    (a - b).length() <= epsilon
}

#[test]
fn quarter_arc_control_points() {
    let approximator = ArcApproximator::new();
    let arc = CircularArc::new(point(0.0, 0.0), 10.0, 0.0, 90.0);

    let cubic = approximator.arc_to_cubic(&arc).unwrap();

    assert!(fuzzy_eq_point(cubic.from, point(10.0, 0.0), 1e-9));
    assert!(fuzzy_eq_point(cubic.to, point(0.0, 10.0), 1e-9));
    assert!(fuzzy_eq_point(cubic.ctrl1, point(10.0, 5.523), 0.001));
    assert!(fuzzy_eq_point(cubic.ctrl2, point(5.523, 10.0), 0.001));
}

#[test]
fn rotated_and_translated_arc() {
    let approximator = ArcApproximator::new();
    let arc = CircularArc::new(point(5.0, -2.0), 3.0, 200.0, 260.0);

    let cubic = approximator.arc_to_cubic(&arc).unwrap();

    assert!(fuzzy_eq_point(cubic.sample(0.0), arc.from(), 1e-9));
    assert!(fuzzy_eq_point(cubic.sample(1.0), arc.to(), 1e-9));
    for i in 1..10 {
        let p = cubic.sample(i as f64 / 10.0);
        assert!(((p - arc.center).length() - arc.radius).abs() < 0.001);
    }
}

#[test]
fn wide_arcs_are_not_converted() {
    let approximator = ArcApproximator::new();
    let arc = CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 120.0);

    assert!(approximator.arc_to_cubic(&arc).is_none());

    let cubics = approximator.arc_to_cubics(&arc);
    assert_eq!(cubics.len(), 2);
    assert!(fuzzy_eq_point(cubics[0].from, arc.from(), 1e-9));
    assert!(fuzzy_eq_point(cubics[0].to, cubics[1].from, 1e-9));
    assert!(fuzzy_eq_point(cubics[1].to, arc.to(), 1e-9));

    let circle = CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 360.0);
    assert_eq!(approximator.arc_to_cubics(&circle).len(), 4);
}

#[test]
fn memoized_control_offset() {
    let approximator = ArcApproximator::new();
    let span = core::f64::consts::FRAC_PI_3;

    let first = approximator.control_y_for_circular_cubic(span);
    let second = approximator.control_y_for_circular_cubic(span);

    assert_eq!(first.to_bits(), second.to_bits());
    assert_eq!(approximator.cached_spans(), 1);

    approximator.control_y_for_circular_cubic(core::f64::consts::FRAC_PI_2);
    assert_eq!(approximator.cached_spans(), 2);
}

#[test]
fn arc_round_trip() {
    let approximator = ArcApproximator::new();
    let arc = CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 90.0);
    let cubic = approximator.arc_to_cubic(&arc).unwrap();

    let arcs = cubic_to_arcs(&cubic, DEFAULT_ARC_ERROR_THRESHOLD);

    assert_eq!(arcs.len(), 1);
    match arcs[0] {
        FittedSegment::Arc(fitted) => {
            assert!(fuzzy_eq_point(fitted.center, arc.center, 0.001));
            assert!((fitted.radius - arc.radius).abs() < 0.001);
            assert!(fuzzy_eq_point(fitted.from(), arc.from(), 0.001));
            assert!(fuzzy_eq_point(fitted.to(), arc.to(), 0.001));
            assert!((fitted.span() - 90.0).abs() < 0.001);
        }
        FittedSegment::Line(_) => panic!("expected an arc"),
    }
}

#[test]
fn clockwise_curve_gives_counter_clockwise_arc() {
    let approximator = ArcApproximator::new();
    let arc = CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 90.0);
    let cubic = approximator.arc_to_cubic(&arc).unwrap().flip();

    let arcs = cubic_to_arcs(&cubic, DEFAULT_ARC_ERROR_THRESHOLD);

    assert_eq!(arcs.len(), 1);
    // The arc runs against the curve.
    assert!(fuzzy_eq_point(arcs[0].from(), cubic.to, 0.001));
    assert!(fuzzy_eq_point(arcs[0].to(), cubic.from, 0.001));
}

#[test]
fn s_curve_needs_several_arcs() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(10.0, 10.0),
        ctrl2: point(20.0, -10.0),
        to: point(30.0, 0.0),
    };

    let arcs = cubic_to_arcs(&curve, 0.01);

    assert!(arcs.len() >= 2);
    let first = arcs[0];
    assert!(
        fuzzy_eq_point(first.from(), curve.from, 1e-6)
            || fuzzy_eq_point(first.to(), curve.from, 1e-6)
    );
    for fit in &arcs {
        if let FittedSegment::Arc(arc) = fit {
            let mid = arc.mid_point();
            // Every arc hugs the curve.
            let closest = (0..=1000)
                .map(|i| (curve.sample(i as f64 / 1000.0) - mid).length())
                .fold(f64::MAX, f64::min);
            assert!(closest < 0.1);
        }
    }
}

#[test]
fn straight_curve_gives_a_line() {
    let curve = LineSegment {
        from: point(0.0, 0.0),
        to: point(4.0, 4.0),
    }
    .to_cubic();

    let fitted = cubic_to_arcs(&curve, DEFAULT_ARC_ERROR_THRESHOLD);

    assert_eq!(fitted.len(), 1);
    assert!(matches!(fitted[0], FittedSegment::Line(_)));
}

#[test]
fn threshold_must_be_positive() {
    let curve = CubicBezierSegment {
        from: point(0.0f64, 0.0),
        ctrl1: point(10.0, 10.0),
        ctrl2: point(20.0, -10.0),
        to: point(30.0, 0.0),
    };

    assert!(cubic_to_arcs(&curve, 0.0).is_empty());
    assert!(cubic_to_arcs(&curve, -1.0).is_empty());
    assert!(cubic_to_arcs(&curve, f64::NAN).is_empty());

    // An unreachable threshold still terminates with a bounded number of segments.
    let fitted = cubic_to_arcs(&curve, 1e-300);
    assert!(!fitted.is_empty());
    assert!(fitted.len() <= 256);
    let last = fitted[fitted.len() - 1];
    assert!(
        fuzzy_eq_point(last.to(), curve.to, 1e-6) || fuzzy_eq_point(last.from(), curve.to, 1e-6)
    );

    let single = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(10.0, 10.0),
        ctrl2: point(20.0, -10.0),
        to: point(30.0, 0.0),
    };
    assert!(cubic_to_arcs(&single, 1e-30).len() <= 256);
}
