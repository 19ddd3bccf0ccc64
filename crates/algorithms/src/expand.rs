//! Expansion of a bézier curve into the outline of a stroke.
//!
//! The curve is first reduced into sub-segments that are monotonic and "simple" (see
//! [`CubicBezierSegment::is_simple`]), for which offsetting the control polygon gives a
//! faithful parallel curve. Each sub-segment is then offset on both sides into a `forward`
//! and a `back` rail.
//!
//! # Output
//!
//! ```text
//! models
//! ├── expansions
//! │   └── models
//! │       ├── shape_0: forward, back, startline or Caps/startcap, endline
//! │       ├── shape_1: forward, back, startline, endline
//! │       └── ...
//! └── caps
//!     └── models
//!         └── shape_0: startcap   (only when the caps are isolated)
//! ```
//!
//! Sub-segments that can't be offset (see [`is_degenerate_for_offset`]) are represented by a
//! [`Slot`] between their end points instead.

use crate::geom::utils::angle_of_point_in_degrees;
use crate::geom::{BezierCurve, CircularArc, CubicBezierSegment, Line, LineSegment, Scalar};
use crate::math::{vector, Point, Vector};
use crate::model::{Model, Path};
use crate::shapes::{Slot, CAPS};

/// Id of the group holding the outline of each sub-segment.
pub const EXPANSIONS: &str = "expansions";
/// Id of the group holding the isolated caps.
pub const ISOLATED_CAPS: &str = "caps";

// Maximum distance from the control points to the baseline of a segment offset as a line.
const STRAIGHT_TOLERANCE: f64 = 0.000001;

/// Parameters for [`expand_with_options`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ExpandOptions {
    /// Distance between the curve and each rail, half the width of the stroke.
    ///
    /// Must be positive.
    /// Default value: `ExpandOptions::DEFAULT_DISTANCE`.
    pub distance: f64,

    /// Move the caps out of the outline of each sub-segment into a separate group.
    ///
    /// Default value: `false`.
    pub isolate_caps: bool,

    /// Maximum number of bisections of a sub-segment that is not simple enough to be offset.
    ///
    /// Default value: `ExpandOptions::DEFAULT_REDUCTION_DEPTH`.
    pub reduction_depth: u32,
}

impl ExpandOptions {
    pub const DEFAULT_DISTANCE: f64 = 1.0;
    pub const DEFAULT_ISOLATE_CAPS: bool = false;
    pub const DEFAULT_REDUCTION_DEPTH: u32 = 8;

    pub const DEFAULT: Self = ExpandOptions {
        distance: Self::DEFAULT_DISTANCE,
        isolate_caps: Self::DEFAULT_ISOLATE_CAPS,
        reduction_depth: Self::DEFAULT_REDUCTION_DEPTH,
    };

    #[inline]
    pub fn distance(distance: f64) -> Self {
        Self::DEFAULT.with_distance(distance)
    }

    #[inline]
    pub const fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    #[inline]
    pub const fn with_isolate_caps(mut self, isolate: bool) -> Self {
        self.isolate_caps = isolate;
        self
    }

    #[inline]
    pub const fn with_reduction_depth(mut self, depth: u32) -> Self {
        self.reduction_depth = depth;
        self
    }
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Expand a curve into the outline of a stroke `2 * distance` wide.
///
/// Returns `None` if the distance is not positive.
pub fn expand(curve: &BezierCurve<f64>, distance: f64, isolate_caps: bool) -> Option<Model> {
    expand_with_options(
        curve,
        &ExpandOptions::distance(distance).with_isolate_caps(isolate_caps),
    )
}

/// Expand a curve into the outline of a stroke `2 * options.distance` wide.
///
/// Returns `None` if the distance is not positive.
pub fn expand_with_options(curve: &BezierCurve<f64>, options: &ExpandOptions) -> Option<Model> {
    let distance = options.distance;
    if distance.is_nan() || distance <= 0.0 {
        return None;
    }

    let source = curve.to_cubic();
    // The outline of a straight curve is a rectangle.
    let round_caps = !is_straight(&source);
    let pieces = reduce(&source, options.reduction_depth);
    let last = pieces.len().saturating_sub(1);

    let mut expansions = Model::new();
    let mut caps = Model::new();
    for (i, piece) in pieces.iter().enumerate() {
        let id = format!("shape_{}", i);

        let mut shape = match rails(piece, distance) {
            Some((forward, back)) => {
                let ends = CapEnds {
                    start: if i == 0 && round_caps {
                        Some(source.from)
                    } else {
                        None
                    },
                    end: if i == last && round_caps {
                        Some(source.to)
                    } else {
                        None
                    },
                };
                outline(forward, back, distance, ends)
            }
            None => {
                log::debug!("sub-segment {} of the expansion can't be offset, using a slot", i);
                Slot::new(piece.from, piece.to, distance, options.isolate_caps).to_model()
            }
        };

        if options.isolate_caps {
            if let Some(group) = shape.take_model(CAPS) {
                caps.add_model(&id, group);
            }
        }

        expansions.add_model(&id, shape);
    }

    Some(
        Model::new()
            .with_model(EXPANSIONS, expansions)
            .with_model(ISOLATED_CAPS, caps),
    )
}

/// Split a curve into sub-segments that can be offset.
///
/// The curve is split at its x and y extrema, then each monotonic part is bisected until it
/// is simple, at most `max_depth` times. Parts with parallel end normals, like the two halves
/// of an S shape, are bisected as well, which separates them at the inflection.
pub fn reduce(curve: &CubicBezierSegment<f64>, max_depth: u32) -> Vec<CubicBezierSegment<f64>> {
    let mut result = Vec::new();
    curve.for_each_monotonic_range(&mut |range| {
        reduce_until_simple(&curve.split_range(range), max_depth, &mut result);
    });

    log::trace!("reduced the curve into {} sub-segments", result.len());

    result
}

fn reduce_until_simple(
    segment: &CubicBezierSegment<f64>,
    depth: u32,
    output: &mut Vec<CubicBezierSegment<f64>>,
) {
    // Parallel end normals are resolved by splitting, only give up on points.
    if depth == 0 || is_point_like(segment) || segment.is_simple() {
        output.push(*segment);
        return;
    }

    let (first, second) = segment.split(0.5);
    reduce_until_simple(&first, depth - 1, output);
    reduce_until_simple(&second, depth - 1, output);
}

/// Whether a sub-segment can't be offset by scaling its control polygon.
///
/// That is the case when the segment is (almost) a single point, or when its end normals are
/// parallel while it is not straight, in which case they have no intersection to scale from.
pub fn is_degenerate_for_offset(segment: &CubicBezierSegment<f64>) -> bool {
    if is_point_like(segment) {
        return true;
    }

    if is_straight(segment) {
        return false;
    }

    let n0 = segment.normal(0.0);
    let n1 = segment.normal(1.0);

    !n0.x.is_finite()
        || !n0.y.is_finite()
        || !n1.x.is_finite()
        || !n1.y.is_finite()
        || n0.cross(n1).abs() < <f64 as Scalar>::EPSILON
}

fn is_point_like(segment: &CubicBezierSegment<f64>) -> bool {
    let epsilon = <f64 as Scalar>::EPSILON;

    let chord = (segment.to - segment.from).length();
    let polygon = (segment.ctrl1 - segment.from).length()
        + (segment.ctrl2 - segment.ctrl1).length()
        + (segment.to - segment.ctrl2).length();

    chord < epsilon && polygon < epsilon
}

/// The curve at a signed `distance` along the normals of a segment.
///
/// The end points are moved along the end normals, the control points are moved along the
/// lines joining them to the intersection of the end normals so that the end tangents are
/// preserved. Straight segments are translated.
///
/// Returns `None` if the segment is degenerate or the control points can't be placed.
pub fn offset_segment(
    segment: &CubicBezierSegment<f64>,
    distance: f64,
) -> Option<CubicBezierSegment<f64>> {
    if is_degenerate_for_offset(segment) {
        return None;
    }

    let n0 = segment.normal(0.0);
    if is_straight(segment) {
        return Some(segment.translate(n0 * distance));
    }

    let n1 = segment.normal(1.0);
    let from = segment.from + n0 * distance;
    let to = segment.to + n1 * distance;

    let origin = Line {
        point: segment.from,
        vector: n0,
    }
    .intersection(&Line {
        point: segment.to,
        vector: n1,
    })?;

    let ctrl1 = place_control_point(from, n0, origin, segment.ctrl1)?;
    let ctrl2 = place_control_point(to, n1, origin, segment.ctrl2)?;

    let result = CubicBezierSegment {
        from,
        ctrl1,
        ctrl2,
        to,
    };

    if !is_finite(&result) {
        return None;
    }

    Some(result)
}

// Intersection of the tangent at the moved end point with the line from the scaling origin
// through the original control point.
fn place_control_point(end: Point, normal: Vector, origin: Point, ctrl: Point) -> Option<Point> {
    let tangent = vector(normal.y, -normal.x);
    let towards_ctrl = ctrl - origin;
    if towards_ctrl.square_length() == 0.0 {
        return None;
    }

    Line {
        point: end,
        vector: tangent,
    }
    .intersection(&Line {
        point: origin,
        vector: towards_ctrl,
    })
}

fn rails(
    segment: &CubicBezierSegment<f64>,
    distance: f64,
) -> Option<(CubicBezierSegment<f64>, CubicBezierSegment<f64>)> {
    let forward = offset_segment(segment, distance)?;
    let back = offset_segment(segment, -distance)?;

    Some((forward, back))
}

fn is_straight(segment: &CubicBezierSegment<f64>) -> bool {
    (segment.to - segment.from).length() > <f64 as Scalar>::EPSILON
        && segment.is_linear(STRAIGHT_TOLERANCE)
}

fn is_finite(segment: &CubicBezierSegment<f64>) -> bool {
    [segment.from, segment.ctrl1, segment.ctrl2, segment.to]
        .iter()
        .all(|p| p.x.is_finite() && p.y.is_finite())
}

// Centers of the round caps of a sub-segment, if it is at an end of the expanded curve.
struct CapEnds {
    start: Option<Point>,
    end: Option<Point>,
}

fn outline(
    forward: CubicBezierSegment<f64>,
    back: CubicBezierSegment<f64>,
    distance: f64,
    caps: CapEnds,
) -> Model {
    let mut model = Model::new()
        .with_path("back", rail_path(back))
        .with_path("forward", rail_path(forward));

    let mut start_line = LineSegment {
        from: forward.from,
        to: back.to,
    };
    let mut end_line = LineSegment {
        from: back.from,
        to: forward.to,
    };

    // Joining each rail's start to the other's end draws the diagonals, join the ends
    // of the same side instead.
    if start_line.intersects(&end_line) {
        start_line.to = back.from;
        end_line.from = back.to;
    }

    let mut cap_group = Model::new();
    match caps.start {
        Some(center) => {
            cap_group.add_path("startcap", cap_arc(center, distance, &start_line));
        }
        None => {
            model.add_path("startline", start_line);
        }
    }
    match caps.end {
        Some(center) => {
            cap_group.add_path("endcap", cap_arc(center, distance, &end_line));
        }
        None => {
            model.add_path("endline", end_line);
        }
    }

    if !cap_group.paths.is_empty() {
        model.add_model(CAPS, cap_group);
    }

    model
}

// Rails of straight segments are plain lines.
fn rail_path(rail: CubicBezierSegment<f64>) -> Path {
    if is_straight(&rail) {
        return Path::Line(rail.baseline());
    }

    Path::Bezier(BezierCurve::Cubic(rail))
}

fn cap_arc(center: Point, radius: f64, closing: &LineSegment<f64>) -> CircularArc<f64> {
    CircularArc::new(
        center,
        radius,
        angle_of_point_in_degrees(center, closing.from),
        angle_of_point_in_degrees(center, closing.to),
    )
}

#[cfg(test)]
use crate::geom::QuadraticBezierSegment;
#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn shape<'l>(model: &'l Model, group: &str, id: &str) -> &'l Model {
    model
        .model(group)
        .and_then(|group| group.model(id))
        .unwrap_or_else(|| panic!("missing {}/{}", group, id))
}

#[cfg(test)]
fn expect_line(model: &Model, id: &str) -> LineSegment<f64> {
    match model.path(id) {
        Some(Path::Line(line)) => *line,
        other => panic!("{}: expected a line, got {:?}", id, other),
    }
}

#[cfg(test)]
fn expect_cubic(model: &Model, id: &str) -> CubicBezierSegment<f64> {
    match model.path(id) {
        Some(Path::Bezier(BezierCurve::Cubic(curve))) => *curve,
        other => panic!("{}: expected a cubic curve, got {:?}", id, other),
    }
}

#[cfg(test)]
fn assert_near(a: Point, b: Point) {
    assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
}

#[test]
fn non_positive_distance() {
    let curve = BezierCurve::Cubic(
        LineSegment {
            from: point(0.0, 0.0),
            to: point(1.0, 0.0),
        }
        .to_cubic(),
    );

    assert!(expand(&curve, 0.0, false).is_none());
    assert!(expand(&curve, -1.0, true).is_none());
    assert!(expand(&curve, f64::NAN, false).is_none());
}

#[test]
fn expand_straight_line() {
    let curve = BezierCurve::Cubic(
        LineSegment {
            from: point(0.0, 0.0),
            to: point(10.0, 0.0),
        }
        .to_cubic(),
    );

    let result = expand(&curve, 1.0, false).unwrap();
    let expansions = result.model(EXPANSIONS).unwrap();
    assert_eq!(expansions.models.len(), 1);

    let outline = shape(&result, EXPANSIONS, "shape_0");
    let forward = expect_line(outline, "forward");
    let back = expect_line(outline, "back");
    assert_near(forward.from, point(0.0, 1.0));
    assert_near(forward.to, point(10.0, 1.0));
    assert_near(back.from, point(0.0, -1.0));
    assert_near(back.to, point(10.0, -1.0));

    let start = expect_line(outline, "startline");
    let end = expect_line(outline, "endline");
    assert_near(start.from, point(0.0, 1.0));
    assert_near(start.to, point(0.0, -1.0));
    assert_near(end.from, point(10.0, -1.0));
    assert_near(end.to, point(10.0, 1.0));

    assert!(outline.model(CAPS).is_none());
    assert!(result.model(ISOLATED_CAPS).unwrap().is_empty());
}

#[test]
fn rails_are_parallel_to_the_curve() {
    let source = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 5.0),
        ctrl2: point(5.0, 10.0),
        to: point(10.0, 10.0),
    };
    let distance = 0.5;
    let dense: Vec<Point> = (0..=2000).map(|i| source.sample(i as f64 / 2000.0)).collect();
    let distance_to_source = |p: Point| {
        dense
            .iter()
            .map(|q| (p - *q).length())
            .fold(f64::MAX, f64::min)
    };

    for piece in reduce(&source, ExpandOptions::DEFAULT_REDUCTION_DEPTH) {
        assert!(piece.is_simple());
        let forward = offset_segment(&piece, distance).unwrap();
        let back = offset_segment(&piece, -distance).unwrap();

        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let p = piece.sample(t);
            let n = piece.normal(t);
            let f = forward.sample(t);
            let b = back.sample(t);
            assert!((distance_to_source(f) - distance).abs() < 0.025, "{:?}", f);
            assert!((distance_to_source(b) - distance).abs() < 0.025, "{:?}", b);
            assert!((f - p).dot(n) > 0.0);
            assert!((b - p).dot(n) < 0.0);
        }

        // End points are exact.
        assert!(((forward.from - piece.from).length() - distance).abs() < 1e-9);
        assert!(((back.to - piece.to).length() - distance).abs() < 1e-9);
    }
}

#[test]
fn round_caps_at_both_ends() {
    // Quarter of a circle of radius 10 around the origin, from (10, 0) to (0, 10).
    let k = 4.0 * (std::f64::consts::FRAC_PI_8).tan() / 3.0 * 10.0;
    let curve = BezierCurve::Cubic(CubicBezierSegment {
        from: point(10.0, 0.0),
        ctrl1: point(10.0, k),
        ctrl2: point(k, 10.0),
        to: point(0.0, 10.0),
    });

    let result = expand(&curve, 1.0, false).unwrap();
    let expansions = result.model(EXPANSIONS).unwrap();
    let count = expansions.models.len();
    assert!(count >= 1);

    let first = shape(&result, EXPANSIONS, "shape_0");
    let last = shape(&result, EXPANSIONS, &format!("shape_{}", count - 1));

    let start_cap = match first.model(CAPS).and_then(|caps| caps.path("startcap")) {
        Some(Path::Arc(arc)) => *arc,
        other => panic!("expected a start cap, got {:?}", other),
    };
    assert_eq!(start_cap.center, point(10.0, 0.0));
    assert_eq!(start_cap.radius, 1.0);
    // Bulges backwards, away from the direction of the curve.
    assert!(start_cap.mid_point().y < -0.99);

    let end_cap = match last.model(CAPS).and_then(|caps| caps.path("endcap")) {
        Some(Path::Arc(arc)) => *arc,
        other => panic!("expected an end cap, got {:?}", other),
    };
    assert_eq!(end_cap.center, point(0.0, 10.0));
    assert!(end_cap.mid_point().x < -0.99);

    if count > 1 {
        assert!(first.path("endline").is_some());
        assert!(last.path("startline").is_some());
    }

    // The inner rail of a counter-clockwise turn is the forward one.
    let forward = expect_cubic(first, "forward");
    assert!((forward.from - point(9.0, 0.0)).length() < 1e-9);
}

#[test]
fn isolated_caps() {
    let curve = BezierCurve::Quadratic(QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(5.0, 5.0),
        to: point(10.0, 0.0),
    });

    let result = expand(&curve, 0.5, true).unwrap();
    let expansions = result.model(EXPANSIONS).unwrap();
    let caps = result.model(ISOLATED_CAPS).unwrap();
    let last_id = format!("shape_{}", expansions.models.len() - 1);

    for shape in expansions.models.values() {
        assert!(shape.model(CAPS).is_none());
    }

    assert!(caps.model("shape_0").unwrap().path("startcap").is_some());
    assert!(caps.model(&last_id).unwrap().path("endcap").is_some());
    assert!(expansions.model(&last_id).unwrap().path("endline").is_none());
}

#[test]
fn degenerate_pieces() {
    let point_curve = CubicBezierSegment {
        from: point(1.0, 1.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(1.0, 1.0),
        to: point(1.0, 1.0),
    };
    assert!(is_degenerate_for_offset(&point_curve));
    assert!(offset_segment(&point_curve, 1.0).is_none());

    // Parallel end normals on a curved segment.
    let zigzag = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(2.0, 1.0),
        to: point(3.0, 1.0),
    };
    assert!(is_degenerate_for_offset(&zigzag));

    let line = LineSegment {
        from: point(0.0, 0.0),
        to: point(0.0, 4.0),
    }
    .to_cubic();
    assert!(!is_degenerate_for_offset(&line));
    let moved = offset_segment(&line, 2.0).unwrap();
    assert_near(moved.from, point(-2.0, 0.0));
    assert_near(moved.to, point(-2.0, 4.0));
}

#[test]
fn s_curve_is_split_at_its_inflection() {
    let source = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(10.0, 0.0),
        ctrl2: point(20.0, 10.0),
        to: point(30.0, 10.0),
    };
    // Both end normals point up.
    assert!(is_degenerate_for_offset(&source));

    let pieces = reduce(&source, ExpandOptions::DEFAULT_REDUCTION_DEPTH);
    assert_eq!(pieces.len(), 2);
    for piece in &pieces {
        assert!(piece.is_simple());
        assert!(!is_degenerate_for_offset(piece));
    }

    let distance = 1.0;
    let result = expand(&BezierCurve::Cubic(source), distance, false).unwrap();
    let expansions = result.model(EXPANSIONS).unwrap();
    assert_eq!(expansions.models.len(), 2);

    let dense: Vec<Point> = (0..=4000).map(|i| source.sample(i as f64 / 4000.0)).collect();
    let distance_to_source = |p: Point| {
        dense
            .iter()
            .map(|q| (p - *q).length())
            .fold(f64::MAX, f64::min)
    };

    for (id, outline) in &expansions.models {
        assert!(outline.path("Top").is_none(), "{} fell back to a slot", id);
        for rail in &["forward", "back"] {
            let curve = expect_cubic(outline, rail);
            for i in 0..=20 {
                let p = curve.sample(i as f64 / 20.0);
                assert!((distance_to_source(p) - distance).abs() < 0.025, "{} {:?}", id, p);
            }
        }
    }

    let first = shape(&result, EXPANSIONS, "shape_0");
    assert!(first.model(CAPS).unwrap().path("startcap").is_some());
    let second = shape(&result, EXPANSIONS, "shape_1");
    assert!(second.model(CAPS).unwrap().path("endcap").is_some());
}

#[test]
fn point_curve_falls_back_to_a_slot() {
    let curve = BezierCurve::Cubic(CubicBezierSegment {
        from: point(1.0, 1.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(1.0, 1.0),
        to: point(1.0, 1.0),
    });

    let result = expand(&curve, 1.0, true).unwrap();
    let slot = shape(&result, EXPANSIONS, "shape_0");
    assert!(slot.path("Top").is_some());
    assert!(slot.path("Bottom").is_some());
    assert!(shape(&result, ISOLATED_CAPS, "shape_0")
        .path("StartCap")
        .is_some());
}

#[test]
fn reduction_depth_bounds_the_pieces() {
    let loop_curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(10.0, 10.0),
        ctrl2: point(-10.0, 10.0),
        to: point(0.0, 0.0),
    };

    assert!(reduce(&loop_curve, 0).len() <= 5);
    let pieces = reduce(&loop_curve, 2);
    assert!(pieces.len() <= 5 * 4);
    assert_eq!(pieces[0].from, loop_curve.from);
    assert_eq!(pieces[pieces.len() - 1].to, loop_curve.to);
}
