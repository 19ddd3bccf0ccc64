//! Tolerance-aware equality of points, angles, slopes and paths.
//!
//! Point comparisons are exact unless a distance is given. Angles are compared modulo
//! 360° at a given decimal accuracy.

use crate::geom::utils::{no_revolutions, round_to, DEFAULT_ROUNDING_ACCURACY};
use crate::geom::{BezierCurve, Slope};
use crate::math::{Point, Vector};
use crate::model::Path;

/// Default accuracy of [`angles_equal`].
pub const DEFAULT_ANGLE_ACCURACY: f64 = 0.0001;

const SLOPE_ACCURACY: f64 = 0.00001;

/// Whether two points are equal.
///
/// With no distance (or a zero distance) the coordinates must match exactly, otherwise
/// the points must be at most `within_distance` apart.
pub fn points_equal(a: Point, b: Point, within_distance: Option<f64>) -> bool {
    match within_distance {
        Some(distance) if distance != 0.0 => (b - a).length() <= distance,
        _ => a == b,
    }
}

/// Element-wise [`points_equal`]. Slices of different lengths are never equal.
pub fn point_arrays_equal(a: &[Point], b: &[Point], within_distance: Option<f64>) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(a, b)| points_equal(*a, *b, within_distance))
}

/// Whether two angles in degrees designate the same direction, at the given accuracy.
pub fn angles_equal(a: f64, b: f64, accuracy: f64) -> bool {
    let a = no_revolutions(a);
    let b = no_revolutions(b);

    no_revolutions(round_to(b - a, accuracy)) == 0.0
}

/// Whether two paths are equal.
///
/// - Lines are undirected: swapped end points are equal.
/// - Circles need equal centers and exactly equal radii.
/// - Arcs are equal circles with equal start and end angles.
/// - Bézier curves are equal in either direction, a quadratic curve is never equal to
///   a cubic one.
/// - Paths of different kinds are never equal.
pub fn paths_equal(a: &Path, b: &Path, within_point_distance: Option<f64>) -> bool {
    match (a, b) {
        (Path::Line(a), Path::Line(b)) => {
            let points = [a.from, a.to];
            point_arrays_equal(&points, &[b.from, b.to], within_point_distance)
                || point_arrays_equal(&points, &[b.to, b.from], within_point_distance)
        }
        (Path::Circle(a), Path::Circle(b)) => {
            points_equal(a.center, b.center, within_point_distance) && a.radius == b.radius
        }
        (Path::Arc(a), Path::Arc(b)) => {
            points_equal(a.center, b.center, within_point_distance)
                && a.radius == b.radius
                && angles_equal(a.start_angle, b.start_angle, DEFAULT_ANGLE_ACCURACY)
                && angles_equal(a.end_angle, b.end_angle, DEFAULT_ANGLE_ACCURACY)
        }
        (Path::Bezier(a), Path::Bezier(b)) => curves_equal(a, b, within_point_distance),
        _ => false,
    }
}

/// Same as [`paths_equal`], comparing the paths as if each was moved by its offset.
///
/// The paths themselves are left untouched.
pub fn paths_equal_with_offsets(
    a: &Path,
    b: &Path,
    within_point_distance: Option<f64>,
    offset_a: Vector,
    offset_b: Vector,
) -> bool {
    paths_equal(
        &a.translated(offset_a),
        &b.translated(offset_b),
        within_point_distance,
    )
}

fn curves_equal(a: &BezierCurve<f64>, b: &BezierCurve<f64>, within: Option<f64>) -> bool {
    match (a, b) {
        (BezierCurve::Quadratic(a), BezierCurve::Quadratic(b)) => {
            let points = [a.from, a.to, a.ctrl];
            point_arrays_equal(&points, &[b.from, b.to, b.ctrl], within)
                || point_arrays_equal(&points, &[b.to, b.from, b.ctrl], within)
        }
        (BezierCurve::Cubic(a), BezierCurve::Cubic(b)) => {
            let points = [a.from, a.to, a.ctrl1, a.ctrl2];
            point_arrays_equal(&points, &[b.from, b.to, b.ctrl1, b.ctrl2], within)
                || point_arrays_equal(&points, &[b.to, b.from, b.ctrl2, b.ctrl1], within)
        }
        _ => false,
    }
}

/// Whether two slopes describe the same infinite line.
///
/// Vertical lines are equal when their x coordinates match. Other lines need equal slopes
/// and equal y intercepts. A vertical line is never equal to a non-vertical one.
pub fn slopes_equal(a: &Slope<f64>, b: &Slope<f64>) -> bool {
    match (a.has_slope, b.has_slope) {
        (false, false) => round_to(a.line.from.x - b.line.from.x, DEFAULT_ROUNDING_ACCURACY) == 0.0,
        (true, true) => {
            round_to(a.slope - b.slope, SLOPE_ACCURACY) == 0.0
                && round_to(a.y_intercept - b.y_intercept, SLOPE_ACCURACY) == 0.0
        }
        _ => false,
    }
}

#[cfg(test)]
use crate::geom::{Circle, CircularArc, CubicBezierSegment, LineSegment, QuadraticBezierSegment};
#[cfg(test)]
use crate::math::{point, vector};

#[cfg(test)]
fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> LineSegment<f64> {
    LineSegment {
        from: point(x0, y0),
        to: point(x1, y1),
    }
}

#[cfg(test)]
fn assert_symmetric(a: &Path, b: &Path, within: Option<f64>, expected: bool) {
    assert_eq!(paths_equal(a, b, within), expected, "{:?} == {:?}", a, b);
    assert_eq!(paths_equal(b, a, within), expected, "{:?} == {:?}", b, a);
}

#[test]
fn point_equality() {
    let a = point(1.0, 1.0);
    let b = point(1.0, 1.0005);

    assert!(points_equal(a, a, None));
    assert!(!points_equal(a, b, None));
    assert!(!points_equal(a, b, Some(0.0)));
    assert!(points_equal(a, b, Some(0.001)));

    assert!(point_arrays_equal(&[a, b], &[a, b], None));
    assert!(!point_arrays_equal(&[a, b], &[b, a], None));
    assert!(!point_arrays_equal(&[a], &[a, a], None));
}

#[test]
fn angle_equality() {
    assert!(angles_equal(0.0, 360.0, DEFAULT_ANGLE_ACCURACY));
    assert!(angles_equal(-90.0, 270.0, DEFAULT_ANGLE_ACCURACY));
    assert!(angles_equal(45.0, 45.00001, DEFAULT_ANGLE_ACCURACY));
    assert!(angles_equal(359.99999, 0.0, DEFAULT_ANGLE_ACCURACY));
    assert!(!angles_equal(45.0, 45.01, DEFAULT_ANGLE_ACCURACY));
}

#[test]
fn lines_are_undirected() {
    let a = Path::Line(line(0.0, 0.0, 1.0, 2.0));
    let b = Path::Line(line(1.0, 2.0, 0.0, 0.0));
    let c = Path::Line(line(1.0, 2.0, 0.0, 0.1));

    assert_symmetric(&a, &a, None, true);
    assert_symmetric(&a, &b, None, true);
    assert_symmetric(&a, &c, None, false);
    assert_symmetric(&a, &c, Some(0.2), true);
}

#[test]
fn circles_and_arcs() {
    let circle = Path::Circle(Circle::new(point(1.0, 1.0), 2.0));
    let bigger = Path::Circle(Circle::new(point(1.0, 1.0), 2.0001));
    assert_symmetric(&circle, &bigger, Some(1.0), false);

    let arc = Path::Arc(CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 90.0));
    let same = Path::Arc(CircularArc::new(point(0.0, 0.0), 1.0, 360.0, -270.0));
    let other = Path::Arc(CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 180.0));

    assert_symmetric(&arc, &same, None, true);
    assert_symmetric(&arc, &other, None, false);

    // Different kinds are never equal.
    let full = Path::Arc(CircularArc::new(point(1.0, 1.0), 2.0, 0.0, 360.0));
    assert_symmetric(&circle, &full, None, false);
}

#[test]
fn curves_in_both_directions() {
    let cubic = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 2.0),
        ctrl2: point(3.0, 2.0),
        to: point(4.0, 0.0),
    };
    let a = Path::Bezier(BezierCurve::Cubic(cubic));
    let reversed = Path::Bezier(BezierCurve::Cubic(cubic.flip()));

    assert_symmetric(&a, &reversed, None, true);

    // End points swapped without mirroring the control points.
    let mut wrong = cubic.flip();
    std::mem::swap(&mut wrong.ctrl1, &mut wrong.ctrl2);
    assert_symmetric(&a, &Path::Bezier(BezierCurve::Cubic(wrong)), None, false);
}

#[test]
fn quadratic_is_never_a_cubic() {
    let quadratic = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 0.0),
    };
    let a = Path::Bezier(BezierCurve::Quadratic(quadratic));
    let b = Path::Bezier(BezierCurve::Quadratic(quadratic.flip()));
    let elevated = Path::Bezier(BezierCurve::Cubic(quadratic.to_cubic()));

    assert_symmetric(&a, &b, None, true);
    assert_symmetric(&a, &elevated, Some(1.0), false);
}

#[test]
fn offsets_do_not_move_the_paths() {
    let a = Path::Line(line(0.0, 0.0, 1.0, 0.0));
    let b = Path::Line(line(5.0, 5.0, 6.0, 5.0));
    let before = (a, b);

    assert!(!paths_equal(&a, &b, None));
    assert!(paths_equal_with_offsets(
        &a,
        &b,
        None,
        vector(5.0, 5.0),
        vector(0.0, 0.0)
    ));
    assert!(paths_equal_with_offsets(
        &a,
        &b,
        None,
        vector(2.0, 2.0),
        vector(-3.0, -3.0)
    ));
    assert_eq!((a, b), before);
}

#[test]
fn slope_equality() {
    let diagonal = line(0.0, 0.0, 1.0, 1.0).slope();
    let same_line = line(2.0, 2.0, 5.0, 5.0).slope();
    let parallel = line(0.0, 1.0, 1.0, 2.0).slope();
    let vertical = line(3.0, 0.0, 3.0, 1.0).slope();
    let other_vertical = line(3.0, 5.0, 3.0, -1.0).slope();
    let shifted_vertical = line(4.0, 0.0, 4.0, 1.0).slope();

    assert!(slopes_equal(&diagonal, &same_line));
    assert!(!slopes_equal(&diagonal, &parallel));
    assert!(slopes_equal(&vertical, &other_vertical));
    assert!(!slopes_equal(&vertical, &shifted_vertical));
    assert!(!slopes_equal(&vertical, &diagonal));
}
