//! Curve descriptors handed over by the drawing model, and their typed form.

use crate::scalar::Scalar;
use crate::{
    Box2D, CubicBezierSegment, IntersectionOptions, Line, Point, QuadraticBezierSegment, Vector,
};

use arrayvec::ArrayVec;
use std::vec::Vec;
use thiserror::Error;

/// A curve descriptor that can't be turned into a bézier curve.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidCurve {
    #[error("the curve has neither a control point nor a list of control points")]
    MissingControlPoints,
    #[error("a cubic curve needs exactly two control points, found {count}")]
    ControlCount { count: usize },
}

/// The loosely typed curve shape used by the drawing model.
///
/// A quadratic curve has `control`, a cubic curve has exactly two `controls`. When both are
/// set, `control` wins.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CurveDescriptor<S> {
    pub origin: Point<S>,
    pub end: Point<S>,
    pub control: Option<Point<S>>,
    pub controls: Option<Vec<Point<S>>>,
}

impl<S: Scalar> CurveDescriptor<S> {
    pub fn quadratic(origin: Point<S>, control: Point<S>, end: Point<S>) -> Self {
        CurveDescriptor {
            origin,
            end,
            control: Some(control),
            controls: None,
        }
    }

    pub fn cubic(origin: Point<S>, control1: Point<S>, control2: Point<S>, end: Point<S>) -> Self {
        CurveDescriptor {
            origin,
            end,
            control: None,
            controls: Some(vec![control1, control2]),
        }
    }

    /// The typed form of this descriptor.
    pub fn to_bezier(&self) -> Result<BezierCurve<S>, InvalidCurve> {
        if let Some(ctrl) = self.control {
            return Ok(BezierCurve::Quadratic(QuadraticBezierSegment {
                from: self.origin,
                ctrl,
                to: self.end,
            }));
        }

        match self.controls.as_deref() {
            Some(&[ctrl1, ctrl2]) => Ok(BezierCurve::Cubic(CubicBezierSegment {
                from: self.origin,
                ctrl1,
                ctrl2,
                to: self.end,
            })),
            Some(controls) => Err(InvalidCurve::ControlCount {
                count: controls.len(),
            }),
            None => Err(InvalidCurve::MissingControlPoints),
        }
    }

    /// The canonical cubic form of this descriptor.
    pub fn to_cubic(&self) -> Result<CubicBezierSegment<S>, InvalidCurve> {
        self.to_bezier().map(|curve| curve.to_cubic())
    }

    /// `[origin x, origin y, (control x, control y){1,2}, end x, end y]`.
    pub fn coordinates(&self) -> Result<Vec<S>, InvalidCurve> {
        Ok(self.to_bezier()?.coordinates())
    }
}

/// A quadratic or cubic bézier curve.
///
/// Quadratic curves keep their arity for comparisons, every other operation goes through the
/// cubic form.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum BezierCurve<S> {
    Quadratic(QuadraticBezierSegment<S>),
    Cubic(CubicBezierSegment<S>),
}

impl<S: Scalar> BezierCurve<S> {
    /// Builds a curve from 6 (quadratic) or 8 (cubic) numbers laid out as by `coordinates`.
    pub fn from_coordinates(coordinates: &[S]) -> Result<Self, InvalidCurve> {
        let p = |i: usize| crate::point(coordinates[i], coordinates[i + 1]);
        match coordinates.len() {
            6 => Ok(BezierCurve::Quadratic(QuadraticBezierSegment {
                from: p(0),
                ctrl: p(2),
                to: p(4),
            })),
            8 => Ok(BezierCurve::Cubic(CubicBezierSegment {
                from: p(0),
                ctrl1: p(2),
                ctrl2: p(4),
                to: p(6),
            })),
            n if n < 6 => Err(InvalidCurve::MissingControlPoints),
            n => Err(InvalidCurve::ControlCount {
                count: n.saturating_sub(4) / 2,
            }),
        }
    }

    pub fn coordinates(&self) -> Vec<S> {
        let mut result = Vec::with_capacity(8);
        for p in self.points() {
            result.push(p.x);
            result.push(p.y);
        }

        result
    }

    /// End points and control points in curve order.
    pub fn points(&self) -> ArrayVec<Point<S>, 4> {
        let mut result = ArrayVec::new();
        match self {
            BezierCurve::Quadratic(c) => {
                result.push(c.from);
                result.push(c.ctrl);
                result.push(c.to);
            }
            BezierCurve::Cubic(c) => {
                result.push(c.from);
                result.push(c.ctrl1);
                result.push(c.ctrl2);
                result.push(c.to);
            }
        }

        result
    }

    /// Control points only, in curve order.
    pub fn control_points(&self) -> ArrayVec<Point<S>, 2> {
        let mut result = ArrayVec::new();
        match self {
            BezierCurve::Quadratic(c) => result.push(c.ctrl),
            BezierCurve::Cubic(c) => {
                result.push(c.ctrl1);
                result.push(c.ctrl2);
            }
        }

        result
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        match self {
            BezierCurve::Quadratic(c) => c.from,
            BezierCurve::Cubic(c) => c.from,
        }
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        match self {
            BezierCurve::Quadratic(c) => c.to,
            BezierCurve::Cubic(c) => c.to,
        }
    }

    #[inline]
    pub fn is_quadratic(&self) -> bool {
        matches!(self, BezierCurve::Quadratic(_))
    }

    pub fn to_cubic(&self) -> CubicBezierSegment<S> {
        match self {
            BezierCurve::Quadratic(c) => c.to_cubic(),
            BezierCurve::Cubic(c) => *c,
        }
    }

    pub fn to_descriptor(&self) -> CurveDescriptor<S> {
        match self {
            BezierCurve::Quadratic(c) => CurveDescriptor::quadratic(c.from, c.ctrl, c.to),
            BezierCurve::Cubic(c) => CurveDescriptor::cubic(c.from, c.ctrl1, c.ctrl2, c.to),
        }
    }

    /// Swap the beginning and the end of the curve.
    pub fn flip(&self) -> Self {
        match self {
            BezierCurve::Quadratic(c) => BezierCurve::Quadratic(c.flip()),
            BezierCurve::Cubic(c) => BezierCurve::Cubic(c.flip()),
        }
    }

    pub fn translate(&self, by: Vector<S>) -> Self {
        match self {
            BezierCurve::Quadratic(c) => BezierCurve::Quadratic(c.translate(by)),
            BezierCurve::Cubic(c) => BezierCurve::Cubic(c.translate(by)),
        }
    }

    /// Sample the curve at t.
    ///
    /// Values of t outside of `[0, 1]` extrapolate the curve.
    pub fn sample(&self, t: S) -> Point<S> {
        match self {
            BezierCurve::Quadratic(c) => c.sample(t),
            BezierCurve::Cubic(c) => c.sample(t),
        }
    }

    pub fn sample_many(&self, ts: &[S]) -> Vec<Point<S>> {
        match self {
            BezierCurve::Quadratic(c) => c.sample_many(ts),
            BezierCurve::Cubic(c) => c.sample_many(ts),
        }
    }

    pub fn length(&self) -> S {
        match self {
            BezierCurve::Quadratic(c) => c.length(),
            BezierCurve::Cubic(c) => c.length(),
        }
    }

    pub fn bounding_box(&self) -> Box2D<S> {
        match self {
            BezierCurve::Quadratic(c) => c.bounding_box(),
            BezierCurve::Cubic(c) => c.bounding_box(),
        }
    }

    /// Split this curve into `[0, t]` and `[t, 1]`, or `None` if `t` is outside of `[0, 1]`.
    pub fn split_at(&self, t: S) -> Option<(Self, Self)> {
        match self {
            BezierCurve::Quadratic(c) => c
                .split_at(t)
                .map(|(a, b)| (BezierCurve::Quadratic(a), BezierCurve::Quadratic(b))),
            BezierCurve::Cubic(c) => c
                .split_at(t)
                .map(|(a, b)| (BezierCurve::Cubic(a), BezierCurve::Cubic(b))),
        }
    }

    /// Parameter pairs of the intersections with another curve.
    pub fn intersections_t(&self, other: &Self, options: &IntersectionOptions<S>) -> Vec<(S, S)> {
        self.to_cubic()
            .cubic_intersections_t(&other.to_cubic(), options)
    }

    /// Parameters of the intersections with an infinite line, in increasing order.
    pub fn line_intersections_t(&self, line: &Line<S>) -> ArrayVec<S, 3> {
        self.to_cubic().line_intersections_t(line)
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn descriptor_coordinates() {
    let quadratic = CurveDescriptor::quadratic(point(0.0, 1.0), point(2.0, 3.0), point(4.0, 5.0));
    assert_eq!(
        quadratic.coordinates(),
        Ok(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
    );

    let cubic = CurveDescriptor::cubic(
        point(0.0, 1.0),
        point(2.0, 3.0),
        point(4.0, 5.0),
        point(6.0, 7.0),
    );
    assert_eq!(
        cubic.coordinates(),
        Ok(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
    );

    let back = BezierCurve::from_coordinates(&cubic.coordinates().unwrap()).unwrap();
    assert_eq!(back.to_descriptor(), cubic);
}

#[test]
fn malformed_descriptors() {
    let mut descriptor: CurveDescriptor<f64> = CurveDescriptor {
        origin: point(0.0, 0.0),
        end: point(1.0, 0.0),
        control: None,
        controls: None,
    };
    assert_eq!(
        descriptor.coordinates(),
        Err(InvalidCurve::MissingControlPoints)
    );

    descriptor.controls = Some(vec![point(0.5, 1.0)]);
    assert_eq!(
        descriptor.to_cubic(),
        Err(InvalidCurve::ControlCount { count: 1 })
    );

    // A single control point takes precedence over the list.
    descriptor.control = Some(point(0.5, 1.0));
    assert!(descriptor.to_bezier().unwrap().is_quadratic());

    assert_eq!(
        BezierCurve::<f64>::from_coordinates(&[0.0, 0.0, 1.0, 1.0]),
        Err(InvalidCurve::MissingControlPoints)
    );
}

#[test]
fn quadratic_goes_through_cubic_form() {
    let curve = CurveDescriptor::quadratic(point(0.0, 0.0), point(1.0, 2.0), point(2.0, 0.0))
        .to_bezier()
        .unwrap();
    let cubic = curve.to_cubic();

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((curve.sample(t) - cubic.sample(t)).length() < 1e-12);
    }

    let (left, right) = curve.split_at(0.5).unwrap();
    assert!(left.is_quadratic() && right.is_quadratic());
    assert!(curve.split_at(2.0).is_none());
    assert_eq!(curve.flip().from(), point(2.0, 0.0));
}
