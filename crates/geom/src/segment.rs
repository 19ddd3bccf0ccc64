use crate::scalar::Scalar;
use crate::{point, Box2D, Point, Vector};

use core::ops::Range;

/// Common APIs to segment types.
pub trait Segment: Copy + Sized {
    type Scalar: Scalar;

    /// Start of the curve.
    fn from(&self) -> Point<Self::Scalar>;

    /// End of the curve.
    fn to(&self) -> Point<Self::Scalar>;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: Self::Scalar) -> Point<Self::Scalar>;

    /// Sample x at t (expecting t between 0 and 1).
    fn x(&self, t: Self::Scalar) -> Self::Scalar {
        self.sample(t).x
    }

    /// Sample y at t (expecting t between 0 and 1).
    fn y(&self, t: Self::Scalar) -> Self::Scalar {
        self.sample(t).y
    }

    /// Sample the derivative at t (expecting t between 0 and 1).
    fn derivative(&self, t: Self::Scalar) -> Vector<Self::Scalar>;

    /// Split this curve into two sub-curves.
    fn split(&self, t: Self::Scalar) -> (Self, Self);

    /// Split this curve into two sub-curves, or `None` if `t` is outside of `[0, 1]`.
    fn split_at(&self, t: Self::Scalar) -> Option<(Self, Self)> {
        if t < <Self::Scalar as Scalar>::ZERO || t > <Self::Scalar as Scalar>::ONE {
            return None;
        }

        Some(self.split(t))
    }

    /// Return the curve before the split point.
    fn before_split(&self, t: Self::Scalar) -> Self;

    /// Return the curve after the split point.
    fn after_split(&self, t: Self::Scalar) -> Self;

    /// Return the curve inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    fn split_range(&self, t_range: Range<Self::Scalar>) -> Self;

    /// Swap the direction of the segment.
    fn flip(&self) -> Self;

    /// Arc length of the segment.
    fn length(&self) -> Self::Scalar;
}

pub trait BoundingBox {
    type Scalar: Scalar;

    /// Returns the smallest rectangle that contains the curve.
    fn bounding_box(&self) -> Box2D<Self::Scalar> {
        let (min_x, max_x) = self.bounding_range_x();
        let (min_y, max_y) = self.bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns a conservative rectangle that contains the curve.
    ///
    /// This does not necessarily return the smallest possible bounding rectangle.
    fn fast_bounding_box(&self) -> Box2D<Self::Scalar> {
        let (min_x, max_x) = self.fast_bounding_range_x();
        let (min_y, max_y) = self.fast_bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns a range of x values that contains the curve.
    fn bounding_range_x(&self) -> (Self::Scalar, Self::Scalar);

    /// Returns a range of y values that contains the curve.
    fn bounding_range_y(&self) -> (Self::Scalar, Self::Scalar);

    /// Returns a range of x values that contains the curve.
    fn fast_bounding_range_x(&self) -> (Self::Scalar, Self::Scalar);

    /// Returns a range of y values that contains the curve.
    fn fast_bounding_range_y(&self) -> (Self::Scalar, Self::Scalar);
}

macro_rules! impl_segment {
    ($S:ty) => {
        type Scalar = $S;
        fn from(&self) -> Point<$S> {
            self.from()
        }
        fn to(&self) -> Point<$S> {
            self.to()
        }
        fn sample(&self, t: $S) -> Point<$S> {
            self.sample(t)
        }
        fn x(&self, t: $S) -> $S {
            self.x(t)
        }
        fn y(&self, t: $S) -> $S {
            self.y(t)
        }
        fn derivative(&self, t: $S) -> Vector<$S> {
            self.derivative(t)
        }
        fn split(&self, t: $S) -> (Self, Self) {
            self.split(t)
        }
        fn split_at(&self, t: $S) -> Option<(Self, Self)> {
            self.split_at(t)
        }
        fn before_split(&self, t: $S) -> Self {
            self.before_split(t)
        }
        fn after_split(&self, t: $S) -> Self {
            self.after_split(t)
        }
        fn split_range(&self, t_range: Range<$S>) -> Self {
            self.split_range(t_range)
        }
        fn flip(&self) -> Self {
            self.flip()
        }
        fn length(&self) -> $S {
            self.length()
        }
    };
}

macro_rules! impl_bounding_box {
    ($S:ty) => {
        type Scalar = $S;
        fn bounding_box(&self) -> Box2D<$S> {
            self.bounding_box()
        }
        fn fast_bounding_box(&self) -> Box2D<$S> {
            self.fast_bounding_box()
        }
        fn bounding_range_x(&self) -> ($S, $S) {
            self.bounding_range_x()
        }
        fn bounding_range_y(&self) -> ($S, $S) {
            self.bounding_range_y()
        }
        fn fast_bounding_range_x(&self) -> ($S, $S) {
            self.fast_bounding_range_x()
        }
        fn fast_bounding_range_y(&self) -> ($S, $S) {
            self.fast_bounding_range_y()
        }
    };
}

#[cfg(test)]
fn check_split_at<T: Segment<Scalar = f64>>(segment: T) {
    for &t in &[0.25, 0.5, 0.8] {
        let (before, after) = segment.split_at(t).unwrap();
        let expected = segment.sample(t);
        assert!((before.to() - expected).length() < 1e-12);
        assert!((after.from() - expected).length() < 1e-12);
        assert!((before.length() + after.length() - segment.length()).abs() < 1e-6);
    }

    assert!(segment.split_at(-0.1).is_none());
    assert!(segment.split_at(1.1).is_none());
    assert_eq!(segment.flip().from(), segment.to());
}

#[cfg(test)]
fn check_bounds<T: BoundingBox<Scalar = f64>>(segment: &T, expected: Box2D<f64>) {
    let tight = segment.bounding_box();
    let fast = segment.fast_bounding_box();

    assert!((tight.min - expected.min).length() < 1e-9, "{:?}", tight);
    assert!((tight.max - expected.max).length() < 1e-9, "{:?}", tight);
    assert!(fast.contains_box(&tight));
}

#[test]
fn segments_through_the_traits() {
    use crate::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};

    let line = LineSegment {
        from: point(0.0, 0.0),
        to: point(3.0, 4.0),
    };
    let quadratic = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(1.0, 2.0),
        to: point(2.0, 0.0),
    };
    let cubic = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 2.0),
        ctrl2: point(2.0, 2.0),
        to: point(2.0, 0.0),
    };

    check_split_at(line);
    check_split_at(quadratic);
    check_split_at(cubic);

    check_bounds(
        &line,
        Box2D {
            min: point(0.0, 0.0),
            max: point(3.0, 4.0),
        },
    );
    check_bounds(
        &quadratic,
        Box2D {
            min: point(0.0, 0.0),
            max: point(2.0, 1.0),
        },
    );
    check_bounds(
        &cubic,
        Box2D {
            min: point(0.0, 0.0),
            max: point(2.0, 1.5),
        },
    );
}
