#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::let_and_return)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives for vector drawings, on top of euclid.
//!
//! This crate is reexported in `draftkit`.
//!
//! # Overview.
//!
//! This crate implements the maths to work with:
//!
//! - lines and line segments,
//! - circles and circular arcs (angles in degrees, counter-clockwise),
//! - quadratic and cubic bézier curves,
//! - conversions between circular arcs and cubic bézier curves,
//! - curve/curve and curve/line intersections.
//!
//! # Curve descriptors
//!
//! The drawing model hands curves over as loosely typed [`CurveDescriptor`]s: an origin,
//! an end and either one control point (quadratic) or two (cubic). They are normalized
//! into [`BezierCurve`] or directly into the canonical [`CubicBezierSegment`] form that
//! most of the maths in this crate operates on.
//!
//! # Tolerances
//!
//! Approximations and searches take their tolerance as a parameter. The documented
//! defaults are `0.001` for intersections and arc fitting
//! ([`DEFAULT_INTERSECTION_THRESHOLD`], [`DEFAULT_ARC_ERROR_THRESHOLD`]).
//!
//! # "Not applicable" vs errors
//!
//! Operations which only make sense for a range of inputs (splitting outside of `[0, 1]`,
//! converting an arc wider than 90°) return `None`. A curve descriptor that is missing
//! its control points is a contract violation and is reported as an [`InvalidCurve`]
//! error.

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
mod segment;
pub mod approximation;
pub mod arc;
pub mod cubic_bezier;
mod cubic_bezier_intersections;
pub mod curve;
mod line;
pub mod quadratic_bezier;
pub mod utils;

#[doc(inline)]
pub use crate::approximation::{ArcApproximator, FittedSegment, DEFAULT_ARC_ERROR_THRESHOLD};
#[doc(inline)]
pub use crate::arc::{Circle, CircularArc};
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::cubic_bezier_intersections::{IntersectionOptions, DEFAULT_INTERSECTION_THRESHOLD};
#[doc(inline)]
pub use crate::curve::{BezierCurve, CurveDescriptor, InvalidCurve};
#[doc(inline)]
pub use crate::line::{Line, LineEquation, LineSegment, Slope};
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::segment::{BoundingBox, Segment};

pub use crate::scalar::Scalar;

mod scalar {
    use num_traits::{Float, FloatConst, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float
        + NumCast
        + FloatConst
        + Sized
        + Display
        + Debug
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + 'static
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const THREE: Self;
        const FOUR: Self;
        const SIX: Self;
        const NINE: Self;
        const TEN: Self;

        const MIN: Self;
        const MAX: Self;

        const EPSILON: Self;

        fn value(v: f32) -> Self;

        fn from_f64(v: f64) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;
        const SIX: Self = 6.0;
        const NINE: Self = 9.0;
        const TEN: Self = 10.0;

        const MIN: Self = f32::MIN;
        const MAX: Self = f32::MAX;

        const EPSILON: Self = 1e-4;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }

        #[inline]
        fn from_f64(v: f64) -> Self {
            v as f32
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;
        const SIX: Self = 6.0;
        const NINE: Self = 9.0;
        const TEN: Self = 10.0;

        const MIN: Self = f64::MIN;
        const MAX: Self = f64::MAX;

        const EPSILON: Self = 1e-8;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }

        #[inline]
        fn from_f64(v: f64) -> Self {
            v
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Alias for `euclid::default::Box2D`
pub use euclid::default::Box2D;

/// An angle in radians.
pub use euclid::Angle;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

pub mod traits {
    pub use crate::segment::{BoundingBox, Segment};
}
