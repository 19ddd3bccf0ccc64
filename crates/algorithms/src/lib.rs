#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Drawing model level algorithms.
//!
//! This crate is reexported in `draftkit`.
//!
//! The drawing model stores its geometry as [`Path`](model::Path)s (lines, circles, arcs and
//! bézier curves) grouped in a tree of named [`Model`](model::Model)s. This crate works at
//! that level, in `f64`:
//!
//! - [`equal`]: tolerance-aware comparisons of points, angles, slopes and paths.
//! - [`expand`]: turns a curve into the outline of a stroke of a given width.
//! - [`shapes`]: slot (capsule) and ellipse factories.

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

pub extern crate draftkit_geom as geom;

pub mod equal;
pub mod expand;
pub mod model;
pub mod shapes;

#[doc(inline)]
pub use crate::expand::{expand, expand_with_options, ExpandOptions};
#[doc(inline)]
pub use crate::model::{Model, Path};

/// The `f64` flavor of the geometry types, as used by the drawing model.
pub mod math {
    /// Alias for `euclid::default::Point2D<f64>`.
    pub type Point = crate::geom::Point<f64>;

    /// Alias for `euclid::default::Vector2D<f64>`.
    pub type Vector = crate::geom::Vector<f64>;

    /// Alias for `euclid::default::Box2D<f64>`.
    pub type Box2D = crate::geom::Box2D<f64>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }
}
