#![deny(bare_trait_objects)]

//! Geometry kernel for 2D vector drawings.
//!
//! # Crates
//!
//! This meta-crate (`draftkit`) reexports the following sub-crates for convenience:
//!
//! * **draftkit_geom** - Lines, circular arcs, quadratic and cubic bézier curves, conversions
//!   between arcs and curves, and intersections.
//! * **draftkit_algorithms** - The path and model tree of the drawing model, tolerance-aware
//!   equality, expansion of curves into stroke outlines and shape factories.
//!
//! Each `draftkit_<name>` crate is reexported as a `<name>` module in `draftkit`.
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Conventions
//!
//! Angles of the drawing model are in degrees and arcs sweep counter-clockwise, with the y
//! axis pointing up. Tolerances are parameters with documented defaults: `0.001` for
//! intersections and arc fitting, `0.0001` for angle equality, and exact comparisons for
//! points unless a distance is given.
//!
//! # Examples
//!
//! ## Converting an arc into a cubic bézier curve
//!
//! ```
//! use draftkit::geom::{ArcApproximator, CircularArc};
//! use draftkit::math::point;
//!
//! let approximator = ArcApproximator::new();
//! let arc = CircularArc::new(point(0.0, 0.0), 10.0, 0.0, 90.0);
//!
//! let curve = approximator.arc_to_cubic(&arc).unwrap();
//! assert!((curve.ctrl1.y - 5.5228).abs() < 0.001);
//!
//! // Wider arcs must be split first.
//! let wide = CircularArc::new(point(0.0, 0.0), 10.0, 0.0, 180.0);
//! assert!(approximator.arc_to_cubic(&wide).is_none());
//! assert_eq!(approximator.arc_to_cubics(&wide).len(), 2);
//! ```
//!
//! ## Expanding a curve into a stroke outline
//!
//! ```
//! use draftkit::algorithms::expand::{expand, EXPANSIONS};
//! use draftkit::geom::{BezierCurve, CurveDescriptor};
//! use draftkit::math::point;
//!
//! let descriptor = CurveDescriptor::quadratic(point(0.0, 0.0), point(5.0, 5.0), point(10.0, 0.0));
//! let curve: BezierCurve<f64> = descriptor.to_bezier().unwrap();
//!
//! let outline = expand(&curve, 0.5, false).unwrap();
//! let shapes = outline.model(EXPANSIONS).unwrap();
//! assert!(shapes.model("shape_0").unwrap().path("forward").is_some());
//!
//! assert!(expand(&curve, 0.0, false).is_none());
//! ```

pub extern crate draftkit_algorithms;
pub extern crate draftkit_geom;

pub use draftkit_algorithms as algorithms;
pub use draftkit_geom as geom;

pub use algorithms::math;
