//! Slot and ellipse shape factories.

use crate::geom::utils::{angle_of_point_in_degrees, no_revolutions, normalized_tangent};
use crate::geom::{ArcApproximator, BezierCurve, CircularArc, CubicBezierSegment, LineSegment};
use crate::math::{point, Point};
use crate::model::Model;

/// Id of the child model holding the caps of a shape when they are isolated.
pub const CAPS: &str = "Caps";

/// A capsule: two parallel rails joined by semicircular caps.
///
/// The rails run at `radius` on each side of the segment from `origin` to `end`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Slot {
    pub origin: Point,
    pub end: Point,
    pub radius: f64,
    /// Place the caps in a separate `Caps` child model.
    pub isolate_caps: bool,
}

impl Slot {
    pub fn new(origin: Point, end: Point, radius: f64, isolate_caps: bool) -> Self {
        Slot {
            origin,
            end,
            radius,
            isolate_caps,
        }
    }

    /// Builds the `Top` and `Bottom` rails, and the `StartCap` and `EndCap` arcs.
    pub fn to_model(&self) -> Model {
        let angle = angle_of_point_in_degrees(self.origin, self.end);
        let direction = self.end - self.origin;
        // A zero length slot is a circle split in two, facing along the x axis.
        let normal = if direction.square_length() > 0.0 {
            normalized_tangent(direction) * self.radius
        } else {
            crate::math::vector(0.0, self.radius)
        };

        let top = LineSegment {
            from: self.origin + normal,
            to: self.end + normal,
        };
        let bottom = LineSegment {
            from: self.origin - normal,
            to: self.end - normal,
        };
        let start_cap = CircularArc::new(
            self.origin,
            self.radius,
            no_revolutions(angle + 90.0),
            no_revolutions(angle + 270.0),
        );
        let end_cap = CircularArc::new(
            self.end,
            self.radius,
            no_revolutions(angle + 270.0),
            no_revolutions(angle + 90.0),
        );

        let model = Model::new().with_path("Top", top).with_path("Bottom", bottom);
        if self.isolate_caps {
            return model.with_model(
                CAPS,
                Model::new()
                    .with_path("StartCap", start_cap)
                    .with_path("EndCap", end_cap),
            );
        }

        model
            .with_path("StartCap", start_cap)
            .with_path("EndCap", end_cap)
    }
}

impl From<Slot> for Model {
    fn from(slot: Slot) -> Self {
        slot.to_model()
    }
}

/// An axis-aligned ellipse made of four cubic bézier curves, one per quadrant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl Ellipse {
    /// An ellipse centered on the origin.
    pub fn new(radius_x: f64, radius_y: f64) -> Self {
        Ellipse::with_origin(point(0.0, 0.0), radius_x, radius_y)
    }

    pub fn with_origin(center: Point, radius_x: f64, radius_y: f64) -> Self {
        debug_assert!(radius_x > 0.0 && radius_y > 0.0);
        Ellipse {
            center,
            radius_x,
            radius_y,
        }
    }

    /// The four quadrants, counter-clockwise starting from the positive x axis.
    pub fn curves(&self, approximator: &ArcApproximator<f64>) -> Vec<CubicBezierSegment<f64>> {
        let unit_circle = CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 360.0);
        let scale = |p: Point| {
            point(
                self.center.x + p.x * self.radius_x,
                self.center.y + p.y * self.radius_y,
            )
        };

        approximator
            .arc_to_cubics(&unit_circle)
            .iter()
            .map(|quarter| CubicBezierSegment {
                from: scale(quarter.from),
                ctrl1: scale(quarter.ctrl1),
                ctrl2: scale(quarter.ctrl2),
                to: scale(quarter.to),
            })
            .collect()
    }

    pub fn to_model(&self, approximator: &ArcApproximator<f64>) -> Model {
        const IDS: [&str; 4] = ["TopRight", "TopLeft", "BottomLeft", "BottomRight"];

        let mut model = Model::new();
        for (id, curve) in IDS.iter().zip(self.curves(approximator)) {
            model.add_path(id, BezierCurve::Cubic(curve));
        }

        model
    }
}

#[cfg(test)]
use crate::model::Path;

#[cfg(test)]
fn assert_line(model: &Model, id: &str, from: Point, to: Point) {
    match model.path(id) {
        Some(Path::Line(line)) => {
            assert!((line.from - from).length() < 1e-9, "{}: {:?}", id, line);
            assert!((line.to - to).length() < 1e-9, "{}: {:?}", id, line);
        }
        other => panic!("{}: expected a line, got {:?}", id, other),
    }
}

#[test]
fn horizontal_slot() {
    let slot = Slot::new(point(0.0, 0.0), point(10.0, 0.0), 2.0, false).to_model();

    assert_line(&slot, "Top", point(0.0, 2.0), point(10.0, 2.0));
    assert_line(&slot, "Bottom", point(0.0, -2.0), point(10.0, -2.0));

    match slot.path("StartCap") {
        Some(Path::Arc(arc)) => {
            assert_eq!(arc.center, point(0.0, 0.0));
            assert_eq!((arc.start_angle, arc.end_angle), (90.0, 270.0));
            // The cap bulges away from the slot.
            assert!(arc.mid_point().x < -1.99);
        }
        other => panic!("expected an arc, got {:?}", other),
    }

    match slot.path("EndCap") {
        Some(Path::Arc(arc)) => {
            assert_eq!(arc.center, point(10.0, 0.0));
            assert!(arc.mid_point().x > 11.99);
        }
        other => panic!("expected an arc, got {:?}", other),
    }

    assert!(slot.model(CAPS).is_none());
}

#[test]
fn slot_with_isolated_caps() {
    let slot = Slot::new(point(1.0, 1.0), point(1.0, 5.0), 1.0, true).to_model();

    // Going up, the top rail is on the left.
    assert_line(&slot, "Top", point(0.0, 1.0), point(0.0, 5.0));
    assert_line(&slot, "Bottom", point(2.0, 1.0), point(2.0, 5.0));

    assert!(slot.path("StartCap").is_none());
    let caps = slot.model(CAPS).unwrap();
    assert_eq!(caps.paths.len(), 2);
    assert!(caps.path("StartCap").is_some());
    assert!(caps.path("EndCap").is_some());
}

#[test]
fn ellipse_quadrants() {
    let approximator = ArcApproximator::new();
    let ellipse = Ellipse::with_origin(point(1.0, 2.0), 4.0, 2.0);
    let curves = ellipse.curves(&approximator);

    assert_eq!(curves.len(), 4);
    let expected_starts = [
        point(5.0, 2.0),
        point(1.0, 4.0),
        point(-3.0, 2.0),
        point(1.0, 0.0),
    ];
    for (curve, start) in curves.iter().zip(expected_starts.iter()) {
        assert!((curve.from - *start).length() < 1e-9);
    }
    // Closed.
    assert!((curves[3].to - curves[0].from).length() < 1e-9);

    for curve in &curves {
        for i in 0..=8 {
            let p = curve.sample(i as f64 / 8.0);
            let x = (p.x - 1.0) / 4.0;
            let y = (p.y - 2.0) / 2.0;
            assert!((x * x + y * y - 1.0).abs() < 1e-3);
        }
    }

    let model = Ellipse::new(3.0, 1.0).to_model(&approximator);
    assert_eq!(model.paths.len(), 4);
    assert!(model.path("TopLeft").is_some());
    // The four quadrants share a single span.
    assert_eq!(approximator.cached_spans(), 1);
}
