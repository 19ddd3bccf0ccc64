//! The path primitives of the drawing model and the tree of named models holding them.

use crate::geom::{BezierCurve, Circle, CircularArc, LineSegment};
use crate::math::{Box2D, Point, Vector};

use indexmap::IndexMap;

/// A single path of the drawing model.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Path {
    Line(LineSegment<f64>),
    Circle(Circle<f64>),
    Arc(CircularArc<f64>),
    Bezier(BezierCurve<f64>),
}

impl Path {
    /// A copy of this path moved by the given vector.
    pub fn translated(&self, by: Vector) -> Self {
        match self {
            Path::Line(line) => Path::Line(line.translate(by)),
            Path::Circle(circle) => Path::Circle(circle.translate(by)),
            Path::Arc(arc) => Path::Arc(arc.translate(by)),
            Path::Bezier(curve) => Path::Bezier(curve.translate(by)),
        }
    }

    /// Start point of the path, `None` for circles.
    pub fn from(&self) -> Option<Point> {
        match self {
            Path::Line(line) => Some(line.from),
            Path::Circle(_) => None,
            Path::Arc(arc) => Some(arc.from()),
            Path::Bezier(curve) => Some(curve.from()),
        }
    }

    /// End point of the path, `None` for circles.
    pub fn to(&self) -> Option<Point> {
        match self {
            Path::Line(line) => Some(line.to),
            Path::Circle(_) => None,
            Path::Arc(arc) => Some(arc.to()),
            Path::Bezier(curve) => Some(curve.to()),
        }
    }

    pub fn bounding_box(&self) -> Box2D {
        match self {
            Path::Line(line) => line.bounding_box(),
            Path::Circle(circle) => circle.bounding_box(),
            Path::Arc(arc) => arc.bounding_box(),
            Path::Bezier(curve) => curve.bounding_box(),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Path::Line(line) => line.length(),
            Path::Circle(circle) => circle.length(),
            Path::Arc(arc) => arc.length(),
            Path::Bezier(curve) => curve.length(),
        }
    }
}

impl From<LineSegment<f64>> for Path {
    fn from(line: LineSegment<f64>) -> Self {
        Path::Line(line)
    }
}

impl From<Circle<f64>> for Path {
    fn from(circle: Circle<f64>) -> Self {
        Path::Circle(circle)
    }
}

impl From<CircularArc<f64>> for Path {
    fn from(arc: CircularArc<f64>) -> Self {
        Path::Arc(arc)
    }
}

impl From<BezierCurve<f64>> for Path {
    fn from(curve: BezierCurve<f64>) -> Self {
        Path::Bezier(curve)
    }
}

/// A node of the drawing tree: named paths and named child models.
///
/// Both maps keep insertion order so that a model is walked in the order it was built.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Model {
    pub paths: IndexMap<String, Path>,
    pub models: IndexMap<String, Model>,
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    /// Insert a path, returning the one previously stored under the same id.
    pub fn add_path<P: Into<Path>>(&mut self, id: &str, path: P) -> Option<Path> {
        self.paths.insert(id.to_string(), path.into())
    }

    /// Insert a child model, returning the one previously stored under the same id.
    pub fn add_model(&mut self, id: &str, model: Model) -> Option<Model> {
        self.models.insert(id.to_string(), model)
    }

    #[inline]
    pub fn with_path<P: Into<Path>>(mut self, id: &str, path: P) -> Self {
        self.add_path(id, path);
        self
    }

    #[inline]
    pub fn with_model(mut self, id: &str, model: Model) -> Self {
        self.add_model(id, model);
        self
    }

    #[inline]
    pub fn path(&self, id: &str) -> Option<&Path> {
        self.paths.get(id)
    }

    #[inline]
    pub fn model(&self, id: &str) -> Option<&Model> {
        self.models.get(id)
    }

    #[inline]
    pub fn model_mut(&mut self, id: &str) -> Option<&mut Model> {
        self.models.get_mut(id)
    }

    /// Remove a child model, preserving the order of its siblings.
    pub fn take_model(&mut self, id: &str) -> Option<Model> {
        self.models.shift_remove(id)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.models.values().all(Model::is_empty)
    }

    /// Number of paths in this model and all of its descendants.
    pub fn path_count(&self) -> usize {
        self.paths.len() + self.models.values().map(Model::path_count).sum::<usize>()
    }

    /// Invokes a callback for every path of the tree, depth first.
    ///
    /// The callback receives the ids of the models leading to the path, the id of the path
    /// and the path itself.
    pub fn walk_paths<F>(&self, cb: &mut F)
    where
        F: FnMut(&[&str], &str, &Path),
    {
        let mut route = Vec::new();
        self.walk_paths_impl(&mut route, cb);
    }

    fn walk_paths_impl<'l, F>(&'l self, route: &mut Vec<&'l str>, cb: &mut F)
    where
        F: FnMut(&[&str], &str, &Path),
    {
        for (id, path) in &self.paths {
            cb(route.as_slice(), id, path);
        }

        for (id, model) in &self.models {
            route.push(id);
            model.walk_paths_impl(route, cb);
            route.pop();
        }
    }

    /// Move every path of the tree by the given vector.
    pub fn translate(&mut self, by: Vector) {
        for path in self.paths.values_mut() {
            *path = path.translated(by);
        }

        for model in self.models.values_mut() {
            model.translate(by);
        }
    }

    /// Smallest rectangle containing every path of the tree, `None` if there is no path.
    pub fn bounding_box(&self) -> Option<Box2D> {
        let mut result: Option<Box2D> = None;
        self.walk_paths(&mut |_, _, path| {
            let bounds = path.bounding_box();
            // Box2D::union skips empty boxes, which drops axis-aligned lines.
            result = Some(match result {
                Some(acc) => Box2D {
                    min: acc.min.min(bounds.min),
                    max: acc.max.max(bounds.max),
                },
                None => bounds,
            });
        });

        result
    }
}

#[cfg(test)]
use crate::math::{point, vector};

#[cfg(test)]
fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> LineSegment<f64> {
    LineSegment {
        from: point(x0, y0),
        to: point(x1, y1),
    }
}

#[test]
fn walk_in_insertion_order() {
    let model = Model::new()
        .with_path("b", line(0.0, 0.0, 1.0, 0.0))
        .with_path("a", line(1.0, 0.0, 1.0, 1.0))
        .with_model(
            "child",
            Model::new().with_path("c", Circle::new(point(0.0, 0.0), 1.0)),
        );

    let mut visited = Vec::new();
    model.walk_paths(&mut |route, id, _| {
        let mut name = route.join("/");
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(id);
        visited.push(name);
    });

    assert_eq!(visited, vec!["b", "a", "child/c"]);
    assert_eq!(model.path_count(), 3);
}

#[test]
fn take_model_keeps_sibling_order() {
    let mut model = Model::new()
        .with_model("first", Model::new())
        .with_model("second", Model::new().with_path("l", line(0.0, 0.0, 1.0, 1.0)))
        .with_model("third", Model::new());

    let taken = model.take_model("second").unwrap();
    assert_eq!(taken.path_count(), 1);
    assert!(model.take_model("second").is_none());

    let ids: Vec<&str> = model.models.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["first", "third"]);
    assert!(model.is_empty());
}

#[test]
fn translate_and_measure() {
    let mut model = Model::new()
        .with_path("line", line(0.0, 0.0, 2.0, 0.0))
        .with_model(
            "inner",
            Model::new().with_path("circle", Circle::new(point(0.0, 0.0), 1.0)),
        );

    model.translate(vector(1.0, 1.0));

    assert_eq!(
        model.path("line").and_then(|path| path.from()),
        Some(point(1.0, 1.0))
    );
    assert_eq!(
        model.bounding_box(),
        Some(Box2D {
            min: point(0.0, 0.0),
            max: point(3.0, 2.0),
        })
    );
    assert_eq!(Model::new().bounding_box(), None);
}

#[test]
fn bounds_include_axis_aligned_lines() {
    let model = Model::new()
        .with_path("horizontal", line(0.0, 0.0, 4.0, 0.0))
        .with_path("vertical", line(5.0, -1.0, 5.0, 3.0));

    assert_eq!(
        model.bounding_box(),
        Some(Box2D {
            min: point(0.0, -1.0),
            max: point(5.0, 3.0),
        })
    );
}
