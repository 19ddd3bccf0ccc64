//! Computes intersection parameters for two cubic bézier curves by bounding box subdivision.
//!
//! Both curves are recursively split in halves, keeping only the pairs of sub-curves whose
//! bounding boxes overlap. Once the bounding boxes of both sub-curves of a pair are smaller
//! than the threshold (measured as width + height), the pair is a hit. Hits whose parameter
//! ranges touch on both curves belong to the same intersection and are merged, then each
//! intersection is reported at the middle of its ranges.

use crate::scalar::Scalar;
use crate::{Box2D, CubicBezierSegment};

use core::ops::Range;
use std::vec::Vec;

/// Default convergence threshold of the intersection search.
pub const DEFAULT_INTERSECTION_THRESHOLD: f64 = 0.001;

/// Parameters for the intersection search.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct IntersectionOptions<S> {
    /// Size (width + height of the bounding box) under which a pair of sub-curves is
    /// considered converged.
    ///
    /// Default value: `DEFAULT_INTERSECTION_THRESHOLD`.
    pub threshold: S,

    /// Maximum number of sub-curve pairs examined.
    ///
    /// Only reached by overlapping curves. Default value: `DEFAULT_MAX_CALLS`.
    pub max_calls: u32,

    /// Maximum subdivision depth.
    ///
    /// Default value: `DEFAULT_MAX_DEPTH`.
    pub max_depth: u32,
}

impl<S: Scalar> IntersectionOptions<S> {
    pub const DEFAULT_MAX_CALLS: u32 = 4096;
    pub const DEFAULT_MAX_DEPTH: u32 = 60;

    #[inline]
    pub fn threshold(threshold: S) -> Self {
        Self::default().with_threshold(threshold)
    }

    #[inline]
    pub fn with_threshold(mut self, threshold: S) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    pub fn with_max_calls(mut self, max_calls: u32) -> Self {
        self.max_calls = max_calls;
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl<S: Scalar> Default for IntersectionOptions<S> {
    fn default() -> Self {
        IntersectionOptions {
            threshold: S::from_f64(DEFAULT_INTERSECTION_THRESHOLD),
            max_calls: Self::DEFAULT_MAX_CALLS,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

// Computes the intersections (if any) between two cubic bézier curves in the form of the `t`
// parameters of each intersection point along the curves.
//
// Returns one pair per intersection, in increasing order of the first parameter. End point
// intersections are included.
//
// Returns no intersections if either curve is a point or if the curves are the same.
pub fn cubic_bezier_intersections_t<S: Scalar>(
    curve1: &CubicBezierSegment<S>,
    curve2: &CubicBezierSegment<S>,
    options: &IntersectionOptions<S>,
) -> Vec<(S, S)> {
    if !boxes_overlap(&curve1.bounding_box(), &curve2.bounding_box())
        || curve1 == curve2
        || *curve1 == curve2.flip()
    {
        return Vec::new();
    }

    if curve1.is_a_point(S::EPSILON) || curve2.is_a_point(S::EPSILON) {
        return Vec::new();
    }

    let mut search = Search {
        options,
        calls: 0,
        exhausted: false,
        hits: Vec::new(),
    };

    search.add_curve_intersections(
        curve1,
        curve2,
        S::ZERO..S::ONE,
        S::ZERO..S::ONE,
        0,
    );

    if search.exhausted {
        log::warn!(
            "intersection search stopped after {} calls, the curves probably overlap",
            search.calls
        );
    }

    let mut result: Vec<(S, S)> = Vec::new();
    for hit in merge_touching_hits(search.hits) {
        let t1 = truncate(mid(&hit.domain1));
        let t2 = truncate(mid(&hit.domain2));
        // Exact match: the values went through the same truncation.
        if !result.contains(&(t1, t2)) {
            result.push((t1, t2));
        }
    }

    result.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(core::cmp::Ordering::Equal)
            .then(a.1.partial_cmp(&b.1).unwrap_or(core::cmp::Ordering::Equal))
    });

    result
}

#[derive(Clone, Debug)]
struct Hit<S> {
    domain1: Range<S>,
    domain2: Range<S>,
}

struct Search<'l, S> {
    options: &'l IntersectionOptions<S>,
    calls: u32,
    exhausted: bool,
    hits: Vec<Hit<S>>,
}

impl<'l, S: Scalar> Search<'l, S> {
    // curve1 and curve2 are sub-curves of the original curves covering domain1 and domain2 of
    // their parameter space. Their bounding boxes are known to overlap.
    fn add_curve_intersections(
        &mut self,
        curve1: &CubicBezierSegment<S>,
        curve2: &CubicBezierSegment<S>,
        domain1: Range<S>,
        domain2: Range<S>,
        depth: u32,
    ) {
        self.calls += 1;
        if self.calls >= self.options.max_calls || depth >= self.options.max_depth {
            self.exhausted = true;
            return;
        }

        let threshold = self.options.threshold;
        if box_size(&curve1.bounding_box()) < threshold
            && box_size(&curve2.bounding_box()) < threshold
        {
            self.hits.push(Hit { domain1, domain2 });
            return;
        }

        let (c1a, c1b) = curve1.split(S::HALF);
        let (c2a, c2b) = curve2.split(S::HALF);
        let mid1 = mid(&domain1);
        let mid2 = mid(&domain2);

        let halves1 = [(c1a, domain1.start..mid1), (c1b, mid1..domain1.end)];
        let halves2 = [(c2a, domain2.start..mid2), (c2b, mid2..domain2.end)];

        for (sub1, sub_domain1) in &halves1 {
            let box1 = sub1.bounding_box();
            for (sub2, sub_domain2) in &halves2 {
                if !boxes_overlap(&box1, &sub2.bounding_box()) {
                    continue;
                }

                self.add_curve_intersections(
                    sub1,
                    sub2,
                    sub_domain1.clone(),
                    sub_domain2.clone(),
                    depth + 1,
                );

                if self.exhausted {
                    return;
                }
            }
        }
    }
}

// Neighbouring leaves around a crossing all converge. Merge the ones that touch on both curves
// until no two clusters touch anymore.
fn merge_touching_hits<S: Scalar>(hits: Vec<Hit<S>>) -> Vec<Hit<S>> {
    let mut clusters: Vec<Hit<S>> = Vec::with_capacity(hits.len());
    for hit in hits {
        let mut current = hit;
        while let Some(idx) = clusters.iter().position(|c| {
            ranges_touch(&c.domain1, &current.domain1) && ranges_touch(&c.domain2, &current.domain2)
        }) {
            let other = clusters.swap_remove(idx);
            current = Hit {
                domain1: union(&current.domain1, &other.domain1),
                domain2: union(&current.domain2, &other.domain2),
            };
        }
        clusters.push(current);
    }

    clusters
}

#[inline]
fn ranges_touch<S: Scalar>(a: &Range<S>, b: &Range<S>) -> bool {
    a.start <= b.end && b.start <= a.end
}

#[inline]
fn union<S: Scalar>(a: &Range<S>, b: &Range<S>) -> Range<S> {
    S::min(a.start, b.start)..S::max(a.end, b.end)
}

#[inline]
fn mid<S: Scalar>(domain: &Range<S>) -> S {
    (domain.start + domain.end) * S::HALF
}

// Parameters are reported with five decimals.
#[inline]
fn truncate<S: Scalar>(t: S) -> S {
    let scale = S::value(100000.0);
    S::trunc(t * scale) / scale
}

#[inline]
fn box_size<S: Scalar>(b: &Box2D<S>) -> S {
    (b.max.x - b.min.x) + (b.max.y - b.min.y)
}

// Unlike Box2D::intersects, touching and flat boxes overlap.
#[inline]
fn boxes_overlap<S: Scalar>(r1: &Box2D<S>, r2: &Box2D<S>) -> bool {
    r1.min.x <= r2.max.x && r2.min.x <= r1.max.x && r1.min.y <= r2.max.y && r2.min.y <= r1.max.y
}

#[cfg(test)]
use crate::{point, Point};

#[cfg(test)]
fn check_dist(p1: &Point<f64>, p2: &Point<f64>, tolerance: f64) {
    let dist = (*p1 - *p2).length();
    if dist > tolerance {
        std::println!("Intersection points too far apart: {:?} {:?}", p1, p2);
    }
    assert!(dist <= tolerance);
}

#[test]
fn two_crossings() {
    let hump = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.5, 1.0),
        ctrl2: point(0.5, 1.0),
        to: point(1.0, 0.0),
    };
    let valley = CubicBezierSegment {
        from: point(0.0, 1.0),
        ctrl1: point(0.5, 0.0),
        ctrl2: point(0.5, 0.0),
        to: point(1.0, 1.0),
    };

    let options = IntersectionOptions::default();
    let intersections = cubic_bezier_intersections_t(&hump, &valley, &options);

    assert_eq!(intersections.len(), 2);
    for &(t1, t2) in &intersections {
        check_dist(&hump.sample(t1), &valley.sample(t2), 0.01);
        assert!((hump.y(t1) - 0.5).abs() < 0.01);
    }
    assert!(intersections[0].0 < 0.5);
    assert!(intersections[1].0 > 0.5);
}

#[test]
fn crossing_lines() {
    let l1 = crate::LineSegment {
        from: point(0.0, 0.0),
        to: point(2.0, 2.0),
    }
    .to_cubic();
    let l2 = crate::LineSegment {
        from: point(0.0, 2.0),
        to: point(2.0, 0.0),
    }
    .to_cubic();

    let intersections = cubic_bezier_intersections_t(&l1, &l2, &IntersectionOptions::default());
    assert_eq!(intersections.len(), 1);
    check_dist(&l1.sample(intersections[0].0), &point(1.0, 1.0), 0.001);
}

#[test]
fn identical_and_reversed_curves() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 2.0),
        ctrl2: point(2.0, 2.0),
        to: point(3.0, 0.0),
    };
    let options = IntersectionOptions::default();

    assert!(cubic_bezier_intersections_t(&curve, &curve, &options).is_empty());
    assert!(cubic_bezier_intersections_t(&curve, &curve.flip(), &options).is_empty());
}

#[test]
fn disjoint_curves() {
    let c1 = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(2.0, 1.0),
        to: point(3.0, 0.0),
    };
    let c2 = c1.translate(crate::vector(0.0, 5.0));

    assert!(cubic_bezier_intersections_t(&c1, &c2, &IntersectionOptions::default()).is_empty());
}

#[test]
fn overlapping_unit_circles() {
    use crate::{ArcApproximator, CircularArc};

    let approximator = ArcApproximator::new();
    let quarters = |center: Point<f64>| -> Vec<CubicBezierSegment<f64>> {
        (0..4)
            .map(|i| {
                let start = i as f64 * 90.0;
                approximator
                    .arc_to_cubic(&CircularArc::new(center, 1.0, start, start + 90.0))
                    .unwrap()
            })
            .collect()
    };

    let a = quarters(point(0.0, 0.0));
    let b = quarters(point(1.0, 0.0));
    let options = IntersectionOptions::threshold(0.001);

    let mut points = Vec::new();
    for qa in &a {
        for qb in &b {
            let intersections = cubic_bezier_intersections_t(qa, qb, &options);
            for &(ta, tb) in &intersections {
                check_dist(&qa.sample(ta), &qb.sample(tb), 0.01);
                points.push(qa.sample(ta));
            }
        }
    }

    let h = 3.0f64.sqrt() / 2.0;
    assert_eq!(points.len(), 2, "{:?}", points);
    assert!(points.iter().any(|p| (*p - point(0.5, h)).length() < 0.01));
    assert!(points.iter().any(|p| (*p - point(0.5, -h)).length() < 0.01));
}

#[test]
fn call_budget_stops_overlapping_curves() {
    let curve = crate::LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
    }
    .to_cubic();
    let shifted = crate::LineSegment {
        from: point(5.0, 0.0),
        to: point(15.0, 0.0),
    }
    .to_cubic();

    let options = IntersectionOptions::default().with_max_calls(64);
    // Terminates even though there are infinitely many intersections.
    let _ = cubic_bezier_intersections_t(&curve, &shifted, &options);
}
