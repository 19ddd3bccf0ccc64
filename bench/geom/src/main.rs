extern crate draftkit;
#[macro_use]
extern crate bencher;

use bencher::Bencher;

use draftkit::algorithms::expand::{expand_with_options, ExpandOptions};
use draftkit::geom::{
    ArcApproximator, BezierCurve, CircularArc, CubicBezierSegment, IntersectionOptions, Line,
};
use draftkit::math::*;

const N: usize = 10;

fn crossing_curves() -> (CubicBezierSegment<f64>, CubicBezierSegment<f64>) {
    let c1 = CubicBezierSegment {
        from: point(10.0, 0.0),
        ctrl1: point(10.0, 90.0),
        ctrl2: point(60.0, 90.0),
        to: point(100.0, 90.0),
    };
    let c2 = CubicBezierSegment {
        from: point(0.0, 10.0),
        ctrl1: point(90.0, 10.0),
        ctrl2: point(90.0, 60.0),
        to: point(90.0, 100.0),
    };

    (c1, c2)
}

fn cubic_intersections(bench: &mut Bencher) {
    let (c1, c2) = crossing_curves();
    let options = IntersectionOptions::default();

    bench.iter(|| {
        for _ in 0..N {
            bencher::black_box(c1.cubic_intersections_t(&c2, &options));
        }
    });
}

fn overlapping_circles(bench: &mut Bencher) {
    let approximator = ArcApproximator::new();
    let a = approximator.arc_to_cubics(&CircularArc::new(point(0.0, 0.0), 1.0, 0.0, 360.0));
    let b = approximator.arc_to_cubics(&CircularArc::new(point(1.0, 0.0), 1.0, 0.0, 360.0));
    let options = IntersectionOptions::default();

    bench.iter(|| {
        for c1 in &a {
            for c2 in &b {
                bencher::black_box(c1.cubic_intersections_t(c2, &options));
            }
        }
    });
}

fn line_intersections(bench: &mut Bencher) {
    let (c1, _) = crossing_curves();
    let line = Line {
        point: point(0.0, 50.0),
        vector: vector(1.0, 0.1),
    };

    bench.iter(|| {
        for _ in 0..N {
            bencher::black_box(c1.line_intersections_t(&line));
        }
    });
}

fn expand_s_curve(bench: &mut Bencher) {
    let curve = BezierCurve::Cubic(CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(50.0, 100.0),
        ctrl2: point(50.0, -100.0),
        to: point(100.0, 0.0),
    });
    let options = ExpandOptions::distance(2.0);

    bench.iter(|| {
        for _ in 0..N {
            bencher::black_box(expand_with_options(&curve, &options));
        }
    });
}

fn expand_isolated_caps(bench: &mut Bencher) {
    let curve = BezierCurve::Cubic(CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 50.0),
        ctrl2: point(50.0, 100.0),
        to: point(100.0, 100.0),
    });
    let options = ExpandOptions::distance(2.0).with_isolate_caps(true);

    bench.iter(|| {
        for _ in 0..N {
            bencher::black_box(expand_with_options(&curve, &options));
        }
    });
}

benchmark_group!(
    intersections,
    cubic_intersections,
    overlapping_circles,
    line_intersections
);
benchmark_group!(expansion, expand_s_curve, expand_isolated_caps);

benchmark_main!(intersections, expansion);
