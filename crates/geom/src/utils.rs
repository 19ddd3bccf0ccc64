//! Rounding, angle and polynomial helpers shared by the rest of the crate.
//!
//! Angles handled here are in degrees, counter-clockwise with y pointing up, which is
//! the convention of the drawing model.

use crate::scalar::Scalar;
use crate::{point, vector, Point, Vector};
use arrayvec::ArrayVec;

/// Default accuracy of [`round_to`].
pub const DEFAULT_ROUNDING_ACCURACY: f64 = 0.0000001;

#[inline]
pub fn min_max<S: Scalar>(a: S, b: S) -> (S, S) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[inline]
pub fn tangent<S: Scalar>(v: Vector<S>) -> Vector<S> {
    vector(-v.y, v.x)
}

/// Unit vector rotated 90° counter-clockwise from `v`.
#[inline]
pub fn normalized_tangent<S: Scalar>(v: Vector<S>) -> Vector<S> {
    tangent(v).normalize()
}

/// Round `n` to the given accuracy (`0.001` keeps three decimals).
///
/// Integral values are returned untouched. Halves round towards positive infinity.
pub fn round_to<S: Scalar>(n: S, accuracy: S) -> S {
    if n.fract() == S::ZERO {
        return n;
    }

    let inv = S::ONE / accuracy;

    S::floor((n + S::from_f64(f64::EPSILON)) * inv + S::HALF) / inv
}

/// Bring an angle in degrees into `[0, 360)`.
pub fn no_revolutions<S: Scalar>(angle_in_degrees: S) -> S {
    let full = S::value(360.0);
    let revolutions = S::floor(angle_in_degrees / full);
    if revolutions == S::ZERO {
        return angle_in_degrees;
    }

    angle_in_degrees - full * revolutions
}

/// Angle of the vector from `origin` to `p`, in degrees within `[0, 360)`.
pub fn angle_of_point_in_degrees<S: Scalar>(origin: Point<S>, p: Point<S>) -> S {
    let v = p - origin;
    no_revolutions(S::atan2(v.y, v.x).to_degrees())
}

/// Vector of length `radius` pointing towards `angle_in_degrees`.
#[inline]
pub fn from_polar<S: Scalar>(angle_in_degrees: S, radius: S) -> Vector<S> {
    let (sin, cos) = S::sin_cos(angle_in_degrees.to_radians());
    vector(cos * radius, sin * radius)
}

/// Rotate `p` counter-clockwise around `about`.
pub fn rotate<S: Scalar>(p: Point<S>, angle_in_degrees: S, about: Point<S>) -> Point<S> {
    let (sin, cos) = S::sin_cos(angle_in_degrees.to_radians());
    let v = p - about;

    point(
        about.x + v.x * cos - v.y * sin,
        about.y + v.x * sin + v.y * cos,
    )
}

/// Real roots of `a * x^3 + b * x^2 + c * x + d = 0`.
pub fn cubic_polynomial_roots<S: Scalar>(a: S, b: S, c: S, d: S) -> ArrayVec<S, 3> {
    let mut result = ArrayVec::new();

    if S::abs(a) < S::EPSILON {
        if S::abs(b) < S::EPSILON {
            if S::abs(c) < S::EPSILON {
                return result;
            }
            // linear equation
            result.push(-d / c);
            return result;
        }
        // quadratic equation
        let delta = c * c - S::FOUR * b * d;
        if delta > S::ZERO {
            let sqrt_delta = S::sqrt(delta);
            result.push((-c - sqrt_delta) / (S::TWO * b));
            result.push((-c + sqrt_delta) / (S::TWO * b));
        } else if S::abs(delta) < S::EPSILON {
            result.push(-c / (S::TWO * b));
        }
        return result;
    }

    let frac_1_3 = S::ONE / S::THREE;

    let bn = b / a;
    let cn = c / a;
    let dn = d / a;

    let delta0 = (S::THREE * cn - bn * bn) / S::NINE;
    let delta1 = (S::NINE * bn * cn - S::value(27.0) * dn - S::TWO * bn * bn * bn) / S::value(54.0);
    let delta_01 = delta0 * delta0 * delta0 + delta1 * delta1;

    if delta_01 >= S::ZERO {
        let delta_p_sqrt = delta1 + S::sqrt(delta_01);
        let delta_m_sqrt = delta1 - S::sqrt(delta_01);

        let s = delta_p_sqrt.signum() * S::abs(delta_p_sqrt).powf(frac_1_3);
        let t = delta_m_sqrt.signum() * S::abs(delta_m_sqrt).powf(frac_1_3);

        result.push(-bn * frac_1_3 + (s + t));

        // Don't add the repeated root when s + t == 0.
        if S::abs(s - t) < S::EPSILON && S::abs(s + t) >= S::EPSILON {
            result.push(-bn * frac_1_3 - (s + t) / S::TWO);
        }
    } else {
        let theta = S::acos(delta1 / S::sqrt(-delta0 * delta0 * delta0));
        let two_sqrt_delta0 = S::TWO * S::sqrt(-delta0);
        result.push(two_sqrt_delta0 * S::cos(theta * frac_1_3) - bn * frac_1_3);
        result.push(
            two_sqrt_delta0 * S::cos((theta + S::TWO * S::PI()) * frac_1_3) - bn * frac_1_3,
        );
        result.push(
            two_sqrt_delta0 * S::cos((theta + S::FOUR * S::PI()) * frac_1_3) - bn * frac_1_3,
        );
    }

    result
}

#[test]
fn cubic_polynomial() {
    fn assert_approx_eq(a: ArrayVec<f32, 3>, b: &[f32], epsilon: f32) {
        for i in 0..a.len() {
            if f32::abs(a[i] - b[i]) > epsilon {
                std::println!("{:?} != {:?}", a, b);
            }
            assert!((a[i] - b[i]).abs() <= epsilon);
        }
        assert_eq!(a.len(), b.len());
    }

    assert_approx_eq(
        cubic_polynomial_roots(2.0, -4.0, 2.0, 0.0),
        &[0.0, 1.0],
        0.0000001,
    );
    assert_approx_eq(
        cubic_polynomial_roots(-1.0, 1.0, -1.0, 1.0),
        &[1.0],
        0.000001,
    );
    assert_approx_eq(
        cubic_polynomial_roots(-2.0, 2.0, -1.0, 10.0),
        &[2.0],
        0.00005,
    );
    // (x - 2)^2 => [2.0]
    assert_approx_eq(cubic_polynomial_roots(0.0, 1.0, -4.0, 4.0), &[2.0], 0.0000001);
    // 2x - 4 => [2.0]
    assert_approx_eq(cubic_polynomial_roots(0.0, 0.0, 2.0, -4.0), &[2.0], 0.0000001);
}

#[test]
fn rounding() {
    assert_eq!(round_to(3.0, 0.001), 3.0);
    assert_eq!(round_to(1.23456, 0.01), 1.23);
    assert_eq!(round_to(-0.0000000001, DEFAULT_ROUNDING_ACCURACY), 0.0);
    assert_eq!(round_to(2.5, 1.0), 3.0);
    assert_eq!(round_to(-2.5, 1.0), -2.0);
    assert_eq!(round_to(0.125, 0.01), 0.13);
}

#[test]
fn revolutions() {
    assert_eq!(no_revolutions(90.0), 90.0);
    assert_eq!(no_revolutions(450.0), 90.0);
    assert_eq!(no_revolutions(-90.0), 270.0);
    assert_eq!(no_revolutions(720.0), 0.0);
}

#[test]
fn polar_helpers() {
    let v = from_polar(90.0f64, 2.0);
    assert!(v.x.abs() < 1e-12);
    assert!((v.y - 2.0).abs() < 1e-12);

    let p = rotate(point(2.0f64, 1.0), 180.0, point(1.0, 1.0));
    assert!((p.x - 0.0).abs() < 1e-12);
    assert!((p.y - 1.0).abs() < 1e-12);

    assert!((angle_of_point_in_degrees(point(1.0f64, 1.0), point(1.0, 0.0)) - 270.0).abs() < 1e-12);
}
