// Copyright @yucwang 2026

use super::constants::Float;

pub fn discriminant(a: Float, b: Float, c: Float) -> Float {
    b * b - 4.0 * a * c
}

/// Real roots of `a t^2 + b t + c = 0` in ascending order.
pub fn solve(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    if a == 0.0 {
        return None;
    }
    let disc = discriminant(a, b, c);
    if disc < 0.0 {
        return None;
    }

    // Avoids cancellation when b^2 >> 4ac.
    let root = disc.sqrt();
    let q = if b < 0.0 { -0.5 * (b - root) } else { -0.5 * (b + root) };
    let (t0, t1) = if q == 0.0 {
        (0.0, 0.0)
    } else {
        (q / a, c / q)
    };

    if t0 <= t1 { Some((t0, t1)) } else { Some((t1, t0)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_roots() {
        let (t0, t1) = solve(1.0, -5.0, 6.0).unwrap();
        assert!((t0 - 2.0).abs() < 1e-6);
        assert!((t1 - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_real_roots() {
        assert!(solve(1.0, 0.0, 1.0).is_none());
        assert!(discriminant(1.0, 0.0, 1.0) < 0.0);
    }

    #[test]
    fn test_scaled_leading_coefficient() {
        let (t0, t1) = solve(2.0, 0.0, -8.0).unwrap();
        assert!((t0 + 2.0).abs() < 1e-6);
        assert!((t1 - 2.0).abs() < 1e-6);
    }
}
