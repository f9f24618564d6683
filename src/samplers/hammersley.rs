// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};

// 2^-32
const INV_TWO_POW_32: f64 = 1.0 / 4294967296.0;

/// Radical inverse in base 2 of `i`, in [0, 1).
pub fn radical_inverse_base2(i: u32) -> Float {
    // Computed in f64 so values just below 1 do not round up to 1.
    (i.reverse_bits() as f64 * INV_TWO_POW_32) as Float
}

pub fn hammersley_samples(count: usize) -> Vec<Vector2f> {
    let n = count as Float;
    (0..count)
        .map(|i| Vector2f::new(i as Float / n, radical_inverse_base2(i as u32).min(1.0 - Float::EPSILON)))
        .collect()
}
