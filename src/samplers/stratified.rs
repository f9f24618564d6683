// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::math::constants::{Float, Vector2f};

fn grid_rows(count: usize) -> usize {
    ((count as Float).sqrt().floor() as usize).max(1)
}

/// `rows x rows` grid anchored at the cell corners.
pub fn uniform_samples(count: usize) -> Vec<Vector2f> {
    let rows = grid_rows(count);
    let step = 1.0 / rows as Float;
    let mut samples = Vec::with_capacity(rows * rows);
    for j in 0..rows {
        for i in 0..rows {
            samples.push(Vector2f::new(i as Float * step, j as Float * step));
        }
    }
    samples
}

/// Uniform grid with every point moved randomly inside its own cell.
pub fn jittered_samples(count: usize, seed: u64) -> Vec<Vector2f> {
    let rows = grid_rows(count);
    let step = 1.0 / rows as Float;
    let mut rng = LcgRng::new(seed);
    uniform_samples(count)
        .into_iter()
        .map(|s| jitter_in_cell(s, Vector2f::new(rng.next_f32(), rng.next_f32()), step))
        .collect()
}

// Rounding may push the last row or column onto 1.0.
fn jitter_in_cell(corner: Vector2f, offset: Vector2f, step: Float) -> Vector2f {
    let p = corner + offset * step;
    Vector2f::new(p.x.min(1.0 - Float::EPSILON), p.y.min(1.0 - Float::EPSILON))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_grid() {
        let samples = uniform_samples(4);
        assert_eq!(samples, vec![Vector2f::new(0.0, 0.0), Vector2f::new(0.5, 0.0),
                                 Vector2f::new(0.0, 0.5), Vector2f::new(0.5, 0.5)]);
        // Rounds down to a square grid, never below one sample.
        assert_eq!(uniform_samples(10).len(), 9);
        assert_eq!(uniform_samples(0).len(), 1);
    }

    #[test]
    fn test_jitter_stays_in_cell() {
        let samples = jittered_samples(16, 3);
        assert_eq!(samples.len(), 16);
        for (idx, s) in samples.iter().enumerate() {
            let (i, j) = (idx % 4, idx / 4);
            assert!(s.x >= i as Float * 0.25 && s.x < (i + 1) as Float * 0.25);
            assert!(s.y >= j as Float * 0.25 && s.y < (j + 1) as Float * 0.25);
        }
    }

    #[test]
    fn test_last_cell_stays_below_one() {
        let step = 1.0 / 3.0;
        let largest_below_one = 1.0 - Float::EPSILON / 2.0;
        let corner = Vector2f::new(2.0 * step, 2.0 * step);
        let p = jitter_in_cell(corner, Vector2f::new(largest_below_one, largest_below_one), step);
        assert!(p.x < 1.0 && p.y < 1.0);
        assert!(p.x >= corner.x && p.y >= corner.y);
    }
}
