// Copyright @yucwang 2026

use crate::math::constants::Float;

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> Float {
        ((self.next_u32() >> 8) as Float) * (1.0 / (1u32 << 24) as Float)
    }
}

/// Decorrelates per-pixel streams derived from one scene seed.
pub fn pixel_seed(seed: u64, x: usize, y: usize) -> u64 {
    let mut h = seed ^ 0x9E37_79B9_7F4A_7C15;
    h ^= (x as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = h.rotate_left(31);
    h ^= (y as u64).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^= h >> 29;
    h.wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_f32_range() {
        let mut rng = LcgRng::new(42);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!(v >= 0.0 && v < 1.0);
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = LcgRng::new(7);
        let mut b = LcgRng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_pixel_seeds_differ() {
        assert_ne!(pixel_seed(0, 1, 0), pixel_seed(0, 0, 1));
        assert_eq!(pixel_seed(3, 5, 9), pixel_seed(3, 5, 9));
    }
}
