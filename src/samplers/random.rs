// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::math::constants::Vector2f;

pub fn random_samples(count: usize, seed: u64) -> Vec<Vector2f> {
    let mut rng = LcgRng::new(seed);
    (0..count).map(|_| Vector2f::new(rng.next_f32(), rng.next_f32())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_range_and_determinism() {
        let a = random_samples(64, 11);
        assert_eq!(a.len(), 64);
        assert!(a.iter().all(|s| s.x >= 0.0 && s.x < 1.0 && s.y >= 0.0 && s.y < 1.0));
        assert_eq!(a, random_samples(64, 11));
        assert_ne!(a, random_samples(64, 12));
    }
}
