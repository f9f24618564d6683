// Copyright @yucwang 2026

use crate::core::error::ConfigError;
use crate::math::constants::Vector2f;
use crate::samplers::hammersley::hammersley_samples;
use crate::samplers::random::random_samples;
use crate::samplers::stratified::{jittered_samples, uniform_samples};

/// Sub-pixel sample pattern. Offsets lie in [0, 1) x [0, 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sampler {
    Uniform,
    Random,
    Jittered,
    Hammersley,
}

impl Default for Sampler {
    fn default() -> Self {
        Sampler::Uniform
    }
}

const SAMPLERS: [(&str, Sampler); 5] = [
    ("uniform", Sampler::Uniform),
    ("random", Sampler::Random),
    ("jittered", Sampler::Jittered),
    ("jittering", Sampler::Jittered),
    ("hammersley", Sampler::Hammersley),
];

impl Sampler {
    pub fn from_tag(tag: &str) -> Result<Self, ConfigError> {
        SAMPLERS.iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, sampler)| *sampler)
            .ok_or_else(|| ConfigError::UnknownTag { kind: "sampler", tag: tag.to_string() })
    }

    /// Grid based samplers round `count` down to a square.
    /// `seed` only matters for the stochastic variants.
    pub fn samples(&self, count: usize, seed: u64) -> Vec<Vector2f> {
        match self {
            Sampler::Uniform => uniform_samples(count),
            Sampler::Random => random_samples(count, seed),
            Sampler::Jittered => jittered_samples(count, seed),
            Sampler::Hammersley => hammersley_samples(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup() {
        assert_eq!(Sampler::from_tag("jittering"), Ok(Sampler::Jittered));
        assert_eq!(Sampler::from_tag("hammersley"), Ok(Sampler::Hammersley));
        assert_eq!(Sampler::from_tag("sobol"),
                   Err(ConfigError::UnknownTag { kind: "sampler", tag: String::from("sobol") }));
    }

    #[test]
    fn test_all_offsets_in_unit_square() {
        for sampler in [Sampler::Uniform, Sampler::Random, Sampler::Jittered, Sampler::Hammersley].iter() {
            let samples = sampler.samples(25, 5);
            assert_eq!(samples.len(), 25);
            for s in samples.iter() {
                assert!(s.x >= 0.0 && s.x < 1.0 && s.y >= 0.0 && s.y < 1.0, "{:?}: {:?}", sampler, s);
            }
        }
    }
}
