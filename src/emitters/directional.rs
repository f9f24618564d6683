// Copyright @yucwang 2026

use crate::math::color::Color3;
use crate::math::constants::{Float, Vector3f};

/// Light arriving from infinitely far away along `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    direction: Vector3f,
    pub color: Color3,
    pub intensity: Float,
}

impl DirectionalLight {
    pub fn new(direction: Vector3f, color: Color3, intensity: Float) -> Self {
        let len = direction.norm();
        let direction = if len <= 0.0 { Vector3f::zeros() } else { direction / len };
        Self { direction, color, intensity }
    }

    /// Direction the light travels in.
    pub fn direction(&self) -> Vector3f {
        self.direction
    }

    pub fn direction_from(&self, _p: Vector3f) -> Vector3f {
        -self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_points_against_travel() {
        let light = DirectionalLight::new(Vector3f::new(0.0, -2.0, 0.0), Color3::white(), 0.5);
        assert_eq!(light.direction(), Vector3f::new(0.0, -1.0, 0.0));
        assert_eq!(light.direction_from(Vector3f::new(5.0, 5.0, 5.0)), Vector3f::new(0.0, 1.0, 0.0));
    }
}
