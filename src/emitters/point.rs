// Copyright @yucwang 2026

use crate::math::color::Color3;
use crate::math::constants::{Float, Vector3f};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vector3f,
    pub color: Color3,
    pub intensity: Float,
}

impl PointLight {
    pub fn new(position: Vector3f, color: Color3, intensity: Float) -> Self {
        Self { position, color, intensity }
    }

    pub fn direction_from(&self, p: Vector3f) -> Vector3f {
        let d = self.position - p;
        let len = d.norm();
        if len <= 0.0 {
            Vector3f::zeros()
        } else {
            d / len
        }
    }

    pub fn distance_from(&self, p: Vector3f) -> Float {
        (self.position - p).norm()
    }
}
