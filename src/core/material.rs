// Copyright @yucwang 2026

use crate::math::color::Color3;
use crate::math::constants::Float;

/// Index into a scene's material table.
pub type MaterialId = usize;

/// Slot of the void material in every material table.
pub const VOID_MATERIAL: MaterialId = 0;

/// Shading parameters of a surface and of the medium behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse_color: Color3,
    pub k_diffuse: Float,
    pub k_specular: Float,
    pub k_transparent: Float,
    pub shininess: Float,
    pub refractive_index: Float,
}

impl Material {
    /// Opaque, purely diffuse material.
    pub fn new(name: &str, diffuse_color: Color3) -> Self {
        Self {
            name: name.to_string(),
            diffuse_color,
            k_diffuse: 1.0,
            k_specular: 0.0,
            k_transparent: 0.0,
            shininess: 1.0,
            refractive_index: 1.0,
        }
    }

    /// Vacuum: black, not reflective, fully transparent, index 1.
    pub fn void() -> Self {
        Self {
            name: String::from("__void"),
            diffuse_color: Color3::black(),
            k_diffuse: 0.0,
            k_specular: 0.0,
            k_transparent: 1.0,
            shininess: 0.0,
            refractive_index: 1.0,
        }
    }

    pub fn with_diffuse(mut self, k_diffuse: Float) -> Self {
        self.k_diffuse = k_diffuse;
        self
    }

    pub fn with_specular(mut self, k_specular: Float, shininess: Float) -> Self {
        self.k_specular = k_specular;
        self.shininess = shininess;
        self
    }

    pub fn with_transparency(mut self, k_transparent: Float, refractive_index: Float) -> Self {
        self.k_transparent = k_transparent;
        self.refractive_index = refractive_index;
        self
    }

    pub fn roughness(&self) -> Float {
        1.0 - self.k_specular
    }
}
