// Copyright @yucwang 2026

use crate::core::interaction::Intersection;
use crate::math::constants::{Float, Vector3f};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PhongBrdf;

impl PhongBrdf {
    pub fn new() -> Self {
        Self
    }

    /// `k_s max(0, R.V)^shininess`, R being `light_dir` mirrored about the normal.
    pub fn reflectance(&self, light_dir: &Vector3f, hit: &Intersection) -> Float {
        let n = hit.normal();
        let cos_alpha = light_dir.dot(&n);
        if cos_alpha <= 0.0 {
            return 0.0;
        }
        let mirrored = n * (2.0 * cos_alpha) - light_dir;
        let cos_beta = mirrored.dot(&hit.view_direction()).max(0.0);

        let material = hit.inner();
        material.k_specular * cos_beta.powf(material.shininess)
    }

    pub fn transmittance(&self, _light_dir: &Vector3f, hit: &Intersection) -> Float {
        hit.inner().k_transparent
    }
}
