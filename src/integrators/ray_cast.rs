// Copyright @yucwang 2026

use crate::core::bsdf::Brdf;
use crate::core::integrator::direct_lighting;
use crate::core::scene::Scene;
use crate::math::color::Color3;
use crate::math::ray::Ray3f;

/// Direct lighting only, no secondary rays.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RayCastIntegrator;

impl RayCastIntegrator {
    pub fn new() -> Self {
        Self
    }

    pub fn radiance(&self, scene: &Scene, brdf: &Brdf, ray: &Ray3f) -> Color3 {
        match scene.find_intersection(ray) {
            Some(hit) => direct_lighting(scene, brdf, &hit),
            None => scene.background(),
        }
    }
}
