// Copyright @yucwang 2026

use crate::core::bsdf::Brdf;
use crate::core::integrator::diffuse_lighting;
use crate::core::scene::Scene;
use crate::math::color::Color3;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;

/// Branches carrying less energy than this are not followed.
pub const MIN_INTENSITY: Float = 0.01;

pub const DEFAULT_MAX_DEPTH: u32 = 10;

/// Whitted transport: ambient and diffuse lighting plus mirror reflection and Snell
/// refraction, followed recursively up to `max_depth` bounces.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RayTraceIntegrator {
    pub max_depth: u32,
}

impl Default for RayTraceIntegrator {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl RayTraceIntegrator {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    pub fn radiance(&self, scene: &Scene, brdf: &Brdf, ray: &Ray3f) -> Color3 {
        self.trace(scene, brdf, ray, 1.0, 0)
    }

    fn trace(&self, scene: &Scene, brdf: &Brdf, ray: &Ray3f, energy: Float, depth: u32) -> Color3 {
        let hit = match scene.find_intersection(ray) {
            Some(hit) => hit,
            None => return scene.background(),
        };

        let mut color = diffuse_lighting(scene, brdf, &hit);
        if depth >= self.max_depth {
            return color;
        }

        let reflected = hit.reflection();
        let reflectance = brdf.reflectance(&reflected, &hit);
        if energy * reflectance >= MIN_INTENSITY {
            let next = Ray3f::new(hit.position(), reflected, None, None).in_medium(hit.outer_id());
            color += self.trace(scene, brdf, &next, energy * reflectance, depth + 1) * reflectance;
        }

        // Total internal reflection leaves only the mirror branch.
        if let Some(refracted) = hit.refraction() {
            let transmittance = brdf.transmittance(&refracted, &hit);
            if energy * transmittance >= MIN_INTENSITY {
                let next = Ray3f::new(hit.position(), refracted, None, None).in_medium(hit.inner_id());
                color += self.trace(scene, brdf, &next, energy * transmittance, depth + 1) * transmittance;
            }
        }

        color
    }
}
