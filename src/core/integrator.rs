// Copyright @yucwang 2026

use crate::core::bsdf::Brdf;
use crate::core::error::ConfigError;
use crate::core::interaction::Intersection;
use crate::core::scene::Scene;
use crate::integrators::ray_cast::RayCastIntegrator;
use crate::integrators::ray_trace::RayTraceIntegrator;
use crate::math::color::Color3;
use crate::math::ray::{Ray3f, RayBatch};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Integrator {
    RayCast(RayCastIntegrator),
    RayTrace(RayTraceIntegrator),
}

impl Default for Integrator {
    fn default() -> Self {
        Integrator::RayTrace(RayTraceIntegrator::default())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum IntegratorKind {
    Cast,
    Trace,
}

const INTEGRATOR_KINDS: [(&str, IntegratorKind); 4] = [
    ("cast", IntegratorKind::Cast),
    ("ray_cast", IntegratorKind::Cast),
    ("trace", IntegratorKind::Trace),
    ("ray_trace", IntegratorKind::Trace),
];

impl Integrator {
    /// `max_depth` only applies to `trace`.
    pub fn from_tag(tag: &str, max_depth: u32) -> Result<Self, ConfigError> {
        let kind = INTEGRATOR_KINDS.iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ConfigError::UnknownTag { kind: "integrator", tag: tag.to_string() })?;

        Ok(match kind {
            IntegratorKind::Cast => Integrator::RayCast(RayCastIntegrator::new()),
            IntegratorKind::Trace => Integrator::RayTrace(RayTraceIntegrator::new(max_depth)),
        })
    }

    /// Color seen along one camera ray; misses resolve to the background.
    pub fn radiance(&self, scene: &Scene, brdf: &Brdf, ray: &Ray3f) -> Color3 {
        match self {
            Integrator::RayCast(integrator) => integrator.radiance(scene, brdf, ray),
            Integrator::RayTrace(integrator) => integrator.radiance(scene, brdf, ray),
        }
    }

    /// One color per existing ray of the batch.
    pub fn sample_colors(&self, scene: &Scene, brdf: &Brdf, batch: &RayBatch) -> Vec<Color3> {
        batch.rays.iter()
            .filter(|ray| ray.exists())
            .map(|ray| self.radiance(scene, brdf, ray))
            .collect()
    }

    pub fn pixel_color(&self, scene: &Scene, brdf: &Brdf, batch: &RayBatch) -> Color3 {
        Color3::average(&self.sample_colors(scene, brdf, batch))
    }
}

/// Ambient plus the diffuse term of every light with a free line of sight.
pub fn diffuse_lighting(scene: &Scene, brdf: &Brdf, hit: &Intersection) -> Color3 {
    let material = hit.inner();
    let mut color = scene.ambient() * material.diffuse_color * material.k_diffuse;

    for light in scene.lights() {
        if !scene.in_shade(light, hit) {
            color += brdf.diffuse_color(light, hit);
        }
    }
    color
}

/// Diffuse lighting plus the specular highlight of every unshadowed light.
pub fn direct_lighting(scene: &Scene, brdf: &Brdf, hit: &Intersection) -> Color3 {
    let mut color = diffuse_lighting(scene, brdf, hit);

    for light in scene.lights() {
        if scene.in_shade(light, hit) {
            continue;
        }
        let light_dir = light.direction_from(hit.position());
        color += light.emitted() * brdf.reflectance(&light_dir, hit);
    }
    color
}
