// Copyright @yucwang 2023

use crate::brdfs::microfacet::MicrofacetBrdf;
use crate::brdfs::phong::PhongBrdf;
use crate::core::emitter::Light;
use crate::core::error::ConfigError;
use crate::core::interaction::Intersection;
use crate::math::color::Color3;
use crate::math::constants::{Float, Vector3f};

/// Reflectance model. All terms shade with the material on the far side
/// of the hit (`Intersection::inner`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Brdf {
    Phong(PhongBrdf),
    Microfacet(MicrofacetBrdf),
}

impl Default for Brdf {
    fn default() -> Self {
        Brdf::Phong(PhongBrdf::new())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum BrdfKind {
    Phong,
    Microfacet,
}

const BRDF_KINDS: [(&str, BrdfKind); 2] = [
    ("phong", BrdfKind::Phong),
    ("microfacet", BrdfKind::Microfacet),
];

impl Brdf {
    /// The microfacet sub-term tags are ignored for `phong`.
    pub fn from_tags(kind: &str, fresnel: &str, distribution: &str, geometry: &str) -> Result<Self, ConfigError> {
        let kind = BRDF_KINDS.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(kind))
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ConfigError::UnknownTag { kind: "brdf", tag: kind.to_string() })?;

        match kind {
            BrdfKind::Phong => Ok(Brdf::Phong(PhongBrdf::new())),
            BrdfKind::Microfacet => Ok(Brdf::Microfacet(MicrofacetBrdf::from_tags(fresnel, distribution, geometry)?)),
        }
    }

    /// Fraction of light arriving along `light_dir` reflected towards the viewer.
    pub fn reflectance(&self, light_dir: &Vector3f, hit: &Intersection) -> Float {
        match self {
            Brdf::Phong(brdf) => brdf.reflectance(light_dir, hit),
            Brdf::Microfacet(brdf) => brdf.reflectance(light_dir, hit),
        }
    }

    /// Fraction of light arriving along `light_dir` through the surface.
    pub fn transmittance(&self, light_dir: &Vector3f, hit: &Intersection) -> Float {
        match self {
            Brdf::Phong(brdf) => brdf.transmittance(light_dir, hit),
            Brdf::Microfacet(brdf) => brdf.transmittance(light_dir, hit),
        }
    }

    /// Lambertian term, shared by every model.
    pub fn diffuse_color(&self, light: &Light, hit: &Intersection) -> Color3 {
        let light_dir = light.direction_from(hit.position());
        let cos_theta = light_dir.dot(&hit.normal()).max(0.0);
        let material = hit.inner();
        material.diffuse_color * light.color() * (light.intensity() * material.k_diffuse * cos_theta)
    }
}
