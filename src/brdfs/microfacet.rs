// Copyright @yucwang 2026

use crate::core::error::ConfigError;
use crate::core::interaction::Intersection;
use crate::math::constants::{Float, Vector3f, PI};

// Smallest roughness the distribution terms see.
const MIN_ALPHA: Float = 1e-4;

fn clamp01(v: Float) -> Float {
    if !v.is_finite() || v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

pub fn fresnel_schlick(cos_theta: Float, n1: Float, n2: Float) -> Float {
    let r0 = ((n2 - n1) / (n2 + n1)).powi(2);
    let c = 1.0 - cos_theta.abs().min(1.0);
    r0 + (1.0 - r0) * c.powi(5)
}

/// Normalized Blinn-Phong lobe with the exponent matched to `alpha`.
pub fn blinn_phong_d(cos_theta: Float, alpha: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(MIN_ALPHA);
    let exponent = (2.0 / (a * a) - 2.0).max(0.0);
    (exponent + 2.0) / (2.0 * PI) * cos_theta.powf(exponent)
}

pub fn ggx_d(cos_theta: Float, alpha: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(MIN_ALPHA);
    let a2 = a * a;
    let cos2 = cos_theta * cos_theta;
    let denom = cos2 * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom)
}

pub fn beckmann_d(cos_theta: Float, alpha: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(MIN_ALPHA);
    let a2 = a * a;
    let cos2 = cos_theta * cos_theta;
    let tan2 = (1.0 - cos2).max(0.0) / cos2;
    (-tan2 / a2).exp() / (PI * a2 * cos2 * cos2)
}

pub fn ggx_g1(cos_theta: Float, alpha: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(MIN_ALPHA);
    let cos2 = cos_theta * cos_theta;
    let sin2 = (1.0 - cos2).max(0.0);
    if sin2 <= 0.0 {
        return 1.0;
    }
    let tan2 = sin2 / cos2.max(1e-6);
    let root = (1.0 + a * a * tan2).sqrt();
    2.0 / (1.0 + root)
}

/// Rational fit of the Smith term for the Beckmann distribution.
pub fn beckmann_g1(cos_theta: Float, alpha: Float) -> Float {
    if cos_theta <= 0.0 {
        return 0.0;
    }
    let a = alpha.max(MIN_ALPHA);
    let cos2 = cos_theta * cos_theta;
    let tan = ((1.0 - cos2).max(0.0) / cos2).sqrt();
    if tan <= 0.0 {
        return 1.0;
    }
    let param = 1.0 / (a * tan);
    if param >= 1.6 {
        return 1.0;
    }
    let param2 = param * param;
    (3.535 * param + 2.181 * param2) / (1.0 + 2.276 * param + 2.577 * param2)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FresnelTerm {
    Schlick,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DistributionTerm {
    BlinnPhong,
    TrowbridgeReitz,
    Beckmann,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryTerm {
    Beckmann,
    Ggx,
}

const FRESNEL_TERMS: [(&str, FresnelTerm); 2] = [
    ("schlick", FresnelTerm::Schlick),
    ("schlicks", FresnelTerm::Schlick),
];

const DISTRIBUTION_TERMS: [(&str, DistributionTerm); 5] = [
    ("blinn_phong", DistributionTerm::BlinnPhong),
    ("blinnphong", DistributionTerm::BlinnPhong),
    ("trowbridge_reitz", DistributionTerm::TrowbridgeReitz),
    ("ggx", DistributionTerm::TrowbridgeReitz),
    ("beckmann", DistributionTerm::Beckmann),
];

const GEOMETRY_TERMS: [(&str, GeometryTerm); 2] = [
    ("beckmann", GeometryTerm::Beckmann),
    ("ggx", GeometryTerm::Ggx),
];

// Tags are matched case-insensitively, so `TrowbridgeReitz` style names work too.
fn lookup<T: Copy>(table: &[(&str, T)], kind: &'static str, tag: &str) -> Result<T, ConfigError> {
    let key = tag.to_ascii_lowercase();
    let key_no_underscore = key.replace('_', "");
    table.iter()
        .find(|(name, _)| *name == key || name.replace('_', "") == key_no_underscore)
        .map(|(_, term)| *term)
        .ok_or_else(|| ConfigError::UnknownTag { kind, tag: tag.to_string() })
}

impl FresnelTerm {
    pub fn from_tag(tag: &str) -> Result<Self, ConfigError> {
        lookup(&FRESNEL_TERMS, "fresnel term", tag)
    }

    fn eval(&self, cos_theta: Float, n1: Float, n2: Float) -> Float {
        match self {
            FresnelTerm::Schlick => fresnel_schlick(cos_theta, n1, n2),
        }
    }
}

impl DistributionTerm {
    pub fn from_tag(tag: &str) -> Result<Self, ConfigError> {
        lookup(&DISTRIBUTION_TERMS, "distribution term", tag)
    }

    fn eval(&self, cos_theta_h: Float, alpha: Float) -> Float {
        match self {
            DistributionTerm::BlinnPhong => blinn_phong_d(cos_theta_h, alpha),
            DistributionTerm::TrowbridgeReitz => ggx_d(cos_theta_h, alpha),
            DistributionTerm::Beckmann => beckmann_d(cos_theta_h, alpha),
        }
    }
}

impl GeometryTerm {
    pub fn from_tag(tag: &str) -> Result<Self, ConfigError> {
        lookup(&GEOMETRY_TERMS, "geometry term", tag)
    }

    // One-sided masking for direction `x`; zero unless `x` sees the
    // microfacet from the same side as the macro surface.
    fn g1(&self, x: &Vector3f, h: &Vector3f, n: &Vector3f, alpha: Float) -> Float {
        let x_n = x.dot(n);
        if x_n == 0.0 || x.dot(h) / x_n <= 0.0 {
            return 0.0;
        }
        match self {
            GeometryTerm::Beckmann => beckmann_g1(x_n.abs(), alpha),
            GeometryTerm::Ggx => ggx_g1(x_n.abs(), alpha),
        }
    }

    fn eval(&self, l: &Vector3f, v: &Vector3f, h: &Vector3f, n: &Vector3f, alpha: Float) -> Float {
        self.g1(l, h, n, alpha) * self.g1(v, h, n, alpha)
    }
}

/// Torrance-Sparrow reflection and Walter et al. transmission.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MicrofacetBrdf {
    pub fresnel: FresnelTerm,
    pub distribution: DistributionTerm,
    pub geometry: GeometryTerm,
}

impl Default for MicrofacetBrdf {
    fn default() -> Self {
        Self {
            fresnel: FresnelTerm::Schlick,
            distribution: DistributionTerm::TrowbridgeReitz,
            geometry: GeometryTerm::Ggx,
        }
    }
}

impl MicrofacetBrdf {
    pub fn new(fresnel: FresnelTerm, distribution: DistributionTerm, geometry: GeometryTerm) -> Self {
        Self { fresnel, distribution, geometry }
    }

    pub fn from_tags(fresnel: &str, distribution: &str, geometry: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(FresnelTerm::from_tag(fresnel)?,
                     DistributionTerm::from_tag(distribution)?,
                     GeometryTerm::from_tag(geometry)?))
    }

    pub fn reflectance(&self, light_dir: &Vector3f, hit: &Intersection) -> Float {
        let n = hit.normal();
        let v = hit.view_direction();
        let l = *light_dir;
        let n_l = n.dot(&l);
        let n_v = n.dot(&v);
        if n_l < 0.0 || n_v < 0.0 {
            return 0.0;
        }

        let sum = v + l;
        if sum.norm() <= 0.0 {
            return 0.0;
        }
        let h = sum.normalize();
        let alpha = hit.inner().roughness();

        let f = self.fresnel.eval(l.dot(&h), hit.outer().refractive_index, hit.inner().refractive_index);
        let d = self.distribution.eval(n.dot(&h), alpha);
        let g = self.geometry.eval(&l, &v, &h, &n, alpha);

        clamp01(f * d * g / (4.0 * n_l * n_v))
    }

    pub fn transmittance(&self, light_dir: &Vector3f, hit: &Intersection) -> Float {
        let n = hit.normal();
        let v = hit.view_direction();
        let l = *light_dir;
        let n1 = hit.outer().refractive_index;
        let n2 = hit.inner().refractive_index;

        let raw_h = -(v * n1 + l * n2);
        if raw_h.norm() <= 0.0 {
            return 0.0;
        }
        // Orient the half vector to the incident side of the surface.
        let mut h = raw_h.normalize();
        if h.dot(&n) < 0.0 {
            h = -h;
        }
        let alpha = hit.inner().roughness();

        let n_l = n.dot(&l);
        let n_v = n.dot(&v);
        let v_h = v.dot(&h);
        let l_h = l.dot(&h);

        let f = self.fresnel.eval(l_h, n1, n2);
        let d = self.distribution.eval(n.dot(&h), alpha);
        let g = self.geometry.eval(&l, &v, &h, &n, alpha);

        let cosines = (l_h * v_h).abs() / (n_l * n_v).abs();
        let denom = n1 * v_h + n2 * l_h;
        clamp01(cosines * n2 * n2 * (1.0 - f) * d * g / (denom * denom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::material::Material;
    use crate::core::shape::Solid;
    use crate::math::color::Color3;
    use crate::math::ray::Ray3f;
    use crate::shapes::rectangle::Rectangle;

    fn hit_at<'a>(materials: &'a [Material], solid: &'a Solid, origin: Vector3f, dir: Vector3f) -> Intersection<'a> {
        let ray = Ray3f::new(origin, dir, None, None);
        let t = solid.intersection_parameter(&ray).unwrap();
        Intersection::new(&ray, t, solid, 1, materials, 0)
    }

    #[test]
    fn test_tag_tables() {
        assert_eq!(DistributionTerm::from_tag("ggx"), Ok(DistributionTerm::TrowbridgeReitz));
        assert_eq!(DistributionTerm::from_tag("TrowbridgeReitz"), Ok(DistributionTerm::TrowbridgeReitz));
        assert_eq!(DistributionTerm::from_tag("BlinnPhong"), Ok(DistributionTerm::BlinnPhong));
        assert_eq!(FresnelTerm::from_tag("Schlicks"), Ok(FresnelTerm::Schlick));
        assert_eq!(GeometryTerm::from_tag("GGX"), Ok(GeometryTerm::Ggx));
        assert_eq!(MicrofacetBrdf::from_tags("schlick", "phong", "ggx"),
                   Err(ConfigError::UnknownTag { kind: "distribution term", tag: String::from("phong") }));
    }

    #[test]
    fn test_distributions_vanish_below_surface() {
        for term in [DistributionTerm::BlinnPhong, DistributionTerm::TrowbridgeReitz, DistributionTerm::Beckmann].iter() {
            assert_eq!(term.eval(0.0, 0.5), 0.0);
            assert_eq!(term.eval(-0.3, 0.5), 0.0);
            assert!(term.eval(1.0, 0.5) > 0.0);
        }
    }

    #[test]
    fn test_distributions_integrate_to_one() {
        // Projected-area normalization: integral of D(h) cos(h) over the hemisphere.
        let steps = 4000;
        for term in [DistributionTerm::BlinnPhong, DistributionTerm::TrowbridgeReitz, DistributionTerm::Beckmann].iter() {
            let mut sum = 0.0;
            for i in 0..steps {
                let theta = (i as Float + 0.5) / steps as Float * 0.5 * PI;
                let c = theta.cos();
                sum += term.eval(c, 0.5) * c * theta.sin() * (0.5 * PI / steps as Float) * 2.0 * PI;
            }
            assert!((sum - 1.0).abs() < 2e-2, "{:?} integrates to {}", term, sum);
        }
    }

    #[test]
    fn test_geometry_terms_in_unit_range() {
        for alpha in [0.05, 0.3, 0.9].iter() {
            for i in 1..10 {
                let c = i as Float / 10.0;
                for g in [beckmann_g1(c, *alpha), ggx_g1(c, *alpha)].iter() {
                    assert!(*g >= 0.0 && *g <= 1.0 + 1e-4, "g1({}, {}) = {}", c, alpha, g);
                }
            }
        }
        assert_eq!(beckmann_g1(1.0, 0.5), 1.0);
    }

    #[test]
    fn test_fresnel_schlick() {
        assert!((fresnel_schlick(1.0, 1.0, 1.5) - 0.04).abs() < 1e-6);
        assert!((fresnel_schlick(0.0, 1.0, 1.5) - 1.0).abs() < 1e-6);
        assert_eq!(fresnel_schlick(1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_reflectance_is_clamped_and_zero_below() {
        let materials = vec![Material::void(),
                             Material::new("metal", Color3::white()).with_specular(0.8, 1.0).with_transparency(0.0, 1.5)];
        let solid = Solid::Rectangle(Rectangle::unit());
        let hit = hit_at(&materials, &solid, Vector3f::new(-1.0, 1.0, 0.0), Vector3f::new(1.0, -1.0, 0.0));

        let brdf = MicrofacetBrdf::default();
        let mirror = brdf.reflectance(&hit.reflection(), &hit);
        assert!(mirror > 0.0 && mirror <= 1.0);
        assert_eq!(brdf.reflectance(&Vector3f::new(0.0, -1.0, 0.0), &hit), 0.0);

        let rough = MicrofacetBrdf::from_tags("schlick", "beckmann", "beckmann").unwrap();
        let value = rough.reflectance(&Vector3f::new(0.3, 1.0, 0.2).normalize(), &hit);
        assert!(value >= 0.0 && value <= 1.0);
    }

    #[test]
    fn test_transmittance_in_unit_range() {
        let materials = vec![Material::void(),
                             Material::new("glass", Color3::white()).with_specular(0.5, 1.0).with_transparency(0.9, 1.5)];
        let solid = Solid::Rectangle(Rectangle::unit());
        let hit = hit_at(&materials, &solid, Vector3f::new(-0.2, 0.2, 0.0), Vector3f::new(1.0, -1.0, 0.0));
        let refracted = hit.refraction().unwrap();

        for brdf in [MicrofacetBrdf::default(),
                     MicrofacetBrdf::from_tags("schlick", "blinn_phong", "beckmann").unwrap()].iter() {
            let value = brdf.transmittance(&refracted, &hit);
            assert!(value > 0.0 && value <= 1.0, "{:?}: {}", brdf, value);
            // Light on the viewer's side does not transmit.
            assert!(brdf.transmittance(&hit.reflection(), &hit) >= 0.0);
        }
    }
}
