// Copyright @yucwang 2023

use crate::core::error::ConfigError;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::shapes::rectangle::Rectangle;
use crate::shapes::sphere::Sphere;

/// Geometric primitive. `Void` never intersects and marks "no solid".
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Solid {
    Sphere(Sphere),
    Rectangle(Rectangle),
    Void,
}

pub static VOID_SOLID: Solid = Solid::Void;

/// Primitive types a hierarchy leaf can name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SolidKind {
    Sphere,
    Rectangle,
}

const SOLID_KINDS: [(&str, SolidKind); 3] = [
    ("sphere", SolidKind::Sphere),
    ("rectangle", SolidKind::Rectangle),
    ("quad", SolidKind::Rectangle),
];

impl SolidKind {
    pub fn from_tag(tag: &str) -> Result<Self, ConfigError> {
        SOLID_KINDS.iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ConfigError::UnknownPrimitive(tag.to_string()))
    }

    /// Object-space primitive placed by a hierarchy transform.
    pub fn canonical(&self) -> Solid {
        match self {
            SolidKind::Sphere => Solid::Sphere(Sphere::new(Vector3f::zeros(), 1.0)),
            SolidKind::Rectangle => Solid::Rectangle(Rectangle::unit()),
        }
    }
}

impl Solid {
    pub fn intersection_parameter(&self, ray: &Ray3f) -> Option<Float> {
        if !ray.exists() {
            return None;
        }
        match self {
            Solid::Sphere(sphere) => sphere.intersection_parameter(ray),
            Solid::Rectangle(rect) => rect.intersection_parameter(ray),
            Solid::Void => None,
        }
    }

    /// Geometric outward normal, unit length except for `Void` (zero).
    pub fn normal_at(&self, p: Vector3f) -> Vector3f {
        match self {
            Solid::Sphere(sphere) => sphere.normal_at(p),
            Solid::Rectangle(rect) => rect.normal_at(p),
            Solid::Void => Vector3f::zeros(),
        }
    }

    pub fn uv_at(&self, p: Vector3f) -> Option<Vector2f> {
        match self {
            Solid::Sphere(sphere) => Some(sphere.uv_at(p)),
            Solid::Rectangle(rect) => rect.uv_at(p),
            Solid::Void => None,
        }
    }

    /// Closed solids have an inside: leaving one puts the ray back in the void.
    pub fn is_closed(&self) -> bool {
        matches!(self, Solid::Sphere(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Solid::Void)
    }
}
