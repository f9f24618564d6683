// Copyright @yucwang 2026

use crate::core::error::ConfigError;
use crate::emitters::directional::DirectionalLight;
use crate::emitters::point::PointLight;
use crate::math::color::Color3;
use crate::math::constants::{Float, Vector3f};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
}

const LIGHT_KINDS: [(&str, LightKind); 2] = [
    ("point", LightKind::Point),
    ("directional", LightKind::Directional),
];

impl LightKind {
    pub fn from_tag(tag: &str) -> Result<Self, ConfigError> {
        LIGHT_KINDS.iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ConfigError::UnknownTag { kind: "light", tag: tag.to_string() })
    }
}

impl Light {
    /// Unit direction from `p` towards the light.
    pub fn direction_from(&self, p: Vector3f) -> Vector3f {
        match self {
            Light::Point(light) => light.direction_from(p),
            Light::Directional(light) => light.direction_from(p),
        }
    }

    /// `None` for lights at infinity.
    pub fn distance_from(&self, p: Vector3f) -> Option<Float> {
        match self {
            Light::Point(light) => Some(light.distance_from(p)),
            Light::Directional(_) => None,
        }
    }

    pub fn color(&self) -> Color3 {
        match self {
            Light::Point(light) => light.color,
            Light::Directional(light) => light.color,
        }
    }

    pub fn intensity(&self) -> Float {
        match self {
            Light::Point(light) => light.intensity,
            Light::Directional(light) => light.intensity,
        }
    }

    pub fn emitted(&self) -> Color3 {
        self.color() * self.intensity()
    }
}
