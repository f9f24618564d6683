// Copyright @yucwang 2026

use std::fmt;

/// Invalid scene setup, detected before any ray is cast.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonOrthogonalCameraBasis,
    DegenerateVector(&'static str),
    NonOrthogonalRectangle,
    DegenerateRectangle,
    DegenerateTransform,
    UnknownMaterial(String),
    DuplicateMaterial(String),
    UnknownPrimitive(String),
    UnknownTag { kind: &'static str, tag: String },
    InvalidParameter { name: &'static str, reason: String },
    CameraNotInitialized,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonOrthogonalCameraBasis =>
                write!(f, "camera forward and up vectors must be orthogonal"),
            ConfigError::DegenerateVector(name) =>
                write!(f, "vector `{}` must not be zero", name),
            ConfigError::NonOrthogonalRectangle =>
                write!(f, "rectangle normal and width axis must be orthogonal"),
            ConfigError::DegenerateRectangle =>
                write!(f, "rectangle needs a positive width and height"),
            ConfigError::DegenerateTransform =>
                write!(f, "transform is not invertible (zero scale?)"),
            ConfigError::UnknownMaterial(name) =>
                write!(f, "unknown material `{}`", name),
            ConfigError::DuplicateMaterial(name) =>
                write!(f, "material `{}` is defined twice", name),
            ConfigError::UnknownPrimitive(tag) =>
                write!(f, "unknown primitive type `{}`", tag),
            ConfigError::UnknownTag { kind, tag } =>
                write!(f, "unknown {} `{}`", kind, tag),
            ConfigError::InvalidParameter { name, reason } =>
                write!(f, "invalid parameter `{}`: {}", name, reason),
            ConfigError::CameraNotInitialized =>
                write!(f, "camera used before initialization"),
        }
    }
}

impl std::error::Error for ConfigError {}
