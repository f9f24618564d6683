// Copyright @yucwang 2026

use crate::core::error::ConfigError;
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

// Largest |cos| accepted between the normal and the width axis.
const ORTHOGONALITY_TOLERANCE: Float = 1e-4;

/// Bounded planar quad, one-sided geometry hit from both sides.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    center: Vector3f,
    normal: Vector3f,
    width_axis: Vector3f,
    height_axis: Vector3f,
    width: Float,
    height: Float,
    corner: Vector3f,
}

impl Rectangle {
    pub fn new(center: Vector3f,
               normal: Vector3f,
               width_axis: Vector3f,
               width: Float,
               height: Float) -> Result<Self, ConfigError> {
        if normal.norm() <= 0.0 {
            return Err(ConfigError::DegenerateVector("rectangle.normal"));
        }
        if width_axis.norm() <= 0.0 {
            return Err(ConfigError::DegenerateVector("rectangle.width_axis"));
        }
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::DegenerateRectangle);
        }

        let normal = normal.normalize();
        let width_axis = width_axis.normalize();
        if normal.dot(&width_axis).abs() > ORTHOGONALITY_TOLERANCE {
            return Err(ConfigError::NonOrthogonalRectangle);
        }

        let height_axis = width_axis.cross(&normal).normalize();
        let corner = center - width_axis * (0.5 * width) - height_axis * (0.5 * height);

        Ok(Self { center, normal, width_axis, height_axis, width, height, corner })
    }

    /// The 1x1 square in the XZ plane, normal +Y, width along +X.
    pub fn unit() -> Self {
        let width_axis = Vector3f::new(1.0, 0.0, 0.0);
        let normal = Vector3f::new(0.0, 1.0, 0.0);
        let height_axis = width_axis.cross(&normal);
        Self {
            center: Vector3f::zeros(),
            normal,
            width_axis,
            height_axis,
            width: 1.0,
            height: 1.0,
            corner: -0.5 * width_axis - 0.5 * height_axis,
        }
    }

    pub fn intersection_parameter(&self, ray: &Ray3f) -> Option<Float> {
        let denom = ray.dir().dot(&self.normal);
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.center - ray.origin()).dot(&self.normal) / denom;
        if t < ray.min_t.max(EPSILON) || t > ray.max_t {
            return None;
        }

        self.uv_at(ray.at(t))?;
        Some(t)
    }

    pub fn normal_at(&self, _p: Vector3f) -> Vector3f {
        self.normal
    }

    /// `None` when the point projects outside the bounded extent.
    pub fn uv_at(&self, p: Vector3f) -> Option<Vector2f> {
        let relative = p - self.corner;
        let u = relative.dot(&self.width_axis) / self.width;
        let v = relative.dot(&self.height_axis) / self.height;
        if u < 0.0 || u > 1.0 || v < 0.0 || v > 1.0 {
            return None;
        }
        Some(Vector2f::new(u, v))
    }
}
