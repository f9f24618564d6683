// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f, FLOAT_MAX};
use crate::core::material::{MaterialId, VOID_MATERIAL};

// Directions shorter than this are treated as degenerate.
const MIN_DIRECTION_NORM: Float = 1e-12;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    medium: MaterialId,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        let norm = d.norm();
        let dir = if norm > MIN_DIRECTION_NORM && norm.is_finite() {
            d / norm
        } else {
            Vector3f::zeros()
        };
        Self { origin: o, dir,
               medium: VOID_MATERIAL,
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(FLOAT_MAX)}
    }

    /// Moves the ray into the material it travels through.
    pub fn in_medium(mut self, medium: MaterialId) -> Self {
        self.medium = medium;
        self
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn medium(&self) -> MaterialId {
        self.medium
    }

    /// False when the direction collapsed to zero at construction.
    pub fn exists(&self) -> bool {
        self.dir != Vector3f::zeros()
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

/// The sample rays of one pixel. A batch without rays is a null batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RayBatch {
    pub rays: Vec<Ray3f>,
    pub pixel_x: usize,
    pub pixel_y: usize,
}

impl RayBatch {
    pub fn new(rays: Vec<Ray3f>, pixel_x: usize, pixel_y: usize) -> Self {
        Self { rays, pixel_x, pixel_y }
    }

    pub fn is_null(&self) -> bool {
        self.rays.is_empty()
    }
}

/* Tests for Ray */
