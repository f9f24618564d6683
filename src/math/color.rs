// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

use std::ops;

fn clamp01(v: Float) -> Float {
    if v > 1.0 {
        1.0
    } else if v >= 0.0 {
        v
    } else {
        // also maps NaN to zero
        0.0
    }
}

/// RGB color whose channels never leave [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color3 {
    rgb: Vector3f
}

impl Default for Color3 {
    fn default() -> Self {
        Self::black()
    }
}

impl Color3 {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { rgb: Vector3f::new(clamp01(r), clamp01(g), clamp01(b)) }
    }

    pub fn black() -> Self {
        Self { rgb: Vector3f::zeros() }
    }

    pub fn white() -> Self {
        Self { rgb: Vector3f::new(1.0, 1.0, 1.0) }
    }

    pub fn from_vector(v: Vector3f) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn to_vector(&self) -> Vector3f {
        self.rgb
    }

    pub fn r(&self) -> Float {
        self.rgb.x
    }

    pub fn g(&self) -> Float {
        self.rgb.y
    }

    pub fn b(&self) -> Float {
        self.rgb.z
    }

    pub fn is_black(&self) -> bool {
        self.rgb.iter().all(|c| *c == 0.0)
    }

    pub fn luminance(&self) -> Float {
        0.2126 * self.rgb.x + 0.7152 * self.rgb.y + 0.0722 * self.rgb.z
    }

    /// Component-wise mean, black for an empty slice.
    pub fn average(colors: &[Color3]) -> Color3 {
        if colors.is_empty() {
            return Color3::black();
        }
        let sum = colors.iter().fold(Vector3f::zeros(), |acc, c| acc + c.rgb);
        Color3::from_vector(sum / colors.len() as Float)
    }
}

impl ops::Index<usize> for Color3 {
    type Output = Float;

    fn index(&self, index: usize) -> &Float {
        &self.rgb[index]
    }
}

impl ops::Add for Color3 {
    type Output = Color3;

    fn add(self, other: Color3) -> Color3 {
        Color3::from_vector(self.rgb + other.rgb)
    }
}

impl ops::AddAssign for Color3 {
    fn add_assign(&mut self, other: Color3) {
        *self = *self + other;
    }
}

impl ops::Mul<Float> for Color3 {
    type Output = Color3;

    fn mul(self, k: Float) -> Color3 {
        Color3::from_vector(self.rgb * k)
    }
}

impl ops::Mul<Color3> for Color3 {
    type Output = Color3;

    fn mul(self, other: Color3) -> Color3 {
        Color3::from_vector(self.rgb.component_mul(&other.rgb))
    }
}
