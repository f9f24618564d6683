/* Copyright 2020 @Yuchen Wong */

pub type Float = f32;

pub type Vector2f = nalgebra::Vector2<Float>;
pub type Vector3f = nalgebra::Vector3<Float>;
pub type Point3f = nalgebra::Point3<Float>;
pub type Matrix4f = nalgebra::Matrix4<Float>;

// Hit parameters closer than this are rejected by the primitives themselves.
pub const EPSILON: Float = 1e-4;
// Scene level self-intersection guard for secondary and shadow rays.
pub const SCENE_EPSILON: Float = 1e-3;
pub const PI: Float = std::f32::consts::PI;
pub const FLOAT_MAX: Float = std::f32::MAX;
