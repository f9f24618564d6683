// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Matrix4f, Point3f, Vector3f, FLOAT_MAX };
use super::ray::Ray3f;

// Scale factors below this make a transform non-invertible.
const MIN_SCALE: Float = 1e-8;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f,
    inv_matrix: Matrix4f
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Matrix4f::identity(),
               inv_matrix: Matrix4f::identity() }
    }
}

impl Transform {
    pub fn try_new(matrix: Matrix4f) -> Option<Self> {
        let inv_matrix = matrix.try_inverse()?;
        Some(Self { matrix, inv_matrix })
    }

    /// Builds `T * R * S`: scale first, then rotate by Euler angles in degrees
    /// (about X, then Y, then Z), then translate.
    pub fn from_trs(translation: Vector3f, rotation_deg: Vector3f, scale: Vector3f) -> Option<Self> {
        if scale.iter().any(|s| s.abs() < MIN_SCALE || !s.is_finite()) {
            return None;
        }

        let to_rad = |deg: Float| deg.to_radians();
        let rotation = Matrix4f::from_euler_angles(to_rad(rotation_deg.x),
                                                   to_rad(rotation_deg.y),
                                                   to_rad(rotation_deg.z));
        let translate = Matrix4f::new_translation(&translation);
        let scaling = Matrix4f::new_nonuniform_scaling(&scale);

        let inv_scale = Vector3f::new(1.0 / scale.x, 1.0 / scale.y, 1.0 / scale.z);
        let inv_matrix = Matrix4f::new_nonuniform_scaling(&inv_scale) *
            rotation.transpose() *
            Matrix4f::new_translation(&(-translation));

        Some(Self { matrix: translate * rotation * scaling, inv_matrix })
    }

    /// `self` applied after `child`, i.e. a parent frame wrapping a child frame.
    pub fn compose(&self, child: &Transform) -> Transform {
        Self { matrix: self.matrix * child.matrix,
               inv_matrix: child.inv_matrix * self.inv_matrix }
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        self.matrix.transform_point(&Point3f::from(p)).coords
    }

    pub fn apply_vector(&self, v: Vector3f) -> Vector3f {
        self.matrix.transform_vector(&v)
    }

    // Normal transformation is different from point transformation.
    // Before transformation, we have n^Tx = 0
    // After transformation, we have (Sn)^T(Mx) = 0
    // Then, we will get: S = (M^{-1})^T
    // The result is not normalized.
    pub fn apply_normal(&self, n: Vector3f) -> Vector3f {
        self.inv_matrix.transpose().transform_vector(&n)
    }

    /// The returned ray keeps its medium; its segment is rescaled so that the
    /// same points stay inside it.
    pub fn apply_ray(&self, ray: &Ray3f) -> Ray3f {
        map_ray(ray, self.apply_point(ray.origin()), self.apply_vector(ray.dir()))
    }

    pub fn inv_apply_point(&self, p: Vector3f) -> Vector3f {
        self.inv_matrix.transform_point(&Point3f::from(p)).coords
    }

    pub fn inv_apply_vector(&self, v: Vector3f) -> Vector3f {
        self.inv_matrix.transform_vector(&v)
    }

    pub fn inv_apply_ray(&self, ray: &Ray3f) -> Ray3f {
        map_ray(ray, self.inv_apply_point(ray.origin()), self.inv_apply_vector(ray.dir()))
    }
}

fn map_ray(ray: &Ray3f, origin: Vector3f, raw_dir: Vector3f) -> Ray3f {
    let stretch = raw_dir.norm();
    let max_t = if ray.max_t >= FLOAT_MAX { FLOAT_MAX } else { ray.max_t * stretch };
    Ray3f::new(origin, raw_dir, Some(ray.min_t * stretch), Some(max_t))
        .in_medium(ray.medium())
}
