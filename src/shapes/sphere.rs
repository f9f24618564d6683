// Copyright @yucwang 2026

use crate::math::constants::{EPSILON, Float, PI, Vector2f, Vector3f};
use crate::math::quadratic;
use crate::math::ray::Ray3f;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    /// Nearest root inside the ray segment (never closer than `EPSILON`).
    pub fn intersection_parameter(&self, ray: &Ray3f) -> Option<Float> {
        let oc = ray.origin() - self.center;
        let dir = ray.dir();
        let (t0, t1) = quadratic::solve(dir.dot(&dir),
                                        2.0 * oc.dot(&dir),
                                        oc.dot(&oc) - self.radius * self.radius)?;

        let min_t = ray.min_t.max(EPSILON);
        if t0 >= min_t && t0 <= ray.max_t {
            Some(t0)
        } else if t1 >= min_t && t1 <= ray.max_t {
            Some(t1)
        } else {
            None
        }
    }

    pub fn normal_at(&self, p: Vector3f) -> Vector3f {
        let n = p - self.center;
        if n.norm() > 0.0 { n.normalize() } else { n }
    }

    /// Longitude/latitude parameterization, v = 0 at the +Y pole.
    pub fn uv_at(&self, p: Vector3f) -> Vector2f {
        let n = self.normal_at(p);
        let u = 0.5 + n.z.atan2(n.x) / (2.0 * PI);
        let v = 0.5 - n.y.max(-1.0).min(1.0).asin() / PI;
        Vector2f::new(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_from_outside_is_near_root() {
        let sphere = Sphere::new(Vector3f::new(0.0, 0.0, -10.0), 2.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let t = sphere.intersection_parameter(&ray).expect("expected a hit");
        assert!((t - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_offset_ray_misses() {
        let sphere = Sphere::new(Vector3f::new(0.0, 0.0, -10.0), 2.0);
        let ray = Ray3f::new(Vector3f::new(2.5, 0.0, 0.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(sphere.intersection_parameter(&ray).is_none());
    }

    #[test]
    fn test_hit_from_inside_is_far_root() {
        let sphere = Sphere::new(Vector3f::zeros(), 1.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None);
        let t = sphere.intersection_parameter(&ray).expect("expected a hit");
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let sphere = Sphere::new(Vector3f::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(sphere.intersection_parameter(&ray).is_none());
    }

    #[test]
    fn test_segment_limits_hits() {
        let sphere = Sphere::new(Vector3f::new(0.0, 0.0, -10.0), 2.0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, Some(5.0));
        assert!(sphere.intersection_parameter(&ray).is_none());
    }

    #[test]
    fn test_normal_and_uv() {
        let sphere = Sphere::new(Vector3f::new(1.0, 0.0, 0.0), 2.0);
        let n = sphere.normal_at(Vector3f::new(1.0, 2.0, 0.0));
        assert!((n - Vector3f::new(0.0, 1.0, 0.0)).norm() < 1e-6);

        let uv = sphere.uv_at(Vector3f::new(3.0, 0.0, 0.0));
        assert!((uv.x - 0.5).abs() < 1e-6);
        assert!((uv.y - 0.5).abs() < 1e-6);
    }
}
