// Copyright @yucwang 2023

use crate::core::material::{Material, MaterialId, VOID_MATERIAL};
use crate::core::shape::{Solid, VOID_SOLID};
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;

/// A ray hit with both sides of the surface resolved.
///
/// The normal always faces the side the ray came from. `outer` is the
/// material the ray travelled through, `inner` the one on the far side:
/// leaving a closed solid puts the ray back into the void, crossing an open
/// surface from either side enters the surface material.
#[derive(Debug, Clone)]
pub struct Intersection<'a> {
    position: Vector3f,
    ray: Ray3f,
    t: Float,
    normal: Vector3f,
    inner_solid: &'a Solid,
    inner: &'a Material,
    outer: &'a Material,
    inner_id: MaterialId,
    outer_id: MaterialId,
    object_index: usize,
}

impl<'a> Intersection<'a> {
    pub fn new(ray: &Ray3f,
               t: Float,
               solid: &'a Solid,
               material: MaterialId,
               materials: &'a [Material],
               object_index: usize) -> Self {
        let position = ray.at(t);
        let mut normal = solid.normal_at(position);
        if normal.norm() > 0.0 {
            normal = normal.normalize();
        }

        let outer_id = ray.medium();
        let (inner_id, inner_solid) = if ray.dir().dot(&normal) > 0.0 {
            normal = -normal;
            if solid.is_closed() {
                (VOID_MATERIAL, &VOID_SOLID)
            } else {
                (material, solid)
            }
        } else {
            (material, solid)
        };

        Self {
            position,
            ray: *ray,
            t,
            normal,
            inner_solid,
            inner: &materials[inner_id],
            outer: &materials[outer_id],
            inner_id,
            outer_id,
            object_index,
        }
    }

    /// Re-expresses a hit found in a local frame in the frame `transform`
    /// maps into. Position, ray and distance follow the transform; the
    /// normal goes through the inverse transpose and is re-normalized.
    pub fn to_frame(&self, transform: &Transform) -> Self {
        let ray = transform.apply_ray(&self.ray);
        let position = transform.apply_point(self.position);
        let mut normal = transform.apply_normal(self.normal);
        if normal.norm() > 0.0 {
            normal = normal.normalize();
        }
        let t = (position - ray.origin()).norm();

        Self { position, ray, t, normal, ..self.clone() }
    }

    pub fn position(&self) -> Vector3f {
        self.position
    }

    pub fn ray(&self) -> &Ray3f {
        &self.ray
    }

    /// Hit parameter, equal to the distance from the ray origin.
    pub fn t(&self) -> Float {
        self.t
    }

    pub fn distance(&self) -> Float {
        self.t
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn inner_solid(&self) -> &'a Solid {
        self.inner_solid
    }

    pub fn inner(&self) -> &'a Material {
        self.inner
    }

    pub fn outer(&self) -> &'a Material {
        self.outer
    }

    pub fn inner_id(&self) -> MaterialId {
        self.inner_id
    }

    pub fn outer_id(&self) -> MaterialId {
        self.outer_id
    }

    pub fn object_index(&self) -> usize {
        self.object_index
    }

    /// Points back towards the ray origin.
    pub fn view_direction(&self) -> Vector3f {
        -self.ray.dir()
    }

    /// Mirror direction of the incoming ray.
    pub fn reflection(&self) -> Vector3f {
        let d = self.ray.dir();
        d - self.normal * (2.0 * d.dot(&self.normal))
    }

    /// Snell refraction from `outer` into `inner`, `None` on total internal
    /// reflection.
    pub fn refraction(&self) -> Option<Vector3f> {
        let d = self.ray.dir();
        let eta = self.outer.refractive_index / self.inner.refractive_index;
        let cos_i = -d.dot(&self.normal);
        let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
        if k <= 0.0 || !k.is_finite() {
            return None;
        }
        let dir = d * eta + self.normal * (eta * cos_i - k.sqrt());
        Some(dir.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::color::Color3;
    use crate::shapes::rectangle::Rectangle;
    use crate::shapes::sphere::Sphere;

    fn materials() -> Vec<Material> {
        vec![Material::void(),
             Material::new("glass", Color3::white()).with_transparency(0.9, 1.5)]
    }

    fn assert_vec_close(a: Vector3f, b: Vector3f) {
        assert!((a - b).norm() < 1e-4, "expected {:?} ≈ {:?}", a, b);
    }

    #[test]
    fn test_entering_closed_solid() {
        let table = materials();
        let solid = Solid::Sphere(Sphere::new(Vector3f::zeros(), 1.0));
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 5.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let t = solid.intersection_parameter(&ray).unwrap();
        let hit = Intersection::new(&ray, t, &solid, 1, &table, 0);

        assert_vec_close(hit.position(), Vector3f::new(0.0, 0.0, 1.0));
        assert_vec_close(hit.normal(), Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(hit.inner_id(), 1);
        assert_eq!(hit.outer_id(), VOID_MATERIAL);
        assert_eq!(hit.inner_solid(), &solid);
        assert!((hit.distance() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_leaving_closed_solid() {
        let table = materials();
        let solid = Solid::Sphere(Sphere::new(Vector3f::zeros(), 1.0));
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, 0.0, 0.0), None, None).in_medium(1);
        let t = solid.intersection_parameter(&ray).unwrap();
        let hit = Intersection::new(&ray, t, &solid, 1, &table, 0);

        assert_vec_close(hit.normal(), Vector3f::new(-1.0, 0.0, 0.0));
        assert_eq!(hit.inner_id(), VOID_MATERIAL);
        assert_eq!(hit.outer_id(), 1);
        assert!(hit.inner_solid().is_void());
    }

    #[test]
    fn test_open_surface_from_behind() {
        let table = materials();
        let solid = Solid::Rectangle(Rectangle::unit());
        let ray = Ray3f::new(Vector3f::new(0.0, -1.0, 0.0), Vector3f::new(0.0, 1.0, 0.0), None, None);
        let t = solid.intersection_parameter(&ray).unwrap();
        let hit = Intersection::new(&ray, t, &solid, 1, &table, 3);

        assert_vec_close(hit.normal(), Vector3f::new(0.0, -1.0, 0.0));
        assert_eq!(hit.inner_id(), 1);
        assert_eq!(hit.object_index(), 3);
    }

    #[test]
    fn test_reflection_and_view() {
        let table = materials();
        let solid = Solid::Rectangle(Rectangle::unit());
        let ray = Ray3f::new(Vector3f::new(-1.0, 1.0, 0.0), Vector3f::new(1.0, -1.0, 0.0), None, None);
        let t = solid.intersection_parameter(&ray).unwrap();
        let hit = Intersection::new(&ray, t, &solid, 1, &table, 0);

        assert_vec_close(hit.reflection(), Vector3f::new(1.0, 1.0, 0.0).normalize());
        assert_vec_close(hit.view_direction(), Vector3f::new(-1.0, 1.0, 0.0).normalize());
    }

    #[test]
    fn test_refraction_bends_towards_normal() {
        let table = materials();
        let solid = Solid::Rectangle(Rectangle::unit());
        let incoming = Vector3f::new(1.0, -1.0, 0.0).normalize();
        let ray = Ray3f::new(Vector3f::new(-0.2, 0.2, 0.0), incoming, None, None);
        let t = solid.intersection_parameter(&ray).unwrap();
        let hit = Intersection::new(&ray, t, &solid, 1, &table, 0);

        let refracted = hit.refraction().expect("no total internal reflection entering glass");
        let sin_i = incoming.x;
        let sin_t = refracted.x;
        assert!((sin_i / sin_t - 1.5).abs() < 1e-3);
        assert!(refracted.y < 0.0);
    }

    #[test]
    fn test_total_internal_reflection() {
        let table = materials();
        let solid = Solid::Sphere(Sphere::new(Vector3f::zeros(), 1.0));
        // Grazing exit from inside glass.
        let origin = Vector3f::new(0.0, 0.0, 0.95);
        let ray = Ray3f::new(origin, Vector3f::new(1.0, 0.0, 0.0), None, None).in_medium(1);
        let t = solid.intersection_parameter(&ray).unwrap();
        let hit = Intersection::new(&ray, t, &solid, 1, &table, 0);
        assert!(hit.refraction().is_none());
    }

    #[test]
    fn test_to_frame() {
        let table = materials();
        let transform = Transform::from_trs(Vector3f::new(0.0, 0.0, -10.0), Vector3f::zeros(),
                                            Vector3f::new(2.0, 1.0, 1.0)).unwrap();
        let solid = Solid::Sphere(Sphere::new(Vector3f::zeros(), 1.0));
        let world_ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let local_ray = transform.inv_apply_ray(&world_ray);
        let t = solid.intersection_parameter(&local_ray).unwrap();
        let world = Intersection::new(&local_ray, t, &solid, 1, &table, 0).to_frame(&transform);

        assert_vec_close(world.position(), Vector3f::new(0.0, 0.0, -9.0));
        assert_vec_close(world.normal(), Vector3f::new(0.0, 0.0, 1.0));
        assert!((world.distance() - 9.0).abs() < 1e-4);
        assert!((world.normal().norm() - 1.0).abs() < 1e-5);
    }
}
