// Copyright @yucwang 2026

use crate::core::emitter::Light;
use crate::core::error::ConfigError;
use crate::core::hierarchy::HierarchyNode;
use crate::core::interaction::Intersection;
use crate::core::material::{Material, MaterialId};
use crate::core::shape::Solid;
use crate::math::color::Color3;
use crate::math::constants::SCENE_EPSILON;
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;
use crate::sensors::camera::Camera;

use log::{debug, info};
use std::collections::HashMap;

/// A world-space solid with its material referenced by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidInstance {
    pub solid: Solid,
    pub material: String,
}

impl SolidInstance {
    pub fn new(solid: Solid, material: &str) -> Self {
        Self { solid, material: material.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneGeometry {
    Flat(Vec<SolidInstance>),
    Hierarchy(HierarchyNode),
}

/// Everything a scene is made of, before names are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub background: Color3,
    pub ambient: Color3,
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub materials: Vec<Material>,
    pub geometry: SceneGeometry,
}

/// A solid bound to a material slot. Hierarchy objects live in their own
/// local frame and carry the transform to world space.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub solid: Solid,
    pub material: MaterialId,
    pub to_world: Option<Transform>,
}

pub struct Scene {
    objects: Vec<SceneObject>,
    materials: Vec<Material>,
    lights: Vec<Light>,
    camera: Camera,
    background: Color3,
    ambient: Color3,
}

impl Scene {
    /// Binds materials, flattens the hierarchy and initializes the camera.
    /// Fails on the first unresolved name or invalid parameter.
    pub fn new(description: SceneDescription) -> Result<Self, ConfigError> {
        let SceneDescription { background, ambient, mut camera, lights, materials: named, geometry } = description;

        let mut materials = vec![Material::void()];
        let mut material_ids: HashMap<String, MaterialId> = HashMap::new();
        for material in named {
            if material_ids.contains_key(&material.name) {
                return Err(ConfigError::DuplicateMaterial(material.name));
            }
            material_ids.insert(material.name.clone(), materials.len());
            materials.push(material);
        }

        let resolve = |name: &str| -> Result<MaterialId, ConfigError> {
            material_ids.get(name)
                .copied()
                .ok_or_else(|| ConfigError::UnknownMaterial(name.to_string()))
        };

        let objects = match geometry {
            SceneGeometry::Flat(instances) => {
                let mut objects = Vec::with_capacity(instances.len());
                for instance in instances {
                    objects.push(SceneObject { solid: instance.solid,
                                               material: resolve(&instance.material)?,
                                               to_world: None });
                }
                objects
            }
            SceneGeometry::Hierarchy(root) => {
                let mut objects = Vec::new();
                for leaf in root.flatten()? {
                    objects.push(SceneObject { solid: leaf.solid,
                                               material: resolve(&leaf.material)?,
                                               to_world: Some(leaf.to_world) });
                }
                objects
            }
        };
        for (index, object) in objects.iter().enumerate() {
            debug!("Object {}: {:?} with material `{}`", index, object.solid, materials[object.material].name);
        }

        camera.initialize()?;

        info!("Scene ready: {} objects, {} materials, {} lights",
              objects.len(), materials.len() - 1, lights.len());
        Ok(Self { objects, materials, lights, camera, background, ambient })
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id]
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Changing the camera drops its cached view; `prepare` rebuilds it.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn background(&self) -> Color3 {
        self.background
    }

    pub fn ambient(&self) -> Color3 {
        self.ambient
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Re-initializes the camera if a setter invalidated it.
    pub fn prepare(&mut self) -> Result<(), ConfigError> {
        if !self.camera.is_initialized() {
            self.camera.initialize()?;
        }
        Ok(())
    }

    /// Nearest hit strictly beyond `SCENE_EPSILON` inside the ray segment.
    pub fn find_intersection(&self, ray: &Ray3f) -> Option<Intersection<'_>> {
        let mut query = *ray;
        query.min_t = query.min_t.max(SCENE_EPSILON);

        let mut nearest = None;
        for (index, object) in self.objects.iter().enumerate() {
            if let Some(hit) = self.intersect_object(index, object, &query) {
                query.max_t = hit.t();
                nearest = Some(hit);
            }
        }
        nearest
    }

    /// Shadow query: any hit beyond `SCENE_EPSILON` inside the ray segment.
    pub fn intersects_with_scene(&self, ray: &Ray3f) -> bool {
        let mut query = *ray;
        query.min_t = query.min_t.max(SCENE_EPSILON);

        self.objects.iter().any(|object| match &object.to_world {
            None => object.solid.intersection_parameter(&query).is_some(),
            Some(to_world) => object.solid.intersection_parameter(&to_world.inv_apply_ray(&query)).is_some(),
        })
    }

    /// True when something blocks the segment from the hit point to `light`.
    pub fn in_shade(&self, light: &Light, hit: &Intersection) -> bool {
        let origin = hit.position();
        let shadow_ray = Ray3f::new(origin, light.direction_from(origin),
                                    Some(SCENE_EPSILON), light.distance_from(origin));
        shadow_ray.exists() && self.intersects_with_scene(&shadow_ray)
    }

    fn intersect_object<'a>(&'a self,
                            index: usize,
                            object: &'a SceneObject,
                            ray: &Ray3f) -> Option<Intersection<'a>> {
        match &object.to_world {
            None => {
                let t = object.solid.intersection_parameter(ray)?;
                Some(Intersection::new(ray, t, &object.solid, object.material, &self.materials, index))
            }
            Some(to_world) => {
                let local = to_world.inv_apply_ray(ray);
                let t = object.solid.intersection_parameter(&local)?;
                let hit = Intersection::new(&local, t, &object.solid, object.material, &self.materials, index)
                    .to_frame(to_world);
                if ray.test_segment(hit.t()) { Some(hit) } else { None }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hierarchy::NodeTransform;
    use crate::emitters::directional::DirectionalLight;
    use crate::emitters::point::PointLight;
    use crate::math::constants::Vector3f;
    use crate::shapes::rectangle::Rectangle;
    use crate::shapes::sphere::Sphere;

    fn camera() -> Camera {
        Camera::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), Vector3f::new(0.0, 1.0, 0.0))
            .with_resolution(4, 4)
    }

    fn description(geometry: SceneGeometry) -> SceneDescription {
        SceneDescription {
            background: Color3::new(0.1, 0.1, 0.1),
            ambient: Color3::black(),
            camera: camera(),
            lights: vec![Light::Point(PointLight::new(Vector3f::new(0.0, 10.0, -10.0), Color3::white(), 1.0))],
            materials: vec![Material::new("red", Color3::new(1.0, 0.0, 0.0)),
                            Material::new("blue", Color3::new(0.0, 0.0, 1.0))],
            geometry,
        }
    }

    fn sphere(center: Vector3f, radius: f32, material: &str) -> SolidInstance {
        SolidInstance::new(Solid::Sphere(Sphere::new(center, radius)), material)
    }

    fn forward_ray() -> Ray3f {
        Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None)
    }

    #[test]
    fn test_nearest_hit_wins() {
        let scene = Scene::new(description(SceneGeometry::Flat(vec![
            sphere(Vector3f::new(0.0, 0.0, -20.0), 2.0, "blue"),
            sphere(Vector3f::new(0.0, 0.0, -10.0), 2.0, "red"),
        ]))).unwrap();

        let hit = scene.find_intersection(&forward_ray()).expect("expected a hit");
        assert!((hit.t() - 8.0).abs() < 1e-4);
        assert_eq!(hit.object_index(), 1);
        assert_eq!(hit.inner().name, "red");
        assert_eq!(scene.material(hit.inner_id()).name, "red");
    }

    #[test]
    fn test_miss_returns_none() {
        let scene = Scene::new(description(SceneGeometry::Flat(vec![
            sphere(Vector3f::new(5.0, 0.0, -10.0), 1.0, "red"),
        ]))).unwrap();
        assert!(scene.find_intersection(&forward_ray()).is_none());
        assert!(!scene.intersects_with_scene(&forward_ray()));
    }

    #[test]
    fn test_shadow_with_and_without_occluder() {
        let floor = Rectangle::new(Vector3f::new(0.0, -1.0, -10.0), Vector3f::new(0.0, 1.0, 0.0),
                                   Vector3f::new(1.0, 0.0, 0.0), 20.0, 20.0).unwrap();
        let down = Ray3f::new(Vector3f::new(0.0, 5.0, -10.0), Vector3f::new(0.0, -1.0, 0.0), None, None);

        let open = Scene::new(description(SceneGeometry::Flat(vec![
            SolidInstance::new(Solid::Rectangle(floor), "red"),
        ]))).unwrap();
        let hit = open.find_intersection(&down).unwrap();
        assert!(!open.in_shade(&open.lights()[0], &hit));

        let blocked = Scene::new(description(SceneGeometry::Flat(vec![
            SolidInstance::new(Solid::Rectangle(floor), "red"),
            sphere(Vector3f::new(0.0, 3.0, -10.0), 1.0, "blue"),
        ]))).unwrap();
        let down = Ray3f::new(Vector3f::new(0.0, -0.5, -10.0), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let hit = blocked.find_intersection(&down).unwrap();
        assert!(blocked.in_shade(&blocked.lights()[0], &hit));
    }

    #[test]
    fn test_occluder_behind_light_does_not_shade() {
        let floor = Rectangle::new(Vector3f::new(0.0, -1.0, -10.0), Vector3f::new(0.0, 1.0, 0.0),
                                   Vector3f::new(1.0, 0.0, 0.0), 20.0, 20.0).unwrap();
        let scene = Scene::new(description(SceneGeometry::Flat(vec![
            SolidInstance::new(Solid::Rectangle(floor), "red"),
            sphere(Vector3f::new(0.0, 20.0, -10.0), 1.0, "blue"),
        ]))).unwrap();
        let down = Ray3f::new(Vector3f::new(0.0, 0.0, -10.0), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let hit = scene.find_intersection(&down).unwrap();
        assert!(!scene.in_shade(&scene.lights()[0], &hit));
    }

    #[test]
    fn test_directional_shadow_is_unbounded() {
        let floor = Rectangle::new(Vector3f::new(0.0, -1.0, -10.0), Vector3f::new(0.0, 1.0, 0.0),
                                   Vector3f::new(1.0, 0.0, 0.0), 20.0, 20.0).unwrap();
        let mut desc = description(SceneGeometry::Flat(vec![
            SolidInstance::new(Solid::Rectangle(floor), "red"),
            sphere(Vector3f::new(0.0, 20.0, -10.0), 1.0, "blue"),
        ]));
        desc.lights = vec![Light::Directional(DirectionalLight::new(Vector3f::new(0.0, -1.0, 0.0),
                                                                    Color3::white(), 1.0))];
        let scene = Scene::new(desc).unwrap();
        let down = Ray3f::new(Vector3f::new(0.0, 0.0, -10.0), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let hit = scene.find_intersection(&down).unwrap();
        assert!(scene.in_shade(&scene.lights()[0], &hit));

        // Off to the side the sphere no longer covers the sky.
        let aside = Ray3f::new(Vector3f::new(5.0, 0.0, -10.0), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let hit = scene.find_intersection(&aside).unwrap();
        assert!(!scene.in_shade(&scene.lights()[0], &hit));
    }

    #[test]
    fn test_hierarchy_objects_hit_in_world_space() {
        let root = HierarchyNode::Inner {
            transform: NodeTransform { translation: Vector3f::new(0.0, 0.0, -10.0), ..NodeTransform::default() },
            children: vec![HierarchyNode::Leaf {
                transform: NodeTransform { scale: Vector3f::new(2.0, 2.0, 2.0), ..NodeTransform::default() },
                primitive: String::from("sphere"),
                material: String::from("blue"),
            }],
        };
        let scene = Scene::new(description(SceneGeometry::Hierarchy(root))).unwrap();
        assert_eq!(scene.len(), 1);

        let hit = scene.find_intersection(&forward_ray()).expect("expected a hit");
        assert!((hit.t() - 8.0).abs() < 1e-3);
        assert!((hit.position() - Vector3f::new(0.0, 0.0, -8.0)).norm() < 1e-3);
        assert!((hit.normal() - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-4);
        assert!(scene.intersects_with_scene(&forward_ray()));

        let short = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, Some(7.0));
        assert!(scene.find_intersection(&short).is_none());
        assert!(!scene.intersects_with_scene(&short));
    }

    #[test]
    fn test_unresolved_names_fail() {
        let result = Scene::new(description(SceneGeometry::Flat(vec![
            sphere(Vector3f::zeros(), 1.0, "green"),
        ])));
        assert_eq!(result.err(), Some(ConfigError::UnknownMaterial(String::from("green"))));

        let root = HierarchyNode::Leaf { transform: NodeTransform::default(),
                                         primitive: String::from("teapot"),
                                         material: String::from("red") };
        let result = Scene::new(description(SceneGeometry::Hierarchy(root)));
        assert_eq!(result.err(), Some(ConfigError::UnknownPrimitive(String::from("teapot"))));
    }

    #[test]
    fn test_duplicate_material_fails() {
        let mut desc = description(SceneGeometry::Flat(Vec::new()));
        desc.materials.push(Material::new("red", Color3::white()));
        assert_eq!(Scene::new(desc).err(), Some(ConfigError::DuplicateMaterial(String::from("red"))));
    }

    #[test]
    fn test_camera_is_validated() {
        let mut desc = description(SceneGeometry::Flat(Vec::new()));
        desc.camera = Camera::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(Scene::new(desc).err(), Some(ConfigError::NonOrthogonalCameraBasis));
    }

    #[test]
    fn test_prepare_rebuilds_camera() {
        let mut scene = Scene::new(description(SceneGeometry::Flat(Vec::new()))).unwrap();
        scene.camera_mut().set_resolution(8, 2);
        assert!(!scene.camera().is_initialized());
        scene.prepare().unwrap();
        assert!(scene.camera().is_initialized());
        assert_eq!(scene.camera().width(), 8);
    }
}
