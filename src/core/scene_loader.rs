// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::bsdf::Brdf;
use crate::core::emitter::{Light, LightKind};
use crate::core::error::ConfigError;
use crate::core::hierarchy::{HierarchyNode, NodeTransform};
use crate::core::integrator::Integrator;
use crate::core::material::Material;
use crate::core::sampler::Sampler;
use crate::core::scene::{Scene, SceneDescription, SceneGeometry, SolidInstance};
use crate::core::shape::{Solid, SolidKind};
use crate::emitters::directional::DirectionalLight;
use crate::emitters::point::PointLight;
use crate::integrators::ray_trace::DEFAULT_MAX_DEPTH;
use crate::math::color::Color3;
use crate::math::constants::{Float, Vector3f};
use crate::sensors::camera::Camera;
use crate::shapes::rectangle::Rectangle;
use crate::shapes::sphere::Sphere;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
    Config(ConfigError),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

impl From<ConfigError> for SceneLoadError {
    fn from(err: ConfigError) -> Self {
        SceneLoadError::Config(err)
    }
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneLoadError::Io(err) => write!(f, "cannot read scene: {}", err),
            SceneLoadError::Parse(msg) => write!(f, "malformed scene: {}", msg),
            SceneLoadError::MissingField(field) => write!(f, "scene is missing `{}`", field),
            SceneLoadError::Config(err) => write!(f, "invalid scene: {}", err),
        }
    }
}

impl std::error::Error for SceneLoadError {}

pub struct SceneLoadResult {
    pub scene: Scene,
    pub integrator: Integrator,
    pub brdf: Brdf,
    pub author: Option<String>,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneLoadError> {
    let result = load_scene_with_settings(path)?;
    Ok(result.scene)
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    let path = path.as_ref();
    info!("Loading scene {}", path.display());
    let xml = fs::read_to_string(path)?;
    parse_scene(&xml)
}

pub fn parse_scene(xml: &str) -> Result<SceneLoadResult, SceneLoadError> {
    let root = parse_tree(xml)?;
    if root.name != "scene" {
        return Err(SceneLoadError::Parse(format!("root element is <{}>, expected <scene>", root.name)));
    }

    let integrator = match root.child("integrator") {
        Some(el) => {
            let tag = el.attr("type").unwrap_or("trace");
            let max_depth = el.integer("max_depth")?.unwrap_or(DEFAULT_MAX_DEPTH as usize) as u32;
            Integrator::from_tag(tag, max_depth)?
        }
        None => Integrator::default(),
    };

    let brdf = match root.child("brdf") {
        Some(el) => Brdf::from_tags(el.attr("type").unwrap_or("phong"),
                                    el.string("fresnel").unwrap_or("schlick"),
                                    el.string("distribution").unwrap_or("ggx"),
                                    el.string("geometry").unwrap_or("ggx"))?,
        None => Brdf::default(),
    };

    let sensor = require(root.child("sensor"), "sensor")?;
    let camera = parse_camera(sensor)?;

    let materials = root.children_named("material")
        .map(parse_material)
        .collect::<Result<Vec<_>, _>>()?;
    let lights = root.children_named("emitter")
        .map(parse_light)
        .collect::<Result<Vec<_>, _>>()?;

    let shapes = root.children_named("shape")
        .map(parse_shape)
        .collect::<Result<Vec<_>, _>>()?;
    let mut nodes = root.children_named("node")
        .map(parse_node)
        .collect::<Result<Vec<_>, _>>()?;
    let geometry = match (shapes.is_empty(), nodes.len()) {
        (_, 0) => SceneGeometry::Flat(shapes),
        (true, 1) => SceneGeometry::Hierarchy(nodes.remove(0)),
        (true, _) => SceneGeometry::Hierarchy(HierarchyNode::Inner { transform: NodeTransform::default(),
                                                                     children: nodes }),
        (false, _) => return Err(SceneLoadError::Parse(
            String::from("a scene holds either <shape> elements or a <node> hierarchy, not both"))),
    };

    let description = SceneDescription {
        background: root.rgb("background")?.unwrap_or_else(Color3::black),
        ambient: root.rgb("ambient")?.unwrap_or_else(Color3::black),
        camera,
        lights,
        materials,
        geometry,
    };

    let scene = Scene::new(description)?;
    Ok(SceneLoadResult { scene, integrator, brdf, author: root.attr("author").map(str::to_string) })
}

fn parse_camera(sensor: &Element) -> Result<Camera, SceneLoadError> {
    if let Some(tag) = sensor.attr("type") {
        if tag != "perspective" {
            return Err(ConfigError::UnknownTag { kind: "sensor", tag: tag.to_string() }.into());
        }
    }

    let mut camera = Camera::new(sensor.vec3("position")?.unwrap_or_else(Vector3f::zeros),
                                 require(sensor.vec3("forward")?, "sensor.forward")?,
                                 require(sensor.vec3("up")?, "sensor.up")?);
    if let Some(fov) = sensor.float("fov")? {
        camera = camera.with_fov(fov);
    }
    if let Some(distance) = sensor.float("screen_distance")? {
        camera = camera.with_screen_distance(distance);
    }
    if let Some(sampler) = sensor.child("sampler") {
        camera = camera.with_sampler(Sampler::from_tag(sampler.attr("type").unwrap_or("uniform"))?)
            .with_samples(sampler.integer("sample_count")?.unwrap_or(1))
            .with_seed(sampler.integer("seed")?.unwrap_or(0) as u64);
    }
    if let Some(film) = sensor.child("film") {
        camera = camera.with_resolution(film.integer("width")?.unwrap_or(640),
                                        film.integer("height")?.unwrap_or(480));
    }
    Ok(camera)
}

fn parse_material(el: &Element) -> Result<Material, SceneLoadError> {
    let name = require(el.attr("id"), "material.id")?;
    let mut material = Material::new(name, el.rgb("diffuse_color")?.unwrap_or_else(Color3::white));
    if let Some(k) = el.float("k_diffuse")? {
        material.k_diffuse = k;
    }
    if let Some(k) = el.float("k_specular")? {
        material.k_specular = k;
    }
    if let Some(k) = el.float("k_transparent")? {
        material.k_transparent = k;
    }
    if let Some(shininess) = el.float("shininess")? {
        material.shininess = shininess;
    }
    if let Some(ior) = el.float("refractive_index")? {
        material.refractive_index = ior;
    }
    debug!("Material `{}`: {:?}", material.name, material);
    Ok(material)
}

fn parse_light(el: &Element) -> Result<Light, SceneLoadError> {
    let kind = LightKind::from_tag(require(el.attr("type"), "emitter.type")?)?;
    let color = el.rgb("color")?.unwrap_or_else(Color3::white);
    let intensity = el.float("intensity")?.unwrap_or(1.0);
    Ok(match kind {
        LightKind::Point => Light::Point(PointLight::new(require(el.vec3("position")?, "emitter.position")?,
                                                         color, intensity)),
        LightKind::Directional => Light::Directional(DirectionalLight::new(
            require(el.vec3("direction")?, "emitter.direction")?, color, intensity)),
    })
}

fn parse_shape(el: &Element) -> Result<SolidInstance, SceneLoadError> {
    let tag = require(el.attr("type"), "shape.type")?;
    let solid = match SolidKind::from_tag(tag)? {
        SolidKind::Sphere => Solid::Sphere(Sphere::new(el.vec3("center")?.unwrap_or_else(Vector3f::zeros),
                                                       require(el.float("radius")?, "shape.radius")?)),
        SolidKind::Rectangle => Solid::Rectangle(Rectangle::new(
            el.vec3("center")?.unwrap_or_else(Vector3f::zeros),
            require(el.vec3("normal")?, "shape.normal")?,
            require(el.vec3("width_axis")?, "shape.width_axis")?,
            require(el.float("width")?, "shape.width")?,
            require(el.float("height")?, "shape.height")?)?),
    };
    Ok(SolidInstance::new(solid, material_ref(el, "shape.ref")?))
}

fn parse_node(el: &Element) -> Result<HierarchyNode, SceneLoadError> {
    let transform = parse_transform(el.child("transform"))?;
    let mut children = Vec::new();
    for child in el.children.iter() {
        match child.name.as_str() {
            "node" => children.push(parse_node(child)?),
            "solid" => children.push(HierarchyNode::Leaf {
                transform: parse_transform(child.child("transform"))?,
                primitive: require(child.attr("type"), "solid.type")?.to_string(),
                material: material_ref(child, "solid.ref")?.to_string(),
            }),
            _ => {}
        }
    }
    Ok(HierarchyNode::Inner { transform, children })
}

fn parse_transform(el: Option<&Element>) -> Result<NodeTransform, SceneLoadError> {
    let mut transform = NodeTransform::default();
    let el = match el {
        Some(el) => el,
        None => return Ok(transform),
    };
    for step in el.children.iter() {
        match step.name.as_str() {
            "translate" => transform.translation += step.xyz(0.0)?,
            "rotate" => transform.rotation += step.xyz(0.0)?,
            "scale" => {
                let factor = match step.attr("value") {
                    Some(value) => {
                        let s = parse_float(value)?;
                        Vector3f::new(s, s, s)
                    }
                    None => step.xyz(1.0)?,
                };
                transform.scale = transform.scale.component_mul(&factor);
            }
            other => return Err(SceneLoadError::Parse(format!("unknown transform step <{}>", other))),
        }
    }
    Ok(transform)
}

fn material_ref<'a>(el: &'a Element, field: &'static str) -> Result<&'a str, SceneLoadError> {
    require(el.child("ref").and_then(|r| r.attr("id")), field)
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, SceneLoadError> {
    value.ok_or(SceneLoadError::MissingField(field))
}

/// Minimal element tree; attribute values already have defaults substituted.
#[derive(Debug)]
struct Element {
    name: String,
    attributes: HashMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    fn from_start(e: &BytesStart, defaults: &HashMap<String, String>) -> Result<Self, SceneLoadError> {
        let mut attributes = HashMap::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| SceneLoadError::Parse(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|err| SceneLoadError::Parse(err.to_string()))?;
            attributes.insert(key, resolve_value(&value, defaults));
        }
        Ok(Self { name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                  attributes,
                  children: Vec::new() })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    // `<kind name="..." value="..."/>` property among the direct children.
    fn property(&self, kind: &str, name: &str) -> Option<&str> {
        self.children.iter()
            .find(|c| c.name == kind && c.attr("name") == Some(name))
            .and_then(|c| c.attr("value"))
    }

    fn string(&self, name: &str) -> Option<&str> {
        self.property("string", name)
    }

    fn float(&self, name: &str) -> Result<Option<Float>, SceneLoadError> {
        self.property("float", name).map(parse_float).transpose()
    }

    fn integer(&self, name: &str) -> Result<Option<usize>, SceneLoadError> {
        self.property("integer", name).map(parse_usize).transpose()
    }

    fn vec3(&self, name: &str) -> Result<Option<Vector3f>, SceneLoadError> {
        self.property("vector", name).map(parse_vec3).transpose()
    }

    fn rgb(&self, name: &str) -> Result<Option<Color3>, SceneLoadError> {
        Ok(self.property("rgb", name).map(parse_vec3).transpose()?.map(Color3::from_vector))
    }

    // `x`, `y`, `z` attributes, each falling back to `missing`.
    fn xyz(&self, missing: Float) -> Result<Vector3f, SceneLoadError> {
        let component = |key: &str| self.attr(key).map(parse_float).transpose().map(|v| v.unwrap_or(missing));
        Ok(Vector3f::new(component("x")?, component("y")?, component("z")?))
    }
}

fn parse_tree(xml: &str) -> Result<Element, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                stack.push(Element::from_start(&e, &defaults)?);
            }
            Ok(Event::Empty(e)) => {
                let element = Element::from_start(&e, &defaults)?;
                if element.name == "default" {
                    if let (Some(k), Some(v)) = (element.attr("name"), element.attr("value")) {
                        defaults.insert(k.to_string(), v.to_string());
                    }
                }
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop()
                    .ok_or_else(|| SceneLoadError::Parse(String::from("unbalanced closing tag")))?;
                attach(&mut stack, &mut root, element)?;
            }
            Err(e) => {
                return Err(SceneLoadError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    if !stack.is_empty() {
        return Err(SceneLoadError::Parse(format!("unclosed element <{}>", stack[stack.len() - 1].name)));
    }
    root.ok_or_else(|| SceneLoadError::Parse(String::from("empty document")))
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) -> Result<(), SceneLoadError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(SceneLoadError::Parse(String::from("more than one root element"))),
    }
    Ok(())
}

// Each `$name` token is looked up as a whole; unknown names are left as written.
fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let name_len = after.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(after.len());
        let name = &after[..name_len];
        match defaults.get(name) {
            Some(value) if !name.is_empty() => out.push_str(value),
            _ => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }
    out.push_str(rest);
    out
}

fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.trim().parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, SceneLoadError> {
    value.trim().parse::<usize>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let mut parts = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty());
    let x = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let y = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let z = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    Ok(Vector3f::new(parse_float(x)?, parse_float(y)?, parse_float(z)?))
}
