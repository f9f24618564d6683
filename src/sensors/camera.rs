// Copyright @yucwang 2026

use crate::core::error::ConfigError;
use crate::core::rng::pixel_seed;
use crate::core::sampler::Sampler;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::{Ray3f, RayBatch};
use crate::math::rect::iterate_rect;

use log::{debug, warn};

// Largest |cos| accepted between forward and up.
const ORTHOGONALITY_TOLERANCE: Float = 1e-4;

#[derive(Debug, Copy, Clone, PartialEq)]
struct CameraView {
    forward: Vector3f,
    up: Vector3f,
    right: Vector3f,
    screen_width: Float,
    screen_height: Float,
    resolution_per_unit: Float,
}

/// Pinhole camera. `fov` is the horizontal field of view in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vector3f,
    forward: Vector3f,
    up: Vector3f,
    fov: Float,
    screen_distance: Float,
    width: usize,
    height: usize,
    samples_per_pixel: usize,
    sampler: Sampler,
    seed: u64,
    view: Option<CameraView>,
}

impl Camera {
    pub fn new(position: Vector3f, forward: Vector3f, up: Vector3f) -> Self {
        Self {
            position,
            forward,
            up,
            fov: 60.0,
            screen_distance: 1.0,
            width: 640,
            height: 480,
            samples_per_pixel: 1,
            sampler: Sampler::Uniform,
            seed: 0,
            view: None,
        }
    }

    pub fn with_fov(mut self, fov: Float) -> Self {
        self.fov = fov;
        self.view = None;
        self
    }

    pub fn with_screen_distance(mut self, screen_distance: Float) -> Self {
        self.screen_distance = screen_distance;
        self.view = None;
        self
    }

    pub fn with_resolution(mut self, width: usize, height: usize) -> Self {
        self.set_resolution(width, height);
        self
    }

    pub fn with_samples(mut self, samples_per_pixel: usize) -> Self {
        self.set_samples(samples_per_pixel);
        self
    }

    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn set_resolution(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.view = None;
    }

    pub fn set_samples(&mut self, samples_per_pixel: usize) {
        self.samples_per_pixel = samples_per_pixel;
        self.view = None;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples_per_pixel(&self) -> usize {
        self.samples_per_pixel
    }

    pub fn sampler(&self) -> Sampler {
        self.sampler
    }

    pub fn position(&self) -> Vector3f {
        self.position
    }

    pub fn is_initialized(&self) -> bool {
        self.view.is_some()
    }

    /// Validates the basis and caches the view. Must run after any change
    /// of resolution or sample count before rays are generated.
    pub fn initialize(&mut self) -> Result<(), ConfigError> {
        if self.forward.norm() <= 0.0 {
            return Err(ConfigError::DegenerateVector("camera.forward"));
        }
        if self.up.norm() <= 0.0 {
            return Err(ConfigError::DegenerateVector("camera.up"));
        }
        let forward = self.forward.normalize();
        let up = self.up.normalize();
        if forward.dot(&up).abs() > ORTHOGONALITY_TOLERANCE {
            return Err(ConfigError::NonOrthogonalCameraBasis);
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::InvalidParameter {
                name: "camera.fov",
                reason: format!("{} is not inside (0, 180) degrees", self.fov),
            });
        }
        if !(self.screen_distance > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "camera.screen_distance",
                reason: format!("{} is not positive", self.screen_distance),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "camera.resolution",
                reason: format!("{}x{} is empty", self.width, self.height),
            });
        }
        if self.samples_per_pixel == 0 {
            warn!("Camera has zero samples per pixel, every pixel stays black");
        }

        let right = forward.cross(&up);
        let screen_width = 2.0 * (0.5 * self.fov.to_radians()).tan() * self.screen_distance;
        let resolution_per_unit = self.width as Float / screen_width;
        let screen_height = self.height as Float / resolution_per_unit;

        debug!("Camera view: {}x{}, screen {}x{}", self.width, self.height, screen_width, screen_height);
        self.view = Some(CameraView { forward, up, right, screen_width, screen_height, resolution_per_unit });
        Ok(())
    }

    pub fn ray_generator(&self) -> Result<RayGenerator<'_>, ConfigError> {
        let view = self.view.as_ref().ok_or(ConfigError::CameraNotInitialized)?;
        Ok(RayGenerator { camera: self, view })
    }

    /// One batch per pixel, row by row from the top-left pixel.
    pub fn generate_rays(&self) -> Result<Vec<RayBatch>, ConfigError> {
        let generator = self.ray_generator()?;
        Ok(iterate_rect(self.width, self.height)
            .map(|(x, y)| generator.pixel_batch(x, y))
            .collect())
    }
}

/// Borrowed view of an initialized camera.
pub struct RayGenerator<'a> {
    camera: &'a Camera,
    view: &'a CameraView,
}

impl<'a> RayGenerator<'a> {
    pub fn width(&self) -> usize {
        self.camera.width
    }

    pub fn height(&self) -> usize {
        self.camera.height
    }

    pub fn pixel_batch(&self, x: usize, y: usize) -> RayBatch {
        let camera = self.camera;
        let offsets = camera.sampler.samples(camera.samples_per_pixel, pixel_seed(camera.seed, x, y));
        let rays = offsets.iter()
            .map(|offset| self.pixel_ray(x, y, offset))
            .filter(|ray| ray.exists())
            .collect();
        RayBatch::new(rays, x, y)
    }

    fn pixel_ray(&self, x: usize, y: usize, offset: &Vector2f) -> Ray3f {
        let view = self.view;
        let sx = (x as Float + offset.x) / view.resolution_per_unit - 0.5 * view.screen_width;
        let sy = 0.5 * view.screen_height - (y as Float + offset.y) / view.resolution_per_unit;
        let dir = view.right * sx + view.up * sy + view.forward * self.camera.screen_distance;
        Ray3f::new(self.camera.position, dir, None, None)
    }
}
