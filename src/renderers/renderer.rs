// Copyright @yucwang 2021

use crate::core::error::ConfigError;
use crate::core::scene::Scene;
use crate::math::bitmap::Bitmap;

pub trait Renderer {
    /// Takes the scene mutably only to rebuild an invalidated camera view.
    fn render(&self, scene: &mut Scene) -> Result<Bitmap, ConfigError>;
}
