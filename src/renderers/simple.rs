// Copyright @yucwang 2021

use crate::core::bsdf::Brdf;
use crate::core::error::ConfigError;
use crate::core::integrator::Integrator;
use crate::core::scene::Scene;
use crate::math::bitmap::Bitmap;
use crate::math::color::Color3;
use crate::math::rect::{split_into_tiles, PixelRect};
use crate::sensors::camera::RayGenerator;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

pub use super::renderer::Renderer;

pub const TILE_SIZE: usize = 16;

pub struct SimpleRenderer {
    integrator: Integrator,
    brdf: Brdf,
    parallel: bool,
}

impl SimpleRenderer {
    pub fn new(integrator: Integrator, brdf: Brdf, parallel: bool) -> Self {
        Self { integrator, brdf, parallel }
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    pub fn brdf(&self) -> &Brdf {
        &self.brdf
    }

    // Colors of the tile's pixels, row by row. Null batches stay black.
    fn render_tile(&self, scene: &Scene, generator: &RayGenerator, tile: &PixelRect) -> Vec<Color3> {
        tile.pixels()
            .map(|(x, y)| {
                let batch = generator.pixel_batch(x, y);
                if batch.is_null() {
                    Color3::black()
                } else {
                    self.integrator.pixel_color(scene, &self.brdf, &batch)
                }
            })
            .collect()
    }

    fn render_parallel(&self,
                       scene: &Scene,
                       generator: &RayGenerator,
                       tiles: &[PixelRect],
                       bitmap: &mut Bitmap,
                       progress: &ProgressBar) {
        let total_tiles = tiles.len();
        let next_tile = Arc::new(AtomicUsize::new(0));
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(total_tiles.max(1));
        info!("Rendering {} tiles on {} threads", total_tiles, thread_count);
        let (tx, rx) = mpsc::channel::<(usize, Vec<Color3>)>();

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_tile = Arc::clone(&next_tile);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let tile_index = next_tile.fetch_add(1, Ordering::Relaxed);
                        if tile_index >= total_tiles {
                            break;
                        }
                        let colors = self.render_tile(scene, generator, &tiles[tile_index]);
                        if tx.send((tile_index, colors)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for _ in 0..total_tiles {
                if let Ok((tile_index, colors)) = rx.recv() {
                    write_tile(bitmap, &tiles[tile_index], &colors);
                    progress.inc(1);
                }
            }
        });
    }
}

fn write_tile(bitmap: &mut Bitmap, tile: &PixelRect, colors: &[Color3]) {
    for ((x, y), color) in tile.pixels().zip(colors.iter()) {
        bitmap.put_pixel(x, y, *color);
    }
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &mut Scene) -> Result<Bitmap, ConfigError> {
        scene.prepare()?;
        let scene: &Scene = scene;
        let generator = scene.camera().ray_generator()?;

        let (width, height) = (generator.width(), generator.height());
        let mut bitmap = Bitmap::new(width, height);
        let tiles = split_into_tiles(width, height, TILE_SIZE);

        let progress = ProgressBar::new(tiles.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tiles")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let start = Instant::now();
        if self.parallel {
            self.render_parallel(scene, &generator, &tiles, &mut bitmap, &progress);
        } else {
            info!("Rendering {} tiles sequentially", tiles.len());
            for tile in tiles.iter() {
                let colors = self.render_tile(scene, &generator, tile);
                write_tile(&mut bitmap, tile, &colors);
                progress.inc(1);
            }
        }
        progress.finish_and_clear();
        info!("Rendered {}x{} in {:.2?}", width, height, start.elapsed());

        Ok(bitmap)
    }
}
