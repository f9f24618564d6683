// Copyright 2020 TwoCookingMice

use whitted::core::integrator::Integrator;
use whitted::core::scene_loader::load_scene_with_settings;
use whitted::io::{exr_utils, image_utils};
use whitted::math::bitmap::Bitmap;
use whitted::renderers::simple::{Renderer, SimpleRenderer};

use log::{error, info};
use std::env;
use std::path::Path;

struct Options {
    input_path: String,
    output_path: String,
    resolution: Option<(usize, usize)>,
    spp: Option<usize>,
    max_depth: Option<u32>,
    seed: Option<u64>,
    parallel: bool,
}

fn parse_args(args: &[String]) -> Option<Options> {
    if args.len() < 3 {
        return None;
    }

    let mut options = Options {
        input_path: args[1].clone(),
        output_path: args[2].clone(),
        resolution: None,
        spp: None,
        max_depth: None,
        seed: None,
        parallel: true,
    };
    let mut width: Option<usize> = None;
    let mut height: Option<usize> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                width = Some(args.get(i)?.parse::<usize>().ok()?);
            }
            "--height" => {
                i += 1;
                height = Some(args.get(i)?.parse::<usize>().ok()?);
            }
            "--spp" => {
                i += 1;
                options.spp = Some(args.get(i)?.parse::<usize>().ok()?);
            }
            "--max-depth" => {
                i += 1;
                options.max_depth = Some(args.get(i)?.parse::<u32>().ok()?);
            }
            "--seed" => {
                i += 1;
                options.seed = Some(args.get(i)?.parse::<u64>().ok()?);
            }
            "--sequential" => options.parallel = false,
            _ => return None,
        }
        i += 1;
    }

    options.resolution = match (width, height) {
        (Some(w), Some(h)) => Some((w, h)),
        (None, None) => None,
        _ => return None,
    };
    Some(options)
}

fn write_image(bitmap: &Bitmap, output_path: &str) -> Result<(), String> {
    let extension = Path::new(output_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("exr") => exr_utils::write_exr_to_file(bitmap, output_path).map_err(|e| e.to_string()),
        Some("png") => image_utils::write_png_to_file(bitmap, output_path).map_err(|e| e.to_string()),
        _ => Err(format!("unsupported output format: {}", output_path)),
    }
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Some(options) => options,
        None => {
            eprintln!("Usage: {} <scene.xml> <output.{{exr,png}}> [--width N --height N] [--spp N] [--max-depth N] [--seed N] [--sequential]",
                      args.get(0).map(String::as_str).unwrap_or("whitted"));
            std::process::exit(1);
        }
    };

    let load_result = match load_scene_with_settings(&options.input_path) {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    if let Some(author) = &load_result.author {
        info!("Scene by {}", author);
    }

    let mut scene = load_result.scene;
    if let Some((width, height)) = options.resolution {
        scene.camera_mut().set_resolution(width, height);
    }
    if let Some(spp) = options.spp {
        scene.camera_mut().set_samples(spp);
    }
    if let Some(seed) = options.seed {
        scene.camera_mut().set_seed(seed);
    }
    let integrator = match (options.max_depth, load_result.integrator) {
        (Some(depth), Integrator::RayTrace(_)) => Integrator::from_tag("trace", depth).unwrap_or_default(),
        (_, integrator) => integrator,
    };

    let renderer = SimpleRenderer::new(integrator, load_result.brdf, options.parallel);
    let image = match renderer.render(&mut scene) {
        Ok(image) => image,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = write_image(&image, &options.output_path) {
        error!("{}", e);
        std::process::exit(1);
    }
}
