use whitted::core::scene_loader::load_scene_with_settings;
use whitted::math::color::Color3;

use log::error;
use std::env;

fn parse_pixel_args(args: &[String]) -> Result<(&str, usize, usize), String> {
    if args.len() < 4 {
        return Err(format!("Usage: {} <scene.xml> <x> <y>",
                           args.get(0).map(String::as_str).unwrap_or("render_pixel")));
    }
    let x = args[2].parse::<usize>().map_err(|_| format!("invalid pixel x: {}", args[2]))?;
    let y = args[3].parse::<usize>().map_err(|_| format!("invalid pixel y: {}", args[3]))?;
    Ok((args[1].as_str(), x, y))
}

fn run(args: &[String]) -> Result<(), String> {
    let (scene_path, x, y) = parse_pixel_args(args)?;

    let load_result = load_scene_with_settings(scene_path).map_err(|e| e.to_string())?;
    let scene = load_result.scene;
    let camera = scene.camera();
    if x >= camera.width() || y >= camera.height() {
        return Err(format!("pixel ({}, {}) outside {}x{} image", x, y, camera.width(), camera.height()));
    }

    let generator = camera.ray_generator().map_err(|e| e.to_string())?;
    let batch = generator.pixel_batch(x, y);
    let colors = load_result.integrator.sample_colors(&scene, &load_result.brdf, &batch);
    for (ray, color) in batch.rays.iter().filter(|r| r.exists()).zip(colors.iter()) {
        println!("dir ({:.4}, {:.4}, {:.4}) -> R {:.6}, G {:.6}, B {:.6}",
                 ray.dir().x, ray.dir().y, ray.dir().z, color.r(), color.g(), color.b());
    }

    let avg = Color3::average(&colors);
    println!("pixel ({}, {}) samples={} -> R {:.6}, G {:.6}, B {:.6}",
             x, y, colors.len(), avg.r(), avg.g(), avg.b());
    Ok(())
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
