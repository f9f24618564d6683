// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

use image::{ImageResult, Rgb, RgbImage};

fn to_byte(v: Float) -> u8 {
    (v.max(0.0).min(1.0) * 255.0 + 0.5) as u8
}

/// 8-bit copy of the bitmap, no tone mapping.
pub fn to_rgb_image(bitmap: &Bitmap) -> RgbImage {
    let mut image = RgbImage::new(bitmap.width() as u32, bitmap.height() as u32);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let color = bitmap.pixel(x as usize, y as usize);
        *pixel = Rgb([to_byte(color.r()), to_byte(color.g()), to_byte(color.b())]);
    }
    image
}

pub fn write_png_to_file(bitmap: &Bitmap, file_path: &str) -> ImageResult<()> {
    log::info!("Starting writing png image: {}.", file_path);
    to_rgb_image(bitmap).save_with_format(file_path, image::ImageFormat::Png)?;
    log::info!("PNG written to: {}.", file_path);
    Ok(())
}
