/* Copyright 2020 @TwoCookingMice */

use crate::math::bitmap::Bitmap;

use exr::prelude::*;

// Write EXR Image to file
pub fn write_exr_to_file(bitmap: &Bitmap, file_path: &str) -> std::result::Result<(), exr::error::Error> {
    log::info!("Starting writing openexr images: {}.", file_path);

    let width = bitmap.width();
    let image = bitmap.raw_copy();
    write_rgb_file(file_path, width, bitmap.height(), |x, y| {
        (
            image[y * width + x].0,
            image[y * width + x].1,
            image[y * width + x].2
        )
    })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::color::Color3;

    #[test]
    fn test_write_and_read_back() {
        let mut bitmap = Bitmap::new(3, 2);
        bitmap.put_pixel(2, 1, Color3::new(0.25, 0.5, 1.0));
        let path = std::env::temp_dir().join(format!("whitted_exr_{}.exr", std::process::id()));
        let path = path.to_string_lossy().into_owned();
        write_exr_to_file(&bitmap, &path).unwrap();

        let image = read_first_rgba_layer_from_file(
            &path,
            |resolution, _| vec![(0.0f32, 0.0f32, 0.0f32); resolution.width() * resolution.height()],
            |pixels, position, (r, g, b, _a): (f32, f32, f32, f32)| {
                pixels[position.y() * 3 + position.x()] = (r, g, b);
            },
        ).unwrap();
        let _ = std::fs::remove_file(&path);

        let pixels = image.layer_data.channel_data.pixels;
        assert_eq!(pixels.len(), 6);
        assert_eq!(pixels[5], (0.25, 0.5, 1.0));
        assert_eq!(pixels[0], (0.0, 0.0, 0.0));
    }
}
