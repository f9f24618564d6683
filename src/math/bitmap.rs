// Copyright 2020 @TwoCookingMice

use super::color::Color3;
use super::constants::{ Float, Vector3f };

use std::ops;
use std::vec::Vec;

/// Float RGB image, (0, 0) is the top-left pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    data: Vec<Vector3f>,
    height: usize,
    width: usize
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = Vector3f;

    fn index(&self, index: (usize, usize)) -> &Vector3f {
        assert!(index.0 < self.width && index.1 < self.height,
                "pixel ({}, {}) outside {}x{} bitmap", index.0, index.1, self.width, self.height);
        &self.data[index.0 + self.width * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Vector3f {
        assert!(index.0 < self.width && index.1 < self.height,
                "pixel ({}, {}) outside {}x{} bitmap", index.0, index.1, self.width, self.height);
        &mut self.data[index.0 + self.width * index.1]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_number = width * height;
        Self { data: vec!(Vector3f::new(0.0, 0.0, 0.0);
                          pixel_number),
               width: width,
               height: height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, color: Color3) {
        self[(x, y)] = color.to_vector();
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color3 {
        Color3::from_vector(self[(x, y)])
    }

    /// Row-major copy of the pixels, for the image writers.
    pub fn raw_copy(&self) -> Vec<(Float, Float, Float)> {
        self.data.iter().map(|v| (v.x, v.y, v.z)).collect()
    }
}

/* Test for Bitmap */
