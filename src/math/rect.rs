// Copyright @yucwang 2026

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRect {
    pub fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..self.y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

/// Every pixel of a `width x height` image, row by row.
pub fn iterate_rect(width: usize, height: usize) -> impl Iterator<Item = (usize, usize)> {
    PixelRect::new(0, 0, width, height).pixels()
}

/// Splits the image into square tiles; border tiles are clipped.
pub fn split_into_tiles(width: usize, height: usize, tile_size: usize) -> Vec<PixelRect> {
    let tile_size = tile_size.max(1);
    let tiles_x = (width + tile_size - 1) / tile_size;
    let tiles_y = (height + tile_size - 1) / tile_size;

    let mut tiles = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let x0 = tx * tile_size;
            let y0 = ty * tile_size;
            tiles.push(PixelRect::new(x0, y0, (x0 + tile_size).min(width), (y0 + tile_size).min(height)));
        }
    }
    tiles
}
