//! RGBA8 pixel storage handed from the integrator to an image sink.

/// Row-major RGBA8 image. Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// Four bytes per pixel, R, G, B, A
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Get the pixel at (x, y), y counted from the top row.
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Set the pixel at (x, y), y counted from the top row.
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Raw bytes, row-major, four per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
