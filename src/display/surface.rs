// Display surface - Drawing target for the renderer
//
// A surface knows its own size and can fill axis-aligned rectangles with a
// single current colour. `RgbaSurface` implements it over the RGBA byte frame
// handed out by `pixels::Pixels::frame_mut()`.

use super::palette::Color;

/// Surface width in pixels (64 cells × 16)
pub const SURFACE_WIDTH: u32 = 1024;

/// Surface height in pixels (32 cells × 16)
pub const SURFACE_HEIGHT: u32 = 512;

/// A two-colour drawing target
pub trait DisplaySurface {
    /// Current `(width, height)` in pixels
    fn size(&self) -> (u32, u32);

    /// Set the colour used by subsequent `fill_rect` calls
    fn set_fill_color(&mut self, color: Color);

    /// Fill a rectangle with the current fill colour; parts outside the
    /// surface are clipped
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32);
}

/// `DisplaySurface` over a row-major RGBA byte buffer
pub struct RgbaSurface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    fill: [u8; 4],
}

impl<'a> RgbaSurface<'a> {
    /// Wrap an RGBA frame of `width × height` pixels
    ///
    /// # Panics
    /// Panics if the frame is smaller than `width * height * 4` bytes
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        assert!(
            frame.len() >= width as usize * height as usize * 4,
            "Frame too small for {}x{} RGBA surface",
            width,
            height
        );

        Self {
            frame,
            width,
            height,
            fill: Color::rgb(0).to_rgba(),
        }
    }

    /// RGBA bytes of one pixel
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "Pixel ({}, {}) out of bounds", x, y);

        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.frame[offset..offset + 4]);
        rgba
    }
}

impl DisplaySurface for RgbaSurface<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color.to_rgba();
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }

        let stride = self.width as usize * 4;
        for row in y as usize..y_end as usize {
            let start = row * stride + x as usize * 4;
            let end = row * stride + x_end as usize * 4;
            for pixel in self.frame[start..end].chunks_exact_mut(4) {
                pixel.copy_from_slice(&self.fill);
            }
        }
    }
}
