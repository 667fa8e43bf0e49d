//! Contrast map output type.

/// The computed contrast map: a grayscale image whose intensity encodes
/// local temporal variability.
///
/// Dimensions are `input - window_size + 1` on each axis. The map is
/// allocated and fully populated by the assembler in one invocation;
/// serialization to a file format is the caller's concern.
#[derive(Clone, PartialEq, Eq)]
pub struct ContrastMap {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl ContrastMap {
    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize));
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Returns the map width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the map height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the scaled intensity at (x, y).
    #[inline]
    pub fn intensity(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Returns the raw row-major pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the map, returning the raw pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

impl std::fmt::Debug for ContrastMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContrastMap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
