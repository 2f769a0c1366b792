use crate::error::PngError;
use crate::pixel::Pixel;

/// An owned grid of RGB pixels, stored as interleaved byte triples in
/// row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, PngError> {
        if width == 0 || height == 0 {
            return Err(PngError::format("image dimensions must be positive"));
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        })
    }

    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PngError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(PngError::format(format!(
                "pixel data is {} bytes, expected {} for a {width}x{height} image",
                data.len(),
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Result<Pixel, PngError> {
        let index = self.index_of(x, y)?;
        Ok(Pixel::new(
            self.data[index],
            self.data[index + 1],
            self.data[index + 2],
        ))
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<(), PngError> {
        let index = self.index_of(x, y)?;
        self.data[index] = pixel.red;
        self.data[index + 1] = pixel.green;
        self.data[index + 2] = pixel.blue;
        Ok(())
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize, PngError> {
        if x >= self.width || y >= self.height {
            return Err(PngError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * 3)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
