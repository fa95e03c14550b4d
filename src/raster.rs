// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel raster the carver works on
//!
//! A raster is always RGBA8, row-major, and never empty.  Decoding and
//! encoding belong to the `image` crate; a raster converts to and from
//! an `RgbaImage` at the edges and stays in this form inside the loop.

use crate::error::CarveError;
use crate::twodmap::TwoDimensionalMap;
use image::{Pixel, Rgba, RgbaImage};
use std::convert::TryFrom;

#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: TwoDimensionalMap<Rgba<u8>>,
}

impl Raster {
    /// Build a raster from a flat `[r, g, b, a, r, g, b, a, ...]`
    /// buffer.  The buffer must be exactly `width * height * 4` bytes
    /// and the area must be non-zero.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CarveError> {
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidRaster(format!(
                "{}x{} has no pixels",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CarveError::InvalidRaster(format!(
                "{}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        let pixels = data
            .chunks_exact(4)
            .map(|c| *Rgba::from_slice(c))
            .collect();
        Ok(Raster {
            pixels: TwoDimensionalMap::from_vec(width, height, pixels, CarveError::InvalidRaster)?,
        })
    }

    /// A raster where every pixel is `pixel`.
    pub fn from_pixel(width: u32, height: u32, pixel: Rgba<u8>) -> Result<Self, CarveError> {
        Self::from_raw(width, height, pixel.channels().repeat(width as usize * height as usize))
    }

    pub(crate) fn from_map(pixels: TwoDimensionalMap<Rgba<u8>>) -> Self {
        Raster { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        self.pixels[(x, y)]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>) {
        self.pixels[(x, y)] = pixel;
    }

    /// Every pixel, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = &Rgba<u8>> {
        self.pixels.as_slice().iter()
    }

    pub(crate) fn map(&self) -> &TwoDimensionalMap<Rgba<u8>> {
        &self.pixels
    }

    /// The flat RGBA byte buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
            .into_vec()
            .into_iter()
            .flat_map(|p| p.0.to_vec())
            .collect()
    }

    pub fn into_image(self) -> RgbaImage {
        let pixels = self.pixels;
        RgbaImage::from_fn(pixels.width(), pixels.height(), |x, y| pixels[(x, y)])
    }
}

impl TryFrom<RgbaImage> for Raster {
    type Error = CarveError;

    fn try_from(image: RgbaImage) -> Result<Self, CarveError> {
        let (width, height) = image.dimensions();
        Raster::from_raw(width, height, image.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_area() {
        assert!(matches!(
            Raster::from_raw(0, 4, vec![]),
            Err(CarveError::InvalidRaster(_))
        ));
        assert!(matches!(
            Raster::from_raw(4, 0, vec![]),
            Err(CarveError::InvalidRaster(_))
        ));
    }

    #[test]
    fn rejects_short_and_long_buffers() {
        assert!(Raster::from_raw(2, 2, vec![0; 15]).is_err());
        assert!(Raster::from_raw(2, 2, vec![0; 17]).is_err());
        assert!(Raster::from_raw(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn pixels_are_row_major() {
        let data: Vec<u8> = (0..24).collect();
        let raster = Raster::from_raw(3, 2, data.clone()).unwrap();
        assert_eq!(raster.get_pixel(1, 0), Rgba([4, 5, 6, 7]));
        assert_eq!(raster.get_pixel(0, 1), Rgba([12, 13, 14, 15]));
        assert_eq!(raster.into_raw(), data);
    }

    #[test]
    fn converts_through_image() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(2, 1, Rgba([1, 2, 3, 4]));
        let raster = Raster::try_from(image.clone()).unwrap();
        assert_eq!(raster.get_pixel(2, 1), Rgba([1, 2, 3, 4]));
        assert_eq!(raster.into_image(), image);
    }
}
