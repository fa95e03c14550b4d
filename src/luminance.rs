// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Relative luminance of a pixel
//!
//! The energy builder only ever looks at brightness, so every pixel is
//! collapsed to the Rec. 709 relative luminance before any gradient is
//! taken.  Alpha plays no part.

use crate::raster::Raster;
use crate::twodmap::TwoDimensionalMap;
use image::{Pixel, Primitive};
use num_traits::NumCast;

const RED: f64 = 0.2126;
const GREEN: f64 = 0.7152;
const BLUE: f64 = 0.0722;

/// Pixel -> Luminance
///
/// `0.2126 R + 0.7152 G + 0.0722 B`, on the channel's own scale.
#[inline]
pub fn relative_luminance<P, S>(p: &P) -> f64
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    #[inline]
    fn channel<S: Primitive>(c: S) -> f64 {
        NumCast::from(c).unwrap_or(0.0)
    }

    let rgb = p.to_rgb();
    let [r, g, b] = rgb.0;
    RED * channel(r) + GREEN * channel(g) + BLUE * channel(b)
}

/// Raster -> Luminance map
pub(crate) fn luminance_map(raster: &Raster) -> TwoDimensionalMap<f64> {
    let pixels = raster.map();
    let mut luma = TwoDimensionalMap::new(pixels.width(), pixels.height());
    luma.as_mut_slice()
        .iter_mut()
        .zip(pixels.as_slice())
        .for_each(|(l, p)| *l = relative_luminance(p));
    luma
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, Rgba};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn weights_each_primary() {
        assert!(close(relative_luminance(&Rgb([255u8, 0, 0])), 0.2126 * 255.0));
        assert!(close(relative_luminance(&Rgb([0u8, 255, 0])), 0.7152 * 255.0));
        assert!(close(relative_luminance(&Rgb([0u8, 0, 255])), 0.0722 * 255.0));
    }

    #[test]
    fn ignores_alpha() {
        let opaque = relative_luminance(&Rgba([10u8, 20, 30, 255]));
        let clear = relative_luminance(&Rgba([10u8, 20, 30, 0]));
        assert_eq!(opaque, clear);
    }

    #[test]
    fn grey_is_its_own_level() {
        assert!(close(relative_luminance(&Luma([100u8])), 100.0));
    }

    #[test]
    fn map_matches_raster_shape() {
        let raster = Raster::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 0, 255]).unwrap();
        let luma = luminance_map(&raster);
        assert_eq!((luma.width(), luma.height()), (2, 1));
        assert!(close(luma[(0, 0)], 0.2126 * 255.0));
        assert_eq!(luma[(1, 0)], 0.0);
    }
}
