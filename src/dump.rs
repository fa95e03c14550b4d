// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pictures of the engine's intermediate products
//!
//! Nothing here feeds back into carving.  These are for looking at:
//! the energy map stretched out to a greyscale image, and a seam
//! painted over the raster it was found in.

use crate::energymap::EnergyMap;
use crate::error::CarveError;
use crate::raster::Raster;
use crate::seam::Seam;
use image::{GrayImage, Luma, Rgba};
use itertools::iproduct;

// Stretch [min, max] onto [0, 255].  A flat map is all black.
fn level(energy: &EnergyMap, e: f64) -> u8 {
    let span = energy.max() - energy.min();
    if span <= 0.0 {
        return 0;
    }
    (255.0 * (e - energy.min()) / span).round().max(0.0).min(255.0) as u8
}

/// The energy map as an 8-bit greyscale image.
pub fn energy_to_image(energy: &EnergyMap) -> GrayImage {
    let mut out = GrayImage::new(energy.width(), energy.height());
    for (y, x) in iproduct!(0..energy.height(), 0..energy.width()) {
        out.put_pixel(x, y, Luma([level(energy, energy[(x, y)])]));
    }
    out
}

/// The energy map as an opaque grey raster of the same shape.
pub fn energy_to_raster(energy: &EnergyMap) -> Raster {
    let data = energy
        .data()
        .iter()
        .flat_map(|&e| {
            let v = level(energy, e);
            vec![v, v, v, 255]
        })
        .collect();
    // An EnergyMap is never empty and its data always fills its shape.
    Raster::from_raw(energy.width(), energy.height(), data)
        .expect("energy map shape is always a valid raster shape")
}

/// A copy of `raster` with the seam's pixels painted `colour`.
///
/// Columns past the right edge are drawn on the last column, so the
/// seam that was just carved out of a raster can be drawn on what is
/// left of it.
pub fn draw_seam(raster: &Raster, seam: &Seam, colour: Rgba<u8>) -> Result<Raster, CarveError> {
    if seam.len() != raster.height() as usize {
        return Err(CarveError::InvalidSeam(format!(
            "{} entries for {} rows",
            seam.len(),
            raster.height()
        )));
    }
    let last = raster.width() - 1;
    let mut out = raster.clone();
    for (y, &x) in seam.columns().iter().enumerate() {
        out.put_pixel(x.min(last), y as u32, colour);
    }
    Ok(out)
}
