// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the magnitude of the luminance gradient
//! through it: central differences across the row and down the
//! column, combined as `sqrt(Gx² + Gy²)`.  Where a neighbour would
//! fall off the raster the pixel's own luminance stands in for it, so
//! the border pixels get a one-sided difference rather than a wrapped
//! or zero-padded one.
//!
//! The map keeps the raw magnitudes.  `min` and `max` always describe
//! the current data, so display code can normalise on demand (see
//! `dump`), but nothing normalised ever goes back into the seam finder.

use crate::cq;
use crate::error::CarveError;
use crate::luminance::luminance_map;
use crate::raster::Raster;
use crate::twodmap::TwoDimensionalMap;
use itertools::{Itertools, MinMaxResult};
use std::ops::Index;

/// Per-pixel energies for one raster, with their observed range.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyMap {
    energy: TwoDimensionalMap<f64>,
    min: f64,
    max: f64,
}

impl EnergyMap {
    /// Wrap precomputed energies.  Every value must be finite and
    /// non-negative, and there must be exactly `width * height` of them.
    pub fn from_raw(width: u32, height: u32, data: Vec<f64>) -> Result<Self, CarveError> {
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidEnergyMap(format!(
                "{}x{} has no cells",
                width, height
            )));
        }
        if let Some(bad) = data.iter().find(|e| !e.is_finite() || **e < 0.0) {
            return Err(CarveError::InvalidEnergyMap(format!(
                "energy {} is not a finite non-negative number",
                bad
            )));
        }
        let energy = TwoDimensionalMap::from_vec(width, height, data, CarveError::InvalidEnergyMap)?;
        Ok(Self::from_map(energy))
    }

    // Only for maps whose contents are already known to be good.
    fn from_map(energy: TwoDimensionalMap<f64>) -> Self {
        let (min, max) = match energy.as_slice().iter().minmax() {
            MinMaxResult::NoElements => (0.0, 0.0),
            MinMaxResult::OneElement(e) => (*e, *e),
            MinMaxResult::MinMax(lo, hi) => (*lo, *hi),
        };
        EnergyMap { energy, min, max }
    }

    pub fn width(&self) -> u32 {
        self.energy.width()
    }

    pub fn height(&self) -> u32 {
        self.energy.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Smallest energy in the map.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest energy in the map.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Row-major energies.
    pub fn data(&self) -> &[f64] {
        self.energy.as_slice()
    }

    pub fn row(&self, y: u32) -> &[f64] {
        self.energy.row(y)
    }

    /// Drop one cell per row without recomputing anything around the
    /// hole.  The neighbours of each removed cell keep their old
    /// energies; `min` and `max` are refreshed from what remains.
    /// `columns` must already be validated against this map.
    pub(crate) fn without_path(&self, columns: &[u32]) -> Self {
        Self::from_map(self.energy.without_path(columns))
    }
}

impl Index<(u32, u32)> for EnergyMap {
    type Output = f64;

    fn index(&self, (x, y): (u32, u32)) -> &f64 {
        &self.energy[(x, y)]
    }
}

// Computes the energies of rows `first_row..` into `out`, which holds a
// whole number of rows, and reports the range it saw.
fn energy_rows(luma: &TwoDimensionalMap<f64>, first_row: u32, out: &mut [f64]) -> (f64, f64) {
    let (width, height) = (luma.width(), luma.height());
    let (mw, mh) = (width - 1, height - 1);
    let mut lo = std::f64::INFINITY;
    let mut hi = std::f64::NEG_INFINITY;

    for (row, cells) in out.chunks_mut(width as usize).enumerate() {
        let y = first_row + row as u32;
        for (x, cell) in (0..width).zip(cells.iter_mut()) {
            let here = luma[(x, y)];
            let (left, right, up, down) = (
                cq!(x == 0, here, luma[(x - 1, y)]),
                cq!(x >= mw, here, luma[(x + 1, y)]),
                cq!(y == 0, here, luma[(x, y - 1)]),
                cq!(y >= mh, here, luma[(x, y + 1)]),
            );
            let (gx, gy) = (right - left, down - up);
            let e = (gx * gx + gy * gy).sqrt();
            lo = lo.min(e);
            hi = hi.max(e);
            *cell = e;
        }
    }
    (lo, hi)
}

#[cfg(not(feature = "threaded"))]
fn fill_energy(luma: &TwoDimensionalMap<f64>, out: &mut [f64]) -> (f64, f64) {
    energy_rows(luma, 0, out)
}

// Every pixel depends only on the luminance map, so the output can be
// cut into horizontal bands and each band filled on its own thread.
#[cfg(feature = "threaded")]
fn fill_energy(luma: &TwoDimensionalMap<f64>, out: &mut [f64]) -> (f64, f64) {
    use std::panic;

    let (width, height) = (luma.width() as usize, luma.height() as usize);
    let bands = num_cpus::get().max(1).min(height);
    let band_rows = (height + bands - 1) / bands;

    crossbeam::scope(|scope| {
        let handles: Vec<_> = out
            .chunks_mut(band_rows * width)
            .enumerate()
            .map(|(band, chunk)| {
                let first_row = (band * band_rows) as u32;
                scope.spawn(move |_| energy_rows(luma, first_row, chunk))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .fold(
                (std::f64::INFINITY, std::f64::NEG_INFINITY),
                |(lo, hi), (l, h)| (lo.min(l), hi.max(h)),
            )
    })
    .unwrap_or_else(|e| panic::resume_unwind(e))
}

// Image -> Energy Map

/// Compute the energy of every pixel in a raster.  Pure and
/// deterministic; the returned map has the raster's shape.
pub fn build(raster: &Raster) -> Result<EnergyMap, CarveError> {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::InvalidRaster(format!(
            "{}x{} has no pixels",
            width, height
        )));
    }

    let luma = luminance_map(raster);
    let mut energy: TwoDimensionalMap<f64> = TwoDimensionalMap::new(width, height);
    let (min, max) = fill_energy(&luma, energy.as_mut_slice());
    Ok(EnergyMap { energy, min, max })
}
