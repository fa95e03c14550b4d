// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving errors
//!
//! Every stage validates its inputs before it touches them, so all of
//! these describe bad data handed to the engine rather than anything
//! that might succeed on a second attempt.

use crate::raster::Raster;
use failure::Fail;

/// What went wrong at a stage boundary.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum CarveError {
    /// Zero-area raster, or a pixel buffer whose length is not
    /// `width * height * 4`.
    #[fail(display = "invalid raster: {}", _0)]
    InvalidRaster(String),

    /// Empty energy map, malformed energies, or an energy map whose
    /// shape disagrees with the raster it is paired with.
    #[fail(display = "invalid energy map: {}", _0)]
    InvalidEnergyMap(String),

    /// Wrong length, a jump of more than one column between rows, or a
    /// column outside the raster.
    #[fail(display = "invalid seam: {}", _0)]
    InvalidSeam(String),

    #[fail(display = "cannot carve from width {} to width {}", current, target)]
    TargetWidthUnreachable { current: u32, target: u32 },

    /// The progress observer asked to stop.
    #[fail(display = "carving cancelled at width {}", _0)]
    Cancelled(u32),
}

/// A failed carving run.  The loop stops at the first bad iteration and
/// hands back the last raster it produced successfully.
#[derive(Debug, Fail)]
#[fail(display = "{}", error)]
pub struct CarveFailure {
    /// The last good raster.
    pub raster: Raster,
    #[cause]
    pub error: CarveError,
}

impl CarveFailure {
    pub(crate) fn new(raster: Raster, error: CarveError) -> Self {
        CarveFailure { raster, error }
    }
}
