// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Removing one seam, and the loop that keeps removing seams until a
//! raster is narrow enough.  Each iteration hands its raster and
//! energy map on to the next by value; nothing is shared between them.

use crate::energymap::{self, EnergyMap};
use crate::error::{CarveError, CarveFailure};
use crate::raster::Raster;
use crate::seam::Seam;
use crate::seamfinder::SeamFinder;
use tracing::{debug, trace};

/// How the energy map follows the raster after a seam is removed.
///
/// The two give different seams on later iterations, so the choice is
/// always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyUpdate {
    /// Recompute the whole map from the carved raster.  Correct, and
    /// O(W·H) per seam.
    Rebuild,
    /// Drop the seam's cells from the existing map.  The pixels either
    /// side of each removed one keep their stale energies until the map
    /// is next rebuilt.
    Trim,
}

impl Default for EnergyUpdate {
    fn default() -> Self {
        EnergyUpdate::Rebuild
    }
}

/// What the progress observer wants after seeing an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Cancel,
}

/// Remove `seam` from a raster and its energy map.
///
/// Everything is checked before anything is built: the two inputs must
/// have the same shape, the seam must fit that shape, and the raster
/// must be at least two columns wide.  The results are one column
/// narrower.
pub fn remove_seam(
    raster: &Raster,
    energy: &EnergyMap,
    seam: &Seam,
    update: EnergyUpdate,
) -> Result<(Raster, EnergyMap), CarveError> {
    let (width, height) = raster.dimensions();
    if energy.dimensions() != (width, height) {
        return Err(CarveError::InvalidEnergyMap(format!(
            "energy map is {}x{} but the raster is {}x{}",
            energy.width(),
            energy.height(),
            width,
            height
        )));
    }
    if width < 2 {
        return Err(CarveError::InvalidRaster(
            "a single-column raster cannot lose a seam".to_string(),
        ));
    }
    seam.validate(width, height)?;

    let carved = Raster::from_map(raster.map().without_path(seam.columns()));
    let energy = match update {
        EnergyUpdate::Rebuild => energymap::build(&carved)?,
        EnergyUpdate::Trim => energy.without_path(seam.columns()),
    };
    Ok((carved, energy))
}

/// Holds the carving options.
#[derive(Debug, Clone, Default)]
pub struct SeamCarver {
    update: EnergyUpdate,
}

impl SeamCarver {
    /// A carver that rebuilds the energy map after every seam.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_update(mut self, update: EnergyUpdate) -> Self {
        self.update = update;
        self
    }

    pub fn update(&self) -> EnergyUpdate {
        self.update
    }

    /// Carve seams out of `raster` until it is `target_width` wide.
    pub fn carve_to_width(&self, raster: Raster, target_width: u32) -> Result<Raster, CarveFailure> {
        self.carve_to_width_with(raster, target_width, |_, _| Progress::Continue)
    }

    /// Carve seams out of `raster` until it is `target_width` wide,
    /// calling `observer` after every removal with the seam that went
    /// and the raster that is left.  The observer is only consulted
    /// between seams; returning `Progress::Cancel` stops the loop with
    /// `CarveError::Cancelled`.
    ///
    /// A raster already at or below the target comes straight back
    /// without the observer being called.  On any failure the last good
    /// raster is returned inside the `CarveFailure`.
    pub fn carve_to_width_with<F>(
        &self,
        raster: Raster,
        target_width: u32,
        mut observer: F,
    ) -> Result<Raster, CarveFailure>
    where
        F: FnMut(&Seam, &Raster) -> Progress,
    {
        let (width, height) = raster.dimensions();
        if target_width < 1 {
            let error = CarveError::TargetWidthUnreachable {
                current: width,
                target: target_width,
            };
            return Err(CarveFailure::new(raster, error));
        }
        if width <= target_width {
            debug!(width, target_width, "already narrow enough");
            return Ok(raster);
        }

        debug!(width, height, target_width, update = ?self.update, "carving");
        let mut energy = match energymap::build(&raster) {
            Ok(energy) => energy,
            Err(e) => return Err(CarveFailure::new(raster, e)),
        };
        let mut raster = raster;

        while raster.width() > target_width {
            let seam = match energy.vertical_seam() {
                Ok(seam) => seam,
                Err(e) => return Err(CarveFailure::new(raster, e)),
            };
            let (carved, refreshed) = match remove_seam(&raster, &energy, &seam, self.update) {
                Ok(next) => next,
                Err(e) => return Err(CarveFailure::new(raster, e)),
            };
            raster = carved;
            energy = refreshed;
            trace!(width = raster.width(), cost = seam.cost(), "removed seam");

            if observer(&seam, &raster) == Progress::Cancel {
                debug!(width = raster.width(), "cancelled");
                let error = CarveError::Cancelled(raster.width());
                return Err(CarveFailure::new(raster, error));
            }
        }
        Ok(raster)
    }
}

/// Convenience wrapper: carve with the default options.
pub fn carve_to_width(raster: Raster, target_width: u32) -> Result<Raster, CarveFailure> {
    SeamCarver::new().carve_to_width(raster, target_width)
}
