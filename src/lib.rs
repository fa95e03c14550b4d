// #![deny(missing_docs)]

//! Content-aware width reduction by seam carving.
//!
//! A [`Raster`] goes into [`energymap::build`], the resulting
//! [`EnergyMap`] goes into [`find_min_seam`], and [`remove_seam`] takes
//! the seam back out of both.  [`SeamCarver`] runs that loop until the
//! raster is as narrow as asked.

mod ternary;

pub mod dump;
pub mod energymap;
pub mod error;
pub mod logger;
pub mod luminance;
pub mod raster;
pub mod seam;
pub mod seamcarver;
pub mod seamfinder;
mod twodmap;

pub use energymap::EnergyMap;
pub use error::{CarveError, CarveFailure};
pub use raster::Raster;
pub use seam::Seam;
pub use seamcarver::{carve_to_width, remove_seam, EnergyUpdate, Progress, SeamCarver};
pub use seamfinder::{find_min_seam, SeamFinder};
