// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A vertical seam: one column per row, top to bottom, never stepping
//! more than one column sideways between rows.

use crate::error::CarveError;
use std::ops::Index;

#[derive(Debug, Clone, PartialEq)]
pub struct Seam {
    columns: Vec<u32>,
    cost: f64,
}

impl Seam {
    /// A seam through `columns[y]` on row `y`, with the total energy it
    /// was found to cost.  Nothing is checked here; see `validate`.
    pub fn new(columns: Vec<u32>, cost: f64) -> Self {
        Seam { columns, cost }
    }

    /// Sum of the energies along the seam, as reported by the finder.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The seam as linear pixel indices into a row-major buffer of the
    /// given width.
    pub fn to_indices(&self, width: u32) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(y, &x)| y * width as usize + x as usize)
            .collect()
    }

    /// Check that this seam can be carved out of a `width` x `height`
    /// raster.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), CarveError> {
        if self.columns.len() != height as usize {
            return Err(CarveError::InvalidSeam(format!(
                "{} entries for {} rows",
                self.columns.len(),
                height
            )));
        }
        if let Some((y, x)) = self.columns.iter().enumerate().find(|(_, &x)| x >= width) {
            return Err(CarveError::InvalidSeam(format!(
                "column {} on row {} is outside width {}",
                x, y, width
            )));
        }
        if let Some(y) = (1..self.columns.len())
            .find(|&y| (i64::from(self.columns[y]) - i64::from(self.columns[y - 1])).abs() > 1)
        {
            return Err(CarveError::InvalidSeam(format!(
                "jumps from column {} to {} between rows {} and {}",
                self.columns[y - 1],
                self.columns[y],
                y - 1,
                y
            )));
        }
        Ok(())
    }
}

impl Index<usize> for Seam {
    type Output = u32;

    /// The seam's column on row `y`.
    fn index(&self, y: usize) -> &u32 {
        &self.columns[y]
    }
}
