// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest top-to-bottom seam through an energy map
//!
//! The forward pass walks the map a row at a time, keeping only the
//! cumulative costs of the previous row and the row being filled, and
//! records for every cell which of its (up to three) upper neighbours
//! it came from.  The seam is then read back out of that parent table
//! starting from the cheapest cell in the bottom row.
//!
//! Ties go to going straight up, then up-left, then up-right; along
//! the bottom row, to the lowest column.  The same map therefore always
//! yields the same seam.

use crate::energymap::EnergyMap;
use crate::error::CarveError;
use crate::seam::Seam;
use crate::twodmap::TwoDimensionalMap;

/// This trait defines how we will get seams out of something.  It's a
/// primitive interface, just enough to make room for more than one
/// source of seams.
pub trait SeamFinder {
    /// Request the cheapest vertical seam.
    fn vertical_seam(&self) -> Result<Seam, CarveError>;
}

impl SeamFinder for EnergyMap {
    fn vertical_seam(&self) -> Result<Seam, CarveError> {
        find_min_seam(self)
    }
}

// Which upper neighbour of column `x` is cheapest.  Candidates are
// checked straight-up first, and a later one only wins if it is
// strictly smaller, which is what gives the tie-break its order.
// Columns off either edge are never candidates.
#[inline]
fn cheapest_parent(above: &[f64], x: u32) -> u32 {
    let last = above.len() as u32 - 1;
    let cost = |x: u32| above[x as usize];
    let mut parent = x;
    if x > 0 && cost(x - 1) < cost(parent) {
        parent = x - 1;
    }
    if x < last && cost(x + 1) < cost(parent) {
        parent = x + 1;
    }
    parent
}

/// Given an energy map, return the seam of least total energy: one
/// x-coordinate for each row from top to bottom.
pub fn find_min_seam(energy: &EnergyMap) -> Result<Seam, CarveError> {
    let (width, height) = energy.dimensions();
    if width < 1 || height < 1 {
        return Err(CarveError::InvalidEnergyMap(format!(
            "{}x{} has no seams",
            width, height
        )));
    }

    let mut parents: TwoDimensionalMap<u32> = TwoDimensionalMap::new(width, height);

    // The first row costs only its own energy.
    let mut above = energy.row(0).to_vec();
    let mut current = vec![0.0; width as usize];

    // For every subsequent row, each cell costs its own energy plus the
    // cheapest adjacent cell above it.
    for y in 1..height {
        let row = energy.row(y);
        for x in 0..width {
            let parent = cheapest_parent(&above, x);
            parents[(x, y)] = parent;
            current[x as usize] = row[x as usize] + above[parent as usize];
        }
        std::mem::swap(&mut above, &mut current);
    }

    // Find the x coordinate of the bottommost cell with the least
    // cumulative energy.
    let (mut column, cost) = above
        .iter()
        .enumerate()
        .skip(1)
        .fold((0, above[0]), |(best, best_cost), (x, &c)| {
            if c < best_cost {
                (x as u32, c)
            } else {
                (best, best_cost)
            }
        });

    // Working backwards, follow the parents up to the first row.
    let mut columns = vec![0; height as usize];
    for y in (0..height).rev() {
        columns[y as usize] = column;
        column = parents[(column, y)];
    }

    Ok(Seam::new(columns, cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENERGY_DATA: [f64; 20] = [
        9.0, 9.0, 0.0, 9.0, 9.0, 9.0, 1.0, 9.0, 8.0, 9.0, 9.0, 9.0, 9.0, 9.0, 0.0, 9.0, 9.0,
        9.0, 0.0, 9.0,
    ];

    fn map(width: u32, height: u32, data: &[f64]) -> EnergyMap {
        EnergyMap::from_raw(width, height, data.to_vec()).unwrap()
    }

    fn assert_connected(seam: &Seam, width: u32, height: u32) {
        assert_eq!(seam.len(), height as usize);
        assert!(seam.columns().iter().all(|&x| x < width));
        assert!(seam
            .columns()
            .windows(2)
            .all(|w| (i64::from(w[0]) - i64::from(w[1])).abs() <= 1));
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        let seam = find_min_seam(&map(5, 4, &ENERGY_DATA)).unwrap();
        assert_eq!(seam.columns(), &[2, 3, 4, 3]);
        assert_eq!(seam.cost(), 8.0);
        assert_connected(&seam, 5, 4);
    }

    #[test]
    fn follows_a_cheap_column() {
        let energy = map(3, 3, &[9.0, 1.0, 9.0, 9.0, 1.0, 9.0, 9.0, 1.0, 9.0]);
        let seam = find_min_seam(&energy).unwrap();
        assert_eq!(seam.columns(), &[1, 1, 1]);
        assert_eq!(seam.cost(), 3.0);
    }

    #[test]
    fn flat_map_prefers_leftmost_straight_seam() {
        let energy = map(4, 3, &[0.0; 12]);
        let seam = find_min_seam(&energy).unwrap();
        assert_eq!(seam.columns(), &[0, 0, 0]);
        assert_eq!(seam.cost(), 0.0);
    }

    #[test]
    fn ties_go_up_then_left_then_right() {
        // Bottom middle cell can reach 1.0 from any of the three above.
        let energy = map(3, 2, &[1.0, 1.0, 1.0, 5.0, 0.0, 5.0]);
        assert_eq!(find_min_seam(&energy).unwrap().columns(), &[1, 1]);

        // Left and right tie, both cheaper than straight up.
        let energy = map(3, 2, &[1.0, 4.0, 1.0, 5.0, 0.0, 5.0]);
        assert_eq!(find_min_seam(&energy).unwrap().columns(), &[0, 1]);
    }

    #[test]
    fn bottom_row_ties_go_to_lowest_column() {
        let energy = map(3, 2, &[5.0, 1.0, 1.0, 5.0, 2.0, 2.0]);
        let seam = find_min_seam(&energy).unwrap();
        assert_eq!(seam.columns(), &[1, 1]);
        assert_eq!(seam.cost(), 3.0);
    }

    #[test]
    fn never_wraps_around_the_edges() {
        // The cheap cell in the top right is out of reach from the left edge.
        let energy = map(4, 2, &[5.0, 5.0, 5.0, 0.0, 0.0, 9.0, 9.0, 9.0]);
        let seam = find_min_seam(&energy).unwrap();
        assert_eq!(seam.columns(), &[0, 0]);
        assert_eq!(seam.cost(), 5.0);
    }

    #[test]
    fn single_column() {
        let energy = map(1, 5, &[3.0, 1.0, 4.0, 1.0, 5.0]);
        let seam = find_min_seam(&energy).unwrap();
        assert_eq!(seam.columns(), &[0, 0, 0, 0, 0]);
        assert_eq!(seam.cost(), 14.0);
    }

    #[test]
    fn single_row() {
        let energy = map(4, 1, &[3.0, 1.0, 4.0, 1.0]);
        let seam = find_min_seam(&energy).unwrap();
        assert_eq!(seam.columns(), &[1]);
    }

    #[test]
    fn same_map_same_seam() {
        let energy = map(5, 4, &ENERGY_DATA);
        assert_eq!(energy.vertical_seam().unwrap(), energy.vertical_seam().unwrap());
    }

    #[test]
    fn larger_maps_stay_connected() {
        let data: Vec<f64> = (0..30 * 20).map(|i| ((i * 7919) % 113) as f64).collect();
        let seam = find_min_seam(&map(30, 20, &data)).unwrap();
        assert_connected(&seam, 30, 20);
    }
}
