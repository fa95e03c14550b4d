use crate::error::CarveError;
use std::ops::{Index, IndexMut};

/// The basic grid underneath everything: an addressable two-dimensional
/// field holding whatever a stage needs per cell.  Pixels for the
/// raster, luminance and energies for the energy builder, parent
/// columns for the seam finder.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Copy> {
    pub(crate) width: u32,
    pub(crate) height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map filled with the content type's default.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }
}

impl<P: Copy> TwoDimensionalMap<P> {
    /// Wrap an existing row-major vector.  Fails if the vector is not
    /// exactly `width * height` long; the error is built by the caller
    /// so each stage can report in its own terms.
    pub fn from_vec<F>(width: u32, height: u32, data: Vec<P>, err: F) -> Result<Self, CarveError>
    where
        F: FnOnce(String) -> CarveError,
    {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(err(format!(
                "{}x{} needs {} cells, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// One row, as a slice.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<P> {
        self.data
    }

    /// Copy every cell except the one named for each row into a map one
    /// column narrower.  `columns` must hold one in-range column per row;
    /// callers validate that first.
    pub fn without_path(&self, columns: &[u32]) -> Self {
        debug_assert_eq!(columns.len(), self.height as usize);
        let width = self.width as usize;
        let mut data = Vec::with_capacity((width - 1) * self.height as usize);
        for (row, &skip) in self.data.chunks_exact(width).zip(columns) {
            let skip = skip as usize;
            data.extend_from_slice(&row[..skip]);
            data.extend_from_slice(&row[skip + 1..]);
        }
        TwoDimensionalMap {
            width: self.width - 1,
            height: self.height,
            data,
        }
    }
}

impl<P: Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}
