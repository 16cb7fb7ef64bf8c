//! Main Raster type

use crate::error::{Error, Result};
use crate::raster::{Direction, GeoTransform, RasterElement};
use ndarray::{Array2, ArrayView2};
use std::ops::{Index, IndexMut};

/// A georeferenced 2D raster grid.
///
/// `Raster<T>` stores values of type `T` in row-major order together with
/// its [`GeoTransform`] and an optional no-data sentinel. Cells are
/// addressed by `(row, col)` or by linear index `row * cols + col`.
///
/// Checked accessors (`get`, `set`, `add`, `get_index`) return
/// [`Error::IndexOutOfBounds`]; the `Index`/`IndexMut` impls panic on a bad
/// index like slice indexing does, and are meant for loops whose bounds were
/// validated up front.
///
/// # Example
///
/// ```
/// use hydroside_core::Raster;
///
/// let mut raster: Raster<f64> = Raster::new(10, 10);
/// raster.set(2, 3, 42.0).unwrap();
/// raster.add(2, 3, 1.0).unwrap();
/// assert_eq!(raster.get(2, 3).unwrap(), 43.0);
/// assert_eq!(raster[(2, 3)], 43.0);
/// ```
#[derive(Debug, Clone)]
pub struct Raster<T: RasterElement> {
    /// Raster data stored in row-major order (row, col)
    data: Array2<T>,
    transform: GeoTransform,
    nodata: Option<T>,
}

impl<T: RasterElement> Raster<T> {
    /// Create a new raster filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_array(Array2::zeros((rows, cols)))
    }

    /// Create a new raster filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self::from_array(Array2::from_elem((rows, cols), value))
    }

    /// Create a raster from row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self::from_array(array))
    }

    /// Create a raster from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self {
            data,
            transform: GeoTransform::default(),
            nodata: None,
        }
    }

    /// Create a zero-filled raster of another cell type sharing this
    /// raster's shape and transform. The no-data sentinel is not carried over.
    pub fn with_same_meta<U: RasterElement>(&self) -> Raster<U> {
        Raster {
            data: Array2::zeros(self.data.dim()),
            transform: self.transform,
            nodata: None,
        }
    }

    /// Create a raster with the same dimensions and metadata, filled with a value
    pub fn like(&self, fill_value: T) -> Self {
        Self {
            data: Array2::from_elem(self.data.dim(), fill_value),
            transform: self.transform,
            nodata: self.nodata,
        }
    }

    // Dimensions

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether signed coordinates fall inside the grid
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows() && (col as usize) < self.cols()
    }

    /// Fail with [`Error::SizeMismatch`] unless `other` has the same shape.
    pub fn check_shape<U: RasterElement>(
        &self,
        other: &Raster<U>,
        name: &'static str,
    ) -> Result<()> {
        let (er, ec) = self.shape();
        let (ar, ac) = other.shape();
        if (er, ec) != (ar, ac) {
            return Err(Error::SizeMismatch { name, er, ec, ar, ac });
        }
        Ok(())
    }

    // Linear indexing

    /// Linear index of (row, col)
    pub fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        self.bounds_check(row, col)?;
        Ok(row * self.cols() + col)
    }

    /// (row, col) of a linear index
    pub fn cell_of(&self, index: usize) -> Result<(usize, usize)> {
        if index >= self.len() {
            return Err(Error::LinearIndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok((index / self.cols(), index % self.cols()))
    }

    /// Get value by linear index
    pub fn get_index(&self, index: usize) -> Result<T> {
        let (row, col) = self.cell_of(index)?;
        Ok(self.data[(row, col)])
    }

    /// Set value by linear index
    pub fn set_index(&mut self, index: usize, value: T) -> Result<()> {
        let (row, col) = self.cell_of(index)?;
        self.data[(row, col)] = value;
        Ok(())
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.bounds_check(row, col)?;
        Ok(self.data[(row, col)])
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.bounds_check(row, col)?;
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Add to the value at (row, col)
    pub fn add(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.bounds_check(row, col)?;
        let cell = &mut self.data[(row, col)];
        *cell = *cell + value;
        Ok(())
    }

    /// Set every cell to `value`
    pub fn assign(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Iterate over all values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    /// Iterate over `((row, col), value)` in row-major order
    pub fn indexed_iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        self.data.indexed_iter()
    }

    /// Neighbour of (row, col) in `direction`, if it lies inside the grid
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
        direction.neighbor(row, col, self.rows(), self.cols())
    }

    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the raster and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    // Metadata

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    pub fn set_nodata(&mut self, nodata: Option<T>) {
        self.nodata = nodata;
    }

    /// Cell size (assumes square cells)
    pub fn cell_size(&self) -> f64 {
        self.transform.cell_size()
    }

    /// Area of a single cell
    pub fn cell_area(&self) -> f64 {
        self.transform.cell_area()
    }

    // Value checks

    /// Check if a value is no-data
    pub fn is_nodata(&self, value: T) -> bool {
        value.is_nodata(self.nodata)
    }

    /// Check if cell at (row, col) contains no-data
    pub fn is_nodata_at(&self, row: usize, col: usize) -> Result<bool> {
        let value = self.get(row, col)?;
        Ok(self.is_nodata(value))
    }

    /// Inside the grid and not no-data
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && !self.is_nodata(self.data[(row, col)])
    }

    /// Number of cells that are not no-data
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|&&v| !self.is_nodata(v)).count()
    }

    fn bounds_check(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }
}

impl<T: RasterElement> Index<(usize, usize)> for Raster<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &T {
        &self.data[index]
    }
}

impl<T: RasterElement> IndexMut<(usize, usize)> for Raster<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut T {
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster: Raster<f64> = Raster::new(100, 200);
        assert_eq!(raster.rows(), 100);
        assert_eq!(raster.cols(), 200);
        assert_eq!(raster.shape(), (100, 200));
        assert!(!raster.is_empty());
        assert!(Raster::<f64>::new(0, 5).is_empty());
    }

    #[test]
    fn test_raster_access() {
        let mut raster: Raster<f64> = Raster::new(10, 10);
        raster.set(5, 5, 42.0).unwrap();
        assert_eq!(raster.get(5, 5).unwrap(), 42.0);
        assert!(raster.get(10, 0).is_err());
        assert!(raster.set(0, 10, 1.0).is_err());
    }

    #[test]
    fn test_linear_index() {
        let mut raster: Raster<i32> = Raster::new(3, 4);
        assert_eq!(raster.index_of(2, 1).unwrap(), 9);
        assert_eq!(raster.cell_of(9).unwrap(), (2, 1));

        raster.set_index(9, 7).unwrap();
        assert_eq!(raster[(2, 1)], 7);
        assert_eq!(raster.get_index(9).unwrap(), 7);
        assert!(matches!(
            raster.get_index(12),
            Err(Error::LinearIndexOutOfBounds { index: 12, len: 12 })
        ));
    }

    #[test]
    fn test_add_and_assign() {
        let mut raster: Raster<f64> = Raster::filled(2, 2, 1.0);
        raster.add(1, 1, 2.5).unwrap();
        assert_eq!(raster[(1, 1)], 3.5);

        raster.assign(0.0);
        assert!(raster.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_nodata_mask() {
        let mut raster = Raster::from_vec(vec![1.0, -9999.0, f64::NAN, 4.0], 2, 2).unwrap();
        raster.set_nodata(Some(-9999.0));

        assert!(raster.is_valid(0, 0));
        assert!(!raster.is_valid(0, 1));
        assert!(!raster.is_valid(1, 0));
        assert!(!raster.is_valid(5, 5));
        assert_eq!(raster.valid_count(), 2);
    }

    #[test]
    fn test_check_shape() {
        let a: Raster<f64> = Raster::new(3, 3);
        let b: Raster<i32> = Raster::new(3, 4);
        assert!(a.check_shape(&a.like(1.0), "same").is_ok());
        assert!(matches!(
            a.check_shape(&b, "weight"),
            Err(Error::SizeMismatch { name: "weight", .. })
        ));
    }

    #[test]
    fn test_neighbor_clipping() {
        let raster: Raster<f64> = Raster::new(3, 3);
        assert_eq!(raster.neighbor(0, 0, Direction::N), None);
        assert_eq!(raster.neighbor(0, 0, Direction::SE), Some((1, 1)));
        assert_eq!(raster.neighbor(2, 2, Direction::E), None);
    }
}
