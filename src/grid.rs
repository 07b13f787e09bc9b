//! # Grid containers
//!
//! A [`Grid`] holds the fully materialized structured mesh: a 2D row-major
//! array of [`Point`]s together with the [`GridSpans`] read from the file
//! header. Spans store *cell* counts, so a grid with spans `(width, height)`
//! has `height + 1` rows and `width + 1` columns of points.
//!
//! Grids are constructed once (by [`read_grid`](`crate::read_grid`) or
//! [`Grid::from_buffer`]) and never mutated afterwards.

use crate::prelude::*;

/// A single grid point. Points carry no identity beyond their position
/// in the grid.
#[derive(Constructor, Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Cell counts of the computational domain, as stored in the file header.
///
/// The point counts along each direction are one larger than the cell
/// counts: `x_len()` points per row and `y_len()` rows. Zero cells in a
/// direction is valid and leaves a single line of points.
#[derive(Constructor, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridSpans {
    pub width: usize,
    pub height: usize,
}

impl GridSpans {
    /// number of points along the X direction (columns of the grid)
    pub fn x_len(&self) -> usize {
        self.width + 1
    }

    /// number of points along the Y direction (rows of the grid)
    pub fn y_len(&self) -> usize {
        self.height + 1
    }

    /// total number of points the grid holds
    pub fn num_points(&self) -> usize {
        self.x_len() * self.y_len()
    }
}

/// A structured mesh with `y_len` rows and `x_len` columns of points.
///
/// Dereferences to the underlying [`Array2<Point>`](`ndarray::Array2`)
/// indexed `[(row, col)]`, row 0 being the first row of points in the file.
#[derive(Deref, Debug, Clone, PartialEq)]
pub struct Grid {
    #[deref]
    points: Array2<Point>,
    spans: GridSpans,
}

impl Grid {
    /// Reshape a flat row-major buffer of points into a grid.
    ///
    /// Element `k` of the buffer lands at row `k / spans.x_len()`, column
    /// `k % spans.x_len()`; no element is reordered.
    ///
    /// ## Panics
    ///
    /// Panics if `buffer.len() != spans.num_points()`. Readers are expected
    /// to have consumed exactly the point count the header demands.
    pub fn from_buffer(buffer: Vec<Point>, spans: &GridSpans) -> Self {
        let points = Array2::from_shape_vec((spans.y_len(), spans.x_len()), buffer).unwrap();
        Grid {
            points,
            spans: *spans,
        }
    }

    pub fn spans(&self) -> GridSpans {
        self.spans
    }

    pub fn point(&self, row: usize, col: usize) -> Point {
        self.points[(row, col)]
    }

    /// iterator over the rows of the grid, each an ordered view of
    /// `x_len` points
    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, Point>> {
        self.points.rows().into_iter()
    }

    /// iterator over the columns of the grid, each an ordered view of
    /// `y_len` points
    pub fn columns(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, Point>> {
        self.points.columns().into_iter()
    }

    /// all points in row-major order, exactly as they appear in a grid file
    pub fn points_row_major(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}
