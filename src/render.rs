//! # Wireframe rendering
//!
//! Rendering is a straight-line pipeline over a parsed [`Grid`]: one
//! polyline through every row of points, one polyline through every
//! column, then a single [`show`](`Surface::show`) call. A grid with spans
//! `(width, height)` always produces exactly `(height+1) + (width+1)`
//! polylines; zero-cell directions still contribute their single line, and
//! a 1-point polyline is valid.

use crate::prelude::*;

/// An ordered-polyline drawing surface.
///
/// This is the seam to the plotting backend: [`render_wireframe`] enqueues
/// polylines and issues one final `show` to display or flush the composed
/// figure. Implementations must not emit anything user-visible before
/// `show` so that a failed render never leaves a partial figure behind.
pub trait Surface {
    /// enqueue one polyline through the ordered sequence of points
    fn polyline(&mut self, points: &[Point]) -> Result<(), Error>;

    /// display or flush the composed figure
    fn show(&mut self) -> Result<(), Error>;
}

/// Capture backend: records every polyline and does nothing on `show`.
/// Useful for assertions and for composing figures in memory.
impl Surface for Vec<Vec<Point>> {
    fn polyline(&mut self, points: &[Point]) -> Result<(), Error> {
        self.push(points.to_vec());
        Ok(())
    }

    fn show(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Draw the wireframe of a grid onto a surface.
///
/// Rows are drawn first (row 0 upward), then columns (column 0 upward),
/// followed by a single `show`. Nothing is enqueued after the first
/// failure.
pub fn render_wireframe<S: Surface>(grid: &Grid, surface: &mut S) -> Result<(), Error> {
    let spans = grid.spans();
    let mut scratch = Vec::with_capacity(spans.x_len().max(spans.y_len()));

    for row in grid.rows() {
        scratch.clear();
        scratch.extend(row.iter().copied());
        surface.polyline(&scratch)?;
    }

    // column views are strided, so they go through the same scratch buffer
    for column in grid.columns() {
        scratch.clear();
        scratch.extend(column.iter().copied());
        surface.polyline(&scratch)?;
    }

    surface.show()
}
