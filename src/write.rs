//! serializing grids back into the binary file format
//!
//! The writer is the mirror image of [`read_grid`](`crate::read_grid`):
//! files produced here parse back to a bit-exact copy of the grid.

use crate::prelude::*;

/// Write a grid to a `Write`r in the binary grid-file layout.
///
/// The header stores the *cell* counts, then every point follows in
/// row-major order as an `(x, y)` pair of little-endian `f64`s.
pub fn write_grid<W: Write>(mut writer: W, grid: &Grid) -> Result<(), Error> {
    let spans = grid.spans();

    writer.write_all(&(spans.width as i64).to_le_bytes())?;
    writer.write_all(&(spans.height as i64).to_le_bytes())?;

    for point in grid.points_row_major() {
        writer.write_all(&point.x.to_le_bytes())?;
        writer.write_all(&point.y.to_le_bytes())?;
    }

    Ok(())
}
