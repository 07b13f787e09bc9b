#![doc = include_str!("../README.md")]

pub mod grid;
pub mod prelude;
pub mod read;
pub mod render;
pub mod svg;
mod write;

pub use grid::{Grid, GridSpans, Point};

pub use read::read_grid;
pub use read::read_grid_file;
pub use read::ReadError;

pub use render::render_wireframe;
pub use render::Surface;

pub use svg::SvgSurface;

pub use write::write_grid;

pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Error while reading binary grid file: {0}")]
    Read(#[from] read::ReadError),
    #[error("Could not write SVG data: `{0}`")]
    XmlWrite(#[from] quick_xml::Error),
}
