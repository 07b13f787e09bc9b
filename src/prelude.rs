//! Common traits and types that are useful for working with `gridwire`
#![allow(unused_imports)]

pub use crate::grid::{Grid, GridSpans, Point};
pub use crate::read::{read_grid, read_grid_file};
pub use crate::render::{render_wireframe, Surface};
pub use crate::svg::SvgSurface;
pub use crate::write::write_grid;

pub use crate::Error;
pub(crate) use crate::ReadError;

pub(crate) use std::io::{Read, Write};

pub(crate) use derive_more::{Constructor, Deref};

pub(crate) use ndarray::Array2;
