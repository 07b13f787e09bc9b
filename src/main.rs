use gridwire::prelude::*;

use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let mut args = std::env::args().skip(1);

    let input = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: gridwire <grid.bin> [out.svg]");
            process::exit(2);
        }
    };

    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("svg"));

    if let Err(e) = run(&input, &output) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(input: &Path, output: &Path) -> Result<(), Error> {
    // the grid is parsed in full before the output file is touched, so a
    // malformed input never leaves a partial figure on disk
    let grid = read_grid_file(input)?;

    let file = std::fs::File::create(output)?;
    let mut surface = SvgSurface::new(BufWriter::new(file));
    render_wireframe(&grid, &mut surface)?;

    Ok(())
}
