//! file-to-figure pipeline: write a grid file to disk, read it back,
//! render the wireframe to an SVG document

use gridwire::prelude::*;

fn sheared_grid(spans: GridSpans) -> Grid {
    let mut buffer = Vec::with_capacity(spans.num_points());

    for row in 0..spans.y_len() {
        for col in 0..spans.x_len() {
            // shear keeps every point distinct
            let x = col as f64 + 0.1 * row as f64;
            let y = row as f64;
            buffer.push(Point::new(x, y));
        }
    }

    Grid::from_buffer(buffer, &spans)
}

#[test]
fn grid_file_to_svg() {
    let spans = GridSpans::new(4, 3);
    let grid = sheared_grid(spans);

    let mut bytes = Vec::new();
    write_grid(&mut bytes, &grid).unwrap();

    // suffix with the process id so concurrent suite runs cannot race
    let path =
        std::env::temp_dir().join(format!("gridwire_pipeline_{}.bin", std::process::id()));
    std::fs::write(&path, &bytes).unwrap();

    let parsed = read_grid_file(&path).unwrap();
    assert_eq!(parsed, grid);

    let mut surface = SvgSurface::new(Vec::new());
    render_wireframe(&parsed, &mut surface).unwrap();

    let document = String::from_utf8(surface.into_inner()).unwrap();
    let expected_polylines = spans.y_len() + spans.x_len();
    assert_eq!(document.matches("<polyline").count(), expected_polylines);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn truncated_file_renders_nothing() {
    let grid = sheared_grid(GridSpans::new(2, 2));

    let mut bytes = Vec::new();
    write_grid(&mut bytes, &grid).unwrap();
    bytes.truncate(bytes.len() - 8);

    // the reader fails before any grid exists, so no draw call can happen
    assert!(read_grid(bytes.as_slice()).is_err());
}
