//! # Reading binary grid files
//!
//! The on-disk format has no magic number and no version field, so it must
//! be matched exactly:
//!
//! ```ignore
//! offset 0:    i64 width    (cell count, little endian, signed)
//! offset 8:    i64 height   (cell count, little endian, signed)
//! offset 16:   (height+1)*(width+1) repetitions of { f64 x, f64 y }
//! ```
//!
//! Points appear in row-major order, row index varying slowest. The reader
//! consumes its source in a single sequential pass with no seeking, and a
//! failure at any step aborts before any partial [`Grid`] escapes.

use crate::prelude::*;

use std::io::ErrorKind;
use std::path::Path;

const HEADER_BYTES: usize = 2 * std::mem::size_of::<i64>();
const POINT_BYTES: usize = 2 * std::mem::size_of::<f64>();

/// upper bound on the point buffer reserved up front; the header alone
/// must not be able to force a huge reservation before the body is read
const MAX_PREALLOC_POINTS: usize = 1 << 20;

/// failure modes of [`read_grid`]
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// fewer bytes were available than the format requires, either in the
    /// header or in the point data
    #[error(
        "grid file truncated: the format requires at least {expected} bytes, \
         only {available} were available"
    )]
    Truncated { expected: usize, available: usize },
    /// the header declared a negative cell count; nothing is clamped or
    /// inferred from such a file
    #[error("grid header declares negative cell counts (width: {width}, height: {height})")]
    InvalidDimensions { width: i64, height: i64 },
    #[error("io error while reading grid data: `{0}`")]
    Io(#[from] std::io::Error),
}

/// Read and parse an entire grid file at a given path.
///
/// The file handle is scoped to this call and released on every exit path,
/// including parse failures.
pub fn read_grid_file(path: &Path) -> Result<Grid, Error> {
    let file = std::fs::File::open(path)?;
    let buf_reader = std::io::BufReader::new(file);

    let grid = read_grid(buf_reader)?;
    Ok(grid)
}

/// Deserialize a binary grid from a readable source positioned at offset 0.
///
/// The source is consumed sequentially: header first, then exactly
/// `(height+1)*(width+1)` coordinate pairs in row-major point order. The
/// total byte requirement is only known once the header has been read, so
/// truncation in the body is reported against the full expected length.
pub fn read_grid<R: Read>(mut reader: R) -> Result<Grid, ReadError> {
    let mut consumed = 0;

    let width = next_i64(&mut reader, &mut consumed, HEADER_BYTES)?;
    let height = next_i64(&mut reader, &mut consumed, HEADER_BYTES)?;

    if width < 0 || height < 0 {
        return Err(ReadError::InvalidDimensions { width, height });
    }

    let spans = GridSpans::new(width as usize, height as usize);

    // a header can demand more points than the address space holds;
    // saturate so the read loop reports the truncation instead of
    // overflowing the byte arithmetic
    let num_points = spans.x_len().saturating_mul(spans.y_len());
    let expected = num_points
        .saturating_mul(POINT_BYTES)
        .saturating_add(HEADER_BYTES);

    let mut buffer = Vec::with_capacity(num_points.min(MAX_PREALLOC_POINTS));
    for _ in 0..num_points {
        let x = next_f64(&mut reader, &mut consumed, expected)?;
        let y = next_f64(&mut reader, &mut consumed, expected)?;
        buffer.push(Point::new(x, y));
    }

    Ok(Grid::from_buffer(buffer, &spans))
}

fn next_i64<R: Read>(
    reader: &mut R,
    consumed: &mut usize,
    expected: usize,
) -> Result<i64, ReadError> {
    let bytes: [u8; 8] = fill(reader, consumed)?.ok_or(ReadError::Truncated {
        expected,
        available: *consumed,
    })?;
    Ok(i64::from_le_bytes(bytes))
}

fn next_f64<R: Read>(
    reader: &mut R,
    consumed: &mut usize,
    expected: usize,
) -> Result<f64, ReadError> {
    let bytes: [u8; 8] = fill(reader, consumed)?.ok_or(ReadError::Truncated {
        expected,
        available: *consumed,
    })?;
    Ok(f64::from_le_bytes(bytes))
}

/// Fill a fixed-size buffer from the reader, tracking how many bytes have
/// been consumed so far. Returns `None` when the source runs dry mid-item,
/// with `consumed` reflecting the partial bytes that were still available.
fn fill<R: Read, const N: usize>(
    reader: &mut R,
    consumed: &mut usize,
) -> Result<Option<[u8; N]>, std::io::Error> {
    let mut bytes = [0; N];
    let mut filled = 0;

    while filled < N {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) => {
                *consumed += filled;
                return Ok(None);
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    *consumed += N;
    Ok(Some(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: i64, height: i64, points: &[(f64, f64)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        for (x, y) in points {
            bytes.extend_from_slice(&x.to_le_bytes());
            bytes.extend_from_slice(&y.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn unit_square() {
        // 2 cells worth of header, 2x2 points, row-major
        let points = [(0., 0.), (1., 0.), (0., 1.), (1., 1.)];
        let bytes = encode(1, 1, &points);

        let grid = read_grid(bytes.as_slice()).unwrap();

        assert_eq!(grid.spans(), GridSpans::new(1, 1));
        assert_eq!(grid.point(0, 0), Point::new(0., 0.));
        assert_eq!(grid.point(0, 1), Point::new(1., 0.));
        assert_eq!(grid.point(1, 0), Point::new(0., 1.));
        assert_eq!(grid.point(1, 1), Point::new(1., 1.));
    }

    #[test]
    fn row_major_flat_index() {
        let spans = GridSpans::new(2, 1);
        let points: Vec<(f64, f64)> = (0..spans.num_points())
            .map(|k| (k as f64, k as f64 * 10.))
            .collect();
        let bytes = encode(2, 1, &points);

        let grid = read_grid(bytes.as_slice()).unwrap();

        for row in 0..spans.y_len() {
            for col in 0..spans.x_len() {
                let (x, y) = points[row * spans.x_len() + col];
                assert_eq!(grid.point(row, col), Point::new(x, y));
            }
        }
    }

    #[test]
    fn single_point_grid() {
        let bytes = encode(0, 0, &[(3.5, -7.25)]);

        let grid = read_grid(bytes.as_slice()).unwrap();

        assert_eq!(grid.spans().num_points(), 1);
        assert_eq!(grid.point(0, 0), Point::new(3.5, -7.25));
    }

    #[test]
    fn truncated_body_short_one_float() {
        let points = [(0., 0.), (1., 0.), (0., 1.), (1., 1.)];
        let mut bytes = encode(1, 1, &points);
        bytes.truncate(bytes.len() - 8);

        let err = read_grid(bytes.as_slice()).unwrap_err();

        match err {
            ReadError::Truncated {
                expected,
                available,
            } => {
                assert_eq!(expected, 16 + 4 * 16);
                assert_eq!(available, 16 + 4 * 16 - 8);
            }
            other => panic!("expected truncation error, got {other}"),
        }
    }

    #[test]
    fn truncated_header() {
        let bytes = 4i64.to_le_bytes();

        let err = read_grid(bytes.as_slice()).unwrap_err();

        match err {
            ReadError::Truncated {
                expected,
                available,
            } => {
                assert_eq!(expected, 16);
                assert_eq!(available, 8);
            }
            other => panic!("expected truncation error, got {other}"),
        }
    }

    // cell counts whose point product overflows usize must surface as a
    // truncation, not as an arithmetic panic
    #[test]
    fn overflowing_header_is_truncation() {
        let bytes = encode(1 << 32, 1 << 32, &[]);

        let err = read_grid(bytes.as_slice()).unwrap_err();

        match err {
            ReadError::Truncated {
                expected,
                available,
            } => {
                assert_eq!(available, 16);
                assert!(expected > 16);
            }
            other => panic!("expected truncation error, got {other}"),
        }
    }

    // a representable but absurd point count must fail at the first body
    // read instead of reserving the full buffer up front
    #[test]
    fn huge_header_is_truncation() {
        let bytes = encode(1 << 40, 0, &[]);

        let err = read_grid(bytes.as_slice()).unwrap_err();

        match err {
            ReadError::Truncated {
                expected,
                available,
            } => {
                assert_eq!(available, 16);
                assert_eq!(expected, 16 + (((1usize << 40) + 1) * 16));
            }
            other => panic!("expected truncation error, got {other}"),
        }
    }

    #[test]
    fn negative_dimensions() {
        let bytes = encode(2, -1, &[]);

        let err = read_grid(bytes.as_slice()).unwrap_err();

        match err {
            ReadError::InvalidDimensions { width, height } => {
                assert_eq!(width, 2);
                assert_eq!(height, -1);
            }
            other => panic!("expected dimension error, got {other}"),
        }
    }
}
