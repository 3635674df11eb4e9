//! Control-grid persistence.
//!
//! Line-oriented text format:
//!
//! ```text
//! # curvet control grid
//! toroid
//! 4 6
//! 2.25 0 0
//! ...
//! ```
//!
//! Topology tag, `rows cols` header, then one `x y z` line per control
//! point in row-major order. Point order is what reconstructs the
//! adjacency sharing between patches, so it must be preserved exactly;
//! coordinates are written with Rust's shortest round-trip float
//! formatting, making the save/load cycle lossless.

use super::ContentLines;
use crate::bspline::{BSplineSurface, PatchError, Topology};
use crate::math::Point3;
use std::io::{self, BufRead, Write};

/// Errors raised while reading a persisted control grid.
#[derive(Debug)]
pub enum GridIoError {
    Io(io::Error),
    /// A line could not be parsed.
    Malformed { line: usize, reason: String },
    /// The topology tag is not one this engine writes.
    UnknownTopology { tag: String },
    /// The loaded grid disagrees with the topology's expected shape.
    Inconsistent(PatchError),
}

impl std::fmt::Display for GridIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridIoError::Io(e) => write!(f, "I/O error: {e}"),
            GridIoError::Malformed { line, reason } => {
                write!(f, "Malformed grid file at line {line}: {reason}")
            }
            GridIoError::UnknownTopology { tag } => write!(f, "Unknown topology tag {tag:?}"),
            GridIoError::Inconsistent(e) => write!(f, "Inconsistent grid: {e}"),
        }
    }
}

impl std::error::Error for GridIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridIoError::Io(e) => Some(e),
            GridIoError::Inconsistent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GridIoError {
    fn from(e: io::Error) -> Self {
        GridIoError::Io(e)
    }
}

impl From<PatchError> for GridIoError {
    fn from(e: PatchError) -> Self {
        GridIoError::Inconsistent(e)
    }
}

/// Write a patch collection's control grid to the given writer.
pub fn write_grid<W: Write>(surface: &BSplineSurface, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "# curvet control grid")?;
    writeln!(writer, "{}", surface.topology().tag())?;
    writeln!(writer, "{} {}", surface.rows(), surface.cols())?;
    for p in surface.points() {
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }
    log::info!(
        "saved {} control grid ({}x{})",
        surface.topology().tag(),
        surface.rows(),
        surface.cols()
    );
    Ok(())
}

/// Read a patch collection's control grid back from the given reader.
///
/// The reconstructed surface is validated against the topology's
/// adjacency rule before it is returned; on any failure the caller's
/// previous surface stays untouched.
pub fn read_grid<R: BufRead>(reader: &mut R) -> Result<BSplineSurface, GridIoError> {
    let mut lines = ContentLines::new(reader);

    let (line_no, tag) = lines.next_content()?.ok_or(GridIoError::Malformed {
        line: 0,
        reason: "missing topology tag".into(),
    })?;
    let topology = Topology::from_tag(tag.trim()).ok_or_else(|| GridIoError::UnknownTopology {
        tag: tag.trim().to_string(),
    })?;

    let (dims_line, dims) = lines.next_content()?.ok_or(GridIoError::Malformed {
        line: line_no,
        reason: "missing grid dimensions".into(),
    })?;
    let mut parts = dims.split_whitespace();
    let rows = parse_field::<usize>(&mut parts, dims_line, "rows")?;
    let cols = parse_field::<usize>(&mut parts, dims_line, "cols")?;

    let mut points = Vec::with_capacity(rows * cols);
    for _ in 0..rows * cols {
        let (point_line, text) = lines.next_content()?.ok_or(GridIoError::Malformed {
            line: dims_line,
            reason: format!("expected {} control points", rows * cols),
        })?;
        let mut parts = text.split_whitespace();
        let x = parse_field::<f64>(&mut parts, point_line, "x")?;
        let y = parse_field::<f64>(&mut parts, point_line, "y")?;
        let z = parse_field::<f64>(&mut parts, point_line, "z")?;
        points.push(Point3::new(x, y, z));
    }

    let surface = BSplineSurface::from_grid(topology, rows, cols, points)?;
    log::info!(
        "loaded {} control grid ({rows}x{cols})",
        surface.topology().tag()
    );
    Ok(surface)
}

fn parse_field<'a, T: std::str::FromStr>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: usize,
    name: &str,
) -> Result<T, GridIoError> {
    let text = parts.next().ok_or_else(|| GridIoError::Malformed {
        line,
        reason: format!("missing field {name}"),
    })?;
    text.parse().map_err(|_| GridIoError::Malformed {
        line,
        reason: format!("cannot parse {name} from {text:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    #[test]
    fn round_trip_is_lossless() {
        let mut surface = BSplineSurface::toroid(4, 5, 0.75, 1.5).unwrap();
        // Perturb a point so the grid is not a pristine seed.
        surface
            .modify(1, 2, 3, 0, Vector3::new(0.125, -0.25, 1.0 / 3.0))
            .unwrap();

        let mut buf = Vec::new();
        write_grid(&surface, &mut buf).unwrap();
        let loaded = read_grid(&mut buf.as_slice()).unwrap();

        assert_eq!(loaded, surface);
    }

    #[test]
    fn unknown_topology_rejected() {
        let text = "moebius\n4 4\n";
        let err = read_grid(&mut text.as_bytes()).unwrap_err();
        assert!(matches!(err, GridIoError::UnknownTopology { .. }), "{err}");
    }

    #[test]
    fn truncated_point_list_rejected() {
        let text = "open\n4 4\n0 0 0\n1 1 1\n";
        let err = read_grid(&mut text.as_bytes()).unwrap_err();
        assert!(matches!(err, GridIoError::Malformed { .. }), "{err}");
    }

    #[test]
    fn undersized_grid_rejected() {
        let mut text = String::from("open\n2 4\n");
        for _ in 0..8 {
            text.push_str("0 0 0\n");
        }
        let err = read_grid(&mut text.as_bytes()).unwrap_err();
        assert!(matches!(err, GridIoError::Inconsistent(_)), "{err}");
    }

    #[test]
    fn comments_and_blank_lines_skipped() {
        let mut surface = BSplineSurface::cylindric(4, 1, 1.0, -1.0, 1.0).unwrap();
        surface.modify(0, 0, 1, 1, Vector3::new(0.0, 0.5, 0.0)).unwrap();

        let mut buf = Vec::new();
        write_grid(&surface, &mut buf).unwrap();
        let mut text = String::from_utf8(buf).unwrap();
        text = text.replace('\n', "\n\n# noise\n");

        let loaded = read_grid(&mut text.as_bytes()).unwrap();
        assert_eq!(loaded, surface);
    }
}
