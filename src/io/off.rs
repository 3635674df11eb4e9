//! OFF mesh reader/writer for the models category.
//!
//! The viewer's example models ship as Object File Format meshes. The
//! reader triangulates polygonal faces as fans and derives per-vertex
//! normals by area-weighted averaging of the incident face normals (the
//! format itself carries no normals, so a write/read cycle preserves
//! vertices and connectivity and recomputes shading data).

use super::ContentLines;
use crate::math::{Point3, Vector3};
use crate::types::TriangulatedMesh3;
use std::io::{self, BufRead, Write};

/// Errors raised while reading an OFF mesh.
#[derive(Debug)]
pub enum OffError {
    Io(io::Error),
    /// A line could not be parsed or references a missing vertex.
    Malformed { line: usize, reason: String },
}

impl std::fmt::Display for OffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffError::Io(e) => write!(f, "I/O error: {e}"),
            OffError::Malformed { line, reason } => {
                write!(f, "Malformed OFF file at line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for OffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OffError::Io(e) => Some(e),
            OffError::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for OffError {
    fn from(e: io::Error) -> Self {
        OffError::Io(e)
    }
}

/// Write a mesh as OFF text (vertices and triangle faces; OFF carries no
/// normals).
pub fn write_off<W: Write>(mesh: &TriangulatedMesh3, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "OFF")?;
    writeln!(
        writer,
        "{} {} 0",
        mesh.vertices.len(),
        mesh.triangle_count()
    )?;
    for v in &mesh.vertices {
        writeln!(writer, "{} {} {}", v.x, v.y, v.z)?;
    }
    for t in mesh.indices.chunks(3) {
        writeln!(writer, "3 {} {} {}", t[0], t[1], t[2])?;
    }
    Ok(())
}

/// Read an OFF mesh, triangulating polygonal faces and averaging vertex
/// normals.
pub fn read_off<R: BufRead>(reader: &mut R) -> Result<TriangulatedMesh3, OffError> {
    let mut lines = ContentLines::new(reader);

    let (header_line, header) = lines.next_content()?.ok_or(OffError::Malformed {
        line: 0,
        reason: "empty file".into(),
    })?;
    if header.trim() != "OFF" {
        return Err(OffError::Malformed {
            line: header_line,
            reason: format!("expected OFF header, got {header:?}"),
        });
    }

    let (counts_line, counts) = lines.next_content()?.ok_or(OffError::Malformed {
        line: header_line,
        reason: "missing element counts".into(),
    })?;
    let mut parts = counts.split_whitespace();
    let nv = parse_field::<usize>(&mut parts, counts_line, "vertex count")?;
    let nf = parse_field::<usize>(&mut parts, counts_line, "face count")?;

    let mut vertices = Vec::with_capacity(nv);
    for _ in 0..nv {
        let (line, text) = lines.next_content()?.ok_or(OffError::Malformed {
            line: counts_line,
            reason: format!("expected {nv} vertices"),
        })?;
        let mut parts = text.split_whitespace();
        let x = parse_field::<f64>(&mut parts, line, "x")?;
        let y = parse_field::<f64>(&mut parts, line, "y")?;
        let z = parse_field::<f64>(&mut parts, line, "z")?;
        vertices.push(Point3::new(x, y, z));
    }

    let mut indices: Vec<u32> = Vec::with_capacity(nf * 3);
    for _ in 0..nf {
        let (line, text) = lines.next_content()?.ok_or(OffError::Malformed {
            line: counts_line,
            reason: format!("expected {nf} faces"),
        })?;
        let mut parts = text.split_whitespace();
        let k = parse_field::<usize>(&mut parts, line, "face size")?;
        if k < 3 {
            return Err(OffError::Malformed {
                line,
                reason: format!("face with {k} vertices"),
            });
        }
        let mut face = Vec::with_capacity(k);
        for _ in 0..k {
            let idx = parse_field::<u32>(&mut parts, line, "vertex index")?;
            if idx as usize >= nv {
                return Err(OffError::Malformed {
                    line,
                    reason: format!("vertex index {idx} out of range ({nv} vertices)"),
                });
            }
            face.push(idx);
        }
        // Fan triangulation of the polygon.
        for w in 1..k - 1 {
            indices.extend_from_slice(&[face[0], face[w], face[w + 1]]);
        }
    }

    let normals = average_normals(&vertices, &indices);
    Ok(TriangulatedMesh3::new(vertices, normals, indices))
}

/// Area-weighted vertex normals: accumulate each triangle's cross
/// product on its corners, then normalize.
fn average_normals(vertices: &[Point3], indices: &[u32]) -> Vec<Vector3> {
    let mut normals = vec![Vector3::zeros(); vertices.len()];
    for t in indices.chunks(3) {
        let (a, b, c) = (
            vertices[t[0] as usize],
            vertices[t[1] as usize],
            vertices[t[2] as usize],
        );
        let face_normal = (b - a).cross(&(c - a));
        for &i in t {
            normals[i as usize] += face_normal;
        }
    }
    for n in &mut normals {
        let len = n.norm();
        *n = if len > 1e-15 {
            *n / len
        } else {
            Vector3::new(0.0, 0.0, 1.0)
        };
    }
    normals
}

fn parse_field<'a, T: std::str::FromStr>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: usize,
    name: &str,
) -> Result<T, OffError> {
    let text = parts.next().ok_or_else(|| OffError::Malformed {
        line,
        reason: format!("missing field {name}"),
    })?;
    text.parse().map_err(|_| OffError::Malformed {
        line,
        reason: format!("cannot parse {name} from {text:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRAHEDRON: &str = "OFF\n\
        4 4 6\n\
        1 1 1\n\
        1 -1 -1\n\
        -1 1 -1\n\
        -1 -1 1\n\
        3 0 1 2\n\
        3 0 3 1\n\
        3 0 2 3\n\
        3 1 3 2\n";

    #[test]
    fn reads_tetrahedron() {
        let mesh = read_off(&mut TETRAHEDRON.as_bytes()).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 4);
        for (i, n) in mesh.normals.iter().enumerate() {
            assert!(
                (n.norm() - 1.0).abs() < 1e-12,
                "normal {i} has length {}",
                n.norm()
            );
        }
    }

    #[test]
    fn quad_faces_are_fanned() {
        let text = "OFF\n4 1 4\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
        let mesh = read_off(&mut text.as_bytes()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn round_trip_preserves_counts_and_connectivity() {
        let mesh = read_off(&mut TETRAHEDRON.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_off(&mesh, &mut buf).unwrap();
        let reloaded = read_off(&mut buf.as_slice()).unwrap();
        assert_eq!(reloaded.vertices, mesh.vertices);
        assert_eq!(reloaded.indices, mesh.indices);
    }

    #[test]
    fn out_of_range_index_rejected() {
        let text = "OFF\n3 1 3\n0 0 0\n1 0 0\n0 1 0\n3 0 1 9\n";
        let err = read_off(&mut text.as_bytes()).unwrap_err();
        assert!(matches!(err, OffError::Malformed { .. }), "{err}");
    }

    #[test]
    fn missing_header_rejected() {
        let text = "3 1 3\n0 0 0\n";
        assert!(read_off(&mut text.as_bytes()).is_err());
    }
}
