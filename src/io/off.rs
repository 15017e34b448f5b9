use crate::export::{MeshFormat, export_mesh};
use crate::indexed::IndexedMesh;
use crate::io::render;
use crate::mesh::Mesh;
use crate::options::ExportOptions;
use std::io::Write;

/// Write an **OFF** document.
///
/// The header gives vertex count, face count and an edge count of zero
/// (readers ignore it). Vertices follow in first-seen order, then one line
/// per face with its corner count and zero-based vertex ids.
pub fn write_off<W: Write>(writer: &mut W, mesh: &IndexedMesh) -> std::io::Result<()> {
    writeln!(writer, "OFF {} {} 0", mesh.vertices.len(), mesh.faces.len())?;
    for key in mesh.vertices.keys() {
        writeln!(writer, "{key}")?;
    }
    for face in &mesh.faces {
        write!(writer, "{}", face.indices.len())?;
        for id in &face.indices {
            write!(writer, " {id}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

impl Mesh {
    /// Convert this Mesh to an **OFF** string. Faces are kept as polygons.
    pub fn to_off(&self, options: &ExportOptions) -> String {
        render(|out| export_mesh(self, MeshFormat::Off, out, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number_format::NumberFormat;
    use nalgebra::Point3;

    #[test]
    fn header_vertices_and_faces() {
        let mut mesh = IndexedMesh::new(NumberFormat::default());
        mesh.push_face(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let mut out = Vec::new();
        write_off(&mut out, &mesh).expect("write to memory");
        assert_eq!(
            String::from_utf8_lossy(&out),
            "OFF 4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n"
        );
    }

    #[test]
    fn empty_document() {
        let mut out = Vec::new();
        write_off(&mut out, &IndexedMesh::new(NumberFormat::default())).expect("write to memory");
        assert_eq!(String::from_utf8_lossy(&out), "OFF 0 0 0\n");
    }
}
