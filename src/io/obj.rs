use crate::export::{MeshFormat, export_mesh};
use crate::indexed::IndexedMesh;
use crate::io::render;
use crate::mesh::Mesh;
use crate::options::ExportOptions;
use std::io::Write;

/// Write a **Wavefront OBJ** document.
///
/// Vertex references are 1-based: vertex id `i` is written as `i + 1`.
/// Faces keep however many corners they have.
pub fn write_obj<W: Write>(
    writer: &mut W,
    mesh: &IndexedMesh,
    options: &ExportOptions,
) -> std::io::Result<()> {
    let producer = &options.producer;

    writeln!(writer, "# WaveFront *.obj file (generated by {producer})")?;
    writeln!(writer)?;
    for key in mesh.vertices.keys() {
        writeln!(writer, "v {key}")?;
    }
    writeln!(writer)?;
    writeln!(writer, "g Object")?;
    for face in &mesh.faces {
        write!(writer, "f")?;
        for id in &face.indices {
            write!(writer, " {}", id + 1)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer)?;
    writeln!(writer, "# end WaveFront *.obj file (generated by {producer})")?;
    Ok(())
}

impl Mesh {
    /// Convert this Mesh to an **OBJ** string. Faces are kept as polygons.
    pub fn to_obj(&self, options: &ExportOptions) -> String {
        render(|out| export_mesh(self, MeshFormat::Obj, out, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number_format::NumberFormat;
    use nalgebra::Point3;

    #[test]
    fn one_based_faces() {
        let mut mesh = IndexedMesh::new(NumberFormat::default());
        mesh.push_face(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let mut out = Vec::new();
        let options = ExportOptions::default().with_producer("unit test");
        write_obj(&mut out, &mesh, &options).expect("write to memory");
        assert_eq!(
            String::from_utf8_lossy(&out),
            "# WaveFront *.obj file (generated by unit test)\n\
             \n\
             v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             \n\
             g Object\n\
             f 1 2 3\n\
             \n\
             # end WaveFront *.obj file (generated by unit test)\n"
        );
    }
}
