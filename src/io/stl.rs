use crate::export::{MeshFormat, export_mesh};
use crate::indexed::IndexedMesh;
use crate::io::render;
use crate::mesh::Mesh;
use crate::options::ExportOptions;
use std::io::Write;

/// Write triangles as an **ASCII STL** document named `options.model_name`.
///
/// Only three-corner faces are written; vertex lines repeat the canonical
/// key of each corner.
///
/// ```text
/// solid name
///   facet normal nx ny nz
///     outer loop
///       vertex x y z
///       vertex x y z
///       vertex x y z
///     endloop
///   endfacet
/// endsolid name
/// ```
pub fn write_stl<W: Write>(
    writer: &mut W,
    mesh: &IndexedMesh,
    options: &ExportOptions,
) -> std::io::Result<()> {
    let fmt = &options.number_format;
    let name = &options.model_name;

    writeln!(writer, "solid {name}")?;
    for face in mesh.faces.iter().filter(|f| f.indices.len() == 3) {
        writeln!(writer, "  facet normal {}", fmt.vector3(&face.normal))?;
        writeln!(writer, "    outer loop")?;
        for key in mesh.corner_keys(face) {
            writeln!(writer, "      vertex {key}")?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {name}")?;
    Ok(())
}

/// Write the same triangles as a **binary STL** through `stl_io`.
#[cfg(feature = "stl-io")]
#[allow(clippy::unnecessary_cast)]
pub fn write_stl_binary<W: Write>(writer: &mut W, mesh: &IndexedMesh) -> std::io::Result<()> {
    use stl_io::{Normal, Triangle, Vertex};

    let triangles: Vec<Triangle> = mesh
        .faces
        .iter()
        .filter(|f| f.indices.len() == 3)
        .map(|face| {
            let n = face.normal;
            let mut corners = mesh.corners(face);
            let mut next = || {
                corners
                    .next()
                    .map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32]))
                    .unwrap_or_else(|| Vertex::new([0.0; 3]))
            };
            Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [next(), next(), next()],
            }
        })
        .collect();

    stl_io::write_stl(writer, triangles.iter())
}

impl Mesh {
    /// Convert this Mesh to an **ASCII STL** string.
    ///
    /// Faces are triangulated first; collapsed triangles are left out.
    pub fn to_stl_ascii(&self, options: &ExportOptions) -> String {
        render(|out| export_mesh(self, MeshFormat::Stl, out, options))
    }

    /// Convert this Mesh to a **binary STL** byte vector.
    #[cfg(feature = "stl-io")]
    pub fn to_stl_binary(&self, options: &ExportOptions) -> crate::errors::ExportResult<Vec<u8>> {
        let mut out = Vec::new();
        export_mesh(self, MeshFormat::StlBinary, &mut out, options)?;
        Ok(out)
    }
}
