#![doc = " AMF (Additive Manufacturing File Format) writer."]
#![doc = ""]
#![doc = " AMF is an XML format for 3D printing. Only triangles are legal, so"]
#![doc = " meshes are triangulated before they reach this writer."]

use crate::export::{MeshFormat, export_mesh};
use crate::indexed::IndexedMesh;
use crate::io::{escape_xml, render};
use crate::mesh::Mesh;
use crate::options::ExportOptions;
use std::io::Write;

const MATERIAL_ID: &str = "1";

#[doc = " Write triangles as an AMF document."]
#[doc = ""]
#[doc = " The root element carries `options.unit` and producer metadata. When"]
#[doc = " `options.amf_color` is set a material with that color is declared and"]
#[doc = " the volume references it."]
pub fn write_amf<W: Write>(
    writer: &mut W,
    mesh: &IndexedMesh,
    options: &ExportOptions,
) -> std::io::Result<()> {
    let fmt = &options.number_format;

    writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(writer, "<amf unit=\"{}\">", escape_xml(&options.unit))?;
    writeln!(
        writer,
        " <metadata type=\"producer\">{}</metadata>",
        escape_xml(&options.producer)
    )?;

    if let Some((r, g, b)) = options.amf_color {
        writeln!(writer, " <material id=\"{MATERIAL_ID}\">")?;
        writeln!(writer, "  <color>")?;
        writeln!(writer, "   <r>{}</r>", fmt.display(r))?;
        writeln!(writer, "   <g>{}</g>", fmt.display(g))?;
        writeln!(writer, "   <b>{}</b>", fmt.display(b))?;
        writeln!(writer, "   <a>1</a>")?;
        writeln!(writer, "  </color>")?;
        writeln!(writer, " </material>")?;
    }

    writeln!(writer, " <object id=\"0\">")?;
    writeln!(writer, "  <mesh>")?;
    writeln!(writer, "   <vertices>")?;
    for point in mesh.vertices.points() {
        writeln!(writer, "    <vertex><coordinates>")?;
        writeln!(writer, "     <x>{}</x>", fmt.display(point.x))?;
        writeln!(writer, "     <y>{}</y>", fmt.display(point.y))?;
        writeln!(writer, "     <z>{}</z>", fmt.display(point.z))?;
        writeln!(writer, "    </coordinates></vertex>")?;
    }
    writeln!(writer, "   </vertices>")?;

    if options.amf_color.is_some() {
        writeln!(writer, "   <volume materialid=\"{MATERIAL_ID}\">")?;
    } else {
        writeln!(writer, "   <volume>")?;
    }
    for face in mesh.faces.iter().filter(|f| f.indices.len() == 3) {
        writeln!(writer, "    <triangle>")?;
        writeln!(writer, "     <v1>{}</v1>", face.indices[0])?;
        writeln!(writer, "     <v2>{}</v2>", face.indices[1])?;
        writeln!(writer, "     <v3>{}</v3>", face.indices[2])?;
        writeln!(writer, "    </triangle>")?;
    }
    writeln!(writer, "   </volume>")?;
    writeln!(writer, "  </mesh>")?;
    writeln!(writer, " </object>")?;
    writeln!(writer, "</amf>")?;
    Ok(())
}

impl Mesh {
    pub fn to_amf(&self, options: &ExportOptions) -> String {
        render(|out| export_mesh(self, MeshFormat::Amf, out, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number_format::NumberFormat;
    use nalgebra::Point3;

    fn triangle_mesh() -> IndexedMesh {
        let mut mesh = IndexedMesh::new(NumberFormat::default());
        mesh.push_face(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.5, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        mesh
    }

    #[test]
    fn document_structure() {
        let mut out = Vec::new();
        let options = ExportOptions::default().with_producer("test & co");
        write_amf(&mut out, &triangle_mesh(), &options).expect("write to memory");
        let text = String::from_utf8_lossy(&out);

        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<amf unit=\"millimeter\">\n"));
        assert!(text.contains(" <metadata type=\"producer\">test &amp; co</metadata>\n"));
        assert_eq!(text.matches("<vertex>").count(), 3);
        assert!(text.contains("     <x>1.5</x>\n"));
        assert!(text.contains("    <triangle>\n     <v1>0</v1>\n     <v2>1</v2>\n     <v3>2</v3>\n    </triangle>\n"));
        assert!(!text.contains("<material"));
        assert!(text.ends_with("</amf>\n"));
    }

    #[test]
    fn color_declares_material() {
        let mut out = Vec::new();
        let options = ExportOptions::default().with_amf_color(1.0, 0.5, 0.0);
        write_amf(&mut out, &triangle_mesh(), &options).expect("write to memory");
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains(" <material id=\"1\">\n  <color>\n   <r>1</r>\n   <g>0.5</g>\n   <b>0</b>\n   <a>1</a>\n"));
        assert!(text.contains("   <volume materialid=\"1\">\n"));
    }
}
