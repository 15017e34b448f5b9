use crate::export::{OutlineFormat, export_outlines};
use crate::io::render;
use crate::options::ExportOptions;
use crate::outline::OutlineSet;
use std::io::Write;

/// Write outlines as a minimal **DXF** drawing.
///
/// Every outline edge, including the closing one, becomes a `LINE` entity on
/// layer `0`. Empty `BLOCKS` and `OBJECTS` sections are included because
/// several importers refuse drawings without them.
pub fn write_dxf<W: Write>(
    writer: &mut W,
    outlines: &OutlineSet,
    options: &ExportOptions,
) -> std::io::Result<()> {
    let fmt = &options.number_format;

    write!(writer, "  0\nSECTION\n  2\nBLOCKS\n  0\nENDSEC\n")?;
    write!(writer, "  0\nSECTION\n  2\nENTITIES\n")?;

    for outline in &outlines.outlines {
        for (p1, p2) in outline.edges() {
            write!(writer, "  0\nLINE\n")?;
            write!(writer, "  8\n0\n")?;
            writeln!(writer, " 10\n{}", fmt.display(p1.x))?;
            writeln!(writer, " 11\n{}", fmt.display(p2.x))?;
            writeln!(writer, " 20\n{}", fmt.display(p1.y))?;
            writeln!(writer, " 21\n{}", fmt.display(p2.y))?;
        }
    }

    write!(writer, "  0\nENDSEC\n")?;
    write!(writer, "  0\nSECTION\n  2\nOBJECTS\n  0\nDICTIONARY\n  0\nENDSEC\n")?;
    write!(writer, "  0\nEOF\n")?;
    Ok(())
}

impl OutlineSet {
    pub fn to_dxf(&self, options: &ExportOptions) -> String {
        render(|out| export_outlines(self, OutlineFormat::Dxf, out, options))
    }
}
