use crate::export::{OutlineFormat, export_outlines};
use crate::float_types::Real;
use crate::io::{escape_xml, render};
use crate::options::ExportOptions;
use crate::outline::OutlineSet;
use std::io::Write;

/// Integer canvas derived from the outline bounds, in SVG (y-down) space.
///
/// Bounds beyond the `i64` range clamp to it; sizes saturate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgCanvas {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl SvgCanvas {
    /// Bounds rounded outward to whole units, with y mirrored.
    pub fn from_outlines(outlines: &OutlineSet) -> Self {
        let Some(bbox) = outlines.bounding_box() else {
            return SvgCanvas {
                min_x: 0,
                min_y: 0,
                max_x: 0,
                max_y: 0,
            };
        };
        SvgCanvas {
            min_x: bbox.min().x.floor() as i64,
            min_y: (-bbox.max().y).floor() as i64,
            max_x: bbox.max().x.ceil() as i64,
            max_y: (-bbox.min().y).ceil() as i64,
        }
    }

    pub const fn width(&self) -> i64 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub const fn height(&self) -> i64 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// `min-x min-y width height`, one unit of margin on every side.
    pub fn view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            self.min_x.saturating_sub(1),
            self.min_y.saturating_sub(1),
            self.width().saturating_add(2),
            self.height().saturating_add(2)
        )
    }
}

/// Write outlines as a single filled **SVG** path.
///
/// Y is negated so the drawing is upright in SVG's y-down space. Each outline
/// becomes `M`, a run of `L` commands and `z`; long runs wrap every six points.
pub fn write_svg<W: Write>(
    writer: &mut W,
    outlines: &OutlineSet,
    options: &ExportOptions,
) -> std::io::Result<()> {
    let fmt = &options.number_format;
    let style = &options.svg_style;
    let canvas = SvgCanvas::from_outlines(outlines);

    writeln!(writer, "<?xml version=\"1.0\" standalone=\"no\"?>")?;
    writeln!(
        writer,
        "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">"
    )?;
    writeln!(
        writer,
        "<svg width=\"{}\" height=\"{}\" viewBox=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">",
        canvas.width(),
        canvas.height(),
        canvas.view_box()
    )?;
    writeln!(writer, "<title>{}</title>", escape_xml(&options.model_name))?;

    writeln!(writer, "<path d=\"")?;
    for outline in &outlines.outlines {
        let Some((first, rest)) = outline.vertices.split_first() else {
            continue;
        };
        write!(
            writer,
            "M {},{}",
            fmt.display(first.x),
            fmt.display(flip(first.y))
        )?;
        for (i, p) in rest.iter().enumerate() {
            write!(writer, " L {},{}", fmt.display(p.x), fmt.display(flip(p.y)))?;
            if (i + 1) % 6 == 5 {
                writeln!(writer)?;
            }
        }
        writeln!(writer, " z")?;
    }
    writeln!(
        writer,
        "\" stroke=\"{}\" fill=\"{}\" stroke-width=\"{}\"/>",
        escape_xml(&style.stroke),
        escape_xml(&style.fill),
        fmt.display(style.stroke_width)
    )?;
    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Mirror a y coordinate without producing `-0`.
fn flip(y: Real) -> Real {
    0.0 - y
}

impl OutlineSet {
    pub fn to_svg(&self, options: &ExportOptions) -> String {
        render(|out| export_outlines(self, OutlineFormat::Svg, out, options))
    }
}
