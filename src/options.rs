//! Export configuration.

use crate::float_types::{DEFAULT_UNIT, Real};
use crate::number_format::NumberFormat;

/// Model name written into STL headers and the SVG title.
pub const DEFAULT_MODEL_NAME: &str = "csgexport_Model";

/// Producer string written into AMF metadata and OBJ comments.
pub const DEFAULT_PRODUCER: &str = concat!("csgexport ", env!("CARGO_PKG_VERSION"));

/// Stroke and fill used for the single SVG path.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgStyle {
    pub stroke: String,
    pub fill: String,
    pub stroke_width: Real,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            stroke: "black".to_string(),
            fill: "lightgray".to_string(),
            stroke_width: 0.5,
        }
    }
}

/// Parameters shared by every writer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub model_name: String,
    pub producer: String,
    /// AMF `unit` attribute, e.g. "millimeter" or "inch".
    pub unit: String,
    /// AMF material color as (red, green, blue), each 0.0-1.0.
    pub amf_color: Option<(Real, Real, Real)>,
    pub svg_style: SvgStyle,
    pub number_format: NumberFormat,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            producer: DEFAULT_PRODUCER.to_string(),
            unit: DEFAULT_UNIT.to_string(),
            amf_color: None,
            svg_style: SvgStyle::default(),
            number_format: NumberFormat::default(),
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn with_model_name(mut self, name: &str) -> Self {
        self.model_name = name.to_string();
        self
    }

    #[must_use]
    pub fn with_producer(mut self, producer: &str) -> Self {
        self.producer = producer.to_string();
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    #[must_use]
    pub const fn with_amf_color(mut self, red: Real, green: Real, blue: Real) -> Self {
        self.amf_color = Some((red, green, blue));
        self
    }

    #[must_use]
    pub fn with_svg_style(mut self, style: SvgStyle) -> Self {
        self.svg_style = style;
        self
    }

    #[must_use]
    pub const fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }
}
