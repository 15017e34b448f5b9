// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Normal written for facets whose corners are collinear.
pub const PLACEHOLDER_NORMAL: [Real; 3] = [1.0, 0.0, 0.0];

/// Default number of significant digits used when rendering coordinates,
/// the same as a C `%g` conversion.
pub const DEFAULT_PRECISION: usize = 6;

/// Default unit written into the AMF root element.
pub const DEFAULT_UNIT: &str = "millimeter";
