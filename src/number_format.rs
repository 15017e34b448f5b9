//! Locale independent rendering of coordinates.
//!
//! Every writer renders numbers through a [`NumberFormat`] handed in with the
//! export options. The decimal separator is always `.` and nothing here reads
//! or mutates process wide state, so exports may run on several threads.

use crate::float_types::{DEFAULT_PRECISION, Real};
use nalgebra::{Point2, Point3, Vector3};
use std::fmt::{self, Display, Write};

/// How a `Real` is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// `%g` style: `precision` significant digits, fixed or scientific
    /// notation depending on the exponent, trailing zeros removed.
    General { precision: usize },
    /// Shortest text that parses back to the identical value.
    Shortest,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::General {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl NumberFormat {
    /// Append the rendering of `value` to `out`.
    pub fn write_real(&self, out: &mut String, value: Real) {
        if value.is_nan() {
            out.push_str("nan");
            return;
        }
        if value.is_infinite() {
            out.push_str(if value > 0.0 { "inf" } else { "-inf" });
            return;
        }

        match *self {
            NumberFormat::General { precision } => write_general(out, value, precision.max(1)),
            NumberFormat::Shortest => {
                let _ = write!(out, "{value}");
            },
        }
    }

    /// Render a single value.
    pub fn real(&self, value: Real) -> String {
        let mut out = String::new();
        self.write_real(&mut out, value);
        out
    }

    /// Wrap `value` so it can be used directly in `write!`.
    pub const fn display(&self, value: Real) -> Formatted {
        Formatted {
            value,
            format: *self,
        }
    }

    /// Render a point as `"x y z"`.
    ///
    /// This text doubles as the canonical key used for vertex deduplication.
    pub fn point3(&self, p: &Point3<Real>) -> String {
        self.triple(p.x, p.y, p.z)
    }

    /// Render a vector as `"x y z"`.
    pub fn vector3(&self, v: &Vector3<Real>) -> String {
        self.triple(v.x, v.y, v.z)
    }

    /// Render a 2D point as `"x y"`.
    pub fn point2(&self, p: &Point2<Real>) -> String {
        let mut out = String::new();
        self.write_real(&mut out, p.x);
        out.push(' ');
        self.write_real(&mut out, p.y);
        out
    }

    fn triple(&self, x: Real, y: Real, z: Real) -> String {
        let mut out = String::new();
        self.write_real(&mut out, x);
        out.push(' ');
        self.write_real(&mut out, y);
        out.push(' ');
        self.write_real(&mut out, z);
        out
    }
}

/// A value paired with the format it should be printed in.
#[derive(Debug, Clone, Copy)]
pub struct Formatted {
    value: Real,
    format: NumberFormat,
}

impl Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.format.write_real(&mut out, self.value);
        f.write_str(&out)
    }
}

fn write_general(out: &mut String, value: Real, precision: usize) {
    if value == 0.0 {
        out.push_str(if value.is_sign_negative() { "-0" } else { "0" });
        return;
    }

    // Round once in scientific form; the exponent of the rounded value decides
    // between fixed and scientific notation exactly like `%g` does.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        out.push_str(&scientific);
        return;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        out.push_str(trim_fraction(mantissa));
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        let _ = write!(out, "{:02}", exponent.unsigned_abs());
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        let fixed = format!("{value:.decimals$}");
        out.push_str(trim_fraction(&fixed));
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(value: Real) -> String {
        NumberFormat::default().real(value)
    }

    #[test]
    fn general_matches_printf_g() {
        assert_eq!(g(0.0), "0");
        assert_eq!(g(1.0), "1");
        assert_eq!(g(-2.5), "-2.5");
        assert_eq!(g(0.1), "0.1");
        assert_eq!(g(1.0 / 3.0), "0.333333");
        assert_eq!(g(123456.0), "123456");
        assert_eq!(g(1234567.0), "1.23457e+06");
        assert_eq!(g(0.0001), "0.0001");
        assert_eq!(g(0.00001), "1e-05");
        assert_eq!(g(9.9999996), "10");
        assert_eq!(g(100.0), "100");
    }

    #[test]
    fn negative_zero_keeps_its_sign() {
        assert_eq!(g(-0.0), "-0");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(g(Real::NAN), "nan");
        assert_eq!(g(Real::INFINITY), "inf");
        assert_eq!(g(Real::NEG_INFINITY), "-inf");
        assert_eq!(NumberFormat::Shortest.real(Real::NAN), "nan");
    }

    #[test]
    fn precision_controls_merging() {
        let coarse = NumberFormat::General { precision: 3 };
        assert_eq!(coarse.real(1.0004), coarse.real(1.0001));
        let fine = NumberFormat::General { precision: 8 };
        assert_ne!(fine.real(1.0004), fine.real(1.0001));
    }

    #[test]
    fn shortest_round_trips() {
        let value: Real = 0.1 + 0.2;
        let text = NumberFormat::Shortest.real(value);
        assert_eq!(text.parse::<Real>().ok(), Some(value));
    }

    #[test]
    fn point_rendering() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.point3(&Point3::new(5.0, 12.0, 13.0)), "5 12 13");
        assert_eq!(fmt.point2(&Point2::new(0.5, -1.0)), "0.5 -1");
        assert_eq!(format!("{}", fmt.display(2.25)), "2.25");
    }
}
