//! Export finished **CSG** geometry to interchange files.
//!
//! Three kinds of geometry are accepted:
//! - [`Mesh`]: a list of planar polygons with floating point corners
//! - any [`Solid`]: an exact boundary representation behind a small trait
//! - [`OutlineSet`]: closed 2D outlines
//!
//! Meshes and solids are written as [STL](https://en.wikipedia.org/wiki/STL_(file_format)),
//! [OFF](https://en.wikipedia.org/wiki/OFF_(file_format)),
//! [AMF](https://en.wikipedia.org/wiki/Additive_manufacturing_file_format) or
//! [OBJ](https://en.wikipedia.org/wiki/Wavefront_.obj_file); outlines as
//! [DXF](https://en.wikipedia.org/wiki/AutoCAD_DXF) or SVG.
//!
//! Output is deterministic: the same geometry and [`ExportOptions`] always
//! produce the same bytes. Vertices are deduplicated by their printed text, so
//! noise below the printed precision merges and faces that collapse are left
//! out.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): binary `.stl` export through `stl_io`
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//!
//! Diagnostics go through [`tracing`]; install a subscriber to see them.

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod boundary;
pub mod errors;
pub mod export;
pub mod float_types;
pub mod indexed;
pub mod io;
pub mod mesh;
pub mod number_format;
pub mod options;
pub mod outline;
pub mod solid;
pub mod vertex_index;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{ConversionError, ExportError, ExportResult};
pub use export::{
    ExportStats, FileFormat, Geometry, ManifoldPolicy, MeshFormat, OutlineFormat, export,
    export_file, export_mesh, export_outlines, export_solid,
};
pub use mesh::{Mesh, Polygon};
pub use number_format::NumberFormat;
pub use options::{ExportOptions, SvgStyle};
pub use outline::{Outline, OutlineSet};
pub use solid::{KernelPoint, Polyhedron, Solid};
