//! Choosing a writer for a piece of geometry and running it.
//!
//! The typed entry points ([`export_mesh`], [`export_solid`],
//! [`export_outlines`]) only accept formats valid for their geometry kind.
//! [`export`] and [`export_file`] take a runtime [`FileFormat`] and match it
//! against the [`Geometry`] variant exhaustively.
//!
//! All preparation (manifold gate, kernel conversion, triangulation and
//! deduplication) finishes before the first byte is written, so a rejected
//! export never leaves a truncated document behind.

use crate::boundary;
use crate::errors::{ExportError, ExportResult};
use crate::indexed::IndexedMesh;
use crate::io;
use crate::mesh::Mesh;
use crate::options::ExportOptions;
use crate::outline::OutlineSet;
use crate::solid::{Polyhedron, Solid};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Formats that hold 3D triangles or polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    Stl,
    #[cfg(feature = "stl-io")]
    StlBinary,
    Off,
    Amf,
    Obj,
}

/// Formats that hold 2D outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineFormat {
    Dxf,
    Svg,
}

/// Every format the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Mesh(MeshFormat),
    Outline(OutlineFormat),
}

/// What to do with a solid whose boundary is not a simple 2-manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifoldPolicy {
    /// Warn and export a best-effort triangle soup.
    Warn,
    /// Warn and write a valid document without geometry.
    Empty,
    /// Refuse to export anything.
    Reject,
}

impl MeshFormat {
    /// How strictly this format treats non-manifold solids.
    pub const fn manifold_policy(self) -> ManifoldPolicy {
        match self {
            MeshFormat::Stl => ManifoldPolicy::Warn,
            #[cfg(feature = "stl-io")]
            MeshFormat::StlBinary => ManifoldPolicy::Warn,
            MeshFormat::Off => ManifoldPolicy::Empty,
            MeshFormat::Amf | MeshFormat::Obj => ManifoldPolicy::Reject,
        }
    }

    /// True for formats that only carry triangles.
    pub const fn triangles_only(self) -> bool {
        match self {
            MeshFormat::Stl | MeshFormat::Amf => true,
            #[cfg(feature = "stl-io")]
            MeshFormat::StlBinary => true,
            MeshFormat::Off | MeshFormat::Obj => false,
        }
    }
}

impl FileFormat {
    pub const STL: FileFormat = FileFormat::Mesh(MeshFormat::Stl);
    #[cfg(feature = "stl-io")]
    pub const STL_BINARY: FileFormat = FileFormat::Mesh(MeshFormat::StlBinary);
    pub const OFF: FileFormat = FileFormat::Mesh(MeshFormat::Off);
    pub const AMF: FileFormat = FileFormat::Mesh(MeshFormat::Amf);
    pub const OBJ: FileFormat = FileFormat::Mesh(MeshFormat::Obj);
    pub const DXF: FileFormat = FileFormat::Outline(OutlineFormat::Dxf);
    pub const SVG: FileFormat = FileFormat::Outline(OutlineFormat::Svg);

    /// Look a format up by file extension, ignoring case.
    ///
    /// `.stl` maps to ASCII STL.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "stl" => Some(FileFormat::STL),
            "off" => Some(FileFormat::OFF),
            "amf" => Some(FileFormat::AMF),
            "obj" => Some(FileFormat::OBJ),
            "dxf" => Some(FileFormat::DXF),
            "svg" => Some(FileFormat::SVG),
            _ => None,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            FileFormat::Mesh(MeshFormat::Stl) => "stl",
            #[cfg(feature = "stl-io")]
            FileFormat::Mesh(MeshFormat::StlBinary) => "stl",
            FileFormat::Mesh(MeshFormat::Off) => "off",
            FileFormat::Mesh(MeshFormat::Amf) => "amf",
            FileFormat::Mesh(MeshFormat::Obj) => "obj",
            FileFormat::Outline(OutlineFormat::Dxf) => "dxf",
            FileFormat::Outline(OutlineFormat::Svg) => "svg",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FileFormat::Mesh(MeshFormat::Stl) => "STL",
            #[cfg(feature = "stl-io")]
            FileFormat::Mesh(MeshFormat::StlBinary) => "binary STL",
            FileFormat::Mesh(MeshFormat::Off) => "OFF",
            FileFormat::Mesh(MeshFormat::Amf) => "AMF",
            FileFormat::Mesh(MeshFormat::Obj) => "OBJ",
            FileFormat::Outline(OutlineFormat::Dxf) => "DXF",
            FileFormat::Outline(OutlineFormat::Svg) => "SVG",
        }
    }

    /// True for the 2D drawing formats.
    pub const fn is_2d(self) -> bool {
        matches!(self, FileFormat::Outline(_))
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finished geometry handed over by the evaluator.
#[derive(Debug)]
pub enum Geometry<'a, K: Solid = Polyhedron> {
    Mesh(&'a Mesh),
    Solid(&'a K),
    Outlines(&'a OutlineSet),
}

// Manual impls: a derive would require `K: Clone`.
impl<K: Solid> Clone for Geometry<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Solid> Copy for Geometry<'_, K> {}

impl<'a> Geometry<'a> {
    pub const fn mesh(mesh: &'a Mesh) -> Self {
        Geometry::Mesh(mesh)
    }

    pub const fn outlines(outlines: &'a OutlineSet) -> Self {
        Geometry::Outlines(outlines)
    }
}

impl<K: Solid> Geometry<'_, K> {
    pub const fn kind(&self) -> &'static str {
        match self {
            Geometry::Mesh(_) => "mesh",
            Geometry::Solid(_) => "solid",
            Geometry::Outlines(_) => "outline",
        }
    }
}

/// Counts from one successful export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Vertices in the written vertex table (or outline points).
    pub vertices: usize,
    /// Faces (or outlines) written.
    pub faces: usize,
    /// Faces left out because their corners collapsed.
    pub dropped_faces: usize,
}

impl ExportStats {
    fn of_mesh(mesh: &IndexedMesh) -> Self {
        ExportStats {
            vertices: mesh.vertices.len(),
            faces: mesh.faces.len(),
            dropped_faces: mesh.dropped,
        }
    }

    fn of_outlines(outlines: &OutlineSet) -> Self {
        ExportStats {
            vertices: outlines.vertex_count(),
            faces: outlines.outlines.len(),
            dropped_faces: 0,
        }
    }
}

/// Geometry ready to be streamed.
enum Prepared<'a> {
    Mesh(IndexedMesh, MeshFormat),
    Outlines(&'a OutlineSet, OutlineFormat),
}

fn prepare_mesh(mesh: &Mesh, format: MeshFormat, options: &ExportOptions) -> IndexedMesh {
    if format.triangles_only() && !mesh.is_triangulated() {
        IndexedMesh::from_mesh(&mesh.triangulate(), options.number_format)
    } else {
        IndexedMesh::from_mesh(mesh, options.number_format)
    }
}

fn prepare_solid<K: Solid>(
    solid: &K,
    format: MeshFormat,
    options: &ExportOptions,
) -> ExportResult<IndexedMesh> {
    if !solid.is_simple() {
        match format.manifold_policy() {
            ManifoldPolicy::Warn => {
                warn!("exported object may not be a valid 2-manifold and may need repair");
            },
            ManifoldPolicy::Empty => {
                warn!("object isn't a valid 2-manifold, modify your design");
                return Ok(IndexedMesh::new(options.number_format));
            },
            ManifoldPolicy::Reject => {
                warn!("object isn't a valid 2-manifold, modify your design");
                return Err(ExportError::NotManifold);
            },
        }
    }

    if format.manifold_policy() == ManifoldPolicy::Warn {
        // Robust polygon-set conversion first, native polyhedron conversion second
        match solid.to_mesh() {
            Ok(mesh) => return Ok(prepare_mesh(&mesh, format, options)),
            Err(err) => {
                warn!(error = %err, "solid to polygon set conversion failed, trying polyhedron");
            },
        }
    }

    boundary::extract(solid, options.number_format)
}

fn write_prepared<W: Write>(
    writer: &mut W,
    prepared: &Prepared<'_>,
    options: &ExportOptions,
) -> std::io::Result<ExportStats> {
    match prepared {
        Prepared::Mesh(mesh, format) => {
            match format {
                MeshFormat::Stl => io::stl::write_stl(writer, mesh, options)?,
                #[cfg(feature = "stl-io")]
                MeshFormat::StlBinary => io::stl::write_stl_binary(writer, mesh)?,
                MeshFormat::Off => io::off::write_off(writer, mesh)?,
                MeshFormat::Amf => io::amf::write_amf(writer, mesh, options)?,
                MeshFormat::Obj => io::obj::write_obj(writer, mesh, options)?,
            }
            Ok(ExportStats::of_mesh(mesh))
        },
        Prepared::Outlines(outlines, format) => {
            match format {
                OutlineFormat::Dxf => io::dxf::write_dxf(writer, outlines, options)?,
                OutlineFormat::Svg => io::svg::write_svg(writer, outlines, options)?,
            }
            Ok(ExportStats::of_outlines(outlines))
        },
    }
}

fn prepare<'a, K: Solid>(
    geometry: Geometry<'a, K>,
    format: FileFormat,
    options: &ExportOptions,
) -> ExportResult<Prepared<'a>> {
    match (geometry, format) {
        (Geometry::Mesh(mesh), FileFormat::Mesh(format)) => {
            Ok(Prepared::Mesh(prepare_mesh(mesh, format, options), format))
        },
        (Geometry::Solid(solid), FileFormat::Mesh(format)) => {
            Ok(Prepared::Mesh(prepare_solid(solid, format, options)?, format))
        },
        (Geometry::Outlines(outlines), FileFormat::Outline(format)) => {
            Ok(Prepared::Outlines(outlines, format))
        },
        (Geometry::Mesh(_) | Geometry::Solid(_), FileFormat::Outline(_))
        | (Geometry::Outlines(_), FileFormat::Mesh(_)) => Err(ExportError::UnsupportedFormat {
            kind: geometry.kind(),
            format: format.name(),
        }),
    }
}

fn log_stats(format: FileFormat, stats: &ExportStats) {
    debug!(
        format = format.name(),
        vertices = stats.vertices,
        faces = stats.faces,
        dropped = stats.dropped_faces,
        "export finished"
    );
}

/// Write a mesh in one of the 3D formats.
///
/// Triangle-only formats (STL, AMF) triangulate polygon faces first; OFF and
/// OBJ keep them. Faces whose corners collapse under deduplication are left
/// out in every format.
pub fn export_mesh<W: Write>(
    mesh: &Mesh,
    format: MeshFormat,
    writer: &mut W,
    options: &ExportOptions,
) -> ExportResult<ExportStats> {
    let prepared = Prepared::Mesh(prepare_mesh(mesh, format, options), format);
    let stats = write_prepared(writer, &prepared, options)?;
    log_stats(FileFormat::Mesh(format), &stats);
    Ok(stats)
}

/// Write an exact solid in one of the 3D formats.
///
/// Non-manifold solids are handled per [`MeshFormat::manifold_policy`].
/// Conversion failures are returned before anything is written.
pub fn export_solid<K: Solid, W: Write>(
    solid: &K,
    format: MeshFormat,
    writer: &mut W,
    options: &ExportOptions,
) -> ExportResult<ExportStats> {
    let prepared = Prepared::Mesh(prepare_solid(solid, format, options)?, format);
    let stats = write_prepared(writer, &prepared, options)?;
    log_stats(FileFormat::Mesh(format), &stats);
    Ok(stats)
}

/// Write an outline set in one of the 2D formats.
pub fn export_outlines<W: Write>(
    outlines: &OutlineSet,
    format: OutlineFormat,
    writer: &mut W,
    options: &ExportOptions,
) -> ExportResult<ExportStats> {
    let stats = write_prepared(writer, &Prepared::Outlines(outlines, format), options)?;
    log_stats(FileFormat::Outline(format), &stats);
    Ok(stats)
}

/// Write `geometry` to `writer` in `format`.
///
/// Returns [`ExportError::UnsupportedFormat`] when the geometry kind and the
/// format don't go together (3D geometry as DXF/SVG, outlines as a mesh
/// format). That is a caller bug, not a data problem.
pub fn export<K: Solid, W: Write>(
    geometry: Geometry<'_, K>,
    format: FileFormat,
    writer: &mut W,
    options: &ExportOptions,
) -> ExportResult<ExportStats> {
    let prepared = prepare(geometry, format, options)?;
    let stats = write_prepared(writer, &prepared, options)?;
    log_stats(format, &stats);
    Ok(stats)
}

/// Write `geometry` to the file at `path`.
///
/// `display_name` is used in diagnostics and errors. The file is only
/// created once the geometry has been prepared successfully. Write and flush
/// failures are reported as [`ExportError::Write`]; whatever was written
/// before the failure is left in place.
pub fn export_file<K: Solid, P: AsRef<Path>>(
    geometry: Geometry<'_, K>,
    format: FileFormat,
    path: P,
    display_name: &str,
    options: &ExportOptions,
) -> ExportResult<ExportStats> {
    let path = path.as_ref();
    let prepared = prepare(geometry, format, options)?;

    let file = File::create(path).map_err(|source| {
        warn!(name = display_name, error = %source, "can't open file for export");
        ExportError::Open {
            name: display_name.to_string(),
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut writer = BufWriter::new(file);
    let result = write_prepared(&mut writer, &prepared, options)
        .and_then(|stats| writer.flush().map(|()| stats))
        .map_err(|source| {
            warn!(name = display_name, error = %source, "write error (disk full?)");
            ExportError::from(source).with_name(display_name)
        });

    let stats = result?;
    log_stats(format, &stats);
    Ok(stats)
}
