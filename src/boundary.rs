//! Solid to triangle-mesh extraction.

use crate::errors::{ConversionError, ExportError, ExportResult};
use crate::indexed::{IndexedMesh, placeholder_normal};
use crate::number_format::NumberFormat;
use crate::solid::{KernelPoint, Polyhedron, Solid};
use tracing::{debug, warn};

/// Convert a solid's boundary into deduplicated triangles.
///
/// The solid is converted with its native routine; every facet loop is then
/// fanned into triangles in the kernel's traversal order. That order becomes
/// the vertex and face order of the output.
///
/// Manifoldness is not checked here; callers apply the per-format policy first.
pub fn extract<K: Solid>(solid: &K, format: NumberFormat) -> ExportResult<IndexedMesh> {
    let polyhedron = solid.to_polyhedron().map_err(|err| {
        warn!(error = %err, "conversion of solid to polyhedron failed");
        ExportError::Conversion(err)
    })?;
    Ok(triangles_from_polyhedron(&polyhedron, format))
}

/// Fan each facet loop of `polyhedron` and register the resulting triangles.
///
/// Triangles whose rounded corners are not pairwise distinct are skipped,
/// though their corners stay in the vertex table. Normals come from the
/// kernel's own predicates: collinear corners get the placeholder normal.
pub fn triangles_from_polyhedron<P: KernelPoint>(
    polyhedron: &Polyhedron<P>,
    format: NumberFormat,
) -> IndexedMesh {
    let mut indexed = IndexedMesh::new(format);

    for facet in &polyhedron.facets {
        if facet.len() < 3 {
            debug!(corners = facet.len(), "skipping facet with too few corners");
            continue;
        }
        let anchor = &facet[0];
        for pair in facet[1..].windows(2) {
            let (b, c) = (&pair[0], &pair[1]);
            let corners = [anchor.to_point(), b.to_point(), c.to_point()];
            if let Some(face) = indexed.push_face(&corners) {
                indexed.faces[face].normal = if P::collinear(anchor, b, c) {
                    placeholder_normal()
                } else {
                    P::unit_normal(anchor, b, c)
                };
            }
        }
    }

    debug!(
        vertices = indexed.vertices.len(),
        triangles = indexed.faces.len(),
        dropped = indexed.dropped,
        "extracted solid boundary"
    );
    indexed
}

/// Shorthand used by kernels that cannot provide a given conversion.
pub fn unsupported(what: &str) -> ConversionError {
    ConversionError::Unsupported(what.to_string())
}
