//! Export errors

use std::path::PathBuf;
use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Failure reported by an exact kernel while converting a solid.
///
/// Kernels that signal problems through assertions or exceptions translate
/// them into one of these before returning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// (KernelAssertion) An internal consistency check of the kernel fired
    #[error("kernel assertion failed: {0}")]
    KernelAssertion(String),
    /// (Degenerate) The boundary could not be represented without collapsing
    #[error("degenerate boundary: {0}")]
    Degenerate(String),
    /// (Unsupported) The kernel does not implement the requested conversion
    #[error("conversion not supported: {0}")]
    Unsupported(String),
}

/// All the ways an export call can fail.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be opened for writing.
    #[error("can't open file \"{name}\" for export: {source}")]
    Open {
        /// Display name of the destination.
        name: String,
        /// Resolved path that failed to open.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing or closing the destination failed partway.
    #[error("\"{name}\" write error (disk full?): {source}")]
    Write {
        /// Display name of the destination.
        name: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Writing to a caller supplied stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The solid boundary is not a simple closed 2-manifold and the
    /// requested format does not accept such input.
    #[error("object isn't a valid 2-manifold, modify your design")]
    NotManifold,

    /// The exact kernel failed to convert the solid.
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// The geometry kind cannot be written in the requested format.
    #[error("{kind} geometry can't be exported as {format}")]
    UnsupportedFormat {
        /// Kind of geometry handed in.
        kind: &'static str,
        /// Requested format.
        format: &'static str,
    },
}

impl ExportError {
    /// Attach a destination name to a bare IO failure.
    pub(crate) fn with_name(self, name: &str) -> Self {
        match self {
            ExportError::Io(source) => ExportError::Write {
                name: name.to_string(),
                source,
            },
            other => other,
        }
    }
}
