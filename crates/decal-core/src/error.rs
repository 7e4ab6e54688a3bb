#![forbid(unsafe_code)]

//! Engine error types.
//!
//! The gesture protocol is nearly total: transitions never fail, numeric
//! inputs are clamped instead of rejected. What can fail is *routing* (an
//! event or removal aimed at an overlay that no longer exists) and the
//! export boundary.

use core::fmt;

use crate::overlay::OverlayId;

/// Failure to route an operation to an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureError {
    /// The targeted overlay is not in the registry; the event is dropped.
    OverlayNotFound(OverlayId),
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverlayNotFound(id) => write!(f, "{id} not found in registry"),
        }
    }
}

impl std::error::Error for GestureError {}

/// Failure to produce a snapshot of the composed scene.
///
/// Generic over the exporter collaborator's own error type so callers keep
/// the full failure detail without this crate knowing the exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError<E> {
    /// A gesture session is still open; exporting now could capture a
    /// half-applied transform. `active` counts the overlays with an open
    /// axis. A running size-cycle spring does not block export.
    Busy { active: usize },
    /// The exporter collaborator failed; never retried automatically.
    Exporter(E),
}

impl<E: fmt::Display> fmt::Display for ExportError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy { active } => {
                write!(f, "export refused: {active} overlay(s) mid-gesture")
            }
            Self::Exporter(err) => write!(f, "exporter failed: {err}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ExportError<E> {}
