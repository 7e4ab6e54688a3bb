#![forbid(unsafe_code)]

//! The snapshot export boundary.
//!
//! Flattening the composed scene into a raster is platform work (software
//! blitting, GPU readback, a screenshot API) and lives behind
//! [`SnapshotExporter`]. The engine's half of the contract is the at-rest
//! guarantee: [`crate::scene::Scene::export`] refuses to invoke an
//! exporter while any gesture session is open, so the captured frame
//! cannot diverge from what the user last saw.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::compose::CompositionFrame;
use crate::geometry::Size;

/// Output parameters for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Output raster width in pixels.
    pub width: u32,
    /// Output raster height in pixels.
    pub height: u32,
    /// RGBA fill painted where neither base nor overlay covers
    /// (default: opaque white).
    pub background: [u8; 4],
}

impl CaptureOptions {
    /// Capture at an explicit pixel size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: [0xff, 0xff, 0xff, 0xff],
        }
    }

    /// Capture at 1:1 with a logical canvas (dimensions rounded).
    #[must_use]
    pub fn for_canvas(canvas: Size) -> Self {
        Self::new(
            canvas.width.round().max(1.0) as u32,
            canvas.height.round().max(1.0) as u32,
        )
    }

    /// Set the background fill (builder pattern).
    #[must_use]
    pub const fn with_background(mut self, rgba: [u8; 4]) -> Self {
        self.background = rgba;
        self
    }
}

impl Default for CaptureOptions {
    /// The classic sticker-canvas capture size.
    fn default() -> Self {
        Self::new(320, 440)
    }
}

/// A collaborator that flattens a composed frame into a raster.
///
/// Implementations receive frames whose gesture state is fully committed;
/// the scene enforces that before calling. Failures are surfaced to the
/// caller untouched and never retried by the engine.
pub trait SnapshotExporter {
    /// The raster handle produced on success.
    type Raster;

    /// Collaborator-specific error type.
    type Error: fmt::Debug + fmt::Display;

    /// Flatten `frame` into a raster of the requested size.
    fn export(
        &mut self,
        frame: &CompositionFrame,
        options: &CaptureOptions,
    ) -> Result<Self::Raster, Self::Error>;
}
