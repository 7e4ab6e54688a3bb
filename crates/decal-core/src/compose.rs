#![forbid(unsafe_code)]

//! Deterministic scene composition.
//!
//! [`compose`] is a pure function of the registry's overlay snapshots: no
//! state lives here, and recomputing a frame from the same snapshots
//! always yields the same result. The frame lists overlays back-to-front,
//! which is also (reversed) the hit-test priority order.
//!
//! # Placement
//!
//! Each overlay is anchored near a fixed canvas corner, inset by the
//! corner margin plus one cascade step per creation index, so newly added
//! overlays stagger diagonally instead of stacking exactly. The
//! committed-plus-live offset then translates the unscaled box, and the
//! displayed scale is applied about the box's own center, so a resized
//! overlay grows in place instead of sliding.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::geometry::{Rect, Size, Vec2};
use crate::overlay::{ContentRef, Overlay, OverlayId};

/// One overlay placed for painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOverlay {
    pub id: OverlayId,
    pub content: ContentRef,
    /// Paint ordinal; higher paints later (on top).
    pub z: u32,
    /// Displayed scale factor applied about the overlay center.
    pub scale: f32,
    /// Final scaled bounds in canvas coordinates.
    pub bounds: Rect,
}

/// A fully composed scene, ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionFrame {
    pub canvas: Size,
    pub base: Option<ContentRef>,
    /// Back-to-front: painting in order yields the correct stacking.
    pub overlays: Vec<RenderOverlay>,
}

impl CompositionFrame {
    /// Topmost overlay whose bounds contain `point`, if any.
    ///
    /// Checks overlays front-to-back, so an overlay painted on top of
    /// another wins the touch.
    #[must_use]
    pub fn hit_test(&self, point: Vec2) -> Option<OverlayId> {
        self.overlays
            .iter()
            .rev()
            .find(|o| o.bounds.contains(point))
            .map(|o| o.id)
    }
}

/// Inset of an overlay's cascade anchor from the anchor corner.
///
/// Grows by one cascade step per creation index on both axes.
#[must_use]
pub fn cascade_inset(config: &EngineConfig, creation_index: u32) -> Vec2 {
    let inset = config.corner_margin + config.cascade_step * creation_index as f32;
    Vec2::splat(inset)
}

/// Compose the scene into an ordered frame.
///
/// `overlays` must be in registry order (ascending creation index); the
/// frame preserves that order as its paint order.
#[must_use]
pub fn compose(
    base: Option<&ContentRef>,
    overlays: &[Overlay],
    config: &EngineConfig,
) -> CompositionFrame {
    let overlays = overlays
        .iter()
        .map(|overlay| place(overlay, config))
        .collect::<Vec<_>>();

    tracing::trace!(
        target: "decal.compose",
        overlays = overlays.len(),
        "frame composed"
    );

    CompositionFrame {
        canvas: config.canvas,
        base: base.cloned(),
        overlays,
    }
}

fn place(overlay: &Overlay, config: &EngineConfig) -> RenderOverlay {
    let inset = cascade_inset(config, overlay.creation_index());
    let anchor = config
        .anchor_corner
        .anchor_origin(config.canvas, inset, config.overlay_size);
    let top_left = anchor + overlay.displayed_offset();
    let center = top_left
        + Vec2::new(
            config.overlay_size.width / 2.0,
            config.overlay_size.height / 2.0,
        );

    let scale = overlay.displayed_scale();
    RenderOverlay {
        id: overlay.id(),
        content: overlay.content().clone(),
        z: overlay.creation_index(),
        scale,
        bounds: Rect::from_center(center, config.overlay_size.scaled(scale)),
    }
}
