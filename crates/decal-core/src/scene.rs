#![forbid(unsafe_code)]

//! The scene facade: base image, registry, gesture routing, animation
//! clock, and the export guard in one place.
//!
//! A [`Scene`] is what an application embeds. All mutation enters through
//! four doors: [`set_base`](Scene::set_base), overlay add/remove,
//! [`apply`](Scene::apply) for gesture events, and [`tick`](Scene::tick)
//! for time. Everything else is a pure read of the current snapshots.
//!
//! # Invariants
//!
//! 1. [`export`](Scene::export) never invokes the exporter while a gesture
//!    session is open on any overlay.
//! 2. [`reset`](Scene::reset) clears the base image *and* the overlays;
//!    [`clear_overlays`](Scene::clear_overlays) keeps the base.
//! 3. Event processing and ticking interleave on one thread of control;
//!    a spring and a pinch may both write a committed scale, and the last
//!    writer wins.

use std::time::Duration;

use crate::compose::{self, CompositionFrame};
use crate::config::EngineConfig;
use crate::error::{ExportError, GestureError};
use crate::event::GestureEvent;
use crate::export::{CaptureOptions, SnapshotExporter};
use crate::gesture;
use crate::geometry::Vec2;
use crate::overlay::{ContentRef, Overlay, OverlayId};
use crate::registry::OverlayRegistry;

/// A composable sticker scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    config: EngineConfig,
    base: Option<ContentRef>,
    registry: OverlayRegistry,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            base: None,
            registry: OverlayRegistry::new(),
        }
    }

    /// Engine configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The base image handle, if one has been picked.
    #[inline]
    #[must_use]
    pub fn base(&self) -> Option<&ContentRef> {
        self.base.as_ref()
    }

    /// Pick or replace the base image. Overlays are kept.
    pub fn set_base(&mut self, content: ContentRef) {
        tracing::debug!(target: "decal.scene", content = %content, "base image set");
        self.base = Some(content);
    }

    /// Add an overlay for `content`, returning its id.
    pub fn add_overlay(&mut self, content: ContentRef) -> OverlayId {
        self.registry.add(content, &self.config).id()
    }

    /// Remove one overlay, returning its final snapshot.
    pub fn remove_overlay(&mut self, id: OverlayId) -> Result<Overlay, GestureError> {
        self.registry.remove(id)
    }

    /// The z-ordered overlay snapshots, bottom-most first.
    #[inline]
    #[must_use]
    pub fn overlays(&self) -> &[Overlay] {
        self.registry.list()
    }

    /// Look up one overlay snapshot.
    #[must_use]
    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.registry.get(id)
    }

    /// Remove every overlay, keeping the base image.
    pub fn clear_overlays(&mut self) {
        self.registry.reset_all();
    }

    /// Discard the whole composition: base image and overlays.
    pub fn reset(&mut self) {
        tracing::debug!(target: "decal.scene", "scene reset");
        self.base = None;
        self.registry.reset_all();
    }

    /// Route one gesture event to the overlay it targets.
    pub fn apply(&mut self, id: OverlayId, event: GestureEvent) -> Result<(), GestureError> {
        gesture::route(&mut self.registry, id, event, &self.config)
    }

    /// Advance all size-cycle springs by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let config = self.config.clone();
        self.registry.update_all(|overlay| overlay.tick(dt, &config));
    }

    /// Whether every overlay's gesture axes are idle.
    ///
    /// This is the export precondition; a running size-cycle spring does
    /// not count as a gesture.
    #[must_use]
    pub fn gestures_idle(&self) -> bool {
        self.registry.list().iter().all(Overlay::gestures_idle)
    }

    /// Whether the scene is fully at rest: gestures idle and no spring
    /// still animating.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.gestures_idle() && !self.registry.list().iter().any(Overlay::is_animating)
    }

    /// Compose the current snapshots into an ordered frame.
    #[must_use]
    pub fn compose(&self) -> CompositionFrame {
        compose::compose(self.base.as_ref(), self.registry.list(), &self.config)
    }

    /// Topmost overlay under `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: Vec2) -> Option<OverlayId> {
        self.compose().hit_test(point)
    }

    /// Flatten the scene through an exporter collaborator.
    ///
    /// Refuses with [`ExportError::Busy`] while any gesture session is
    /// open, so the capture cannot race a half-applied transform. The
    /// exporter's own failure is passed through untouched and never
    /// retried here.
    pub fn export<X: SnapshotExporter>(
        &self,
        exporter: &mut X,
        options: &CaptureOptions,
    ) -> Result<X::Raster, ExportError<X::Error>> {
        let active = self
            .registry
            .list()
            .iter()
            .filter(|o| !o.gestures_idle())
            .count();
        if active > 0 {
            tracing::warn!(
                target: "decal.scene",
                active = active,
                "export refused while gestures are open"
            );
            return Err(ExportError::Busy { active });
        }

        tracing::debug!(
            target: "decal.scene",
            width = options.width,
            height = options.height,
            overlays = self.registry.len(),
            "export started"
        );
        let frame = self.compose();
        match exporter.export(&frame, options) {
            Ok(raster) => {
                tracing::debug!(target: "decal.scene", "export finished");
                Ok(raster)
            }
            Err(err) => {
                tracing::warn!(target: "decal.scene", error = %err, "export failed");
                Err(ExportError::Exporter(err))
            }
        }
    }
}
