#![forbid(unsafe_code)]

//! The overlay entity: one decoration's identity and transform state.
//!
//! An [`Overlay`] is an immutable snapshot. Gesture transitions
//! (see [`crate::gesture`]) and the animation step ([`Overlay::tick`])
//! consume a snapshot and produce the next one; nothing mutates an overlay
//! in place behind the renderer's back.
//!
//! # Invariants
//!
//! 1. `committed_scale` is always within the configured clamp bounds.
//! 2. `live_offset_delta()` is zero unless the translation axis is mid-drag.
//! 3. `live_scale()` equals `committed_scale()` unless the scale axis is
//!    mid-pinch.
//! 4. `size_mode_index` always indexes into the configured preset list.
//! 5. `id` and `creation_index` never change after construction.

use core::fmt;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::EngineConfig;
use crate::geometry::Vec2;
use crate::spring::Spring;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Opaque overlay identity. Assigned at creation, never reused, not even
/// across a registry reset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OverlayId(u64);

impl OverlayId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw token value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Opaque handle to an overlay's visual content.
///
/// The engine never interprets it; a renderer resolves it to pixels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Create a content handle.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The underlying handle string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentRef {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for ContentRef {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Axis state
// ---------------------------------------------------------------------------

/// Translation axis machine: `Idle → Dragging → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PanState {
    #[default]
    Idle,
    /// A pan session is open; `delta` is cumulative since `PanBegin`.
    Dragging { delta: Vec2 },
}

/// Scale axis machine: `Idle → Pinching → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PinchState {
    #[default]
    Idle,
    /// A pinch session is open; `scale` is the clamped session factor.
    Pinching { scale: f32 },
}

bitflags::bitflags! {
    /// The set of gesture axes currently mid-session on an overlay.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GestureAxes: u8 {
        const TRANSLATION = 1 << 0;
        const SCALE = 1 << 1;
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// One decoration layered above the base image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub(crate) id: OverlayId,
    pub(crate) content: ContentRef,
    pub(crate) creation_index: u32,
    pub(crate) committed_offset: Vec2,
    pub(crate) committed_scale: f32,
    pub(crate) size_mode: usize,
    pub(crate) pan: PanState,
    pub(crate) pinch: PinchState,
    pub(crate) size_spring: Option<Spring>,
}

impl Overlay {
    pub(crate) fn new(
        id: OverlayId,
        content: ContentRef,
        creation_index: u32,
        config: &EngineConfig,
    ) -> Self {
        Self {
            id,
            content,
            creation_index,
            committed_offset: Vec2::ZERO,
            committed_scale: config.initial_scale(),
            size_mode: 0,
            pan: PanState::Idle,
            pinch: PinchState::Idle,
            size_spring: None,
        }
    }

    /// Identity token.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> OverlayId {
        self.id
    }

    /// Visual content handle.
    #[inline]
    #[must_use]
    pub const fn content(&self) -> &ContentRef {
        &self.content
    }

    /// Insertion ordinal; defines z-order and cascade placement.
    #[inline]
    #[must_use]
    pub const fn creation_index(&self) -> u32 {
        self.creation_index
    }

    /// Persisted drag displacement from the cascade anchor.
    #[inline]
    #[must_use]
    pub const fn committed_offset(&self) -> Vec2 {
        self.committed_offset
    }

    /// In-progress drag displacement; zero while the translation axis is
    /// idle.
    #[inline]
    #[must_use]
    pub const fn live_offset_delta(&self) -> Vec2 {
        match self.pan {
            PanState::Idle => Vec2::ZERO,
            PanState::Dragging { delta } => delta,
        }
    }

    /// Persisted scale factor.
    #[inline]
    #[must_use]
    pub const fn committed_scale(&self) -> f32 {
        self.committed_scale
    }

    /// Session scale while pinching; equals the committed scale otherwise.
    #[inline]
    #[must_use]
    pub const fn live_scale(&self) -> f32 {
        match self.pinch {
            PinchState::Idle => self.committed_scale,
            PinchState::Pinching { scale } => scale,
        }
    }

    /// Index into the size-cycle preset list.
    #[inline]
    #[must_use]
    pub const fn size_mode_index(&self) -> usize {
        self.size_mode
    }

    /// Offset the renderer applies right now: committed plus live delta.
    #[inline]
    #[must_use]
    pub fn displayed_offset(&self) -> Vec2 {
        self.committed_offset + self.live_offset_delta()
    }

    /// Scale the renderer applies right now: live while pinching, else
    /// committed.
    #[inline]
    #[must_use]
    pub const fn displayed_scale(&self) -> f32 {
        self.live_scale()
    }

    /// Translation axis state.
    #[inline]
    #[must_use]
    pub const fn pan_state(&self) -> PanState {
        self.pan
    }

    /// Scale axis state.
    #[inline]
    #[must_use]
    pub const fn pinch_state(&self) -> PinchState {
        self.pinch
    }

    /// The axes currently mid-session.
    #[must_use]
    pub fn active_axes(&self) -> GestureAxes {
        let mut axes = GestureAxes::empty();
        if matches!(self.pan, PanState::Dragging { .. }) {
            axes |= GestureAxes::TRANSLATION;
        }
        if matches!(self.pinch, PinchState::Pinching { .. }) {
            axes |= GestureAxes::SCALE;
        }
        axes
    }

    /// Whether both gesture axes are idle.
    #[must_use]
    pub fn gestures_idle(&self) -> bool {
        self.active_axes().is_empty()
    }

    /// Whether a size-cycle spring is still moving the committed scale.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.size_spring.is_some()
    }

    /// Advance the size-cycle spring by `dt`, producing the next snapshot.
    ///
    /// The spring writes the committed scale every step. A concurrent pinch
    /// session is not interrupted; whichever of the two writes last wins,
    /// and the displayed scale keeps following the pinch until it closes.
    #[must_use]
    pub fn tick(mut self, dt: Duration, config: &EngineConfig) -> Self {
        if let Some(spring) = self.size_spring.as_mut() {
            spring.advance(dt);
            self.committed_scale = config.clamp_scale(spring.value());
            if spring.is_at_rest() {
                self.size_spring = None;
            }
        }
        self
    }
}
