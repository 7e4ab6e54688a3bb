#![forbid(unsafe_code)]

//! Gesture routing: tagged events drive per-overlay state machines.
//!
//! Every [`GestureEvent`] targets one overlay and flows through a single
//! pure [`transition`] function. The overlay snapshot goes in, the next
//! snapshot comes out; no live gesture state exists anywhere else.
//!
//! # State Machine
//!
//! Each overlay carries two independent axis machines plus a stateless
//! trigger:
//!
//! - **Translation**: `Idle → Dragging → Idle`. Updates overwrite the live
//!   delta (cumulative since the session opened). A normal end folds the
//!   delta into the committed offset; a cancel throws it away.
//! - **Scale**: `Idle → Pinching → Idle`. Updates overwrite the live scale
//!   with the clamped session factor. A normal end replaces the committed
//!   scale with the live one; a cancel reverts to the committed value.
//! - **Double-tap**: advances the size-mode index (wrapping) and points the
//!   size-cycle spring at the new preset. Never touches the other two
//!   machines.
//!
//! # Invariants
//!
//! 1. The committed scale stays within the configured clamp bounds after
//!    every transition.
//! 2. A cancel never commits: the committed fields after `PanCancel` or
//!    `PinchCancel` equal their values before the session opened.
//! 3. Both axes of one overlay may hold open sessions at once; they touch
//!    disjoint fields.
//! 4. Transitions never fail. Routing fails only when the target id has
//!    left the registry, and then the event is dropped whole.
//!
//! # Failure Modes
//!
//! - Out-of-session events (update/end/cancel with no open session) are
//!   ignored, so a recognizer that loses a begin cannot wedge an axis.
//! - A begin while a session is already open restarts the session, as if
//!   the previous one had been cancelled.

use crate::config::EngineConfig;
use crate::error::GestureError;
use crate::event::GestureEvent;
use crate::overlay::{Overlay, OverlayId, PanState, PinchState};
use crate::registry::OverlayRegistry;
use crate::spring::Spring;

// ---------------------------------------------------------------------------
// Pure transitions
// ---------------------------------------------------------------------------

/// Apply one gesture event to an overlay snapshot, producing the next
/// snapshot.
///
/// This is the only path by which gestures change overlay state.
#[must_use]
pub fn transition(overlay: Overlay, event: GestureEvent, config: &EngineConfig) -> Overlay {
    match event {
        GestureEvent::PanBegin
        | GestureEvent::PanUpdate { .. }
        | GestureEvent::PanEnd
        | GestureEvent::PanCancel => apply_pan(overlay, event),
        GestureEvent::PinchBegin
        | GestureEvent::PinchUpdate { .. }
        | GestureEvent::PinchEnd
        | GestureEvent::PinchCancel => apply_pinch(overlay, event, config),
        GestureEvent::DoubleTap => apply_double_tap(overlay, config),
    }
}

fn apply_pan(mut overlay: Overlay, event: GestureEvent) -> Overlay {
    match (event, overlay.pan) {
        (GestureEvent::PanBegin, _) => {
            overlay.pan = PanState::Dragging {
                delta: crate::geometry::Vec2::ZERO,
            };
            tracing::trace!(target: "decal.gesture", id = %overlay.id, "pan session opened");
        }
        (GestureEvent::PanUpdate { delta }, PanState::Dragging { .. }) => {
            overlay.pan = PanState::Dragging { delta };
        }
        (GestureEvent::PanEnd, PanState::Dragging { delta }) => {
            overlay.committed_offset += delta;
            overlay.pan = PanState::Idle;
            tracing::debug!(
                target: "decal.gesture",
                id = %overlay.id,
                dx = delta.x,
                dy = delta.y,
                "pan committed"
            );
        }
        (GestureEvent::PanCancel, PanState::Dragging { .. }) => {
            overlay.pan = PanState::Idle;
            tracing::debug!(target: "decal.gesture", id = %overlay.id, "pan cancelled, delta discarded");
        }
        // Update/end/cancel with no open session: ignore.
        _ => {}
    }
    overlay
}

fn apply_pinch(mut overlay: Overlay, event: GestureEvent, config: &EngineConfig) -> Overlay {
    match (event, overlay.pinch) {
        (GestureEvent::PinchBegin, _) => {
            // The live scale starts at the committed value so the displayed
            // scale is continuous across the session boundary.
            overlay.pinch = PinchState::Pinching {
                scale: overlay.committed_scale,
            };
            tracing::trace!(target: "decal.gesture", id = %overlay.id, "pinch session opened");
        }
        (GestureEvent::PinchUpdate { scale }, PinchState::Pinching { .. }) => {
            overlay.pinch = PinchState::Pinching {
                scale: config.clamp_scale(scale),
            };
        }
        (GestureEvent::PinchEnd, PinchState::Pinching { scale }) => {
            // The session factor replaces the committed scale outright; it
            // is not multiplied into it. A session that only ever reports
            // small factors therefore shrinks a previously enlarged
            // overlay.
            overlay.committed_scale = scale;
            overlay.pinch = PinchState::Idle;
            tracing::debug!(
                target: "decal.gesture",
                id = %overlay.id,
                scale = scale,
                "pinch committed"
            );
        }
        (GestureEvent::PinchCancel, PinchState::Pinching { .. }) => {
            overlay.pinch = PinchState::Idle;
            tracing::debug!(target: "decal.gesture", id = %overlay.id, "pinch cancelled, scale reverted");
        }
        _ => {}
    }
    overlay
}

fn apply_double_tap(mut overlay: Overlay, config: &EngineConfig) -> Overlay {
    overlay.size_mode = (overlay.size_mode + 1) % config.size_presets.len();
    let target = config.clamp_scale(config.size_presets[overlay.size_mode]);

    match overlay.size_spring.as_mut() {
        // Mid-animation: redirect the running spring, keeping its velocity.
        Some(spring) => spring.set_target(target),
        None => {
            overlay.size_spring = Some(
                Spring::new(overlay.committed_scale, target)
                    .with_stiffness(config.spring_stiffness)
                    .with_damping(config.spring_damping),
            );
        }
    }

    tracing::debug!(
        target: "decal.gesture",
        id = %overlay.id,
        size_mode = overlay.size_mode,
        scale_target = target,
        "size mode advanced"
    );
    overlay
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Route a gesture event to the overlay it targets.
///
/// The registry slot is replaced with the snapshot produced by
/// [`transition`]. An event aimed at an id no longer in the registry is
/// dropped whole and reported as [`GestureError::OverlayNotFound`].
pub fn route(
    registry: &mut OverlayRegistry,
    id: OverlayId,
    event: GestureEvent,
    config: &EngineConfig,
) -> Result<(), GestureError> {
    let routed = registry.update(id, |overlay| transition(overlay, event, config));
    if let Err(err) = routed {
        tracing::warn!(
            target: "decal.gesture",
            id = %id,
            event = ?event,
            "gesture event dropped"
        );
        return Err(err);
    }
    Ok(())
}
