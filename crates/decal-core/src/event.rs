#![forbid(unsafe_code)]

//! Tagged gesture events consumed by the transform engine.
//!
//! An underlying platform recognizer performs the actual gesture
//! *recognition*; this crate only consumes its begin/update/end/cancel
//! reports, retagged as [`GestureEvent`]. The engine never sees raw touches.
//!
//! # Design
//!
//! ## Invariants
//! 1. A well-formed pan session is `PanBegin` → zero or more `PanUpdate` →
//!    `PanEnd` or `PanCancel`; pinch sessions follow the same shape.
//! 2. `PanUpdate` deltas are cumulative from the session start, not
//!    incremental per event. The last update alone determines the commit.
//! 3. `PinchUpdate` carries the recognizer's absolute session factor, not a
//!    multiplier against the overlay's committed scale.
//! 4. `DoubleTap` is a complete gesture in itself; it has no session and
//!    may arrive while either axis is mid-session.
//!
//! ## Failure Modes
//! - Out-of-session events (an update or end with no preceding begin) are
//!   tolerated by the transition functions and ignored; malformed input
//!   from a recognizer must not wedge an axis.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// A gesture report targeting one overlay.
///
/// Translation and scale sessions are independent; both may be open at
/// once for the same overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// A pan session opened on the translation axis.
    PanBegin,
    /// In-progress pan displacement, cumulative since `PanBegin`.
    PanUpdate { delta: Vec2 },
    /// The pan session ended normally; the live delta is committed.
    PanEnd,
    /// The recognizer aborted the pan session; the live delta is discarded.
    PanCancel,
    /// A pinch session opened on the scale axis.
    PinchBegin,
    /// In-progress pinch factor, absolute for the session.
    PinchUpdate { scale: f32 },
    /// The pinch session ended normally; the live scale is committed.
    PinchEnd,
    /// The recognizer aborted the pinch session; the live scale is discarded.
    PinchCancel,
    /// A double-tap, advancing the overlay to its next size preset.
    DoubleTap,
}

impl GestureEvent {
    /// Whether this event closes a gesture session (normally or not).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::PanEnd | Self::PanCancel | Self::PinchEnd | Self::PinchCancel
        )
    }
}

#[cfg(test)]
mod tests {
    use super::GestureEvent;
    use crate::geometry::Vec2;

    #[test]
    fn terminal_events() {
        assert!(GestureEvent::PanEnd.is_terminal());
        assert!(GestureEvent::PanCancel.is_terminal());
        assert!(GestureEvent::PinchEnd.is_terminal());
        assert!(GestureEvent::PinchCancel.is_terminal());
        assert!(!GestureEvent::PanBegin.is_terminal());
        assert!(!GestureEvent::PinchUpdate { scale: 1.0 }.is_terminal());
        assert!(!GestureEvent::DoubleTap.is_terminal());
    }

    #[test]
    fn events_serialize_with_stable_tags() {
        let json = serde_json::to_string(&GestureEvent::PanUpdate {
            delta: Vec2::new(4.0, -2.5),
        })
        .unwrap();
        assert_eq!(json, r#"{"PanUpdate":{"delta":{"x":4.0,"y":-2.5}}}"#);

        let back: GestureEvent = serde_json::from_str(r#""DoubleTap""#).unwrap();
        assert_eq!(back, GestureEvent::DoubleTap);
    }
}
