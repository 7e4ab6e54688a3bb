//! Property-based invariant tests for the gesture transition function.
//!
//! These tests verify structural invariants of `transition`:
//!
//! 1. The committed scale never leaves the configured clamp bounds
//! 2. The size-mode index always points into the preset list
//! 3. The live delta is zero whenever the translation axis is idle
//! 4. A cancelled session leaves the committed transform untouched
//! 5. A pan commit adds exactly the last cumulative delta
//! 6. A pinch commit is absolute: the clamped session factor replaces
//!    the committed scale outright
//! 7. Determinism: the same event sequence yields the same snapshot
//! 8. No panics on arbitrary event and tick interleavings

use std::time::Duration;

use decal_core::{EngineConfig, GestureEvent, Overlay, OverlayRegistry, Vec2, transition};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// One step applied to an overlay: a gesture event or a frame of time.
#[derive(Debug, Clone, Copy)]
enum Op {
    Event(GestureEvent),
    Tick(u16),
}

fn delta_strategy() -> impl Strategy<Value = Vec2> {
    (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn event_strategy() -> impl Strategy<Value = GestureEvent> {
    prop_oneof![
        Just(GestureEvent::PanBegin),
        delta_strategy().prop_map(|delta| GestureEvent::PanUpdate { delta }),
        Just(GestureEvent::PanEnd),
        Just(GestureEvent::PanCancel),
        Just(GestureEvent::PinchBegin),
        (0.01f32..10.0).prop_map(|scale| GestureEvent::PinchUpdate { scale }),
        Just(GestureEvent::PinchEnd),
        Just(GestureEvent::PinchCancel),
        Just(GestureEvent::DoubleTap),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => event_strategy().prop_map(Op::Event),
        1 => (1u16..100).prop_map(Op::Tick),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..64)
}

fn fresh_overlay(config: &EngineConfig) -> Overlay {
    let mut registry = OverlayRegistry::new();
    registry.add("sticker:heart".into(), config).clone()
}

fn apply_ops(mut overlay: Overlay, ops: &[Op], config: &EngineConfig) -> Overlay {
    for op in ops {
        overlay = match *op {
            Op::Event(event) => transition(overlay, event, config),
            Op::Tick(ms) => overlay.tick(Duration::from_millis(u64::from(ms)), config),
        };
    }
    overlay
}

// ═══════════════════════════════════════════════════════════════════════
// 1 + 2 + 3. Structural invariants hold under arbitrary sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn committed_scale_stays_in_bounds(ops in ops_strategy()) {
        let config = EngineConfig::default();
        let overlay = apply_ops(fresh_overlay(&config), &ops, &config);
        prop_assert!(
            (config.scale_min..=config.scale_max).contains(&overlay.committed_scale()),
            "committed scale {} escaped [{}, {}]",
            overlay.committed_scale(),
            config.scale_min,
            config.scale_max
        );
    }

    #[test]
    fn size_mode_always_indexes_presets(ops in ops_strategy()) {
        let config = EngineConfig::default();
        let overlay = apply_ops(fresh_overlay(&config), &ops, &config);
        prop_assert!(overlay.size_mode_index() < config.size_presets.len());
    }

    #[test]
    fn idle_translation_axis_has_zero_delta(ops in ops_strategy()) {
        let config = EngineConfig::default();
        let mut overlay = fresh_overlay(&config);
        for op in &ops {
            overlay = match *op {
                Op::Event(event) => transition(overlay, event, &config),
                Op::Tick(ms) => overlay.tick(Duration::from_millis(u64::from(ms)), &config),
            };
            if overlay.gestures_idle() {
                prop_assert_eq!(overlay.live_offset_delta(), Vec2::ZERO);
                prop_assert_eq!(overlay.displayed_offset(), overlay.committed_offset());
                prop_assert_eq!(overlay.displayed_scale(), overlay.committed_scale());
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Cancel discards the session
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cancelled_pan_leaves_committed_offset(deltas in prop::collection::vec(delta_strategy(), 0..8)) {
        let config = EngineConfig::default();
        let mut overlay = fresh_overlay(&config);
        let before = overlay.committed_offset();

        overlay = transition(overlay, GestureEvent::PanBegin, &config);
        for delta in deltas {
            overlay = transition(overlay, GestureEvent::PanUpdate { delta }, &config);
        }
        overlay = transition(overlay, GestureEvent::PanCancel, &config);

        prop_assert_eq!(overlay.committed_offset(), before);
        prop_assert!(overlay.gestures_idle());
    }

    #[test]
    fn cancelled_pinch_leaves_committed_scale(factors in prop::collection::vec(0.01f32..10.0, 0..8)) {
        let config = EngineConfig::default();
        let mut overlay = fresh_overlay(&config);
        let before = overlay.committed_scale();

        overlay = transition(overlay, GestureEvent::PinchBegin, &config);
        for scale in factors {
            overlay = transition(overlay, GestureEvent::PinchUpdate { scale }, &config);
        }
        overlay = transition(overlay, GestureEvent::PinchCancel, &config);

        prop_assert_eq!(overlay.committed_scale(), before);
        prop_assert_eq!(overlay.displayed_scale(), before);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Pan commit adds the last cumulative delta
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pan_commit_adds_last_delta(
        start in delta_strategy(),
        deltas in prop::collection::vec(delta_strategy(), 1..8),
    ) {
        let config = EngineConfig::default();
        let mut overlay = fresh_overlay(&config);

        // Seed a prior committed offset via a first drag.
        overlay = transition(overlay, GestureEvent::PanBegin, &config);
        overlay = transition(overlay, GestureEvent::PanUpdate { delta: start }, &config);
        overlay = transition(overlay, GestureEvent::PanEnd, &config);
        let before = overlay.committed_offset();

        overlay = transition(overlay, GestureEvent::PanBegin, &config);
        for &delta in &deltas {
            overlay = transition(overlay, GestureEvent::PanUpdate { delta }, &config);
        }
        overlay = transition(overlay, GestureEvent::PanEnd, &config);

        // Updates are cumulative within a session, so only the last one
        // lands in the committed offset.
        let last = *deltas.last().unwrap();
        prop_assert_eq!(overlay.committed_offset(), before + last);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Pinch commit replaces rather than multiplies
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pinch_commit_is_absolute(
        warmup in 0.01f32..10.0,
        session in 0.01f32..10.0,
    ) {
        let config = EngineConfig::default();
        let mut overlay = fresh_overlay(&config);

        // Whatever scale the overlay starts the second pinch at...
        overlay = transition(overlay, GestureEvent::PinchBegin, &config);
        overlay = transition(overlay, GestureEvent::PinchUpdate { scale: warmup }, &config);
        overlay = transition(overlay, GestureEvent::PinchEnd, &config);

        // ...the next commit depends only on the new session factor.
        overlay = transition(overlay, GestureEvent::PinchBegin, &config);
        overlay = transition(overlay, GestureEvent::PinchUpdate { scale: session }, &config);
        overlay = transition(overlay, GestureEvent::PinchEnd, &config);

        prop_assert_eq!(overlay.committed_scale(), config.clamp_scale(session));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 7. Determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn same_ops_yield_same_snapshot(ops in ops_strategy()) {
        let config = EngineConfig::default();
        let a = apply_ops(fresh_overlay(&config), &ops, &config);
        let b = apply_ops(fresh_overlay(&config), &ops, &config);
        prop_assert_eq!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 8. No panics, and identity survives everything
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn identity_survives_arbitrary_sequences(ops in ops_strategy()) {
        let config = EngineConfig::default();
        let fresh = fresh_overlay(&config);
        let id = fresh.id();
        let index = fresh.creation_index();

        let overlay = apply_ops(fresh, &ops, &config);
        prop_assert_eq!(overlay.id(), id);
        prop_assert_eq!(overlay.creation_index(), index);
        prop_assert_eq!(overlay.content().as_str(), "sticker:heart");
    }
}
