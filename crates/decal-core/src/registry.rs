#![forbid(unsafe_code)]

//! The overlay registry: ordered owner of every overlay in the scene.
//!
//! Insertion order is z-order. The registry is the single mutable resource
//! in the engine; gestures reach it only through
//! [`update`](OverlayRegistry::update), which swaps one snapshot for the
//! next in place.
//!
//! # Invariants
//!
//! 1. `list()` order equals insertion order; removals preserve the relative
//!    order of the survivors.
//! 2. Ids are never reused, not even after `reset_all`.
//! 3. Creation indices increase strictly monotonically between resets; they
//!    are not compacted by removals, so the cascade keeps staggering new
//!    overlays. `reset_all` restarts them from zero.

use ahash::AHashMap;

use crate::config::EngineConfig;
use crate::error::GestureError;
use crate::overlay::{ContentRef, Overlay, OverlayId};

/// Ordered, owning collection of overlays.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    overlays: Vec<Overlay>,
    slots: AHashMap<OverlayId, usize>,
    next_id: u64,
    next_creation_index: u32,
}

impl OverlayRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new overlay for `content`.
    ///
    /// The overlay starts at the cascade anchor for its creation index,
    /// with zero committed offset and the first size preset as its scale.
    /// Always succeeds.
    pub fn add(&mut self, content: ContentRef, config: &EngineConfig) -> &Overlay {
        let id = OverlayId::new(self.next_id);
        self.next_id += 1;
        let creation_index = self.next_creation_index;
        self.next_creation_index += 1;

        tracing::debug!(
            target: "decal.registry",
            id = %id,
            creation_index = creation_index,
            content = %content,
            "overlay added"
        );

        let overlay = Overlay::new(id, content, creation_index, config);
        let slot = self.overlays.len();
        self.overlays.push(overlay);
        self.slots.insert(id, slot);
        &self.overlays[slot]
    }

    /// Remove one overlay, returning its final snapshot.
    pub fn remove(&mut self, id: OverlayId) -> Result<Overlay, GestureError> {
        let slot = self
            .slots
            .remove(&id)
            .ok_or(GestureError::OverlayNotFound(id))?;
        let overlay = self.overlays.remove(slot);
        for s in self.slots.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        tracing::debug!(target: "decal.registry", id = %id, "overlay removed");
        Ok(overlay)
    }

    /// Empty the registry and restart creation indices from zero.
    ///
    /// Ids keep climbing; a stale id from before the reset can never
    /// collide with an overlay added after it.
    pub fn reset_all(&mut self) {
        tracing::debug!(
            target: "decal.registry",
            count = self.overlays.len(),
            "registry reset"
        );
        self.overlays.clear();
        self.slots.clear();
        self.next_creation_index = 0;
    }

    /// The current z-ordered view, bottom-most first.
    #[inline]
    #[must_use]
    pub fn list(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Look up one overlay.
    #[must_use]
    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.slots.get(&id).map(|&slot| &self.overlays[slot])
    }

    /// Whether `id` is currently registered.
    #[must_use]
    pub fn contains(&self, id: OverlayId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Number of overlays.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Whether the registry is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Replace one overlay's snapshot with the one produced by `f`.
    ///
    /// `f` must preserve the overlay's identity.
    pub(crate) fn update(
        &mut self,
        id: OverlayId,
        f: impl FnOnce(Overlay) -> Overlay,
    ) -> Result<(), GestureError> {
        let slot = *self.slots.get(&id).ok_or(GestureError::OverlayNotFound(id))?;
        let next = f(self.overlays[slot].clone());
        debug_assert_eq!(next.id(), id);
        self.overlays[slot] = next;
        Ok(())
    }

    /// Replace every overlay's snapshot with the one produced by `f`.
    ///
    /// `f` must preserve each overlay's identity.
    pub(crate) fn update_all(&mut self, mut f: impl FnMut(Overlay) -> Overlay) {
        for slot in &mut self.overlays {
            let id = slot.id();
            let next = f(slot.clone());
            debug_assert_eq!(next.id(), id);
            *slot = next;
        }
    }
}
