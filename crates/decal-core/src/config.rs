#![forbid(unsafe_code)]

//! Engine tuning knobs.
//!
//! One [`EngineConfig`] is shared by the registry, the gesture transitions,
//! and the composition pass, so placement and clamping stay consistent
//! across all of them. The defaults reproduce the classic sticker-canvas
//! layout: a 320×440 canvas with 100-unit overlays cascading in from the
//! bottom-right corner.

use serde::{Deserialize, Serialize};

use crate::geometry::{Corner, Size};
use crate::spring;

/// Tuning for overlay placement, scale clamping, and size-cycle motion.
///
/// Size presets outside the clamp bounds are not rejected; the scale
/// invariant is enforced where values are written, so a misconfigured
/// preset simply pins against a bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Logical canvas extent (default: 320×440).
    pub canvas: Size,
    /// Unscaled overlay box (default: 100×100).
    pub overlay_size: Size,
    /// Corner the cascade is measured from (default: bottom-right).
    pub anchor_corner: Corner,
    /// Inset of the first overlay from the anchor corner, both axes
    /// (default: 20).
    pub corner_margin: f32,
    /// Extra inset per creation index, both axes (default: 10).
    pub cascade_step: f32,
    /// Lower clamp bound for overlay scale (default: 0.5).
    pub scale_min: f32,
    /// Upper clamp bound for overlay scale (default: 3.0).
    pub scale_max: f32,
    /// Ordered size-cycle presets; a new overlay starts on the first entry
    /// (default: [1.2, 1.5, 2.0]).
    pub size_presets: [f32; 3],
    /// Stiffness of the size-cycle spring (default: 170.0).
    pub spring_stiffness: f64,
    /// Damping of the size-cycle spring (default: critical for the default
    /// stiffness).
    pub spring_damping: f64,
}

impl EngineConfig {
    /// Set the canvas extent (builder pattern).
    #[must_use]
    pub fn with_canvas(mut self, canvas: Size) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set the unscaled overlay box (builder pattern).
    #[must_use]
    pub fn with_overlay_size(mut self, size: Size) -> Self {
        self.overlay_size = size;
        self
    }

    /// Set the cascade anchor corner (builder pattern).
    #[must_use]
    pub fn with_anchor_corner(mut self, corner: Corner) -> Self {
        self.anchor_corner = corner;
        self
    }

    /// Set the scale clamp bounds (builder pattern). Swapped bounds are
    /// reordered.
    #[must_use]
    pub fn with_scale_bounds(mut self, min: f32, max: f32) -> Self {
        self.scale_min = min.min(max);
        self.scale_max = min.max(max);
        self
    }

    /// Set the size-cycle presets (builder pattern).
    #[must_use]
    pub fn with_size_presets(mut self, presets: [f32; 3]) -> Self {
        self.size_presets = presets;
        self
    }

    /// Clamp a scale factor to the configured bounds.
    #[inline]
    #[must_use]
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.scale_min, self.scale_max)
    }

    /// The scale a freshly added overlay starts at (the first preset,
    /// clamped).
    #[inline]
    #[must_use]
    pub fn initial_scale(&self) -> f32 {
        self.clamp_scale(self.size_presets[0])
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: Size::new(320.0, 440.0),
            overlay_size: Size::square(100.0),
            anchor_corner: Corner::BottomRight,
            corner_margin: 20.0,
            cascade_step: 10.0,
            scale_min: 0.5,
            scale_max: 3.0,
            size_presets: [1.2, 1.5, 2.0],
            spring_stiffness: spring::DEFAULT_STIFFNESS,
            spring_damping: spring::critical_damping(spring::DEFAULT_STIFFNESS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use crate::geometry::{Corner, Size};

    #[test]
    fn default_layout_matches_sticker_canvas() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.canvas, Size::new(320.0, 440.0));
        assert_eq!(cfg.overlay_size, Size::square(100.0));
        assert_eq!(cfg.anchor_corner, Corner::BottomRight);
        assert_eq!(cfg.corner_margin, 20.0);
        assert_eq!(cfg.cascade_step, 10.0);
        assert_eq!(cfg.size_presets, [1.2, 1.5, 2.0]);
        assert_eq!(cfg.initial_scale(), 1.2);
    }

    #[test]
    fn default_spring_is_critically_damped() {
        let cfg = EngineConfig::default();
        let expected = 2.0 * cfg.spring_stiffness.sqrt();
        assert!((cfg.spring_damping - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn clamp_scale_bounds() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.clamp_scale(5.0), 3.0);
        assert_eq!(cfg.clamp_scale(0.1), 0.5);
        assert_eq!(cfg.clamp_scale(1.7), 1.7);
    }

    #[test]
    fn swapped_scale_bounds_reordered() {
        let cfg = EngineConfig::default().with_scale_bounds(4.0, 0.25);
        assert_eq!(cfg.scale_min, 0.25);
        assert_eq!(cfg.scale_max, 4.0);
    }

    #[test]
    fn initial_scale_clamps_out_of_range_preset() {
        let cfg = EngineConfig::default().with_size_presets([9.0, 1.5, 2.0]);
        assert_eq!(cfg.initial_scale(), 3.0);
    }
}
