#![forbid(unsafe_code)]

//! Damped harmonic oscillator driving overlay scale.
//!
//! Size-mode cycling never snaps an overlay to its new preset scale; the
//! committed scale follows a spring toward the target instead. The motion
//! is the classical damped spring equation:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force strength. Higher = faster response.
//! - **damping** (c): velocity drag. The default is critical damping
//!   (c = 2√k), the fastest convergence that does not overshoot the
//!   target.
//! - **rest thresholds**: position delta and velocity magnitude below which
//!   the spring snaps to the target and stops.
//!
//! # Integration
//!
//! Semi-implicit Euler. Large frame deltas are subdivided into steps of at
//! most [`MAX_STEP_SECS`] so high stiffness stays numerically stable.
//!
//! # Invariants
//!
//! 1. A spring at rest (`is_at_rest()`) does not move until `set_target`
//!    changes the target by more than the rest threshold.
//! 2. On coming to rest the position is snapped exactly to the target.
//! 3. Stiffness and damping are always positive (clamped on construction).
//!
//! # Failure Modes
//!
//! - Zero damping oscillates forever; the spring never reports rest. The
//!   engine only builds critically-damped springs, so this arises only
//!   through explicit builder calls.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum dt per integration step (4ms). Larger deltas are subdivided
/// for numerical stability with high stiffness values.
const MAX_STEP_SECS: f64 = 0.004;

/// Default stiffness for size-cycle motion.
pub const DEFAULT_STIFFNESS: f64 = 170.0;

/// Position delta below which the spring is considered at rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity magnitude below which (combined with the position threshold)
/// the spring is considered at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// A critically-damped spring interpolating an overlay's committed scale
/// toward a size preset.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use decal_core::Spring;
///
/// let mut spring = Spring::new(1.2, 2.0);
/// for _ in 0..120 {
///     spring.advance(Duration::from_millis(16));
/// }
/// assert!((spring.value() - 2.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    ///
    /// Defaults to critical damping for the default stiffness, so the
    /// scale converges without overshoot.
    #[must_use]
    pub fn new(initial: f32, target: f32) -> Self {
        Self {
            position: f64::from(initial),
            velocity: 0.0,
            target: f64::from(target),
            stiffness: DEFAULT_STIFFNESS,
            damping: critical_damping(DEFAULT_STIFFNESS),
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Set rest threshold (builder pattern).
    #[must_use]
    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold.abs();
        self
    }

    /// Set velocity threshold (builder pattern).
    #[must_use]
    pub fn with_velocity_threshold(mut self, threshold: f64) -> Self {
        self.velocity_threshold = threshold.abs();
        self
    }

    /// Current position as a scale factor.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f32 {
        self.position as f32
    }

    /// Current position (full precision).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Stiffness parameter.
    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping parameter.
    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Retarget the spring, keeping its current position and velocity.
    ///
    /// Wakes the spring if it was at rest; a double-tap mid-animation
    /// redirects the motion instead of restarting it. Targets within the
    /// rest threshold of the current one are ignored.
    pub fn set_target(&mut self, target: f32) {
        let target = f64::from(target);
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Perform a single integration step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler:
        // 1. Compute acceleration from current position.
        // 2. Update velocity.
        // 3. Update position from new velocity.
        let displacement = self.position - self.target;
        let spring_force = -self.stiffness * displacement;
        let damping_force = -self.damping * self.velocity;
        let acceleration = spring_force + damping_force;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing if necessary for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        let vel_abs = self.velocity.abs();
        if pos_delta < self.rest_threshold && vel_abs < self.velocity_threshold {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

/// The critical damping coefficient for a given stiffness.
///
/// At critical damping the spring converges as fast as possible without
/// oscillating past the target.
#[must_use]
pub fn critical_damping(stiffness: f64) -> f64 {
    2.0 * stiffness.max(MIN_STIFFNESS).sqrt()
}
