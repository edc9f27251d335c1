//! Spring physics integrator
//!
//! Models one animating quantity as a damped harmonic oscillator with unit
//! mass. Integration is semi-implicit (symplectic) Euler: velocity is
//! updated from the force at the pre-step state, then position is updated
//! with the new velocity. That ordering is unconditionally more stable than
//! explicit Euler for oscillatory motion at UI frame rates, which matters
//! more here than integration accuracy.

use crate::scheduler::{Animatable, AnimationId};
use crate::vector::SpringVector;

use std::f32::consts::TAU;

/// Default squared-magnitude convergence threshold.
const DEFAULT_EPSILON: f32 = 0.0005;

/// Spring constants plus the convergence threshold.
///
/// `stiffness` must be positive and `damping` non-negative. A spring with
/// zero damping oscillates forever; that is a caller configuration error,
/// not a runtime fault.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Restoring force per unit displacement (unit mass assumed).
    pub stiffness: f32,
    /// Opposing force per unit velocity.
    pub damping: f32,
    /// Squared-magnitude threshold below which the spring counts as settled.
    pub epsilon: f32,
}

impl SpringConfig {
    /// Create a config from raw spring constants.
    pub fn new(stiffness: f32, damping: f32) -> Self {
        debug_assert!(stiffness > 0.0, "stiffness must be positive");
        debug_assert!(damping >= 0.0, "damping must be non-negative");
        Self {
            stiffness,
            damping,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Derive constants from a perceptual duration and damping ratio.
    ///
    /// `response_secs` is the oscillation period the spring would have with
    /// no damping; `damping_ratio` of 1.0 is critically damped, below 1.0
    /// bouncy, above 1.0 sluggish. With unit mass:
    /// `stiffness = (2π/response)²`, `damping = 2·ratio·(2π/response)`.
    pub fn with_duration(response_secs: f32, damping_ratio: f32) -> Self {
        debug_assert!(response_secs > 0.0, "response must be positive");
        let omega = TAU / response_secs;
        Self::new(omega * omega, 2.0 * damping_ratio * omega)
    }

    /// The default response: near-critically damped, settles in about half
    /// a second without visible bounce (response 0.5s, ratio 0.825).
    pub fn smooth() -> Self {
        Self::with_duration(0.5, 0.825)
    }

    /// Fast and critically damped; no overshoot.
    pub fn stiff() -> Self {
        Self::with_duration(0.3, 1.0)
    }

    /// Very fast with a hint of spring.
    pub fn snappy() -> Self {
        Self::with_duration(0.25, 0.85)
    }

    /// Slow and critically damped; good for large layout shifts.
    pub fn gentle() -> Self {
        Self::with_duration(0.8, 1.0)
    }

    /// Underdamped; visibly overshoots and oscillates before settling.
    pub fn wobbly() -> Self {
        Self::with_duration(0.5, 0.35)
    }

    /// Override the convergence threshold.
    pub fn epsilon(mut self, epsilon: f32) -> Self {
        debug_assert!(epsilon > 0.0, "epsilon must be positive");
        self.epsilon = epsilon;
        self
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::smooth()
    }
}

/// A spring-driven interpolator for one animating quantity.
///
/// Holds the current value, the target it is being driven toward, and the
/// current velocity. Re-targeting never resets velocity, so an in-flight
/// animation is redirected with its momentum intact rather than restarted.
#[derive(Clone, Debug)]
pub struct Spring<V: SpringVector> {
    id: AnimationId,
    value: V,
    target: V,
    velocity: V,
    config: SpringConfig,
}

impl<V: SpringVector> Spring<V> {
    /// Create a spring at rest: `value == target == initial`, zero velocity.
    pub fn new(config: SpringConfig, initial: V) -> Self {
        Self {
            id: AnimationId::next(),
            value: initial,
            target: initial,
            velocity: V::zero(),
            config,
        }
    }

    /// Identifier assigned at creation, stable for the spring's lifetime.
    pub fn id(&self) -> AnimationId {
        self.id
    }

    /// The current interpolated value.
    pub fn value(&self) -> V {
        self.value
    }

    /// The resting value the spring is driven toward.
    pub fn target(&self) -> V {
        self.target
    }

    /// The current rate of change.
    pub fn velocity(&self) -> V {
        self.velocity
    }

    /// The constants this spring integrates with, including any epsilon
    /// override, fixed at construction.
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Drive the spring toward `target`.
    ///
    /// Leaves `value` and `velocity` untouched: a spring already in motion
    /// keeps its momentum and curves toward the new target.
    pub fn set_target(&mut self, target: V) {
        self.target = target;
    }

    /// Jump to `value` with zero velocity, skipping the animation.
    pub fn snap_to(&mut self, value: V) {
        self.value = value;
        self.target = value;
        self.velocity = V::zero();
    }

    /// Advance the simulation by `elapsed` seconds.
    ///
    /// Non-positive `elapsed` is a no-op. There is no sub-stepping: a very
    /// large `elapsed` (e.g. after the frame driver was paused) can
    /// overshoot or oscillate. Drivers should report a zero delta for the
    /// first frame after an idle period.
    pub fn step(&mut self, elapsed: f32) {
        if elapsed <= 0.0 {
            return;
        }
        let displacement = self.value - self.target;
        let spring_force = displacement.scale(-self.config.stiffness);
        let damping_force = self.velocity.scale(-self.config.damping);
        // F = ma with m = 1
        let acceleration = spring_force + damping_force;
        self.velocity = self.velocity + acceleration.scale(elapsed);
        self.value = self.value + self.velocity.scale(elapsed);
    }

    /// True once both velocity and displacement are below the threshold.
    ///
    /// Both conditions are required: a fast-moving value passing through
    /// its target has near-zero displacement but is nowhere near done.
    /// Non-finite state compares false and keeps the spring unsettled.
    pub fn is_settled(&self) -> bool {
        self.velocity.magnitude_squared() < self.config.epsilon
            && (self.value - self.target).magnitude_squared() < self.config.epsilon
    }
}

impl<V: SpringVector> Animatable for Spring<V> {
    fn id(&self) -> AnimationId {
        self.id
    }

    fn is_done(&self) -> bool {
        self.is_settled()
    }

    fn update(&mut self, elapsed: f32) {
        self.step(elapsed);
    }
}
