//! Animated value handle
//!
//! The explicit read/write binding over a shared spring: rendering glue
//! reads [`AnimatedValue::get`] every redraw, input glue calls
//! [`AnimatedValue::set_target`] on every external write. Setting a target
//! also registers the spring with the scheduler, so the owner never has to
//! manage registration by hand.
//!
//! ```rust
//! use flick_animation::{AnimatedValue, AnimationScheduler, SpringConfig, Vec2};
//!
//! let mut scheduler = AnimationScheduler::new();
//! let offset = AnimatedValue::new(
//!     scheduler.handle(),
//!     Vec2::new(100.0, 200.0),
//!     SpringConfig::wobbly(),
//! );
//!
//! // On tap:
//! offset.set_target(Vec2::new(50.0, -200.0));
//!
//! // Each frame, while !scheduler.is_idle():
//! scheduler.advance(1.0 / 60.0);
//! let current = offset.get(); // feed to the renderer
//! ```

use crate::scheduler::{Animatable, AnimationId, SchedulerHandle};
use crate::spring::{Spring, SpringConfig};
use crate::vector::SpringVector;

use std::sync::{Arc, Mutex};

/// A spring-animated value with scheduler-managed updates.
///
/// Clones share the same underlying spring, so one clone can live in an
/// input handler setting targets while another sits in render state reading
/// the interpolated value.
pub struct AnimatedValue<V: SpringVector> {
    spring: Arc<Mutex<Spring<V>>>,
    scheduler: SchedulerHandle,
}

impl<V: SpringVector> Clone for AnimatedValue<V> {
    fn clone(&self) -> Self {
        Self {
            spring: Arc::clone(&self.spring),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<V: SpringVector> AnimatedValue<V> {
    /// Create a value at rest at `initial`.
    pub fn new(scheduler: SchedulerHandle, initial: V, config: SpringConfig) -> Self {
        Self {
            spring: Arc::new(Mutex::new(Spring::new(config, initial))),
            scheduler,
        }
    }

    /// The current interpolated value.
    pub fn get(&self) -> V {
        self.spring.lock().unwrap().value()
    }

    /// The target the value is animating toward.
    pub fn target(&self) -> V {
        self.spring.lock().unwrap().target()
    }

    /// The current rate of change.
    pub fn velocity(&self) -> V {
        self.spring.lock().unwrap().velocity()
    }

    pub fn id(&self) -> AnimationId {
        self.spring.lock().unwrap().id()
    }

    /// True while the spring has not settled at its target.
    pub fn is_animating(&self) -> bool {
        !self.spring.lock().unwrap().is_settled()
    }

    /// Animate toward `target`, preserving any in-flight velocity, and
    /// register (or refresh) the spring with the scheduler.
    ///
    /// Safe to call repeatedly; the registry keeps one entry per id.
    pub fn set_target(&self, target: V) {
        self.spring.lock().unwrap().set_target(target);
        self.scheduler.register(Box::new(SpringTicker {
            spring: Arc::clone(&self.spring),
        }));
    }

    /// Jump straight to `value` with zero velocity, skipping the animation.
    pub fn snap_to(&self, value: V) {
        self.spring.lock().unwrap().snap_to(value);
    }
}

/// The scheduler-side view of a shared spring.
struct SpringTicker<V: SpringVector> {
    spring: Arc<Mutex<Spring<V>>>,
}

impl<V: SpringVector> Animatable for SpringTicker<V> {
    fn id(&self) -> AnimationId {
        self.spring.lock().unwrap().id()
    }

    fn is_done(&self) -> bool {
        self.spring.lock().unwrap().is_settled()
    }

    fn update(&mut self, elapsed: f32) {
        self.spring.lock().unwrap().step(elapsed);
    }
}
