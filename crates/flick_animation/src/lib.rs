//! Flick Animation Core
//!
//! Frame-driven spring interpolation for animated values.
//!
//! # Features
//!
//! - **Spring Physics**: semi-implicit Euler integration of a damped
//!   harmonic oscillator, generic over scalars and vectors
//! - **One Scheduler, Many Values**: a single registry advances every
//!   in-flight animation per frame with no per-value timers
//! - **Interruptible**: re-targeting preserves velocity, so in-flight
//!   animations are redirected rather than restarted
//! - **Idle-Aware**: the scheduler reports idleness so frame drivers can
//!   stop requesting ticks when nothing is animating
//!
//! # Example
//!
//! ```rust
//! use flick_animation::{AnimatedValue, AnimationScheduler, SpringConfig};
//!
//! let mut scheduler = AnimationScheduler::new();
//! let offset = AnimatedValue::new(scheduler.handle(), 0.0_f32, SpringConfig::smooth());
//!
//! offset.set_target(100.0);
//! while !scheduler.is_idle() {
//!     scheduler.advance(1.0 / 60.0);
//! }
//! assert!((offset.get() - 100.0).abs() < 0.1);
//! ```

pub mod driver;
pub mod scheduler;
pub mod spring;
pub mod value;
pub mod vector;

pub use driver::{FrameDriver, FrameTimer, HeadlessDriver};
pub use scheduler::{Animatable, AnimationId, AnimationScheduler, SchedulerHandle};
pub use spring::{Spring, SpringConfig};
pub use value::AnimatedValue;
pub use vector::{SpringVector, Vec2};
