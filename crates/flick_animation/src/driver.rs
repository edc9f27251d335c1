//! Frame driving
//!
//! The scheduler never pulls time on its own: an external per-frame clock
//! pushes elapsed seconds into [`AnimationScheduler::advance`]. This module
//! holds the contract for that clock, the elapsed-time bookkeeping it
//! needs, and a deterministic fixed-step driver for tests and headless use.

use crate::scheduler::AnimationScheduler;

use std::time::Instant;

/// Contract for the external per-frame clock.
///
/// While [`AnimationScheduler::is_idle`] is false the driver delivers one
/// [`AnimationScheduler::advance`] (or [`AnimationScheduler::tick`]) per
/// frame, with the elapsed time since its previous frame. Once the
/// scheduler reports idle the driver should stop requesting frames, and it
/// must start again when a registration makes `is_idle` false. The first
/// frame after an idle period has no timestamp baseline and must be
/// delivered with a zero delta (see [`FrameTimer`]).
pub trait FrameDriver {
    /// Start delivering ticks: a registration made the scheduler leave the
    /// idle state. Real drivers hook their clock source back up here.
    fn resume(&mut self) {}

    /// Stop delivering ticks: the scheduler reported idle. The driver stays
    /// suspended until [`resume`](FrameDriver::resume).
    fn suspend(&mut self) {}

    /// Deliver frames to `scheduler` until it reports idle.
    ///
    /// Implementations call [`resume`](FrameDriver::resume) on entry when
    /// there is work and [`suspend`](FrameDriver::suspend) once the
    /// scheduler goes idle again.
    ///
    /// Returns the number of frames delivered.
    fn run(&mut self, scheduler: &mut AnimationScheduler) -> u32;
}

/// Elapsed-time bookkeeping between consecutive frames.
///
/// Yields the delta between consecutive timestamps, and zero on the first
/// call after construction or [`reset`](FrameTimer::reset). Resetting when
/// the scheduler goes idle is what keeps a long pause from being integrated
/// as one giant step.
#[derive(Debug, Default)]
pub struct FrameTimer {
    last: Option<Instant>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Seconds elapsed since the previous call, or zero if there is no
    /// baseline yet.
    pub fn delta(&mut self, now: Instant) -> f32 {
        let elapsed = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        elapsed
    }

    /// Forget the baseline; the next [`delta`](FrameTimer::delta) is zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// A fixed-step driver with no real clock behind it.
///
/// Steps the scheduler with the same delta every frame until it goes idle
/// or the frame cap is hit. Useful for deterministic tests and for driving
/// animations in headless environments.
#[derive(Debug)]
pub struct HeadlessDriver {
    step_secs: f32,
    max_frames: u32,
}

impl HeadlessDriver {
    /// A driver delivering `step_secs` per frame, at most `max_frames`
    /// frames per [`run`](FrameDriver::run).
    pub fn new(step_secs: f32, max_frames: u32) -> Self {
        Self {
            step_secs,
            max_frames,
        }
    }

    /// 60 fps steps with a one-minute frame cap.
    pub fn sixty_fps() -> Self {
        Self::new(1.0 / 60.0, 3600)
    }
}

impl FrameDriver for HeadlessDriver {
    fn run(&mut self, scheduler: &mut AnimationScheduler) -> u32 {
        if scheduler.is_idle() {
            return 0;
        }
        self.resume();
        let mut frames = 0;
        while !scheduler.is_idle() && frames < self.max_frames {
            scheduler.advance(self.step_secs);
            frames += 1;
        }
        if scheduler.is_idle() {
            self.suspend();
        }
        frames
    }
}
