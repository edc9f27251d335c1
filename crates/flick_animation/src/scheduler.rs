//! Animation scheduler
//!
//! A registry of every in-flight animation, advanced once per frame by an
//! external driver. Entries are keyed by their [`AnimationId`]; an id is
//! present exactly while its animation has not yet settled since its most
//! recent re-target. Settled entries are retired during the advance pass,
//! and the scheduler reports idleness so the driver can stop ticking.

use crate::driver::FrameTimer;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Unique identifier for one animating value.
///
/// Assigned at creation and stable for the value's lifetime, across any
/// number of registrations and retirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl AnimationId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Anything the scheduler can advance: springs over any vector type, or
/// wrappers around shared spring state.
///
/// Storing this as a trait object lets scalar and 2D animations coexist in
/// one registry.
pub trait Animatable: Send {
    /// The registry key for this animation.
    fn id(&self) -> AnimationId;

    /// True once the animation has converged and can be retired.
    fn is_done(&self) -> bool;

    /// Advance by `elapsed` seconds.
    fn update(&mut self, elapsed: f32);
}

type PendingQueue = Arc<Mutex<Vec<Box<dyn Animatable>>>>;

/// Cloneable registration endpoint handed out by the scheduler.
///
/// Registrations go through a pending queue rather than straight into the
/// entry map, so they are safe from any thread and safe to make re-entrantly
/// while an advance pass is running (a registration made mid-pass is picked
/// up on the next pass, never lost).
#[derive(Clone)]
pub struct SchedulerHandle {
    pending: PendingQueue,
}

impl SchedulerHandle {
    /// Queue an animation for registration on the next advance pass.
    ///
    /// Upsert semantics: registering an id that is already live replaces
    /// the stored handle instead of creating a duplicate entry.
    pub fn register(&self, animatable: Box<dyn Animatable>) {
        tracing::trace!(id = ?animatable.id(), "animation registration queued");
        self.pending.lock().unwrap().push(animatable);
    }
}

/// The registry of active animations, advanced once per tick.
pub struct AnimationScheduler {
    entries: FxHashMap<AnimationId, Box<dyn Animatable>>,
    pending: PendingQueue,
    timer: FrameTimer,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            pending: Arc::new(Mutex::new(Vec::new())),
            timer: FrameTimer::new(),
        }
    }

    /// A cloneable handle for registering animations from binding code.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            pending: Arc::clone(&self.pending),
        }
    }

    /// Register or refresh an animation under its own id.
    pub fn register(&mut self, animatable: Box<dyn Animatable>) -> AnimationId {
        let id = animatable.id();
        if self.entries.insert(id, animatable).is_none() {
            tracing::trace!(?id, "animation registered");
        }
        id
    }

    /// Drop an animation without waiting for it to settle.
    pub fn remove(&mut self, id: AnimationId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of live entries (excluding queued registrations).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when there is nothing to advance: no live entries and no queued
    /// registrations. The frame driver's cue to stop requesting ticks.
    pub fn is_idle(&self) -> bool {
        self.entries.is_empty() && self.pending.lock().unwrap().is_empty()
    }

    /// Advance every registered animation by `elapsed` seconds and retire
    /// the ones that report done.
    ///
    /// The key set is snapshotted up front, so retiring an entry mid-pass
    /// cannot skip or double-visit the others. Registrations queued during
    /// the pass are deferred to the next one.
    pub fn advance(&mut self, elapsed: f32) {
        self.drain_pending();
        if self.entries.is_empty() {
            return;
        }

        let ids: SmallVec<[AnimationId; 16]> = self.entries.keys().copied().collect();
        for id in ids {
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };
            entry.update(elapsed);
            if entry.is_done() {
                self.entries.remove(&id);
                tracing::trace!(?id, "animation settled");
            }
        }

        if self.is_idle() {
            tracing::debug!("scheduler idle");
        }
    }

    /// Self-timed advance for drivers that deliver frames without deltas.
    ///
    /// Measures the elapsed time between consecutive calls; the first call
    /// after an idle period sees a zero delta, so a long pause never turns
    /// into one huge integration step.
    pub fn tick(&mut self) {
        let elapsed = self.timer.delta(Instant::now());
        self.advance(elapsed);
        if self.is_idle() {
            self.timer.reset();
        }
    }

    fn drain_pending(&mut self) {
        let mut pending = self.pending.lock().unwrap();
        if pending.is_empty() {
            return;
        }
        let queued: Vec<Box<dyn Animatable>> = pending.drain(..).collect();
        drop(pending);
        for animatable in queued {
            self.register(animatable);
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    /// Settles after a fixed number of non-zero updates; counts every
    /// update it receives into a shared counter.
    struct Countdown {
        id: AnimationId,
        remaining: u32,
        updates: Arc<AtomicU32>,
    }

    impl Countdown {
        fn new(remaining: u32) -> (Self, Arc<AtomicU32>) {
            let updates = Arc::new(AtomicU32::new(0));
            let anim = Self {
                id: AnimationId::next(),
                remaining,
                updates: Arc::clone(&updates),
            };
            (anim, updates)
        }
    }

    impl Animatable for Countdown {
        fn id(&self) -> AnimationId {
            self.id
        }

        fn is_done(&self) -> bool {
            self.remaining == 0
        }

        fn update(&mut self, elapsed: f32) {
            self.updates.fetch_add(1, Ordering::SeqCst);
            if elapsed > 0.0 {
                self.remaining = self.remaining.saturating_sub(1);
            }
        }
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn empty_scheduler_is_idle() {
        let scheduler = AnimationScheduler::new();
        assert!(scheduler.is_idle());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn registration_clears_idle() {
        let mut scheduler = AnimationScheduler::new();
        let (anim, _) = Countdown::new(3);
        scheduler.register(Box::new(anim));
        assert!(!scheduler.is_idle());
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn queued_registration_counts_as_not_idle() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let (anim, _) = Countdown::new(1);
        handle.register(Box::new(anim));
        // Not yet drained into the entry map, but the driver must keep ticking.
        assert!(scheduler.is_empty());
        assert!(!scheduler.is_idle());
    }

    #[test]
    fn same_id_registers_once() {
        let mut scheduler = AnimationScheduler::new();
        let id = AnimationId::next();
        let updates = Arc::new(AtomicU32::new(0));
        for _ in 0..2 {
            scheduler.register(Box::new(Countdown {
                id,
                remaining: 5,
                updates: Arc::clone(&updates),
            }));
        }
        assert_eq!(scheduler.len(), 1);

        scheduler.advance(DT);
        // Only the refreshed entry was updated.
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn settled_entries_are_retired_during_advance() {
        let mut scheduler = AnimationScheduler::new();
        let (anim, _) = Countdown::new(2);
        let id = scheduler.register(Box::new(anim));

        scheduler.advance(DT);
        assert!(scheduler.contains(id));
        scheduler.advance(DT);
        assert!(!scheduler.contains(id));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn retiring_one_entry_still_updates_the_rest() {
        let mut scheduler = AnimationScheduler::new();
        let (fast, fast_updates) = Countdown::new(1);
        let (slow_a, a_updates) = Countdown::new(5);
        let (slow_b, b_updates) = Countdown::new(5);
        scheduler.register(Box::new(fast));
        scheduler.register(Box::new(slow_a));
        scheduler.register(Box::new(slow_b));

        scheduler.advance(DT);

        // The fast one settled and was removed in the same pass, yet every
        // entry was visited exactly once.
        assert_eq!(scheduler.len(), 2);
        assert_eq!(fast_updates.load(Ordering::SeqCst), 1);
        assert_eq!(a_updates.load(Ordering::SeqCst), 1);
        assert_eq!(b_updates.load(Ordering::SeqCst), 1);
    }

    /// Registers a child animation through the handle on its first update,
    /// then reports done.
    struct Spawner {
        id: AnimationId,
        handle: SchedulerHandle,
        child_updates: Arc<AtomicU32>,
        spawned: bool,
    }

    impl Animatable for Spawner {
        fn id(&self) -> AnimationId {
            self.id
        }

        fn is_done(&self) -> bool {
            self.spawned
        }

        fn update(&mut self, _elapsed: f32) {
            if !self.spawned {
                self.handle.register(Box::new(Countdown {
                    id: AnimationId::next(),
                    remaining: 1,
                    updates: Arc::clone(&self.child_updates),
                }));
                self.spawned = true;
            }
        }
    }

    #[test]
    fn reentrant_registration_is_deferred_not_lost() {
        let mut scheduler = AnimationScheduler::new();
        let child_updates = Arc::new(AtomicU32::new(0));
        scheduler.register(Box::new(Spawner {
            id: AnimationId::next(),
            handle: scheduler.handle(),
            child_updates: Arc::clone(&child_updates),
            spawned: false,
        }));

        scheduler.advance(DT);
        // Spawner retired; its child is queued, so the scheduler is not idle.
        assert!(scheduler.is_empty());
        assert!(!scheduler.is_idle());
        assert_eq!(child_updates.load(Ordering::SeqCst), 0);

        scheduler.advance(DT);
        assert_eq!(child_updates.load(Ordering::SeqCst), 1);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn bare_spring_registers_and_retires() {
        use crate::spring::{Spring, SpringConfig};

        // Fire-and-forget: a spring boxed straight into the registry is
        // stepped each pass and retired once settled.
        let mut scheduler = AnimationScheduler::new();
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0f32);
        spring.set_target(1.0);
        let id = scheduler.register(Box::new(spring));
        assert!(scheduler.contains(id));

        for _ in 0..300 {
            scheduler.advance(DT);
        }
        assert!(!scheduler.contains(id));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn remove_drops_entry_without_settling() {
        let mut scheduler = AnimationScheduler::new();
        let (anim, _) = Countdown::new(100);
        let id = scheduler.register(Box::new(anim));
        assert!(scheduler.remove(id));
        assert!(!scheduler.remove(id));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn tick_treats_first_frame_as_zero_elapsed() {
        let mut scheduler = AnimationScheduler::new();
        let (anim, _) = Countdown::new(1);
        let id = scheduler.register(Box::new(anim));

        // First tick has no timestamp baseline: elapsed is zero and the
        // countdown must not budge.
        scheduler.tick();
        assert!(scheduler.contains(id));

        std::thread::sleep(std::time::Duration::from_millis(2));
        scheduler.tick();
        assert!(!scheduler.contains(id));
        assert!(scheduler.is_idle());
    }
}
