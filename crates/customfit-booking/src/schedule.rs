//! Deferred callbacks
//!
//! The banner needs exactly one thing from a timer: run a closure later, and
//! be able to call it off. Dropping a handle does NOT cancel the timer.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Work to run once the delay has passed
pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task
pub trait TimerHandle {
    /// Prevent the task from running. No-op once it has fired.
    fn cancel(&mut self);
}

/// Single-threaded timer source
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle>;
}

// =============================================================================
// Manual (virtual time)
// =============================================================================

struct PendingTask {
    id: u64,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTask>,
}

/// Virtual clock driven by [`ManualScheduler::advance`].
///
/// Clones share the same timeline, so a test can keep one clone while the
/// controller owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Tasks scheduled and not yet fired or cancelled
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Move time forward, firing due tasks in deadline order. Tasks scheduled
    /// by a firing task run in the same call if they fall due in the window.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let earliest = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.id))
                    .map(|(idx, _)| idx);
                earliest.map(|idx| {
                    let pending = state.pending.remove(idx);
                    state.now = pending.due;
                    pending.task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay;
        state.pending.push(PendingTask { id, due, task });
        Box::new(ManualTimer {
            id,
            state: Rc::downgrade(&self.state),
        })
    }
}

struct ManualTimer {
    id: u64,
    state: Weak<RefCell<ManualState>>,
}

impl TimerHandle for ManualTimer {
    fn cancel(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().pending.retain(|p| p.id != self.id);
        }
    }
}

// =============================================================================
// Tokio (native hosts)
// =============================================================================

/// Timers on the tokio clock.
///
/// Tasks are spawned with `spawn_local`, so scheduling must happen inside a
/// `tokio::task::LocalSet`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

#[cfg(not(target_arch = "wasm32"))]
impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle> {
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        Box::new(TokioTimer(handle))
    }
}

#[cfg(not(target_arch = "wasm32"))]
struct TokioTimer(tokio::task::JoinHandle<()>);

#[cfg(not(target_arch = "wasm32"))]
impl TimerHandle for TokioTimer {
    fn cancel(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Task) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, move || {
            let c = Rc::clone(&c);
            Box::new(move || c.set(c.get() + 1)) as Task
        })
    }

    #[test]
    fn test_fires_at_deadline() {
        let scheduler = ManualScheduler::new();
        let (count, task) = counter();
        let _h = scheduler.schedule(Duration::from_millis(100), task());

        scheduler.advance(Duration::from_millis(99));
        assert_eq!(count.get(), 0);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let scheduler = ManualScheduler::new();
        let (count, task) = counter();
        let mut handle = scheduler.schedule(Duration::from_millis(10), task());
        handle.cancel();
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_drop_does_not_cancel() {
        let scheduler = ManualScheduler::new();
        let (count, task) = counter();
        drop(scheduler.schedule(Duration::from_millis(10), task()));
        scheduler.advance(Duration::from_millis(10));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "c"), (10, "a"), (20, "b")] {
            let order = Rc::clone(&order);
            let _ = scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || order.borrow_mut().push(tag)),
            );
        }
        scheduler.advance(Duration::from_millis(30));
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.now(), Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_fires_and_cancels() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let (count, task) = counter();
                let _fired = TokioScheduler.schedule(Duration::from_millis(50), task());
                let mut cancelled = TokioScheduler.schedule(Duration::from_millis(50), task());
                cancelled.cancel();

                tokio::time::sleep(Duration::from_millis(49)).await;
                assert_eq!(count.get(), 0);
                tokio::time::sleep(Duration::from_millis(2)).await;
                assert_eq!(count.get(), 1);
            })
            .await;
    }
}
