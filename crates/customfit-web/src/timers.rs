//! Browser timers

use customfit_booking::schedule::{Scheduler, Task, TimerHandle};
use gloo_timers::callback::Timeout;
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TimerHandle> {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Box::new(GlooTimer(Some(Timeout::new(millis, task))))
    }
}

struct GlooTimer(Option<Timeout>);

impl TimerHandle for GlooTimer {
    fn cancel(&mut self) {
        if let Some(timeout) = self.0.take() {
            drop(timeout.cancel());
        }
    }
}

impl Drop for GlooTimer {
    // `Timeout` clears itself on drop; the handle contract says it must not
    fn drop(&mut self) {
        if let Some(timeout) = self.0.take() {
            let _ = timeout.forget();
        }
    }
}
