//! Error banner
//!
//! One message at a time. Each `show` replaces the text and restarts the
//! dismiss countdown; the previous countdown is cancelled so it cannot hide
//! the newer message early.

use crate::dom::BannerHost;
use crate::schedule::{Scheduler, TimerHandle};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub struct ErrorBanner {
    host: Rc<dyn BannerHost>,
    scheduler: Rc<dyn Scheduler>,
    dismiss_after: Duration,
    timer: RefCell<Option<Box<dyn TimerHandle>>>,
}

impl ErrorBanner {
    pub fn new(host: Rc<dyn BannerHost>, scheduler: Rc<dyn Scheduler>, dismiss_after: Duration) -> Self {
        Self {
            host,
            scheduler,
            dismiss_after,
            timer: RefCell::new(None),
        }
    }

    pub fn show(&self, message: &str) {
        self.cancel_timer();
        tracing::debug!(text = message, "showing error banner");
        self.host.set_message(message);
        self.host.set_hidden(false);

        let host = Rc::clone(&self.host);
        let handle = self
            .scheduler
            .schedule(self.dismiss_after, Box::new(move || host.set_hidden(true)));
        *self.timer.borrow_mut() = Some(handle);
    }

    /// Hide now and drop any pending dismissal
    pub fn hide(&self) {
        self.cancel_timer();
        self.host.set_hidden(true);
    }

    pub fn is_visible(&self) -> bool {
        !self.host.is_hidden()
    }

    pub fn message(&self) -> String {
        self.host.message()
    }

    fn cancel_timer(&self) {
        if let Some(mut timer) = self.timer.borrow_mut().take() {
            timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryBanner;
    use crate::schedule::ManualScheduler;

    fn banner() -> (ErrorBanner, Rc<MemoryBanner>, ManualScheduler) {
        let host = Rc::new(MemoryBanner::new());
        let scheduler = ManualScheduler::new();
        let banner = ErrorBanner::new(
            host.clone(),
            Rc::new(scheduler.clone()),
            Duration::from_millis(5000),
        );
        (banner, host, scheduler)
    }

    #[test]
    fn test_auto_dismiss_after_5000ms() {
        let (banner, host, scheduler) = banner();
        banner.show("Please select a future date");
        assert_eq!(host.visible_message().as_deref(), Some("Please select a future date"));

        scheduler.advance(Duration::from_millis(4999));
        assert!(banner.is_visible());
        scheduler.advance(Duration::from_millis(1));
        assert!(!banner.is_visible());
    }

    #[test]
    fn test_new_error_restarts_countdown() {
        let (banner, host, scheduler) = banner();
        banner.show("first");
        scheduler.advance(Duration::from_millis(4000));
        banner.show("second");

        // the first countdown would have fired here
        scheduler.advance(Duration::from_millis(1500));
        assert_eq!(host.visible_message().as_deref(), Some("second"));
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_millis(3500));
        assert!(!banner.is_visible());
    }

    #[test]
    fn test_hide_cancels_pending_dismissal() {
        let (banner, _host, scheduler) = banner();
        banner.show("oops");
        banner.hide();
        assert!(!banner.is_visible());
        assert_eq!(scheduler.pending(), 0);
    }
}
