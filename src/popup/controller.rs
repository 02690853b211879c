use log::debug;

/// Spacing kept between the popup body and the header/footer.
pub const BODY_SPACING_PX: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Hidden,
    Visible,
}

/// Page scrolling as seen by the popup.
#[cfg_attr(test, mockall::automock)]
pub trait ScrollHost {
    /// Current vertical offset in px.
    fn scroll_offset(&self) -> f64;
    /// Pin the body in place at `-offset` so the page looks unmoved while locked.
    fn lock_scroll(&self, offset: f64);
    /// Drop the lock and put the page back at `offset` within the same task.
    fn release_scroll(&self, offset: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLock {
    pub saved_offset: f64,
}

/// Show/close state for the call-to-pay popup. One per page load.
pub struct PopupController<H: ScrollHost> {
    host: H,
    state: PopupState,
    lock: Option<ScrollLock>,
    timer_fired: bool,
}

impl<H: ScrollHost> PopupController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: PopupState::Hidden,
            lock: None,
            timer_fired: false,
        }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == PopupState::Visible
    }

    pub fn saved_offset(&self) -> Option<f64> {
        self.lock.map(|lock| lock.saved_offset)
    }

    /// Called when the show delay runs out. Only the first call counts.
    pub fn timer_elapsed(&mut self) -> bool {
        if self.timer_fired {
            debug!("Popup timer already fired, ignoring");
            return false;
        }
        self.timer_fired = true;
        self.show()
    }

    /// Hidden -> Visible. Returns false when already visible.
    pub fn show(&mut self) -> bool {
        if self.is_visible() {
            return false;
        }
        let offset = self.host.scroll_offset();
        self.host.lock_scroll(offset);
        self.lock = Some(ScrollLock {
            saved_offset: offset,
        });
        self.state = PopupState::Visible;
        debug!("Popup shown, scroll locked at {}", offset);
        true
    }

    /// Visible -> Hidden. Returns false when already hidden.
    pub fn close(&mut self) -> bool {
        if !self.is_visible() {
            return false;
        }
        if let Some(lock) = self.lock.take() {
            self.host.release_scroll(lock.saved_offset);
        }
        self.state = PopupState::Hidden;
        debug!("Popup closed");
        true
    }
}

/// Max height of the scrollable popup body for the given viewport.
pub fn body_max_height(viewport: f64, header: f64, footer: f64) -> f64 {
    (viewport - header - footer - BODY_SPACING_PX).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use std::cell::{Cell, RefCell};

    /// Page that really moves: locking pins it, releasing jumps back to the given offset.
    #[derive(Default)]
    struct FakePage {
        offset: Cell<f64>,
        locked: Cell<bool>,
        log: RefCell<Vec<String>>,
    }

    impl ScrollHost for &FakePage {
        fn scroll_offset(&self) -> f64 {
            self.offset.get()
        }
        fn lock_scroll(&self, offset: f64) {
            self.locked.set(true);
            self.log.borrow_mut().push(format!("lock {}", offset));
        }
        fn release_scroll(&self, offset: f64) {
            self.locked.set(false);
            self.offset.set(offset);
            self.log.borrow_mut().push(format!("release {}", offset));
        }
    }

    #[test]
    fn starts_hidden() {
        let page = FakePage::default();
        let controller = PopupController::new(&page);
        assert_eq!(controller.state(), PopupState::Hidden);
        assert_eq!(controller.saved_offset(), None);
    }

    #[test]
    fn show_locks_at_current_offset_and_close_restores_it() {
        let mut host = MockScrollHost::new();
        let mut seq = Sequence::new();
        host.expect_scroll_offset()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(1234.5);
        host.expect_lock_scroll()
            .with(eq(1234.5))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        host.expect_release_scroll()
            .with(eq(1234.5))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut controller = PopupController::new(host);
        assert!(controller.show());
        assert_eq!(controller.saved_offset(), Some(1234.5));
        assert!(controller.close());
        assert_eq!(controller.saved_offset(), None);
    }

    #[test]
    fn two_open_close_cycles_leave_offset_unchanged() {
        let page = FakePage::default();
        page.offset.set(640.0);
        let mut controller = PopupController::new(&page);

        for _ in 0..2 {
            assert!(controller.show());
            assert!(page.locked.get());
            assert!(controller.close());
            assert!(!page.locked.get());
        }
        assert_eq!(page.offset.get(), 640.0);
        assert_eq!(
            *page.log.borrow(),
            vec!["lock 640", "release 640", "lock 640", "release 640"]
        );
    }

    #[test]
    fn close_is_idempotent() {
        let page = FakePage::default();
        let mut controller = PopupController::new(&page);
        controller.show();

        assert!(controller.close());
        assert!(!controller.close());
        assert_eq!(controller.state(), PopupState::Hidden);
        assert_eq!(page.log.borrow().len(), 2);
    }

    #[test]
    fn close_while_hidden_touches_nothing() {
        let mut host = MockScrollHost::new();
        host.expect_release_scroll().never();
        let mut controller = PopupController::new(host);
        assert!(!controller.close());
    }

    #[test]
    fn show_twice_keeps_first_lock() {
        let page = FakePage::default();
        page.offset.set(100.0);
        let mut controller = PopupController::new(&page);
        assert!(controller.show());
        page.offset.set(900.0);
        assert!(!controller.show());
        assert_eq!(controller.saved_offset(), Some(100.0));
    }

    #[test]
    fn timer_fires_once_per_load() {
        let page = FakePage::default();
        let mut controller = PopupController::new(&page);

        assert!(controller.timer_elapsed());
        assert!(controller.close());
        // resizes and stray timer callbacks never bring it back
        assert!(!controller.timer_elapsed());
        assert_eq!(controller.state(), PopupState::Hidden);
    }

    #[test]
    fn body_height_fits_viewport() {
        assert_eq!(body_max_height(800.0, 56.0, 64.0), 656.0);
        assert_eq!(body_max_height(100.0, 56.0, 64.0), 0.0);
    }
}
