//! Page-level state: the scroll lock and the one-way loading gate.

use std::{cell::Cell, rc::Rc};

/// Whatever actually toggles page scrolling (the document body in a browser).
pub trait ScrollSurface {
    fn set_scroll_enabled(&self, enabled: bool);
}

struct LockState {
    holders: Cell<usize>,
    surface: Box<dyn ScrollSurface>,
}

impl LockState {
    fn release_one(&self) {
        let holders = self.holders.get();
        if holders == 0 {
            return;
        }
        self.holders.set(holders - 1);
        if holders == 1 {
            self.surface.set_scroll_enabled(true);
        }
    }
}

/// Reference-counted scroll lock. Scrolling is disabled while at least one
/// guard is held.
#[derive(Clone)]
pub struct ScrollLock {
    state: Rc<LockState>,
}

impl ScrollLock {
    pub fn new(surface: impl ScrollSurface + 'static) -> Self {
        Self {
            state: Rc::new(LockState {
                holders: Cell::new(0),
                surface: Box::new(surface),
            }),
        }
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        let holders = self.state.holders.get();
        self.state.holders.set(holders + 1);
        if holders == 0 {
            self.state.surface.set_scroll_enabled(false);
        }
        ScrollLockGuard {
            state: Some(self.state.clone()),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state.holders.get() > 0
    }
}

/// One hold on the scroll lock, released explicitly or on drop, never twice.
pub struct ScrollLockGuard {
    state: Option<Rc<LockState>>,
}

impl ScrollLockGuard {
    pub fn release(&mut self) {
        if let Some(state) = self.state.take() {
            state.release_one();
        }
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Starts loading with scrolling locked; [`LoadingGate::finish`] flips it
/// once and unlocks. Dropping the gate unlocks as well.
pub struct LoadingGate {
    loading: bool,
    guard: Option<ScrollLockGuard>,
}

impl LoadingGate {
    pub fn new(lock: &ScrollLock) -> Self {
        Self {
            loading: true,
            guard: Some(lock.acquire()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns `true` only for the call that ended loading.
    pub fn finish(&mut self) -> bool {
        if !self.loading {
            return false;
        }
        self.loading = false;
        if let Some(mut guard) = self.guard.take() {
            guard.release();
        }
        log::debug!("loading finished, scroll unlocked");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct RecordingSurface(Rc<RefCell<Vec<bool>>>);

    impl ScrollSurface for RecordingSurface {
        fn set_scroll_enabled(&self, enabled: bool) {
            self.0.borrow_mut().push(enabled);
        }
    }

    #[test]
    fn gate_locks_on_creation_and_unlocks_exactly_once() {
        let surface = RecordingSurface::default();
        let lock = ScrollLock::new(surface.clone());
        let mut gate = LoadingGate::new(&lock);

        assert!(gate.is_loading());
        assert!(lock.is_locked());
        assert_eq!(*surface.0.borrow(), vec![false]);

        assert!(gate.finish());
        assert!(!gate.finish());
        drop(gate);

        assert!(!lock.is_locked());
        assert_eq!(*surface.0.borrow(), vec![false, true]);
    }

    #[test]
    fn dropping_an_unfinished_gate_still_unlocks() {
        let surface = RecordingSurface::default();
        let lock = ScrollLock::new(surface.clone());
        let gate = LoadingGate::new(&lock);

        drop(gate);

        assert!(!lock.is_locked());
        assert_eq!(*surface.0.borrow(), vec![false, true]);
    }

    #[test]
    fn overlapping_holders_unlock_after_the_last_release() {
        let surface = RecordingSurface::default();
        let lock = ScrollLock::new(surface.clone());
        let mut first = lock.acquire();
        let second = lock.acquire();

        first.release();
        first.release();
        assert!(lock.is_locked());

        drop(second);
        assert!(!lock.is_locked());
        assert_eq!(*surface.0.borrow(), vec![false, true]);
    }
}
