//! Animation scopes: everything a mounted component schedules, released as one.

use std::{cell::Cell, rc::Rc};

/// A handle that can be released. Releasing twice must be harmless.
pub trait Disposable {
    fn dispose(&mut self);

    /// True once the handle holds nothing worth releasing, such as a timer
    /// that already fired. Spent handles are pruned from their scope.
    fn is_spent(&self) -> bool {
        false
    }
}

/// Runs a closure once when disposed.
pub struct Deferred(Option<Box<dyn FnOnce()>>);

impl Deferred {
    pub fn new(cleanup: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(cleanup)))
    }
}

impl Disposable for Deferred {
    fn dispose(&mut self) {
        if let Some(cleanup) = self.0.take() {
            cleanup();
        }
    }
}

/// Shared flag telling deferred work whether its owner is still mounted.
#[derive(Clone, Debug)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    /// Runs `work` only while the owner is alive.
    pub fn run<T>(&self, work: impl FnOnce() -> T) -> Option<T> {
        self.is_alive().then(work)
    }

    fn revoke(&self) {
        self.0.set(false);
    }
}

pub struct AnimationScope {
    label: &'static str,
    handles: Vec<Box<dyn Disposable>>,
    liveness: Liveness,
}

impl AnimationScope {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            handles: Vec::new(),
            liveness: Liveness::new(),
        }
    }

    /// Takes ownership of `handle`. A handle added after disposal is released
    /// on the spot so nothing outlives the scope.
    pub fn track(&mut self, handle: impl Disposable + 'static) {
        let mut handle: Box<dyn Disposable> = Box::new(handle);
        if self.is_disposed() {
            handle.dispose();
            return;
        }
        self.prune();
        self.handles.push(handle);
    }

    /// Drops handles that have already run their course.
    pub fn prune(&mut self) {
        self.handles.retain_mut(|handle| {
            if handle.is_spent() {
                handle.dispose();
                false
            } else {
                true
            }
        });
    }

    pub fn defer(&mut self, cleanup: impl FnOnce() + 'static) {
        self.track(Deferred::new(cleanup));
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    pub fn is_disposed(&self) -> bool {
        !self.liveness.is_alive()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Releases every handle, newest first. Later calls do nothing.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.liveness.revoke();

        let count = self.handles.len();
        while let Some(mut handle) = self.handles.pop() {
            handle.dispose();
        }
        log::debug!("scope {} disposed {count} handles", self.label);
    }
}

impl Drop for AnimationScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Counted(Rc<Cell<u32>>);

    impl Disposable for Counted {
        fn dispose(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    struct OneShot(Rc<Cell<bool>>);

    impl Disposable for OneShot {
        fn dispose(&mut self) {}

        fn is_spent(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn dispose_runs_each_handle_once_in_reverse_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut scope = AnimationScope::new("test");
        for index in 0..3 {
            let order = order.clone();
            scope.defer(move || order.borrow_mut().push(index));
        }

        scope.dispose();
        scope.dispose();

        assert_eq!(*order.borrow(), vec![2, 1, 0]);
        assert!(scope.is_empty());
    }

    #[test]
    fn dropping_the_scope_releases_handles() {
        let released = Rc::new(Cell::new(0));
        {
            let mut scope = AnimationScope::new("test");
            scope.track(Counted(released.clone()));
            scope.track(Counted(released.clone()));
        }
        assert_eq!(released.get(), 2);
    }

    #[test]
    fn explicit_dispose_then_drop_releases_once() {
        let released = Rc::new(Cell::new(0));
        let mut scope = AnimationScope::new("test");
        scope.track(Counted(released.clone()));
        scope.dispose();
        drop(scope);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn handles_added_after_disposal_are_released_immediately() {
        let released = Rc::new(Cell::new(0));
        let mut scope = AnimationScope::new("test");
        scope.dispose();

        scope.track(Counted(released.clone()));

        assert_eq!(released.get(), 1);
        assert!(scope.is_empty());
    }

    #[test]
    fn liveness_blocks_work_after_teardown() {
        let mut scope = AnimationScope::new("test");
        let liveness = scope.liveness();
        assert_eq!(liveness.run(|| 7), Some(7));

        scope.dispose();

        assert!(!liveness.is_alive());
        assert_eq!(liveness.run(|| 7), None);
    }

    #[test]
    fn fired_one_shots_do_not_pile_up() {
        let mut scope = AnimationScope::new("test");
        let fired: Vec<Rc<Cell<bool>>> = (0..3).map(|_| Rc::new(Cell::new(false))).collect();
        for flag in &fired {
            scope.track(OneShot(flag.clone()));
        }
        assert_eq!(scope.len(), 3);

        fired[0].set(true);
        fired[2].set(true);
        scope.track(OneShot(Rc::new(Cell::new(false))));

        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn pruning_keeps_live_handles() {
        let released = Rc::new(Cell::new(0));
        let mut scope = AnimationScope::new("test");
        scope.track(Counted(released.clone()));
        scope.prune();

        assert_eq!(scope.len(), 1);
        assert_eq!(released.get(), 0);
    }
}
