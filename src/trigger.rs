//! Scroll triggers: fire callbacks when an element crosses a viewport line.
//!
//! The observer knows nothing about the DOM. Targets are anything that can
//! report viewport-relative bounds, and the host calls [`ScrollObserver::notify`]
//! whenever the scroll position or viewport size changes.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::scope::Disposable;

/// Vertical extent of an element, relative to the top of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

/// "Element edge meets this fraction of the viewport", e.g. `top 80%`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBand {
    pub edge: Edge,
    pub viewport_fraction: f64,
}

impl ViewportBand {
    pub const fn new(edge: Edge, viewport_fraction: f64) -> Self {
        Self {
            edge,
            viewport_fraction,
        }
    }

    /// Parses `"<top|center|bottom> <percent>%"`.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();
        let edge = match parts.next()? {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            _ => return None,
        };
        let percent = parts
            .next()?
            .strip_suffix('%')?
            .parse::<f64>()
            .ok()
            .filter(|percent| (0.0..=100.0).contains(percent))?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(edge, percent / 100.0))
    }

    /// True while the chosen edge sits at or above the trigger line and the
    /// element has not fully scrolled off the top.
    pub fn contains(&self, bounds: Bounds, viewport: Viewport) -> bool {
        let edge = match self.edge {
            Edge::Top => bounds.top,
            Edge::Center => (bounds.top + bounds.bottom) / 2.0,
            Edge::Bottom => bounds.bottom,
        };
        edge <= self.viewport_fraction * viewport.height && bounds.bottom >= 0.0
    }
}

/// Anything that can report where it currently is. `None` means detached.
pub trait BoundsSource {
    fn bounds(&self) -> Option<Bounds>;
}

impl<F> BoundsSource for F
where
    F: Fn() -> Option<Bounds>,
{
    fn bounds(&self) -> Option<Bounds> {
        self()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerMode {
    /// Fire on the first entry, then unregister.
    Once,
    /// Fire on every entry; re-arm after the element leaves the band.
    EveryEntry,
}

struct Registration {
    id: u64,
    source: Box<dyn BoundsSource>,
    band: ViewportBand,
    mode: TriggerMode,
    inside: bool,
    callback: Option<Box<dyn FnMut()>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    paused: bool,
    entries: Vec<Registration>,
}

impl Registry {
    fn position(&self, id: u64) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

/// Shared, single-threaded registry of scroll triggers.
#[derive(Clone, Default)]
pub struct ScrollObserver {
    registry: Rc<RefCell<Registry>>,
}

impl PartialEq for ScrollObserver {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that ignores [`ScrollObserver::notify`] until resumed.
    pub fn paused() -> Self {
        let observer = Self::new();
        observer.registry.borrow_mut().paused = true;
        observer
    }

    pub fn is_paused(&self) -> bool {
        self.registry.borrow().paused
    }

    /// Lifts the pause and evaluates every trigger right away.
    pub fn resume(&self, viewport: Viewport) -> usize {
        self.registry.borrow_mut().paused = false;
        self.notify(viewport)
    }

    pub fn register(
        &self,
        source: impl BoundsSource + 'static,
        band: ViewportBand,
        mode: TriggerMode,
        callback: impl FnMut() + 'static,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.entries.push(Registration {
            id,
            source: Box::new(source),
            band,
            mode,
            inside: false,
            callback: Some(Box::new(callback)),
        });

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Removes a trigger. Returns whether it was still registered.
    pub fn unsubscribe(&self, id: u64) -> bool {
        unsubscribe_from(&self.registry, id)
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().entries.is_empty()
    }

    /// Re-evaluates every trigger against the viewport and fires those that
    /// just entered their band. Returns how many fired.
    ///
    /// Callbacks run with the registry unlocked, so they may register or
    /// unsubscribe triggers themselves.
    pub fn notify(&self, viewport: Viewport) -> usize {
        let entered: Vec<u64> = {
            let mut registry = self.registry.borrow_mut();
            if registry.paused {
                return 0;
            }
            registry
                .entries
                .iter_mut()
                .filter_map(|entry| {
                    let inside = entry
                        .source
                        .bounds()
                        .is_some_and(|bounds| entry.band.contains(bounds, viewport));
                    let just_entered = inside && !entry.inside;
                    entry.inside = inside;
                    just_entered.then_some(entry.id)
                })
                .collect()
        };

        let mut fired = 0;
        for id in entered {
            // A removed registration is dropped only after the borrow ends, in
            // case its source or callback owns another subscription.
            let (callback, keep, _removed) = {
                let mut registry = self.registry.borrow_mut();
                let Some(index) = registry.position(id) else {
                    continue;
                };
                match registry.entries[index].mode {
                    TriggerMode::Once => {
                        let mut entry = registry.entries.remove(index);
                        (entry.callback.take(), false, Some(entry))
                    }
                    TriggerMode::EveryEntry => (registry.entries[index].callback.take(), true, None),
                }
            };
            let Some(mut callback) = callback else {
                continue;
            };

            log::debug!("scroll trigger {id} fired");
            callback();
            fired += 1;

            if keep {
                let mut registry = self.registry.borrow_mut();
                if let Some(index) = registry.position(id) {
                    registry.entries[index].callback = Some(callback);
                }
            }
        }
        fired
    }
}

fn unsubscribe_from(registry: &RefCell<Registry>, id: u64) -> bool {
    let removed = {
        let mut registry = registry.borrow_mut();
        registry
            .position(id)
            .map(|index| registry.entries.remove(index))
    };
    removed.is_some()
}

/// Keeps a trigger registered until disposed or dropped.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Disposable for Subscription {
    fn dispose(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            unsubscribe_from(&registry, self.id);
        }
        self.registry = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::AnimationScope;
    use std::cell::Cell;

    const VIEWPORT: Viewport = Viewport { height: 1000.0 };

    fn movable(top: &Rc<Cell<Option<f64>>>) -> impl Fn() -> Option<Bounds> {
        let top = top.clone();
        move || {
            top.get().map(|top| Bounds {
                top,
                bottom: top + 200.0,
            })
        }
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        (count, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn parses_edge_and_percentage() {
        assert_eq!(
            ViewportBand::parse("top 80%"),
            Some(ViewportBand::new(Edge::Top, 0.8))
        );
        assert_eq!(
            ViewportBand::parse("bottom  20%"),
            Some(ViewportBand::new(Edge::Bottom, 0.2))
        );
        assert_eq!(ViewportBand::parse("top 80"), None);
        assert_eq!(ViewportBand::parse("left 80%"), None);
        assert_eq!(ViewportBand::parse("top 180%"), None);
        assert_eq!(ViewportBand::parse("top 80% extra"), None);
    }

    #[test]
    fn band_contains_edge_above_the_line() {
        let band = ViewportBand::new(Edge::Top, 0.8);
        assert!(!band.contains(Bounds { top: 900.0, bottom: 1100.0 }, VIEWPORT));
        assert!(band.contains(Bounds { top: 800.0, bottom: 1000.0 }, VIEWPORT));
        assert!(!band.contains(Bounds { top: -400.0, bottom: -10.0 }, VIEWPORT));
    }

    #[test]
    fn once_trigger_fires_a_single_time_then_unregisters() {
        let observer = ScrollObserver::new();
        let top = Rc::new(Cell::new(Some(1200.0)));
        let (count, callback) = counter();
        let _subscription = observer.register(
            movable(&top),
            ViewportBand::new(Edge::Top, 0.8),
            TriggerMode::Once,
            callback,
        );

        assert_eq!(observer.notify(VIEWPORT), 0);
        top.set(Some(500.0));
        assert_eq!(observer.notify(VIEWPORT), 1);
        top.set(Some(1200.0));
        observer.notify(VIEWPORT);
        top.set(Some(500.0));
        observer.notify(VIEWPORT);

        assert_eq!(count.get(), 1);
        assert!(observer.is_empty());
    }

    #[test]
    fn every_entry_trigger_rearms_after_leaving() {
        let observer = ScrollObserver::new();
        let top = Rc::new(Cell::new(Some(500.0)));
        let (count, callback) = counter();
        let _subscription = observer.register(
            movable(&top),
            ViewportBand::new(Edge::Top, 0.8),
            TriggerMode::EveryEntry,
            callback,
        );

        observer.notify(VIEWPORT);
        observer.notify(VIEWPORT);
        top.set(Some(1200.0));
        observer.notify(VIEWPORT);
        top.set(Some(100.0));
        observer.notify(VIEWPORT);

        assert_eq!(count.get(), 2);
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn detached_target_never_fires() {
        let observer = ScrollObserver::new();
        let top = Rc::new(Cell::new(None));
        let (count, callback) = counter();
        let _subscription = observer.register(
            movable(&top),
            ViewportBand::new(Edge::Top, 0.8),
            TriggerMode::Once,
            callback,
        );

        observer.notify(VIEWPORT);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn dropping_the_subscription_unregisters() {
        let observer = ScrollObserver::new();
        let top = Rc::new(Cell::new(Some(100.0)));
        let (count, callback) = counter();
        let subscription = observer.register(
            movable(&top),
            ViewportBand::new(Edge::Top, 0.8),
            TriggerMode::Once,
            callback,
        );
        assert_eq!(observer.len(), 1);

        drop(subscription);

        assert!(observer.is_empty());
        observer.notify(VIEWPORT);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn callback_may_unsubscribe_a_trigger_that_entered_in_the_same_pass() {
        let observer = ScrollObserver::new();
        let top = Rc::new(Cell::new(Some(100.0)));
        let (count, victim_callback) = counter();
        let victim_id = Rc::new(Cell::new(0));

        let remover = observer.clone();
        let target = victim_id.clone();
        let _first = observer.register(
            movable(&top),
            ViewportBand::new(Edge::Top, 0.8),
            TriggerMode::Once,
            move || {
                remover.unsubscribe(target.get());
            },
        );
        let victim = observer.register(
            movable(&top),
            ViewportBand::new(Edge::Top, 0.8),
            TriggerMode::Once,
            victim_callback,
        );
        victim_id.set(victim.id());

        assert_eq!(observer.notify(VIEWPORT), 1);
        assert_eq!(count.get(), 0);
        assert!(observer.is_empty());
    }

    #[test]
    fn unmounting_before_entry_leaves_nothing_to_fire() {
        let observer = ScrollObserver::new();
        let top = Rc::new(Cell::new(Some(1200.0)));
        let (count, callback) = counter();
        {
            let mut scope = AnimationScope::new("section");
            scope.track(observer.register(
                movable(&top),
                ViewportBand::new(Edge::Top, 0.8),
                TriggerMode::Once,
                callback,
            ));
            assert_eq!(observer.len(), 1);
        }

        assert!(observer.is_empty());
        top.set(Some(100.0));
        assert_eq!(observer.notify(VIEWPORT), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn paused_observer_holds_triggers_until_resumed() {
        let observer = ScrollObserver::paused();
        let top = Rc::new(Cell::new(Some(100.0)));
        let (count, callback) = counter();
        let _subscription = observer.register(
            movable(&top),
            ViewportBand::new(Edge::Top, 0.8),
            TriggerMode::Once,
            callback,
        );

        assert!(observer.is_paused());
        assert_eq!(observer.notify(VIEWPORT), 0);
        assert_eq!(count.get(), 0);
        assert_eq!(observer.len(), 1);

        assert_eq!(observer.resume(VIEWPORT), 1);
        assert!(!observer.is_paused());
        assert_eq!(count.get(), 1);
    }
}
