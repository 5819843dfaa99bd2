//! Binds entrance plans and tweens to rendered elements.

use std::{cell::Cell, rc::Rc};

use web_sys::{Element, HtmlElement};

use super::dom::{apply_pose, prefers_reduced_motion, ElementBounds, FrameLoop, Listener};
use crate::{
    entrance::{card_hover, EntranceSpec},
    motion::{Pose, Tween},
    scope::AnimationScope,
    trigger::{ScrollObserver, TriggerMode},
};

/// Hides `targets`, then plays `spec` once when `trigger` scrolls into its
/// band. A missing trigger or an empty target list does nothing.
pub fn entrance_on_scroll(
    scope: &mut AnimationScope,
    observer: &ScrollObserver,
    trigger: Option<Element>,
    targets: Vec<HtmlElement>,
    spec: EntranceSpec,
) {
    let Some(trigger) = trigger else {
        return;
    };
    let Some(plan) = spec.plan(targets.len()) else {
        return;
    };
    if prefers_reduced_motion() {
        return;
    }

    for (target, pose) in targets.iter().zip(plan.initial_poses()) {
        apply_pose(target, pose);
    }

    let frames = FrameLoop::new();
    scope.track(frames.clone());

    let subscription = observer.register(
        ElementBounds(trigger),
        spec.band,
        TriggerMode::Once,
        move || {
            let targets = targets.clone();
            let mut elapsed = 0.0;
            frames.start(move |dt| {
                elapsed += dt;
                for (target, pose) in targets.iter().zip(plan.sample(elapsed)) {
                    apply_pose(target, pose);
                }
                !plan.is_done(elapsed)
            });
        },
    );
    scope.track(subscription);
}

/// Plays `tween` on `element`, then runs `on_done`. Restarting `frames`
/// abandons the previous tween without running its `on_done`.
pub fn play_tween(frames: &FrameLoop, element: HtmlElement, tween: Tween, on_done: impl FnOnce() + 'static) {
    if prefers_reduced_motion() {
        frames.stop();
        apply_pose(&element, tween.to);
        on_done();
        return;
    }

    apply_pose(&element, tween.sample(0.0));
    let mut elapsed = 0.0;
    let mut on_done = Some(on_done);
    frames.start(move |dt| {
        elapsed += dt;
        apply_pose(&element, tween.sample(elapsed));
        if !tween.is_done(elapsed) {
            return true;
        }
        if let Some(on_done) = on_done.take() {
            on_done();
        }
        false
    });
}

/// Lifts `card` while hovered and settles it back on leave. Both listeners
/// and the card's frame loop belong to `scope`.
pub fn hover_lift(scope: &mut AnimationScope, card: HtmlElement) {
    let pose = Rc::new(Cell::new(Pose::IDENTITY));
    let frames = FrameLoop::new();
    scope.track(frames.clone());

    for (kind, hovered) in [("mouseenter", true), ("mouseleave", false)] {
        let card_element = card.clone();
        let pose = pose.clone();
        let frames = frames.clone();
        scope.track(Listener::new(card.as_ref(), kind, move |_| {
            let tween = card_hover(pose.get(), hovered);
            let card_element = card_element.clone();
            let pose = pose.clone();
            let mut elapsed = 0.0;
            frames.start(move |dt| {
                elapsed += dt;
                let current = tween.sample(elapsed);
                pose.set(current);
                apply_pose(&card_element, current);
                !tween.is_done(elapsed)
            });
        }));
    }
}
