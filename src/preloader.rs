//! The intro sequence shown while the page is loading.
//!
//! A fixed chain of steps (logo in, bar fill and counter together, logo
//! pulse, overlay exit) runs once. When the chain ends the completion hook
//! fires exactly once; cancelling first means it never fires.

use crate::{
    motion::{Pose, POWER2_OUT, POWER3_IN_OUT, POWER3_OUT},
    timeline::{Playhead, Position, StepId, Timeline},
};

const LOGO_FROM: Pose = Pose::IDENTITY.with_scale(0.5).with_opacity(0.0);
const LOGO_PULSE_SCALE: f64 = 1.1;
const OVERLAY_TO: Pose = Pose::IDENTITY.with_scale(0.9).with_opacity(0.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreloaderPhase {
    Playing,
    Completing,
    Done,
    Cancelled,
}

/// What the preloader looks like at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreloaderFrame {
    pub logo: Pose,
    pub bar_fraction: f64,
    pub percent: u8,
    pub overlay: Pose,
}

impl PreloaderFrame {
    pub fn bar_width(&self) -> String {
        format!("{:.2}%", self.bar_fraction * 100.0)
    }

    pub fn percent_label(&self) -> String {
        format!("{}%", self.percent)
    }
}

#[derive(Clone, Copy, Debug)]
struct Steps {
    logo_in: StepId,
    bar_fill: StepId,
    counter: StepId,
    logo_pulse: StepId,
    exit: StepId,
}

fn intro_timeline() -> (Timeline, Steps) {
    let mut timeline = Timeline::new();
    let logo_in = timeline.add(0.8, POWER3_OUT, Position::AfterPrevious);
    let bar_fill = timeline.add(2.5, POWER2_OUT, Position::FromEnd(-0.3));
    let counter = timeline.add(2.5, POWER2_OUT, Position::FromEnd(-2.5));
    let logo_pulse = timeline.add(0.3, POWER2_OUT, Position::AfterPrevious);
    let exit = timeline.add(1.0, POWER3_IN_OUT, Position::FromEnd(0.2));

    (
        timeline,
        Steps {
            logo_in,
            bar_fill,
            counter,
            logo_pulse,
            exit,
        },
    )
}

/// Length of the full intro, in seconds.
pub fn intro_duration() -> f64 {
    intro_timeline().0.duration()
}

pub struct Preloader {
    timeline: Timeline,
    steps: Steps,
    playhead: Playhead,
    phase: PreloaderPhase,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Preloader {
    pub fn new(on_complete: impl FnOnce() + 'static) -> Self {
        let (timeline, steps) = intro_timeline();
        let playhead = Playhead::new(timeline.duration());
        Self {
            timeline,
            steps,
            playhead,
            phase: PreloaderPhase::Playing,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    pub fn elapsed(&self) -> f64 {
        self.playhead.elapsed()
    }

    pub fn frame_at(&self, t: f64) -> PreloaderFrame {
        let progress = |step| self.timeline.progress(step, t);

        let pulse = 1.0 + (LOGO_PULSE_SCALE - 1.0) * progress(self.steps.logo_pulse);
        let mut logo = LOGO_FROM.lerp(Pose::IDENTITY, progress(self.steps.logo_in));
        logo.scale *= pulse;

        PreloaderFrame {
            logo,
            bar_fraction: progress(self.steps.bar_fill),
            percent: (progress(self.steps.counter) * 100.0).round().clamp(0.0, 100.0) as u8,
            overlay: Pose::IDENTITY.lerp(OVERLAY_TO, progress(self.steps.exit)),
        }
    }

    /// Moves the sequence forward by `dt` seconds. Returns the frame to draw,
    /// or `None` once the sequence is over or cancelled.
    pub fn advance(&mut self, dt: f64) -> Option<PreloaderFrame> {
        if self.phase != PreloaderPhase::Playing {
            return None;
        }

        let t = self.playhead.advance(dt);
        let frame = self.frame_at(t);

        if self.playhead.is_finished() {
            self.phase = PreloaderPhase::Completing;
            if let Some(on_complete) = self.on_complete.take() {
                log::debug!("preloader finished after {t:.2}s");
                on_complete();
            }
            self.phase = PreloaderPhase::Done;
        }
        Some(frame)
    }

    /// Stops the sequence for good. The completion hook is dropped unrun.
    pub fn cancel(&mut self) {
        if self.phase == PreloaderPhase::Playing {
            self.phase = PreloaderPhase::Cancelled;
            self.on_complete = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    const FRAME: f64 = 1.0 / 60.0;

    fn spy() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let calls = Rc::new(Cell::new(0));
        let handle = calls.clone();
        (calls, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn intro_runs_four_and_a_half_seconds() {
        assert!((intro_duration() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn completion_fires_once_and_not_before_the_end() {
        let (calls, on_complete) = spy();
        let mut preloader = Preloader::new(on_complete);

        while preloader.phase() == PreloaderPhase::Playing {
            assert_eq!(calls.get(), 0);
            preloader.advance(FRAME);
        }

        assert_eq!(calls.get(), 1);
        assert!(preloader.elapsed() >= intro_duration());
        assert_eq!(preloader.phase(), PreloaderPhase::Done);

        assert!(preloader.advance(FRAME).is_none());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cancelling_midway_never_completes() {
        let (calls, on_complete) = spy();
        let mut preloader = Preloader::new(on_complete);
        preloader.advance(2.0);

        preloader.cancel();

        assert!(preloader.advance(10.0).is_none());
        assert_eq!(calls.get(), 0);
        assert_eq!(preloader.phase(), PreloaderPhase::Cancelled);
    }

    #[test]
    fn cancel_after_done_keeps_done() {
        let (_, on_complete) = spy();
        let mut preloader = Preloader::new(on_complete);
        preloader.advance(10.0);
        preloader.cancel();
        assert_eq!(preloader.phase(), PreloaderPhase::Done);
    }

    #[test]
    fn counter_and_bar_move_together() {
        let preloader = Preloader::new(|| ());

        let start = preloader.frame_at(0.0);
        assert_eq!(start.percent, 0);
        assert_eq!(start.bar_fraction, 0.0);
        assert_eq!(start.logo.opacity, 0.0);

        let middle = preloader.frame_at(1.5);
        assert!(middle.percent > 0 && middle.percent < 100);
        assert!((middle.bar_fraction * 100.0 - f64::from(middle.percent)).abs() <= 0.5);

        let filled = preloader.frame_at(3.0);
        assert_eq!(filled.percent, 100);
        assert_eq!(filled.bar_width(), "100.00%");
        assert_eq!(filled.percent_label(), "100%");
        assert_eq!(filled.overlay, Pose::IDENTITY);
    }

    #[test]
    fn exit_fades_the_overlay_out() {
        let preloader = Preloader::new(|| ());
        let last = preloader.frame_at(intro_duration());
        assert_eq!(last.overlay.opacity, 0.0);
        assert!((last.logo.scale - LOGO_PULSE_SCALE).abs() < 1e-9);
    }
}
