//! Chained timelines: steps placed relative to the running end of the chain.

use crate::motion::Ease;

/// Where a step starts, relative to the timeline built so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Right after the current end of the timeline.
    AfterPrevious,
    /// The current end shifted by this many seconds (negative overlaps).
    FromEnd(f64),
    /// An absolute time from the start of the timeline.
    At(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepId(usize);

#[derive(Clone, Copy, Debug, PartialEq)]
struct Step {
    start: f64,
    duration: f64,
    ease: Ease,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    steps: Vec<Step>,
    end: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, duration: f64, ease: Ease, position: Position) -> StepId {
        let start = match position {
            Position::AfterPrevious => self.end,
            Position::FromEnd(offset) => self.end + offset,
            Position::At(time) => time,
        }
        .max(0.0);
        let duration = duration.max(0.0);

        self.steps.push(Step {
            start,
            duration,
            ease,
        });
        self.end = self.end.max(start + duration);
        StepId(self.steps.len() - 1)
    }

    pub fn duration(&self) -> f64 {
        self.end
    }

    pub fn start_of(&self, id: StepId) -> f64 {
        self.steps.get(id.0).map_or(0.0, |step| step.start)
    }

    /// Eased progress of one step at time `t` on the timeline.
    pub fn progress(&self, id: StepId, t: f64) -> f64 {
        let Some(step) = self.steps.get(id.0) else {
            return 0.0;
        };
        if t <= step.start {
            return 0.0;
        }
        if step.duration <= 0.0 || t >= step.start + step.duration {
            return 1.0;
        }
        step.ease.apply((t - step.start) / step.duration)
    }
}

/// A clock over a fixed length that only moves forward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playhead {
    elapsed: f64,
    length: f64,
}

impl Playhead {
    pub fn new(length: f64) -> Self {
        Self {
            elapsed: 0.0,
            length: length.max(0.0),
        }
    }

    /// Moves forward by `dt` seconds and returns the clamped time. Negative
    /// or non-finite deltas are ignored.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.length);
        }
        self.elapsed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::POWER2_OUT;

    #[test]
    fn relative_positions_follow_the_running_end() {
        let mut timeline = Timeline::new();
        let first = timeline.add(0.8, Ease::Linear, Position::AfterPrevious);
        let overlapped = timeline.add(2.5, Ease::Linear, Position::FromEnd(-0.3));
        let parallel = timeline.add(2.5, Ease::Linear, Position::FromEnd(-2.5));
        let gap = timeline.add(1.0, Ease::Linear, Position::FromEnd(0.2));

        assert_eq!(timeline.start_of(first), 0.0);
        assert!((timeline.start_of(overlapped) - 0.5).abs() < 1e-9);
        assert!((timeline.start_of(parallel) - 0.5).abs() < 1e-9);
        assert!((timeline.start_of(gap) - 3.2).abs() < 1e-9);
        assert!((timeline.duration() - 4.2).abs() < 1e-9);
    }

    #[test]
    fn step_progress_is_zero_before_and_one_after() {
        let mut timeline = Timeline::new();
        let step = timeline.add(1.0, POWER2_OUT, Position::At(2.0));

        assert_eq!(timeline.progress(step, 1.0), 0.0);
        assert!(timeline.progress(step, 2.5) > 0.5);
        assert_eq!(timeline.progress(step, 3.5), 1.0);
    }

    #[test]
    fn offsets_before_zero_clamp_to_the_origin() {
        let mut timeline = Timeline::new();
        let step = timeline.add(1.0, Ease::Linear, Position::FromEnd(-5.0));
        assert_eq!(timeline.start_of(step), 0.0);
    }

    #[test]
    fn playhead_never_runs_backwards_or_past_its_length() {
        let mut playhead = Playhead::new(1.0);
        playhead.advance(0.4);
        playhead.advance(-1.0);
        playhead.advance(f64::NAN);
        assert!((playhead.elapsed() - 0.4).abs() < 1e-9);

        playhead.advance(10.0);
        assert_eq!(playhead.elapsed(), 1.0);
        assert!(playhead.is_finished());
    }
}
