//! Staggered entrance animations and the looping section effects.

use rand::Rng;

use crate::{
    motion::{Ease, Pose, Tween, BACK_OUT, POWER1_IN_OUT, POWER2_OUT, POWER3_OUT},
    trigger::{Edge, ViewportBand},
};

/// One-shot entrance from `from` to the element's resting pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntranceSpec {
    pub from: Pose,
    pub duration: f64,
    pub stagger: f64,
    pub delay: f64,
    pub ease: Ease,
    pub band: ViewportBand,
}

const TOP_80: ViewportBand = ViewportBand::new(Edge::Top, 0.8);

pub const ABOUT_PORTRAIT: EntranceSpec = EntranceSpec {
    from: Pose::offset(-100.0, 0.0).with_opacity(0.0).with_blur(10.0),
    duration: 1.0,
    stagger: 0.0,
    delay: 0.0,
    ease: POWER3_OUT,
    band: TOP_80,
};

pub const ABOUT_COPY: EntranceSpec = EntranceSpec {
    from: Pose::offset(0.0, 50.0).with_opacity(0.0),
    duration: 0.8,
    stagger: 0.2,
    delay: 0.0,
    ease: POWER3_OUT,
    band: TOP_80,
};

pub const SKILL_TILES: EntranceSpec = EntranceSpec {
    from: Pose::offset(0.0, 30.0).with_opacity(0.0).with_scale(0.9),
    duration: 0.6,
    stagger: 0.1,
    delay: 0.0,
    ease: BACK_OUT,
    band: ViewportBand::new(Edge::Top, 0.85),
};

pub const PROJECT_HEADING: EntranceSpec = EntranceSpec {
    from: Pose::offset(0.0, 50.0).with_opacity(0.0),
    duration: 1.0,
    stagger: 0.2,
    delay: 0.0,
    ease: POWER3_OUT,
    band: TOP_80,
};

pub const PROJECT_CARDS: EntranceSpec = EntranceSpec {
    from: Pose::offset(0.0, 100.0).with_opacity(0.0).with_scale(0.9),
    duration: 0.8,
    stagger: 0.15,
    delay: 0.0,
    ease: POWER3_OUT,
    band: TOP_80,
};

pub const FOOTER_COLUMNS: EntranceSpec = EntranceSpec {
    from: Pose::offset(0.0, 60.0).with_opacity(0.0).with_blur(10.0),
    duration: 1.0,
    stagger: 0.2,
    delay: 0.0,
    ease: POWER3_OUT,
    band: ViewportBand::new(Edge::Top, 0.9),
};

pub const HERO_COPY: EntranceSpec = EntranceSpec {
    from: Pose::offset(0.0, 40.0).with_opacity(0.0),
    duration: 1.0,
    stagger: 0.15,
    delay: 0.2,
    ease: POWER3_OUT,
    band: ViewportBand::new(Edge::Top, 1.0),
};

impl EntranceSpec {
    /// Plans the animation for `children` targets. Nothing to animate yields
    /// `None`, never a panic.
    pub fn plan(&self, children: usize) -> Option<EntrancePlan> {
        (children > 0).then_some(EntrancePlan {
            spec: *self,
            children,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntrancePlan {
    spec: EntranceSpec,
    children: usize,
}

impl EntrancePlan {
    pub fn children(&self) -> usize {
        self.children
    }

    fn tween_for(&self, index: usize) -> Tween {
        let offset = self.spec.delay + self.spec.stagger * index as f64;
        Tween::new(self.spec.from, Pose::IDENTITY, self.spec.duration, self.spec.ease).delayed(offset)
    }

    /// Time until the last child settles.
    pub fn total(&self) -> f64 {
        self.tween_for(self.children - 1).total()
    }

    pub fn initial_poses(&self) -> Vec<Pose> {
        vec![self.spec.from; self.children]
    }

    pub fn sample(&self, elapsed: f64) -> Vec<Pose> {
        (0..self.children)
            .map(|index| self.tween_for(index).sample(elapsed))
            .collect()
    }

    pub fn is_done(&self, elapsed: f64) -> bool {
        elapsed >= self.total()
    }
}

pub const CARD_HOVER_LIFT: Pose = Pose::offset(0.0, -10.0).with_scale(1.02);
pub const CARD_HOVER_SECONDS: f64 = 0.3;

/// Hover transition for a project card, starting wherever the card is now.
pub fn card_hover(current: Pose, hovered: bool) -> Tween {
    let target = if hovered {
        CARD_HOVER_LIFT
    } else {
        Pose::IDENTITY
    };
    Tween::new(current, target, CARD_HOVER_SECONDS, POWER2_OUT)
}

const PARTICLE_RISE: f64 = -30.0;
const PARTICLE_SWAY: f64 = 20.0;
const PARTICLE_STEP_DELAY: f64 = 0.5;

/// Endless up-and-back drift for one footer particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleDrift {
    pub sway: f64,
    pub period: f64,
    pub delay: f64,
}

impl ParticleDrift {
    pub fn random(index: usize, rng: &mut impl Rng) -> Self {
        Self {
            sway: rng.random_range(-PARTICLE_SWAY..=PARTICLE_SWAY),
            period: rng.random_range(3.0..=5.0),
            delay: index as f64 * PARTICLE_STEP_DELAY,
        }
    }

    pub fn pose_at(&self, elapsed: f64) -> Pose {
        let local = elapsed - self.delay;
        if local <= 0.0 || self.period <= 0.0 {
            return Pose::IDENTITY;
        }

        let cycle = local / self.period;
        let fraction = cycle.fract();
        let linear = if cycle as u64 % 2 == 0 {
            fraction
        } else {
            1.0 - fraction
        };
        Pose::IDENTITY.lerp(
            Pose::offset(self.sway, PARTICLE_RISE),
            POWER1_IN_OUT.apply(linear),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn empty_target_list_plans_nothing() {
        for spec in [ABOUT_COPY, SKILL_TILES, PROJECT_CARDS, FOOTER_COLUMNS] {
            assert!(spec.plan(0).is_none());
        }
    }

    #[test]
    fn children_start_one_stagger_apart() {
        let plan = PROJECT_CARDS.plan(3).expect("three cards");

        let poses = plan.sample(0.1);
        assert_ne!(poses[0], PROJECT_CARDS.from);
        assert_eq!(poses[1], PROJECT_CARDS.from);
        assert_eq!(poses[2], PROJECT_CARDS.from);

        let poses = plan.sample(0.2);
        assert_ne!(poses[1], PROJECT_CARDS.from);
        assert_eq!(poses[2], PROJECT_CARDS.from);
    }

    #[test]
    fn plan_settles_every_child_at_rest() {
        let plan = ABOUT_COPY.plan(4).expect("four paragraphs");
        assert!((plan.total() - (0.8 + 3.0 * 0.2)).abs() < 1e-9);
        assert!(!plan.is_done(1.0));
        assert!(plan.is_done(plan.total()));
        assert!(plan
            .sample(plan.total())
            .iter()
            .all(|pose| *pose == Pose::IDENTITY));
    }

    #[test]
    fn initial_poses_hide_every_child() {
        let plan = SKILL_TILES.plan(9).expect("nine tiles");
        let poses = plan.initial_poses();
        assert_eq!(poses.len(), 9);
        assert!(poses.iter().all(|pose| pose.opacity == 0.0));
    }

    #[test]
    fn hover_retargets_from_the_current_pose() {
        let halfway = Pose::IDENTITY.lerp(CARD_HOVER_LIFT, 0.5);
        let leave = card_hover(halfway, false);
        assert_eq!(leave.sample(0.0), halfway);
        assert_eq!(leave.sample(CARD_HOVER_SECONDS), Pose::IDENTITY);

        let enter = card_hover(Pose::IDENTITY, true);
        assert_eq!(enter.sample(1.0), CARD_HOVER_LIFT);
    }

    #[test]
    fn particles_rise_then_return() {
        let mut rng = SmallRng::seed_from_u64(7);
        let drift = ParticleDrift::random(2, &mut rng);
        assert_eq!(drift.delay, 1.0);
        assert!((3.0..=5.0).contains(&drift.period));
        assert!((-20.0..=20.0).contains(&drift.sway));

        assert_eq!(drift.pose_at(0.5), Pose::IDENTITY);
        let top = drift.pose_at(drift.delay + drift.period);
        assert!((top.y - PARTICLE_RISE).abs() < 1e-6);
        let back = drift.pose_at(drift.delay + 2.0 * drift.period - 1e-9);
        assert!(back.y.abs() < 1e-3);
    }
}
