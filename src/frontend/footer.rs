use rand::{rngs::SmallRng, SeedableRng};
use web_sys::Element;
use yew::prelude::*;

use super::{
    animate::entrance_on_scroll,
    dom::{
        apply_pose, children_of, current_year, now_ms, prefers_reduced_motion,
        scroll_to_section, FrameLoop,
    },
};
use crate::{
    content::{CONTACT_EMAIL, GITHUB_URL, LINKEDIN_URL, LOCATION, OWNER_NAME},
    entrance::{ParticleDrift, FOOTER_COLUMNS},
    nav::Section,
    scope::AnimationScope,
    trigger::ScrollObserver,
};

/// Placement classes for the decorative particles behind the footer.
const PARTICLES: [&str; 6] = [
    "particle particle-a",
    "particle particle-b",
    "particle particle-c",
    "particle particle-d",
    "particle particle-e",
    "particle particle-f",
];

#[function_component(Footer)]
pub fn footer() -> Html {
    let observer = use_context::<ScrollObserver>().unwrap_or_default();
    let footer_ref = use_node_ref();
    let columns_ref = use_node_ref();
    let particles_ref = use_node_ref();

    {
        let footer_ref = footer_ref.clone();
        let columns_ref = columns_ref.clone();
        let particles_ref = particles_ref.clone();
        use_effect_with((), move |_| {
            let mut scope = AnimationScope::new("footer");
            entrance_on_scroll(
                &mut scope,
                &observer,
                footer_ref.cast::<Element>(),
                children_of(&columns_ref),
                FOOTER_COLUMNS,
            );

            let particles = children_of(&particles_ref);
            if !particles.is_empty() && !prefers_reduced_motion() {
                let mut rng = SmallRng::seed_from_u64(now_ms() as u64);
                let drifts: Vec<ParticleDrift> = (0..particles.len())
                    .map(|index| ParticleDrift::random(index, &mut rng))
                    .collect();

                let frames = FrameLoop::new();
                let mut elapsed = 0.0;
                frames.start(move |dt| {
                    elapsed += dt;
                    for (particle, drift) in particles.iter().zip(&drifts) {
                        apply_pose(particle, drift.pose_at(elapsed));
                    }
                    true
                });
                scope.track(frames);
            }

            move || drop(scope)
        });
    }

    let quick_links = Section::ALL.into_iter().map(|section| {
        let onclick = Callback::from(move |_: MouseEvent| scroll_to_section(section.id()));
        html! {
            <button class="footer-link" type="button" onclick={onclick}>{section.label()}</button>
        }
    });

    html! {
        <footer class="site-footer" ref={footer_ref}>
            <div class="footer-particles" ref={particles_ref} aria-hidden="true">
                { for PARTICLES.iter().map(|class| html! { <div class={*class} /> }) }
            </div>

            <div class="container">
                <div class="footer-grid" ref={columns_ref}>
                    <div>
                        <h4>{"Follow Me"}</h4>
                        <div class="social-links">
                            <a class="social social-primary" href={GITHUB_URL} target="_blank" rel="noopener noreferrer" aria-label="GitHub">{"GH"}</a>
                            <a class="social social-secondary" href={LINKEDIN_URL} target="_blank" rel="noopener noreferrer" aria-label="LinkedIn">{"in"}</a>
                        </div>
                    </div>
                    <div>
                        <h4>{"Quick Links"}</h4>
                        <nav class="footer-nav">{ for quick_links }</nav>
                    </div>
                    <div>
                        <h4>{"Get In Touch"}</h4>
                        <p class="muted">{CONTACT_EMAIL}</p>
                        <p class="muted">{LOCATION}</p>
                    </div>
                </div>

                <div class="footer-bottom">
                    <p class="muted">
                        {format!("© {} {OWNER_NAME}. Made with ", current_year())}
                        <span class="heart" aria-label="love">{"♥"}</span>
                    </p>
                </div>
            </div>
        </footer>
    }
}
