use web_sys::{window, Element, EventTarget, HtmlElement};
use yew::prelude::*;

use super::{
    animate::{entrance_on_scroll, hover_lift},
    dom::{children_of, scroll_to_section, viewport, Listener},
};
use crate::{
    content::{
        ProjectEntry, ABOUT_PARAGRAPHS, CONTACT_EMAIL, GITHUB_URL, HIGHLIGHTS, LINKEDIN_URL,
        LOCATION, OWNER_NAME, OWNER_ROLE, PROJECTS, SKILLS,
    },
    entrance::{
        ABOUT_COPY, ABOUT_PORTRAIT, HERO_COPY, PROJECT_CARDS, PROJECT_HEADING, SKILL_TILES,
    },
    nav::{active_section, Section},
    scope::AnimationScope,
    trigger::ScrollObserver,
};

const SCROLLED_THRESHOLD: f64 = 50.0;

fn section_tops() -> Vec<(Section, Option<f64>)> {
    let document = window().and_then(|w| w.document());
    Section::ALL
        .into_iter()
        .map(|section| {
            let top = document
                .as_ref()
                .and_then(|d| d.get_element_by_id(section.id()))
                .map(|element| element.get_bounding_client_rect().top());
            (section, top)
        })
        .collect()
}

fn jump_to(section: Section) -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        scroll_to_section(section.id());
    })
}

fn use_observer() -> ScrollObserver {
    use_context::<ScrollObserver>().unwrap_or_default()
}

#[function_component(Navigation)]
pub fn navigation() -> Html {
    let active = use_state_eq(|| Section::Hero);
    let scrolled = use_state_eq(|| false);
    let menu_open = use_state(|| false);

    {
        let active = active.clone();
        let scrolled = scrolled.clone();
        use_effect_with((), move |_| {
            let mut scope = AnimationScope::new("navigation");
            if let Some(win) = window() {
                let target: EventTarget = win.clone().into();
                scope.track(Listener::passive(&target, "scroll", move |_| {
                    let offset = win.scroll_y().unwrap_or(0.0);
                    scrolled.set(offset > SCROLLED_THRESHOLD);
                    active.set(active_section(&section_tops(), viewport().height));
                }));
            }
            move || drop(scope)
        });
    }

    let on_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let links = Section::ALL.into_iter().map(|section| {
        let onclick = {
            let menu_open = menu_open.clone();
            let jump = jump_to(section);
            Callback::from(move |event: MouseEvent| {
                menu_open.set(false);
                jump.emit(event);
            })
        };
        html! {
            <li>
                <a
                    class={classes!("nav-link", (*active == section).then_some("is-active"))}
                    href={format!("#{}", section.id())}
                    aria-current={(*active == section).then_some("true")}
                    onclick={onclick}
                >
                    {section.label()}
                </a>
            </li>
        }
    });

    html! {
        <header class={classes!("site-nav", (*scrolled).then_some("is-scrolled"))}>
            <a class="brand glow-text" href="#hero" onclick={jump_to(Section::Hero)}>{OWNER_NAME}</a>
            <button
                class="menu-toggle"
                type="button"
                aria-label="Toggle navigation"
                aria-expanded={(*menu_open).to_string()}
                onclick={on_menu}
            >
                {if *menu_open { "✕" } else { "☰" }}
            </button>
            <nav aria-label="Primary">
                <ul class={classes!("nav-links", (*menu_open).then_some("is-open"))}>
                    { for links }
                </ul>
            </nav>
        </header>
    }
}

#[function_component(Hero)]
pub fn hero() -> Html {
    let observer = use_observer();
    let section_ref = use_node_ref();
    let copy_ref = use_node_ref();

    {
        let section_ref = section_ref.clone();
        let copy_ref = copy_ref.clone();
        use_effect_with((), move |_| {
            let mut scope = AnimationScope::new("hero");
            entrance_on_scroll(
                &mut scope,
                &observer,
                section_ref.cast::<Element>(),
                children_of(&copy_ref),
                HERO_COPY,
            );
            move || drop(scope)
        });
    }

    html! {
        <section id="hero" class="hero" ref={section_ref}>
            <div class="hero-copy" ref={copy_ref}>
                <p class="eyebrow">{"Hello, I'm"}</p>
                <h1 class="glow-text">{OWNER_NAME}</h1>
                <p class="hero-role">{OWNER_ROLE}</p>
                <p class="muted">{"I build fast, responsive interfaces with clean, maintainable code."}</p>
                <div class="hero-actions">
                    <a class="button button-primary" href="#projects" onclick={jump_to(Section::Projects)}>{"View Work"}</a>
                    <a class="button button-ghost" href="#contact" onclick={jump_to(Section::Contact)}>{"Get In Touch"}</a>
                </div>
            </div>
        </section>
    }
}

#[function_component(About)]
pub fn about() -> Html {
    let observer = use_observer();
    let section_ref = use_node_ref();
    let image_ref = use_node_ref();
    let content_ref = use_node_ref();
    let skills_ref = use_node_ref();

    {
        let section_ref = section_ref.clone();
        let image_ref = image_ref.clone();
        let content_ref = content_ref.clone();
        let skills_ref = skills_ref.clone();
        use_effect_with((), move |_| {
            let mut scope = AnimationScope::new("about");
            entrance_on_scroll(
                &mut scope,
                &observer,
                section_ref.cast::<Element>(),
                image_ref.cast::<HtmlElement>().into_iter().collect(),
                ABOUT_PORTRAIT,
            );
            entrance_on_scroll(
                &mut scope,
                &observer,
                content_ref.cast::<Element>(),
                children_of(&content_ref),
                ABOUT_COPY,
            );
            entrance_on_scroll(
                &mut scope,
                &observer,
                skills_ref.cast::<Element>(),
                children_of(&skills_ref),
                SKILL_TILES,
            );
            move || drop(scope)
        });
    }

    html! {
        <section id="about" class="section about" ref={section_ref}>
            <div class="container">
                <div class="about-grid">
                    <div class="portrait" ref={image_ref}>
                        <div class="portrait-frame">
                            <img src="/images/profile.png" alt={format!("{OWNER_NAME} - Web Developer")} loading="lazy" />
                        </div>
                    </div>
                    <div class="about-copy" ref={content_ref}>
                        <div>
                            <h2>{"About "}<span class="accent">{"Me"}</span></h2>
                            <div class="rule" />
                        </div>
                        { for ABOUT_PARAGRAPHS.iter().map(|paragraph| html! { <p class="muted">{*paragraph}</p> }) }
                        <div class="highlights">
                            { for HIGHLIGHTS.iter().map(|highlight| html! {
                                <div class="glass chip">
                                    <span class="accent">{highlight.value}</span>
                                    <span class="muted">{" "}{highlight.label}</span>
                                </div>
                            }) }
                        </div>
                    </div>
                </div>

                <h3 class="skills-heading">{"My "}<span class="accent">{"Skills"}</span></h3>
                <div class="skills-grid" ref={skills_ref}>
                    { for SKILLS.iter().map(|skill| html! {
                        <div class="glass skill-tile" key={skill.name}>
                            <div class="skill-glyph" aria-hidden="true">{skill.glyph}</div>
                            <h4>{skill.name}</h4>
                            <div class="skill-track">
                                <div class="skill-fill" style={format!("width: {}%", skill.level)} />
                            </div>
                            <span class="accent">{format!("{}%", skill.level)}</span>
                        </div>
                    }) }
                </div>
            </div>
        </section>
    }
}

fn project_card(project: &ProjectEntry) -> Html {
    html! {
        <article class="glass project-card" key={project.id.to_string()}>
            <div class="project-media">
                <img src={project.image} alt={project.title} loading="lazy" />
                <div class="project-links">
                    <a href={project.live_url} target="_blank" rel="noopener noreferrer" aria-label="Live site">{"🌐"}</a>
                    <a href={project.source_url} target="_blank" rel="noopener noreferrer" aria-label="Source code">{"</>"}</a>
                </div>
            </div>
            <div class="project-body">
                <h3>{project.title}</h3>
                <p class="muted">{project.description}</p>
                <ul class="tech-list">
                    { for project.tech.iter().map(|tech| html! { <li key={*tech}>{*tech}</li> }) }
                </ul>
                <a class="project-cta" href={project.live_url} target="_blank" rel="noopener noreferrer">
                    {"View Project"}<span aria-hidden="true">{" ↗"}</span>
                </a>
            </div>
        </article>
    }
}

#[function_component(Projects)]
pub fn projects() -> Html {
    let observer = use_observer();
    let title_ref = use_node_ref();
    let grid_ref = use_node_ref();

    {
        let title_ref = title_ref.clone();
        let grid_ref = grid_ref.clone();
        use_effect_with((), move |_| {
            let mut scope = AnimationScope::new("projects");
            entrance_on_scroll(
                &mut scope,
                &observer,
                title_ref.cast::<Element>(),
                children_of(&title_ref),
                PROJECT_HEADING,
            );

            let cards = children_of(&grid_ref);
            for card in &cards {
                hover_lift(&mut scope, card.clone());
            }
            entrance_on_scroll(
                &mut scope,
                &observer,
                grid_ref.cast::<Element>(),
                cards,
                PROJECT_CARDS,
            );
            move || drop(scope)
        });
    }

    html! {
        <section id="projects" class="section projects">
            <div class="container">
                <div class="section-heading" ref={title_ref}>
                    <h2>{"Featured "}<span class="accent">{"Projects"}</span></h2>
                    <div class="rule centered" />
                    <p class="muted">
                        {"A collection of projects that showcase my expertise in modern web development and creative problem-solving."}
                    </p>
                </div>
                <div class="project-grid" ref={grid_ref}>
                    { for PROJECTS.iter().map(project_card) }
                </div>
                <div class="centered-row">
                    <a class="button button-secondary" href={GITHUB_URL} target="_blank" rel="noopener noreferrer">
                        {"View All Projects"}
                    </a>
                </div>
            </div>
        </section>
    }
}

#[function_component(Contact)]
pub fn contact() -> Html {
    let observer = use_observer();
    let section_ref = use_node_ref();
    let cards_ref = use_node_ref();

    {
        let section_ref = section_ref.clone();
        let cards_ref = cards_ref.clone();
        use_effect_with((), move |_| {
            let mut scope = AnimationScope::new("contact");
            entrance_on_scroll(
                &mut scope,
                &observer,
                section_ref.cast::<Element>(),
                children_of(&cards_ref),
                ABOUT_COPY,
            );
            move || drop(scope)
        });
    }

    html! {
        <section id="contact" class="section contact" ref={section_ref}>
            <div class="container">
                <div class="section-heading">
                    <h2>{"Get In "}<span class="accent">{"Touch"}</span></h2>
                    <div class="rule centered" />
                </div>
                <div class="contact-grid" ref={cards_ref}>
                    <a class="glass contact-card" href={format!("mailto:{CONTACT_EMAIL}")}>
                        <span class="accent">{"Email"}</span>
                        <span>{CONTACT_EMAIL}</span>
                    </a>
                    <div class="glass contact-card">
                        <span class="accent">{"Location"}</span>
                        <span>{LOCATION}</span>
                    </div>
                    <a class="glass contact-card" href={LINKEDIN_URL} target="_blank" rel="noopener noreferrer">
                        <span class="accent">{"LinkedIn"}</span>
                        <span>{"Let's connect"}</span>
                    </a>
                </div>
            </div>
        </section>
    }
}
