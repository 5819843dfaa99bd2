mod animate;
mod chatbot;
mod dom;
mod footer;
mod preloader;
mod sections;

use web_sys::{window, EventTarget};
use yew::prelude::*;

use self::{
    chatbot::Chatbot,
    dom::{viewport, BodyScroll, Listener},
    footer::Footer,
    preloader::Preloader,
    sections::{About, Contact, Hero, Navigation, Projects},
};
use crate::{
    scope::AnimationScope,
    shell::{LoadingGate, ScrollLock},
    trigger::ScrollObserver,
};

/// The page shell. Shows the preloader until it reports completion, keeping
/// page scroll locked until then.
#[function_component(Portfolio)]
fn portfolio() -> Html {
    let loading = use_state(|| true);
    let observer = use_memo((), |_| ScrollObserver::paused());
    let gate = use_mut_ref(|| Some(LoadingGate::new(&ScrollLock::new(BodyScroll))));

    {
        let gate = gate.clone();
        use_effect_with((), move |_| {
            move || {
                let released = gate.borrow_mut().take();
                drop(released);
            }
        });
    }

    {
        let observer = observer.clone();
        use_effect_with((), move |_| {
            let mut scope = AnimationScope::new("viewport");
            if let Some(win) = window() {
                let target: EventTarget = win.into();
                for kind in ["scroll", "resize"] {
                    let observer = observer.clone();
                    scope.track(Listener::passive(&target, kind, move |_| {
                        observer.notify(viewport());
                    }));
                }
            }
            move || drop(scope)
        });
    }

    // Triggers registered by the sections stay quiet until the intro is gone.
    {
        let observer = observer.clone();
        use_effect_with(*loading, move |loading| {
            if !*loading {
                observer.resume(viewport());
            }
            || ()
        });
    }

    let on_complete = {
        let loading = loading.clone();
        let gate = gate.clone();
        Callback::from(move |_: ()| {
            let finished = gate
                .borrow_mut()
                .as_mut()
                .is_some_and(|gate| gate.finish());
            if finished {
                log::info!("intro finished");
                loading.set(false);
            }
        })
    };

    html! {
        <ContextProvider<ScrollObserver> context={(*observer).clone()}>
            <div class="portfolio">
                if *loading {
                    <Preloader on_complete={on_complete} />
                }
                <div class={classes!("page-body", (*loading).then_some("is-loading"))}>
                    <Navigation />
                    <main>
                        <Hero />
                        <About />
                        <Projects />
                        <Contact />
                        <Chatbot />
                    </main>
                    <Footer />
                </div>
            </div>
        </ContextProvider<ScrollObserver>>
    }
}

pub fn run() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);

    yew::Renderer::<Portfolio>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
