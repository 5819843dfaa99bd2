use std::{cell::RefCell, rc::Rc};

use web_sys::HtmlElement;
use yew::prelude::*;

use super::dom::{apply_pose, FrameLoop};
use crate::{
    content::OWNER_NAME,
    preloader::{Preloader as IntroSequence, PreloaderFrame, PreloaderPhase},
};

#[derive(Properties, PartialEq)]
pub struct PreloaderProps {
    pub on_complete: Callback<()>,
}

#[derive(Clone)]
struct IntroRefs {
    overlay: NodeRef,
    logo: NodeRef,
    bar: NodeRef,
    percent: NodeRef,
}

impl IntroRefs {
    fn draw(&self, frame: &PreloaderFrame) {
        if let Some(logo) = self.logo.cast::<HtmlElement>() {
            apply_pose(&logo, frame.logo);
        }
        if let Some(bar) = self.bar.cast::<HtmlElement>() {
            let _ = bar.style().set_property("width", &frame.bar_width());
        }
        if let Some(percent) = self.percent.cast::<HtmlElement>() {
            percent.set_text_content(Some(&frame.percent_label()));
        }
        if let Some(overlay) = self.overlay.cast::<HtmlElement>() {
            apply_pose(&overlay, frame.overlay);
        }
    }
}

#[function_component(Preloader)]
pub fn preloader(props: &PreloaderProps) -> Html {
    let refs = IntroRefs {
        overlay: use_node_ref(),
        logo: use_node_ref(),
        bar: use_node_ref(),
        percent: use_node_ref(),
    };

    {
        let refs = refs.clone();
        let on_complete = props.on_complete.clone();
        use_effect_with((), move |_| {
            let sequence = Rc::new(RefCell::new(IntroSequence::new(move || on_complete.emit(()))));
            let frames = FrameLoop::new();
            {
                let sequence = sequence.clone();
                frames.start(move |dt| {
                    let frame = sequence.borrow_mut().advance(dt);
                    let Some(frame) = frame else {
                        return false;
                    };
                    refs.draw(&frame);
                    sequence.borrow().phase() == PreloaderPhase::Playing
                });
            }

            move || {
                frames.stop();
                if let Ok(mut sequence) = sequence.try_borrow_mut() {
                    sequence.cancel();
                }
            }
        });
    }

    html! {
        <div class="preloader" ref={refs.overlay.clone()}>
            <div class="preloader-inner">
                <div class="preloader-logo" ref={refs.logo.clone()}>
                    <h1 class="glow-text">{OWNER_NAME}</h1>
                    <p class="muted">{"Loading Portfolio..."}</p>
                </div>
                <div class="preloader-progress">
                    <div class="progress-track">
                        <div class="progress-fill" ref={refs.bar.clone()} />
                    </div>
                    <div class="preloader-percent" ref={refs.percent.clone()}>{"0%"}</div>
                </div>
            </div>
            <div class="preloader-glow" aria-hidden="true">
                <div class="orb orb-primary" />
                <div class="orb orb-accent" />
            </div>
        </div>
    }
}
