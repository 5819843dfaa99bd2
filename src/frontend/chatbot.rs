use web_sys::{Element, HtmlElement, HtmlInputElement};
use yew::prelude::*;

use super::{
    animate::play_tween,
    dom::{now_ms, FrameLoop, TimerHandle},
};
use crate::{
    chat::{
        ChatPhase, ChatSession, Origin, ReplyPicker, Toggle, BUTTON_INTRO, PANEL_CLOSE,
        PANEL_OPEN, REPLY_DELAY_MS,
    },
    scope::AnimationScope,
};

#[function_component(Chatbot)]
pub fn chatbot() -> Html {
    let session = use_mut_ref(|| ChatSession::new(ReplyPicker::seeded(now_ms() as u64), now_ms()));
    let scope = use_mut_ref(|| AnimationScope::new("chatbot"));
    let redraw = use_force_update();
    let button_ref = use_node_ref();
    let panel_ref = use_node_ref();
    let list_ref = use_node_ref();
    let button_frames = use_memo((), |_| FrameLoop::new());
    let panel_frames = use_memo((), |_| FrameLoop::new());

    {
        let session = session.clone();
        let scope = scope.clone();
        let button_ref = button_ref.clone();
        let button_frames = button_frames.clone();
        let panel_frames = panel_frames.clone();
        use_effect_with((), move |_| {
            {
                let mut scope = scope.borrow_mut();
                scope.track((*button_frames).clone());
                scope.track((*panel_frames).clone());
            }
            if let Some(button) = button_ref.cast::<HtmlElement>() {
                play_tween(&button_frames, button, BUTTON_INTRO, || ());
            }

            move || {
                session.borrow_mut().dispose();
                scope.borrow_mut().dispose();
            }
        });
    }

    let phase = session.borrow().phase();
    {
        let panel_ref = panel_ref.clone();
        let panel_frames = panel_frames.clone();
        use_effect_with(phase, move |phase| {
            if *phase == ChatPhase::Open {
                if let Some(panel) = panel_ref.cast::<HtmlElement>() {
                    play_tween(&panel_frames, panel, PANEL_OPEN, || ());
                }
            }
            || ()
        });
    }

    let message_count = session.borrow().messages().len();
    {
        let list_ref = list_ref.clone();
        use_effect_with((message_count, phase), move |_| {
            if let Some(list) = list_ref.cast::<Element>() {
                list.set_scroll_top(list.scroll_height());
            }
            || ()
        });
    }

    let on_toggle = {
        let session = session.clone();
        let panel_ref = panel_ref.clone();
        let panel_frames = panel_frames.clone();
        let redraw = redraw.clone();
        let liveness = scope.borrow().liveness();
        Callback::from(move |_: MouseEvent| {
            let toggled = session.borrow_mut().toggle();
            match toggled {
                Toggle::Opened => redraw.force_update(),
                Toggle::StartedClosing => {
                    let finish = {
                        let session = session.clone();
                        let redraw = redraw.clone();
                        let liveness = liveness.clone();
                        move || {
                            liveness.run(|| {
                                if session.borrow_mut().finish_closing() {
                                    redraw.force_update();
                                }
                            });
                        }
                    };
                    match panel_ref.cast::<HtmlElement>() {
                        Some(panel) => play_tween(&panel_frames, panel, PANEL_CLOSE, finish),
                        None => finish(),
                    }
                }
                Toggle::Ignored => {}
            }
        })
    };

    let on_send = {
        let session = session.clone();
        let scope = scope.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            let Some(reply) = session.borrow_mut().submit(now_ms()) else {
                return;
            };

            let liveness = scope.borrow().liveness();
            let timer = {
                let session = session.clone();
                let redraw = redraw.clone();
                TimerHandle::once(REPLY_DELAY_MS, move || {
                    liveness.run(|| {
                        if session.borrow_mut().deliver(reply, now_ms()).is_some() {
                            redraw.force_update();
                        }
                    });
                })
            };
            scope.borrow_mut().track(timer);
            redraw.force_update();
        })
    };

    let on_input = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            session.borrow_mut().set_draft(input.value());
            redraw.force_update();
        })
    };

    let on_keydown = {
        let on_send = on_send.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                on_send.emit(());
            }
        })
    };

    let on_click_send = on_send.reform(|_: MouseEvent| ());

    let view = session.borrow();
    let messages = view.messages().iter().map(|message| {
        let row = match message.origin {
            Origin::System => "from-assistant",
            Origin::User => "from-user",
        };
        html! {
            <div key={message.id.to_string()} class={classes!("chat-row", row)}>
                <div class="chat-bubble">{message.text.clone()}</div>
            </div>
        }
    });

    html! {
        <div class="chatbot">
            if view.is_panel_visible() {
                <div class="glass chat-panel" ref={panel_ref}>
                    <div class="chat-header">
                        <div class="chat-avatar" aria-hidden="true">{"🤖"}</div>
                        <div>
                            <h3>{"AI Assistant"}</h3>
                            <p class="muted">{"Online"}</p>
                        </div>
                        <button class="chat-close" type="button" aria-label="Close chat" onclick={on_toggle.clone()}>{"✕"}</button>
                    </div>
                    <div class="chat-messages" ref={list_ref}>
                        { for messages }
                    </div>
                    <div class="chat-input">
                        <input
                            type="text"
                            placeholder="Type a message..."
                            value={view.draft().to_string()}
                            oninput={on_input}
                            onkeydown={on_keydown}
                        />
                        <button class="chat-send" type="button" aria-label="Send message" onclick={on_click_send}>{"➤"}</button>
                    </div>
                </div>
            }
            <button
                class="chat-launcher"
                type="button"
                ref={button_ref}
                aria-label={if view.is_panel_visible() { "Close chat" } else { "Open chat" }}
                onclick={on_toggle}
            >
                {if view.is_panel_visible() { "✕" } else { "💬" }}
            </button>
        </div>
    }
}
