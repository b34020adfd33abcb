//! Chat panel: transcript, typing indicator, and prompt input.

use leptos::prelude::*;

use events::Role;

use crate::state::chat::ChatState;

/// Chat panel showing the transcript and an input for new prompts.
///
/// Submission is delegated to [`ChatState::submit`], whose pending guard
/// makes it a no-op while a previous exchange is still streaming.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let input = RwSignal::new(String::new());

    let do_send = move || {
        let text = input.get();
        let Some(transcript) = chat.try_update(|state| state.submit(&text)).flatten() else {
            return;
        };
        input.set(String::new());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(crate::net::chat::stream_exchange(chat, transcript));
        #[cfg(not(feature = "csr"))]
        drop(transcript);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        do_send();
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    view! {
        <div class="chat">
            <div class="chat__messages">
                {move || {
                    chat.get()
                        .messages
                        .iter()
                        .map(|msg| {
                            let is_assistant = msg.role == Role::Assistant;
                            let author = if is_assistant { "Bot" } else { "You" };
                            let content = msg.content.clone();
                            view! {
                                <div
                                    class="chat__message"
                                    class:chat__message--assistant=is_assistant
                                >
                                    <span class="chat__author">{author}</span>
                                    <div class="chat__content">{content}</div>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                {move || {
                    chat.get()
                        .pending
                        .then(|| view! { <div class="chat__typing">"Typing..."</div> })
                }}
            </div>
            <form class="chat__input-row" on:submit=on_submit>
                <input
                    class="chat__input"
                    type="text"
                    placeholder="Enter prompt"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button class="btn btn--primary" type="submit">
                    "Send"
                </button>
            </form>
        </div>
    }
}
