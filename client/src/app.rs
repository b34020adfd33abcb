//! Root application component.

use leptos::prelude::*;

use crate::components::chat_panel::ChatPanel;
use crate::state::chat::ChatState;

/// Root component: provides the shared chat state context and renders the
/// single chat page.
#[component]
pub fn App() -> impl IntoView {
    let chat = RwSignal::new(ChatState::default());
    provide_context(chat);

    view! {
        <main class="page">
            <h1 class="page__title">"streamchat"</h1>
            <ChatPanel/>
        </main>
    }
}
