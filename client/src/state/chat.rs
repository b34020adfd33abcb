#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use events::{ChatMessage, Role};

/// Chat controller state: the transcript plus the in-flight exchange flag.
///
/// All transcript transitions live here as plain methods so the contract
/// is testable off the DOM; `ChatPanel` wraps an instance in an `RwSignal`
/// and re-renders after each mutation.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    /// Ordered transcript, oldest first.
    pub messages: Vec<ChatMessage>,
    /// True while a streamed response is being assembled.
    pub pending: bool,
}

impl ChatState {
    /// Submit user input, returning the transcript to send to the relay.
    ///
    /// Returns `None` without touching any state when the trimmed input is
    /// empty or an exchange is already in flight. Otherwise appends the
    /// user message, sets the pending flag, and returns the full
    /// transcript ending with the new message.
    pub fn submit(&mut self, text: &str) -> Option<Vec<ChatMessage>> {
        if text.trim().is_empty() || self.pending {
            return None;
        }
        self.messages.push(ChatMessage { role: Role::User, content: text.to_owned() });
        self.pending = true;
        Some(self.messages.clone())
    }

    /// Append the empty assistant placeholder the stream will fill. Called
    /// once per exchange, after the response is known good.
    pub fn begin_assistant(&mut self) {
        self.messages.push(ChatMessage { role: Role::Assistant, content: String::new() });
    }

    /// Append one streamed fragment to the assistant placeholder, in
    /// arrival order. The placeholder's content grows monotonically until
    /// the sentinel arrives.
    pub fn append_fragment(&mut self, fragment: &str) {
        if let Some(last) = self.messages.last_mut() {
            if last.role == Role::Assistant {
                last.content.push_str(fragment);
            }
        }
    }

    /// The sentinel arrived: the exchange completed.
    pub fn finish(&mut self) {
        self.pending = false;
    }

    /// Transport failure: drop assistant messages so the transcript reads
    /// as if the exchange never produced a response. The user's own
    /// messages are retained.
    pub fn abort(&mut self) {
        self.pending = false;
        self.messages.retain(|msg| msg.role != Role::Assistant);
    }
}
