use super::*;

use events::Role;

// =============================================================
// Delta extraction
// =============================================================

#[test]
fn delta_content_extracts_text_fragment() {
    let payload = serde_json::json!({
        "choices": [{ "index": 0, "delta": { "content": "Hi" } }]
    })
    .to_string();
    assert_eq!(delta_content(&payload), Some("Hi".to_owned()));
}

#[test]
fn delta_content_skips_role_only_delta() {
    let payload = serde_json::json!({
        "choices": [{ "index": 0, "delta": { "role": "assistant" } }]
    })
    .to_string();
    assert_eq!(delta_content(&payload), None);
}

#[test]
fn delta_content_skips_empty_fragment() {
    let payload = serde_json::json!({
        "choices": [{ "delta": { "content": "" } }]
    })
    .to_string();
    assert_eq!(delta_content(&payload), None);
}

#[test]
fn delta_content_skips_upstream_sentinel() {
    assert_eq!(delta_content("[DONE]"), None);
}

#[test]
fn delta_content_skips_malformed_payload() {
    assert_eq!(delta_content("{not json"), None);
}

#[test]
fn delta_content_skips_missing_choices() {
    assert_eq!(delta_content("{}"), None);
    assert_eq!(delta_content(r#"{"choices":[]}"#), None);
}

#[test]
fn delta_content_reads_first_choice_only() {
    let payload = serde_json::json!({
        "choices": [
            { "delta": { "content": "first" } },
            { "delta": { "content": "second" } }
        ]
    })
    .to_string();
    assert_eq!(delta_content(&payload), Some("first".to_owned()));
}

// =============================================================
// Request shape
// =============================================================

#[test]
fn stream_request_serializes_messages_in_order() {
    let messages = vec![
        ChatMessage { role: Role::User, content: "hi".to_owned() },
        ChatMessage { role: Role::Assistant, content: "Hi there".to_owned() },
        ChatMessage { role: Role::User, content: "more".to_owned() },
    ];
    let body = StreamRequest { model: "gpt-4o", messages: &messages, stream: true };

    let value = serde_json::to_value(&body).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "model": "gpt-4o",
            "messages": [
                { "role": "user", "content": "hi" },
                { "role": "assistant", "content": "Hi there" },
                { "role": "user", "content": "more" }
            ],
            "stream": true
        })
    );
}
