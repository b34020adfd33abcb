use super::*;

// =============================================================
// Frame encoding
// =============================================================

#[test]
fn token_frame_json_encodes_payload() {
    assert_eq!(token_frame("Hi"), "data: \"Hi\"\n\n");
}

#[test]
fn token_frame_escapes_embedded_newlines() {
    assert_eq!(token_frame("a\nb"), "data: \"a\\nb\"\n\n");
}

#[test]
fn done_frame_is_bare_sentinel() {
    assert_eq!(done_frame(), "data: [DONE]\n\n");
}

// =============================================================
// Decoder
// =============================================================

fn ok_payloads(results: Vec<Result<String, DecodeError>>) -> Vec<String> {
    results
        .into_iter()
        .map(|r| r.expect("payload should decode"))
        .collect()
}

#[test]
fn decoder_yields_complete_frame() {
    let mut decoder = EventStreamDecoder::new();
    let payloads = ok_payloads(decoder.push(b"data: \"Hi\"\n\n"));
    assert_eq!(payloads, vec!["\"Hi\""]);
}

#[test]
fn decoder_buffers_partial_frame_across_chunks() {
    let mut decoder = EventStreamDecoder::new();
    assert!(decoder.push(b"data: \"Hel").is_empty());
    let payloads = ok_payloads(decoder.push(b"lo\"\n\n"));
    assert_eq!(payloads, vec!["\"Hello\""]);
}

#[test]
fn decoder_yields_multiple_frames_from_one_chunk() {
    let mut decoder = EventStreamDecoder::new();
    let payloads = ok_payloads(decoder.push(b"data: \"a\"\n\ndata: \"b\"\n\ndata: [DONE]\n\n"));
    assert_eq!(payloads, vec!["\"a\"", "\"b\"", "[DONE]"]);
}

#[test]
fn decoder_reassembles_utf8_split_across_chunks() {
    let mut decoder = EventStreamDecoder::new();
    let frame = token_frame("é");
    let bytes = frame.as_bytes();
    // Split inside the two-byte UTF-8 sequence.
    let mid = frame.find('é').expect("é present") + 1;
    assert!(decoder.push(&bytes[..mid]).is_empty());
    let payloads = ok_payloads(decoder.push(&bytes[mid..]));
    assert_eq!(payloads, vec!["\"é\""]);
}

#[test]
fn decoder_ignores_lines_without_data_prefix() {
    let mut decoder = EventStreamDecoder::new();
    let payloads = ok_payloads(decoder.push(b"event: message\ndata: \"x\"\n\n: comment\n\n"));
    assert_eq!(payloads, vec!["\"x\""]);
}

#[test]
fn decoder_reports_invalid_utf8_frame_and_recovers() {
    let mut decoder = EventStreamDecoder::new();
    let results = decoder.push(b"data: \xff\xfe\n\ndata: \"ok\"\n\n");
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(DecodeError::InvalidUtf8(_))));
    assert_eq!(results[1].as_deref().expect("second frame decodes"), "\"ok\"");
}

#[test]
fn decoder_keeps_trailing_bytes_buffered() {
    let mut decoder = EventStreamDecoder::new();
    let payloads = ok_payloads(decoder.push(b"data: \"a\"\n\ndata: \"b"));
    assert_eq!(payloads, vec!["\"a\""]);
    let payloads = ok_payloads(decoder.push(b"\"\n\n"));
    assert_eq!(payloads, vec!["\"b\""]);
}

// =============================================================
// Payload classification
// =============================================================

#[test]
fn event_parse_sentinel() {
    assert_eq!(Event::parse("[DONE]"), Event::Done);
}

#[test]
fn event_parse_json_string_token() {
    assert_eq!(Event::parse("\" there\""), Event::Token(" there".to_owned()));
}

#[test]
fn event_parse_non_string_payload_is_malformed() {
    assert_eq!(Event::parse("{oops"), Event::Malformed("{oops".to_owned()));
    assert_eq!(Event::parse("{\"a\":1}"), Event::Malformed("{\"a\":1}".to_owned()));
}

// =============================================================
// Round trip
// =============================================================

#[test]
fn encoded_fragments_round_trip_through_decoder() {
    let wire = format!(
        "{}{}{}{}",
        token_frame("Hel"),
        token_frame("lo"),
        token_frame(" world"),
        done_frame()
    );

    // Feed in deliberately awkward 3-byte chunks.
    let mut decoder = EventStreamDecoder::new();
    let mut content = String::new();
    let mut done = false;
    for chunk in wire.as_bytes().chunks(3) {
        for payload in ok_payloads(decoder.push(chunk)) {
            match Event::parse(&payload) {
                Event::Token(token) => content.push_str(&token),
                Event::Done => done = true,
                Event::Malformed(raw) => panic!("unexpected malformed payload: {raw}"),
            }
        }
    }

    assert!(done);
    assert_eq!(content, "Hello world");
}

// =============================================================
// Message model
// =============================================================

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::User).expect("serialize"), "\"user\"");
    assert_eq!(serde_json::to_string(&Role::Assistant).expect("serialize"), "\"assistant\"");
}

#[test]
fn chat_request_round_trips() {
    let request = ChatRequest {
        messages: vec![
            ChatMessage { role: Role::User, content: "hi".to_owned() },
            ChatMessage { role: Role::Assistant, content: "Hi there".to_owned() },
        ],
    };
    let json = serde_json::to_string(&request).expect("serialize");
    assert_eq!(
        json,
        r#"{"messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"Hi there"}]}"#
    );
    let parsed: ChatRequest = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, request);
}

#[test]
fn chat_message_rejects_unknown_role() {
    let result = serde_json::from_str::<ChatMessage>(r#"{"role":"system","content":"x"}"#);
    assert!(result.is_err());
}
