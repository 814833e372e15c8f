use serde_json::json;
use verse_core::{normalize, RawResponse};

fn json(value: serde_json::Value) -> RawResponse {
    RawResponse::Json(value)
}

#[test]
fn plain_strings_are_returned_verbatim() {
    for text in ["", "Be still", "  padded  ", "{not json"] {
        assert_eq!(normalize(&RawResponse::Text(text.to_string())), text);
        assert_eq!(normalize(&json(json!(text))), text);
    }
}

#[test]
fn encoded_body_is_decoded() {
    let body = json!({ "text": "X" }).to_string();
    assert_eq!(normalize(&json(json!({ "body": body }))), "X");
}

#[test]
fn non_json_body_is_kept_literally() {
    assert_eq!(normalize(&json(json!({ "body": "Y" }))), "Y");
}

#[test]
fn envelope_is_unwrapped_only_once() {
    let inner = json!({ "body": "{\"text\":\"deep\"}" }).to_string();
    let raw = json(json!({ "statusCode": 200, "body": inner }));

    // The second envelope is not unwrapped; it has no known field left.
    assert_eq!(normalize(&raw), r#"{"body":"{\"text\":\"deep\"}"}"#);
}

#[test]
fn text_takes_priority_over_verse() {
    assert_eq!(normalize(&json(json!({ "text": "A", "verse": "B" }))), "A");
    assert_eq!(normalize(&json(json!({ "text": "", "verse": "B" }))), "B");
}

#[test]
fn message_is_used_only_when_it_is_a_string() {
    assert_eq!(normalize(&json(json!({ "message": "M" }))), "M");
    assert_eq!(
        normalize(&json(json!({ "message": { "detail": 1 } }))),
        r#"{"message":{"detail":1}}"#
    );
}

#[test]
fn unrecognized_shapes_are_stringified() {
    assert_eq!(
        normalize(&json(json!({ "statusCode": 500, "error": "oops" }))),
        r#"{"statusCode":500,"error":"oops"}"#
    );
    assert_eq!(normalize(&json(json!([1, 2]))), "[1,2]");
    assert_eq!(normalize(&json(json!(42))), "42");
    assert_eq!(normalize(&json(json!(true))), "true");
}

#[test]
fn decoded_null_body_is_stringified() {
    assert_eq!(normalize(&json(json!({ "body": "null" }))), "null");
}
