use super::*;

#[test]
fn request_serializes_query_field() {
    let body = serde_json::to_value(QueryRequest { query: "Car pulls left" }).unwrap();
    assert_eq!(body, serde_json::json!({ "query": "Car pulls left" }));
}

#[test]
fn reply_tolerates_missing_response() {
    let reply: QueryReply = serde_json::from_str(r#"{"detail":"nope"}"#).unwrap();
    assert!(reply.response.is_none());
}

#[test]
fn server_error_display_echoes_backend_message() {
    let err = QueryError::Server { status: 500, message: "model offline".into() };
    assert_eq!(err.display_message(), "Error: model offline");
}

#[test]
fn transport_error_display_embeds_detail() {
    let err = QueryError::Transport("connection refused".into());
    assert_eq!(err.display_message(), "An error occurred: connection refused");
}

#[test]
fn decode_error_display_embeds_detail() {
    let err = QueryError::Decode("expected value at line 1".into());
    assert!(err.display_message().starts_with("An error occurred: "));
}
