use super::*;

// ===== success =====

#[test]
fn parse_success_returns_response_text() {
    let body = serde_json::json!({ "response": "Could be a loose gas cap" }).to_string();
    assert_eq!(parse_reply(StatusCode::OK, &body).unwrap(), "Could be a loose gas cap");
}

#[test]
fn parse_success_accepts_any_2xx() {
    let body = r#"{"response":"queued"}"#;
    assert_eq!(parse_reply(StatusCode::ACCEPTED, body).unwrap(), "queued");
}

#[test]
fn parse_success_ignores_extra_fields() {
    let body = r#"{"response":"Replace the belt","sources":["manual.pdf:3"]}"#;
    assert_eq!(parse_reply(StatusCode::OK, body).unwrap(), "Replace the belt");
}

#[test]
fn parse_success_missing_response_is_decode_error() {
    let err = parse_reply(StatusCode::OK, "{}").unwrap_err();
    assert!(matches!(err, QueryError::Decode(msg) if msg.contains("response")));
}

#[test]
fn parse_success_invalid_json_is_decode_error() {
    let err = parse_reply(StatusCode::OK, "<html>").unwrap_err();
    assert!(matches!(err, QueryError::Decode(_)));
}

// ===== error statuses =====

#[test]
fn parse_error_status_uses_response_field() {
    let body = r#"{"response":"No documents indexed"}"#;
    let err = parse_reply(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
    assert_eq!(err, QueryError::Server { status: 500, message: "No documents indexed".into() });
    assert_eq!(err.display_message(), "Error: No documents indexed");
}

#[test]
fn parse_error_status_without_body_uses_reason() {
    let err = parse_reply(StatusCode::BAD_GATEWAY, "").unwrap_err();
    assert_eq!(err, QueryError::Server { status: 502, message: "Bad Gateway".into() });
}

#[test]
fn parse_error_status_with_html_body_uses_reason() {
    let err = parse_reply(StatusCode::BAD_GATEWAY, "<html>upstream down</html>").unwrap_err();
    assert_eq!(err, QueryError::Server { status: 502, message: "Bad Gateway".into() });
    assert_eq!(err.display_message(), "Error: Bad Gateway");
}

// ===== client construction =====

#[test]
fn client_keeps_configured_endpoint() {
    let config = ChatConfig { endpoint: "http://127.0.0.1:9/".into(), ..ChatConfig::default() };
    let client = HttpQueryClient::new(&config).unwrap();
    assert_eq!(client.endpoint(), "http://127.0.0.1:9/");
}
