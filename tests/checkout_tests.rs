// Interpreting checkout endpoint replies.

use vapor_switch::core::{redirect_target, CheckoutError};

const JSON: &str = "application/json; charset=utf-8";

#[test]
fn success_yields_the_redirect_url() {
    let url = redirect_target(200, JSON, r#"{"url":"https://pay.example/s/abc"}"#).unwrap();
    assert_eq!(url, "https://pay.example/s/abc");
}

#[test]
fn extra_fields_are_ignored() {
    let body = r#"{"id":"cs_1","url":"https://pay.example/s/1","mode":"payment"}"#;
    assert_eq!(redirect_target(201, JSON, body).unwrap(), "https://pay.example/s/1");
}

#[test]
fn error_status_keeps_the_body() {
    match redirect_target(500, JSON, "boom") {
        Err(CheckoutError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(
        redirect_target(302, JSON, ""),
        Err(CheckoutError::Status { status: 302, .. })
    ));
}

#[test]
fn non_json_reply_is_rejected_before_parsing() {
    match redirect_target(200, "text/html", "<html>login</html>") {
        Err(CheckoutError::NotJson { content_type, body }) => {
            assert_eq!(content_type, "text/html");
            assert!(body.contains("login"));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(
        redirect_target(200, "", "{}"),
        Err(CheckoutError::NotJson { .. })
    ));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(
        redirect_target(200, JSON, "{\"url\":"),
        Err(CheckoutError::Malformed(_))
    ));
    assert!(matches!(
        redirect_target(200, JSON, r#"{"url":42}"#),
        Err(CheckoutError::Malformed(_))
    ));
}

#[test]
fn missing_or_empty_url_is_reported() {
    for body in [r#"{}"#, r#"{"url":null}"#, r#"{"url":""}"#] {
        assert!(
            matches!(redirect_target(200, JSON, body), Err(CheckoutError::MissingUrl)),
            "body {}",
            body
        );
    }
}

#[test]
fn errors_render_readable_messages() {
    let err = redirect_target(404, JSON, "not found").unwrap_err();
    assert_eq!(
        err.to_string(),
        "checkout request failed with status 404: not found"
    );
    assert_eq!(
        CheckoutError::MissingUrl.to_string(),
        "checkout response has no redirect url"
    );
}
