use std::sync::{Arc, Mutex};

use futures::executor::block_on;

use super::*;
use crate::net::test_support::harness;

#[test]
fn admin_paths_carry_admin_token_and_user_paths_carry_user_token() {
    let h = harness("/");
    h.client.store().set_user_token("u1");
    h.client.store().set_admin_token("a1");

    block_on(h.client.send(ApiRequest::get("/api/auth/admin/verify"))).unwrap();
    block_on(h.client.send(ApiRequest::get("/api/issues"))).unwrap();

    let sent = h.transport.sent();
    assert_eq!(sent[0].url, "http://api.test/api/auth/admin/verify");
    assert_eq!(sent[0].bearer(), Some("a1"));
    assert_eq!(sent[1].bearer(), Some("u1"));
}

#[test]
fn missing_token_sends_no_authorization_header() {
    let h = harness("/");
    block_on(h.client.send(ApiRequest::get("/api/tenders"))).unwrap();
    assert!(h.transport.sent()[0].header(AUTHORIZATION_HEADER).is_none());
}

#[test]
fn bearer_is_read_fresh_for_every_request() {
    let h = harness("/");
    h.client.store().set_user_token("first");
    block_on(h.client.send(ApiRequest::get("/api/issues"))).unwrap();
    h.client.store().set_user_token("second");
    block_on(h.client.send(ApiRequest::get("/api/issues"))).unwrap();

    let sent = h.transport.sent();
    assert_eq!(sent[0].bearer(), Some("first"));
    assert_eq!(sent[1].bearer(), Some("second"));
}

#[test]
fn explicit_scope_overrides_classification() {
    let h = harness("/admin/dashboard");
    h.client.store().set_user_token("u1");
    h.client.store().set_admin_token("a1");

    let request = ApiRequest::get("/api/tenders").scope(RequestScope::Admin);
    block_on(h.client.send(request)).unwrap();
    assert_eq!(h.transport.sent()[0].bearer(), Some("a1"));
}

#[test]
fn admin_401_clears_only_admin_token_and_redirects() {
    let h = harness("/admin/dashboard");
    h.client.store().set_user_token("u1");
    h.client.store().set_admin_token("a1");
    h.transport.respond(401, r#"{"message":"expired"}"#);

    let err = block_on(h.client.send(ApiRequest::get("/api/admin/reports"))).unwrap_err();

    assert_eq!(
        err,
        AppError::Unauthorized {
            scope: RequestScope::Admin
        }
    );
    assert_eq!(h.client.store().admin_token(), None);
    assert_eq!(h.client.store().user_token().as_deref(), Some("u1"));
    assert_eq!(h.navigator.visits(), vec!["/admin/login".to_owned()]);
    assert_eq!(h.client.store().take_redirect_hint().as_deref(), Some("/admin/dashboard"));
}

#[test]
fn admin_401_on_admin_login_screen_does_not_navigate() {
    let h = harness("/admin/login");
    h.client.store().set_admin_token("stale");
    h.transport.respond(401, "");

    let err = block_on(h.client.send(ApiRequest::get("/api/auth/admin/verify"))).unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(h.client.store().admin_token(), None);
    assert!(h.navigator.visits().is_empty());
    assert_eq!(h.client.store().take_redirect_hint(), None);
}

#[test]
fn user_401_records_hint_without_navigating() {
    let h = harness("/report-issue");
    h.client.store().set_user_token("u1");
    h.client.store().set_admin_token("a1");
    h.transport.respond(401, "");

    let err = block_on(h.client.send(ApiRequest::get("/api/auth/verify"))).unwrap_err();

    assert_eq!(
        err,
        AppError::Unauthorized {
            scope: RequestScope::User
        }
    );
    assert_eq!(h.client.store().user_token(), None);
    assert_eq!(h.client.store().admin_token().as_deref(), Some("a1"));
    assert!(h.navigator.visits().is_empty());
    assert_eq!(h.client.store().take_redirect_hint().as_deref(), Some("/report-issue"));
}

#[test]
fn user_401_on_login_or_signup_skips_hint() {
    for path in ["/login", "/signup"] {
        let h = harness(path);
        h.client.store().set_user_token("u1");
        h.transport.respond(401, "");

        let outcome = block_on(h.client.send(ApiRequest::post("/api/auth/login")));

        assert!(outcome.unwrap_err().is_unauthorized());
        assert_eq!(h.client.store().user_token(), None);
        assert_eq!(h.client.store().take_redirect_hint(), None);
    }
}

#[test]
fn cleared_hook_sees_the_token_already_gone() {
    let h = harness("/report-issue");
    h.client.store().set_user_token("u1");
    h.transport.respond(401, "");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let store = h.client.store().clone();
    let client = h.client.clone().with_on_cleared(Arc::new(move |scope| {
        sink.lock().unwrap().push((scope, store.user_token()));
    }));

    let err = block_on(client.send(ApiRequest::get("/api/issues"))).unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(*seen.lock().unwrap(), vec![(RequestScope::User, None)]);
}

#[test]
fn cleared_hook_fires_only_on_the_client_it_was_added_to() {
    let h = harness("/admin/dashboard");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let hooked = h.client.clone().with_on_cleared(Arc::new(move |scope| sink.lock().unwrap().push(scope)));

    assert_eq!(h.client.handle_unauthorized(RequestScope::Admin), UnauthorizedOutcome::Redirected);
    assert!(seen.lock().unwrap().is_empty());
    h.navigator.set_current("/admin/dashboard");
    assert_eq!(hooked.handle_unauthorized(RequestScope::Admin), UnauthorizedOutcome::Redirected);
    assert_eq!(*seen.lock().unwrap(), vec![RequestScope::Admin]);
}

#[test]
fn handle_unauthorized_reports_outcome() {
    let h = harness("/admin/dashboard");
    assert_eq!(h.client.handle_unauthorized(RequestScope::Admin), UnauthorizedOutcome::Redirected);
    assert_eq!(h.client.handle_unauthorized(RequestScope::Admin), UnauthorizedOutcome::Cleared);

    h.navigator.set_current("/tenders");
    assert_eq!(h.client.handle_unauthorized(RequestScope::User), UnauthorizedOutcome::HintRecorded);
}

#[test]
fn non_401_errors_pass_through_without_side_effects() {
    let h = harness("/admin/dashboard");
    h.client.store().set_admin_token("a1");
    h.transport.respond(500, r#"{"message":"database down"}"#);
    h.transport.fail(AppError::Network("offline".to_owned()));

    let http = block_on(h.client.send(ApiRequest::get("/api/admin/reports"))).unwrap_err();
    let network = block_on(h.client.send(ApiRequest::get("/api/admin/reports"))).unwrap_err();

    assert_eq!(
        http,
        AppError::Http {
            status: 500,
            message: "database down".to_owned()
        }
    );
    assert_eq!(network, AppError::Network("offline".to_owned()));
    assert_eq!(h.client.store().admin_token().as_deref(), Some("a1"));
    assert!(h.navigator.visits().is_empty());
}

#[test]
fn primed_bearer_is_used_only_while_storage_is_unavailable() {
    let h = harness("/");
    h.client.store().set_user_token("stored");
    h.client.prime_user_bearer(Some("primed".to_owned()));
    assert_eq!(h.client.bearer_for(RequestScope::User).as_deref(), Some("stored"));

    h.storage.set_available(false);
    assert_eq!(h.client.bearer_for(RequestScope::User).as_deref(), Some("primed"));

    h.transport.respond(401, "");
    let _ = block_on(h.client.send(ApiRequest::get("/api/issues")));
    assert_eq!(h.client.bearer_for(RequestScope::User), None);
}

#[test]
fn json_bodies_get_content_type_header() {
    let h = harness("/");
    let request = ApiRequest::post("/api/verify-city")
        .json(&serde_json::json!({"aadhar": "42"}))
        .unwrap();
    block_on(h.client.send(request)).unwrap();

    let sent = &h.transport.sent()[0];
    assert_eq!(sent.header("content-type"), Some("application/json"));
    assert!(matches!(&sent.body, RequestBody::Json(body) if body.contains("42")));
}

#[test]
fn send_json_reports_undecodable_bodies() {
    let h = harness("/");
    h.transport.respond(200, "not json");
    let result: Result<crate::net::types::VerifyResponse, _> =
        block_on(h.client.send_json(ApiRequest::get("/api/auth/verify")));
    assert!(matches!(result, Err(AppError::Parse(_))));
}

#[test]
fn url_for_joins_base_and_passes_absolute_urls_through() {
    let h = harness("/");
    assert_eq!(h.client.url_for("api/tenders"), "http://api.test/api/tenders");
    assert_eq!(h.client.url_for("/api/tenders"), "http://api.test/api/tenders");
    assert_eq!(h.client.url_for("https://other.test/x"), "https://other.test/x");
}

#[cfg(not(feature = "csr"))]
#[test]
fn multipart_form_keeps_repeated_fields_in_order() {
    let form = MultipartForm::new()
        .text("category", "Water")
        .file("media", Upload::named("a.jpg"))
        .file("media", Upload::named("b.mp4"));

    assert_eq!(form.text_value("category"), Some("Water"));
    assert_eq!(form.file_names("media"), vec!["a.jpg", "b.mp4"]);
    assert_eq!(form.parts().len(), 3);
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_transport_refuses_outside_the_browser() {
    let request = PreparedRequest {
        method: Method::Get,
        url: "http://api.test/api/tenders".to_owned(),
        headers: Vec::new(),
        body: RequestBody::Empty,
    };
    let err = block_on(GlooTransport.send(request)).unwrap_err();
    assert!(matches!(err, AppError::Config(_)), "got {err:?}");
}
