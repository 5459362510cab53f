use super::*;
use crate::net::scope::RequestScope;

#[test]
fn validate_credentials_trims_email_and_requires_both() {
    let credentials = validate_credentials("  asha@example.in ", "secret1").unwrap();
    assert_eq!(credentials.email, "asha@example.in");
    assert_eq!(credentials.password, "secret1");

    assert_eq!(validate_credentials("   ", "secret1"), Err("Enter your email and password."));
    assert_eq!(validate_credentials("asha@example.in", ""), Err("Enter your email and password."));
}

#[test]
fn unauthorized_login_reads_as_bad_credentials() {
    let err = AppError::Unauthorized {
        scope: RequestScope::User,
    };
    assert_eq!(login_failure_message(&err, "Login failed."), "Invalid email or password.");
}

#[test]
fn other_login_failures_use_server_text_or_fallback() {
    let server = AppError::Http {
        status: 400,
        message: "Account locked".to_owned(),
    };
    assert_eq!(login_failure_message(&server, "Login failed."), "Account locked");

    let parse = AppError::Parse("bad".to_owned());
    assert_eq!(login_failure_message(&parse, "Login failed."), "Login failed.");
}
