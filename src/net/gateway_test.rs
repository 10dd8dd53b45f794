use futures::executor::block_on;

use super::*;
use crate::net::types::AuthError;
use crate::test_support::MockProvider;

#[test]
fn register_returns_token_of_new_account() {
    let gateway = CredentialGateway::new(MockProvider::accepting("fresh"));
    let outcome = block_on(gateway.register("a@b.com", "pw"));
    assert_eq!(outcome, AuthOutcome::Success { token: SessionToken::new("fresh") });
    assert_eq!(gateway.provider().calls(), vec!["create_account a@b.com pw", "id_token"]);
}

#[test]
fn register_failure_is_not_retried() {
    let gateway = CredentialGateway::new(MockProvider::accepting("t").failing_create("EMAIL_EXISTS"));
    let outcome = block_on(gateway.register("a@b.com", "pw"));
    assert_eq!(
        outcome,
        AuthOutcome::Failure(AuthError::AccountConflict {
            code: "EMAIL_EXISTS".into(),
            message: "EMAIL_EXISTS message".into(),
        })
    );
    assert_eq!(gateway.provider().calls(), vec!["create_account a@b.com pw"]);
}

#[test]
fn authenticate_success_and_failure() {
    let gateway = CredentialGateway::new(MockProvider::accepting("t1"));
    assert_eq!(block_on(gateway.authenticate("a@b.com", "pw")).into_result(), Ok(SessionToken::new("t1")));

    let gateway = CredentialGateway::new(MockProvider::accepting("t1").failing_sign_in("INVALID_PASSWORD"));
    let outcome = block_on(gateway.authenticate("a@b.com", "wrong"));
    assert!(matches!(outcome, AuthOutcome::Failure(AuthError::InvalidCredentials { .. })));
    assert_eq!(gateway.provider().calls(), vec!["sign_in a@b.com wrong"]);
}

#[test]
fn end_session_success_carries_absent_token() {
    let gateway = CredentialGateway::new(MockProvider::accepting("t"));
    let outcome = block_on(gateway.end_session());
    assert_eq!(outcome, AuthOutcome::Success { token: SessionToken::absent() });
}

#[test]
fn end_session_failure_passes_code_through() {
    let gateway = CredentialGateway::new(MockProvider::accepting("t").failing_sign_out("auth/network-request-failed"));
    let err = block_on(gateway.end_session()).into_result().unwrap_err();
    assert!(matches!(err, AuthError::NetworkFailure { .. }));
    assert_eq!(err.code(), "auth/network-request-failed");
}
