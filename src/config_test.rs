use super::*;

#[test]
fn from_json_applies_session_defaults() {
    let cfg = AppConfig::from_json(r#"{ "firebase": { "apiKey": "key-1", "projectId": "demo" } }"#).unwrap();
    assert_eq!(cfg.firebase.api_key, "key-1");
    assert_eq!(cfg.firebase.project_id, "demo");
    assert_eq!(cfg.firebase.auth_domain, "");
    assert_eq!(cfg.firebase.identity_toolkit_url(), DEFAULT_IDENTITY_TOOLKIT_URL);
    assert_eq!(cfg.session, SessionConfig::default());
    assert_eq!(cfg.session.home_route, "/");
    assert_eq!(cfg.session.failure_reporting, FailureReporting::Asymmetric);
}

#[test]
fn from_json_parses_overrides() {
    let cfg = AppConfig::from_json(
        r#"{
            "firebase": {
                "apiKey": "key-1",
                "authDomain": "demo.firebaseapp.com",
                "messagingSenderId": "123",
                "appId": "1:123:web:abc",
                "identityToolkitUrl": "http://localhost:9099/identitytoolkit.googleapis.com/v1/"
            },
            "session": { "homeRoute": "/home", "failureReporting": "unified" }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.firebase.auth_domain, "demo.firebaseapp.com");
    assert_eq!(cfg.firebase.app_id, "1:123:web:abc");
    assert_eq!(
        cfg.firebase.identity_toolkit_url(),
        "http://localhost:9099/identitytoolkit.googleapis.com/v1"
    );
    assert_eq!(cfg.session.home_route, "/home");
    assert_eq!(cfg.session.failure_reporting, FailureReporting::Unified);
}

#[test]
fn from_json_requires_api_key() {
    let err = AppConfig::from_json(r#"{ "firebase": { "apiKey": "  " } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField("firebase.apiKey")));
    let err = AppConfig::from_json(r#"{ "firebase": {} }"#).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField(_)));
}

#[test]
fn from_json_rejects_malformed_documents() {
    assert!(matches!(AppConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    assert!(matches!(AppConfig::from_json("{}"), Err(ConfigError::Parse(_))));
    assert!(matches!(
        AppConfig::from_json(r#"{ "firebase": { "apiKey": "k" }, "session": { "failureReporting": "loud" } }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn blank_home_route_falls_back_to_root() {
    let cfg = AppConfig::from_json(r#"{ "firebase": { "apiKey": "k" }, "session": { "homeRoute": "" } }"#).unwrap();
    assert_eq!(cfg.session.home_route, "/");
}

#[cfg(not(feature = "csr"))]
#[test]
fn from_page_is_missing_outside_the_browser() {
    assert!(matches!(AppConfig::from_page(), Err(ConfigError::Missing(CONFIG_ELEMENT_ID))));
}
