use lca_core::errors::{ErrorInfo, LcaError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("expected_dim", "2")
        .with_context("reason", "example")
}

#[test]
fn invalid_input_surface() {
    let err = LcaError::InvalidInput(sample_info("gram-matrix", "not symmetric"));
    assert_eq!(err.info().code, "gram-matrix");
    assert!(err.info().context.contains_key("expected_dim"));
    assert!(err.is_invalid_input());
}

#[test]
fn names_surface() {
    let err = LcaError::Names(sample_info("count-mismatch", "too few names"));
    assert_eq!(err.info().code, "count-mismatch");
    assert!(!err.is_invalid_input());
}

#[test]
fn ring_surface() {
    let err = LcaError::Ring(sample_info("not-a-member", "1/2"));
    assert_eq!(err.info().code, "not-a-member");
}

#[test]
fn lookup_surface() {
    let err = LcaError::Lookup(sample_info("unknown-generator", "gamma"));
    assert_eq!(err.info().code, "unknown-generator");
}

#[test]
fn serde_surface() {
    let err = LcaError::Serde(sample_info("json-read", "eof"));
    assert_eq!(err.info().code, "json-read");
}

#[test]
fn display_lists_context_and_hint() {
    let err = LcaError::InvalidInput(
        ErrorInfo::new("gram-matrix", "bad matrix")
            .with_context("expected_dim", "2")
            .with_hint("pass a symmetric matrix"),
    );
    assert_eq!(
        err.to_string(),
        "invalid input: bad matrix (code: gram-matrix) | context: [expected_dim=2] | hint: pass a symmetric matrix"
    );
}

#[test]
fn errors_round_trip_through_json() {
    let err = LcaError::Names(sample_info("duplicate-label", "a"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Names\""));
    let decoded: LcaError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
