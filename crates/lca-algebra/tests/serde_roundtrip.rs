use lca_algebra::{
    from_bytes, from_json, stable_hash_string, to_bytes, to_json, FreeBosons, FreeBosonsParams,
};
use lca_core::names::Names;
use lca_core::ring::{scalar, IntegerRing, RationalField};
use lca_core::{LcaError, Matrix};

fn build() -> FreeBosons<RationalField> {
    let gram = Matrix::from_rows(vec![
        vec![scalar(2), scalar(-1)],
        vec![scalar(-1), scalar(2)],
    ])
    .unwrap();
    let params = FreeBosonsParams::default()
        .gram_matrix(gram)
        .names(Names::explicit(["e", "f"]));
    FreeBosons::new(RationalField, params).unwrap()
}

#[test]
fn json_round_trip() {
    let algebra = build();
    let json = to_json(&algebra).unwrap();
    let restored = from_json(RationalField, &json).unwrap();
    assert_eq!(restored, algebra);
}

#[test]
fn binary_round_trip() {
    let algebra = build();
    let bytes = to_bytes(&algebra).unwrap();
    let restored = from_bytes(RationalField, &bytes).unwrap();
    assert_eq!(
        stable_hash_string(restored.structure_table()).unwrap(),
        stable_hash_string(algebra.structure_table()).unwrap()
    );
}

#[test]
fn default_algebra_keeps_latex_names_after_restore() {
    let algebra = FreeBosons::with_ngens(RationalField, 2).unwrap();
    let restored = from_json(RationalField, &to_json(&algebra).unwrap()).unwrap();
    assert_eq!(restored.latex_names(), algebra.latex_names());
}

#[test]
fn restoring_over_another_ring_fails() {
    let json = to_json(&build()).unwrap();
    let err = from_json(IntegerRing, &json).unwrap_err();
    assert_eq!(err.info().code, "ring-mismatch");
}

#[test]
fn tampered_hash_is_detected() {
    let mut snapshot = build().snapshot().unwrap();
    snapshot.provenance.table_hash = "0".repeat(64);
    let err = snapshot.restore(RationalField).unwrap_err();
    assert_eq!(err.info().code, "hash-mismatch");
}

#[test]
fn table_hash_is_stable() {
    let a = stable_hash_string(build().structure_table()).unwrap();
    let b = stable_hash_string(build().structure_table()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
}

#[test]
fn snapshot_keeps_gram_rows_as_rationals() {
    let snapshot = build().snapshot().unwrap();
    assert_eq!(snapshot.gram_matrix, vec![vec!["2", "-1"], vec!["-1", "2"]]);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = from_json(RationalField, "{\"ngens\":").unwrap_err();
    assert!(matches!(err, LcaError::Serde(_)));
    assert_eq!(err.info().code, "json-read");
}
