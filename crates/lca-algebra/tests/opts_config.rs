use lca_algebra::{build_free_bosons, AnyFreeBosons, FreeBosonsOpts, RingSpec};

#[test]
fn empty_yaml_builds_the_default_algebra() {
    let opts = FreeBosonsOpts::from_yaml_str("{}").expect("yaml");
    assert_eq!(opts, FreeBosonsOpts::default());
    let algebra = build_free_bosons(&opts).expect("algebra");
    assert_eq!(
        algebra.to_string(),
        "The free Bosons Lie conformal algebra with generators (alpha, K) over Rational Field"
    );
}

#[test]
fn yaml_selects_ring_matrix_and_names() {
    let yaml = r#"
ring:
  kind: integers_mod
  modulus: 7
gram_matrix:
  - ["2", "1/2"]
  - ["1/2", "-1"]
names: "phi, psi"
"#;
    let opts = FreeBosonsOpts::from_yaml_str(yaml).expect("yaml");
    assert_eq!(opts.ring, RingSpec::IntegersMod { modulus: 7 });
    let algebra = build_free_bosons(&opts).expect("algebra");
    assert_eq!(algebra.ngens(), 3);
    assert_eq!(algebra.ring_name(), "Ring of integers modulo 7");
    match algebra {
        AnyFreeBosons::IntegersMod(inner) => {
            assert_eq!(inner.gram_matrix().to_string(), "[2 4]\n[4 6]");
        }
        other => panic!("unexpected ring {}", other.ring_name()),
    }
}

#[test]
fn json_options_are_accepted() {
    let opts = FreeBosonsOpts::from_json_str(r#"{"ring": {"kind": "integers"}, "ngens": 2}"#)
        .expect("json");
    let algebra = build_free_bosons(&opts).expect("algebra");
    assert_eq!(
        algebra.to_string(),
        "The free Bosons Lie conformal algebra with generators (alpha0, alpha1, K) over Integer Ring"
    );
}

#[test]
fn bad_entries_surface_as_serde_errors() {
    let opts = FreeBosonsOpts {
        gram_matrix: Some(vec![vec!["one".into()]]),
        ..FreeBosonsOpts::default()
    };
    let err = build_free_bosons(&opts).unwrap_err();
    assert_eq!(err.info().code, "gram-entry");
}

#[test]
fn asymmetric_config_is_invalid_input() {
    let opts = FreeBosonsOpts {
        gram_matrix: Some(vec![vec!["0".into(), "1".into()], vec!["-1".into(), "0".into()]]),
        ..FreeBosonsOpts::default()
    };
    let err = build_free_bosons(&opts).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn options_round_trip_through_yaml() {
    let opts = FreeBosonsOpts {
        ring: RingSpec::Integers,
        ngens: Some(2),
        names: Some("a,b".into()),
        ..FreeBosonsOpts::default()
    };
    let yaml = opts.to_yaml_string().expect("yaml");
    assert_eq!(FreeBosonsOpts::from_yaml_str(&yaml).expect("reparse"), opts);
}
