use lca_algebra::{FreeBosons, FreeBosonsParams, CENTRAL_LABEL, PAIRING_WEIGHT};
use lca_core::ring::{scalar, IntegerModRing, RationalField};
use lca_core::{Matrix, Scalar};
use proptest::prelude::*;

fn symmetric(n: usize, seed: &[i64]) -> Matrix<Scalar> {
    Matrix::from_fn(n, n, |row, col| {
        let (lo, hi) = if row <= col { (row, col) } else { (col, row) };
        scalar(seed[(lo * n + hi) % seed.len()])
    })
}

fn seeds() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-9i64..10, 1..40)
}

proptest! {
    #[test]
    fn symmetric_gram_matrices_are_kept(n in 1usize..6, seed in seeds()) {
        let gram = symmetric(n, &seed);
        let params = FreeBosonsParams::default().ngens(n).gram_matrix(gram.clone());
        let algebra = FreeBosons::new(RationalField, params).unwrap();
        prop_assert_eq!(algebra.gram_matrix(), &gram);
    }

    #[test]
    fn omitted_gram_matrix_is_identity(n in 1usize..8) {
        let algebra = FreeBosons::with_ngens(RationalField, n).unwrap();
        prop_assert_eq!(algebra.gram_matrix(), &Matrix::identity(&RationalField, n));
    }

    #[test]
    fn table_has_one_entry_per_ordered_pair(n in 1usize..6, seed in seeds()) {
        let algebra = FreeBosons::with_gram_matrix(RationalField, symmetric(n, &seed)).unwrap();
        let table = algebra.structure_table();
        prop_assert_eq!(table.pair_count(), n * n);
        prop_assert_eq!(table.len(), n * n);
        prop_assert!(table.is_symmetric());
        let labels: Vec<String> = algebra.index_set().labels().to_vec();
        for (i, left) in labels.iter().enumerate() {
            for (j, right) in labels.iter().enumerate() {
                let entry = table.coefficient(left, right, PAIRING_WEIGHT, CENTRAL_LABEL, 0);
                prop_assert_eq!(entry, algebra.gram_matrix().get(i, j));
            }
        }
    }

    #[test]
    fn asymmetric_matrices_are_rejected(n in 2usize..6, seed in seeds(), bump in 1i64..5) {
        let mut rows = symmetric(n, &seed).to_rows();
        rows[0][1] = &rows[0][1] + scalar(bump);
        let gram = Matrix::from_rows(rows).unwrap();
        let err = FreeBosons::with_gram_matrix(RationalField, gram).unwrap_err();
        prop_assert!(err.is_invalid_input());
    }

    #[test]
    fn asymmetry_is_rejected_even_when_reduction_hides_it(
        n in 2usize..6,
        seed in seeds(),
        modulus in 2i64..12,
        multiple in 1i64..4,
    ) {
        let mut rows = symmetric(n, &seed).to_rows();
        rows[0][1] = &rows[0][1] + scalar(modulus * multiple);
        let gram = Matrix::from_rows(rows).unwrap();
        let ring = IntegerModRing::new(modulus).unwrap();
        let err = FreeBosons::with_gram_matrix(ring, gram).unwrap_err();
        prop_assert!(err.is_invalid_input());
        prop_assert_eq!(err.info().context["reason"].as_str(), "asymmetric");
    }

    #[test]
    fn mismatched_ngens_is_rejected(n in 1usize..6, extra in 1usize..3, seed in seeds()) {
        let params = FreeBosonsParams::default()
            .ngens(n + extra)
            .gram_matrix(symmetric(n, &seed));
        let err = FreeBosons::new(RationalField, params).unwrap_err();
        prop_assert!(err.is_invalid_input());
        let expected = format!("{0} x {0}", n + extra);
        prop_assert_eq!(&err.info().context["expected_dim"], &expected);
    }
}
