//! The free Bosons Lie conformal algebra.
//!
//! Given a ring `R` and a symmetric bilinear form on `R^n` with Gram matrix
//! `M`, this is the free `R[T]`-module on generators `alpha_0 .. alpha_{n-1}`
//! and a central `K` with `TK = 0`, with brackets
//! `[alpha_i lambda alpha_j] = lambda M[i, j] K`. Every `alpha_i` has
//! conformal weight 1.

use std::fmt;
use std::ops::Deref;

use lca_core::errors::{ErrorInfo, LcaError};
use lca_core::matrix::{Matrix, MatrixSpace};
use lca_core::names::{standardize_names_index_set, Names};
use lca_core::ring::{Ring, Scalar};

use crate::graded::{FromStructureConstants, GeneratorSpec, GradedLieConformalAlgebra};
use crate::serde::FreeBosonsSnapshot;
use crate::structure::StructureTable;

/// Label of the central generator.
pub const CENTRAL_LABEL: &str = "K";
/// Base name used when neither names nor an index set are supplied.
pub const DEFAULT_PREFIX: &str = "alpha";
/// Power of lambda carrying the pairing.
pub const PAIRING_WEIGHT: u32 = 1;

/// Optional construction inputs; everything not set falls back to a default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreeBosonsParams {
    /// Number of non-central generators; inferred from the Gram matrix, else `1`.
    pub ngens: Option<usize>,
    /// Symmetric Gram matrix; defaults to the identity.
    pub gram_matrix: Option<Matrix<Scalar>>,
    /// Generator names; defaults to `alpha` (expanded to `alpha0, alpha1, ...`).
    pub names: Option<Names>,
    /// Alternative generator labels.
    pub index_set: Option<Vec<String>>,
}

impl FreeBosonsParams {
    /// Sets the generator count.
    pub fn ngens(mut self, ngens: usize) -> Self {
        self.ngens = Some(ngens);
        self
    }

    /// Sets the Gram matrix.
    pub fn gram_matrix(mut self, gram_matrix: Matrix<Scalar>) -> Self {
        self.gram_matrix = Some(gram_matrix);
        self
    }

    /// Sets the generator names.
    pub fn names(mut self, names: Names) -> Self {
        self.names = Some(names);
        self
    }

    /// Sets the generator labels.
    pub fn index_set<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_set = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

fn gram_error(ngens: usize, matrix: &Matrix<Scalar>, reason: &str) -> LcaError {
    let (rows, cols) = matrix.dimensions();
    tracing::warn!(ngens, rows, cols, reason, "rejected gram matrix");
    LcaError::InvalidInput(
        ErrorInfo::new(
            "gram-matrix",
            format!("the gram_matrix should be a symmetric {ngens} x {ngens} matrix, got {matrix}"),
        )
        .with_context("expected_dim", format!("{ngens} x {ngens}"))
        .with_context("actual_dim", format!("{rows} x {cols}"))
        .with_context("reason", reason),
    )
}

/// Naming choices kept so the algebra can be rebuilt from a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NamingInputs {
    pub(crate) names: Option<Names>,
    pub(crate) index_set: Option<Vec<String>>,
}

/// The free Bosons Lie conformal algebra over `R`.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeBosons<R: Ring> {
    algebra: GradedLieConformalAlgebra<R>,
    gram_matrix: Matrix<R::Element>,
    naming: NamingInputs,
}

impl<R: Ring> FreeBosons<R> {
    /// Validates the inputs, builds the bracket table and the graded algebra.
    ///
    /// Fails with [`LcaError::InvalidInput`] when the Gram matrix is not a
    /// symmetric `ngens x ngens` matrix over `ring`, or when `ngens` is zero.
    pub fn new(ring: R, params: FreeBosonsParams) -> Result<Self, LcaError> {
        let FreeBosonsParams {
            ngens,
            gram_matrix,
            names,
            index_set,
        } = params;

        let (ngens, gram_matrix) = match gram_matrix {
            Some(matrix) => {
                let ngens = ngens.unwrap_or_else(|| matrix.nrows());
                let coerced = match MatrixSpace::square(ring.clone(), ngens).coerce(&matrix) {
                    Ok(coerced) => coerced,
                    Err(LcaError::Ring(_)) => return Err(gram_error(ngens, &matrix, "ring")),
                    Err(_) => return Err(gram_error(ngens, &matrix, "dimension")),
                };
                // Symmetry of the supplied matrix; reduction into the ring can hide asymmetry.
                if !matrix.is_symmetric() {
                    return Err(gram_error(ngens, &matrix, "asymmetric"));
                }
                (ngens, coerced)
            }
            None => {
                let ngens = ngens.unwrap_or(1);
                (ngens, Matrix::identity(&ring, ngens))
            }
        };
        if ngens == 0 {
            return Err(LcaError::InvalidInput(
                ErrorInfo::new("ngens", "the number of generators must be a positive integer")
                    .with_context("ngens", "0"),
            ));
        }

        let naming = NamingInputs {
            names: names.clone(),
            index_set: index_set.clone(),
        };
        let (names, latex_names) = match (names, &index_set) {
            (None, None) => {
                let mut latex: Vec<String> =
                    (0..ngens).map(|idx| format!(r"\alpha_{{{idx}}}")).collect();
                latex.push(CENTRAL_LABEL.to_string());
                (Some(Names::Prefix(DEFAULT_PREFIX.to_string())), Some(latex))
            }
            (names, _) => (names, None),
        };
        let (names, index_set) =
            standardize_names_index_set(names.as_ref(), index_set.as_deref(), ngens)?;

        // Row `r` of the validated `ngens x ngens` matrix belongs to the label of rank `r`.
        let mut table = StructureTable::new();
        for (i, row) in index_set.iter().zip(gram_matrix.rows()) {
            for (j, value) in index_set.iter().zip(row) {
                table.insert(i, j, PAIRING_WEIGHT, CENTRAL_LABEL, 0, value.clone());
            }
        }
        tracing::debug!(ngens, entries = table.len(), "built free bosons bracket table");

        let spec = GeneratorSpec {
            index_set,
            names,
            latex_names,
            central_elements: vec![CENTRAL_LABEL.to_string()],
            weights: Some(vec![1; ngens]),
        };
        let algebra = GradedLieConformalAlgebra::from_structure_constants(ring, table, spec)?;
        Ok(Self {
            algebra,
            gram_matrix,
            naming,
        })
    }

    /// Default algebra: one generator `alpha`, identity pairing.
    pub fn with_defaults(ring: R) -> Result<Self, LcaError> {
        Self::new(ring, FreeBosonsParams::default())
    }

    /// `ngens` generators with the identity pairing.
    pub fn with_ngens(ring: R, ngens: usize) -> Result<Self, LcaError> {
        Self::new(ring, FreeBosonsParams::default().ngens(ngens))
    }

    /// Generator count inferred from the Gram matrix.
    pub fn with_gram_matrix(ring: R, gram_matrix: Matrix<Scalar>) -> Result<Self, LcaError> {
        Self::new(ring, FreeBosonsParams::default().gram_matrix(gram_matrix))
    }

    /// The Gram matrix of the pairing.
    pub fn gram_matrix(&self) -> &Matrix<R::Element> {
        &self.gram_matrix
    }

    /// The underlying graded algebra.
    pub fn algebra(&self) -> &GradedLieConformalAlgebra<R> {
        &self.algebra
    }

    /// Number of non-central generators.
    pub fn rank(&self) -> usize {
        self.algebra.index_set().len()
    }

    /// Ring independent snapshot of the construction inputs and table hash.
    pub fn snapshot(&self) -> Result<FreeBosonsSnapshot, LcaError> {
        FreeBosonsSnapshot::capture(self)
    }

    pub(crate) fn naming(&self) -> &NamingInputs {
        &self.naming
    }
}

impl<R: Ring> Deref for FreeBosons<R> {
    type Target = GradedLieConformalAlgebra<R>;

    fn deref(&self) -> &Self::Target {
        &self.algebra
    }
}

impl<R: Ring> fmt::Display for FreeBosons<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The free Bosons Lie conformal algebra with generators {} over {}",
            self.algebra.gens_repr(),
            self.algebra.base_ring().name()
        )
    }
}
