//! H-graded Lie conformal algebras given by a table of structure constants.
//!
//! This is the container the free Bosons builder hands its table to. It checks
//! that the table only mentions known generators, records names and
//! conformal weights, and answers bracket queries between generators. It does
//! not implement the lambda-bracket calculus on arbitrary elements.

use std::collections::BTreeMap;
use std::fmt;

use lca_core::errors::{ErrorInfo, LcaError};
use lca_core::names::IndexSet;
use lca_core::ring::Ring;
use serde::{Deserialize, Serialize};

use crate::structure::{StructureTable, Target};

fn lookup_error(label: &str) -> LcaError {
    LcaError::Lookup(
        ErrorInfo::new("unknown-generator", format!("'{label}' is not a generator"))
            .with_context("label", label),
    )
}

fn names_error(code: &str, message: impl Into<String>) -> LcaError {
    LcaError::Names(ErrorInfo::new(code, message))
}

/// Generator data handed to [`FromStructureConstants`] alongside the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSpec {
    /// Labels of the non-central generators; table keys use these.
    pub index_set: IndexSet,
    /// Display names of the non-central generators, defaulting to the labels.
    #[serde(default)]
    pub names: Option<Vec<String>>,
    /// LaTeX names of every generator, central elements last.
    #[serde(default)]
    pub latex_names: Option<Vec<String>>,
    /// Labels of the central generators.
    #[serde(default)]
    pub central_elements: Vec<String>,
    /// Conformal weight of each non-central generator (default `1`).
    #[serde(default)]
    pub weights: Option<Vec<u32>>,
}

impl GeneratorSpec {
    /// Spec with default names, weights and no central elements.
    pub fn new(index_set: IndexSet) -> Self {
        Self {
            index_set,
            names: None,
            latex_names: None,
            central_elements: Vec::new(),
            weights: None,
        }
    }
}

/// Collaborator contract: build a queryable structure from a structure-constant table.
pub trait FromStructureConstants<R: Ring>: Sized {
    /// Validates the table against the generator spec and builds the structure.
    fn from_structure_constants(
        ring: R,
        table: StructureTable<R::Element>,
        spec: GeneratorSpec,
    ) -> Result<Self, LcaError>;
}

/// Sparse combination of `T^(k) g` terms, as returned by a bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearCombination<E> {
    terms: BTreeMap<Target, E>,
}

impl<E> Default for LinearCombination<E> {
    fn default() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }
}

impl<E> LinearCombination<E> {
    /// Coefficient of `T^(derivative) label`, if non-zero.
    pub fn coefficient(&self, label: &str, derivative: u32) -> Option<&E> {
        self.terms.get(&(label.to_string(), derivative))
    }

    /// Iterates over `((label, derivative), coefficient)` terms.
    pub fn terms(&self) -> impl Iterator<Item = (&Target, &E)> + '_ {
        self.terms.iter()
    }

    /// Number of non-zero terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True for the zero combination.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<E: fmt::Display> fmt::Display for LinearCombination<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (idx, ((label, derivative), coeff)) in self.terms.iter().enumerate() {
            let basis = match derivative {
                0 => label.clone(),
                1 => format!("T{label}"),
                d => format!("T^({d}){label}"),
            };
            let coeff = coeff.to_string();
            let term = match coeff.as_str() {
                "1" => basis,
                "-1" => format!("-{basis}"),
                _ => format!("{coeff}*{basis}"),
            };
            if idx > 0 {
                match term.strip_prefix('-') {
                    Some(rest) => write!(f, " - {rest}")?,
                    None => write!(f, " + {term}")?,
                }
            } else {
                f.write_str(&term)?;
            }
        }
        Ok(())
    }
}

/// Lambda-bracket of two generators: power of lambda to the resulting combination.
pub type Bracket<E> = BTreeMap<u32, LinearCombination<E>>;

/// H-graded Lie conformal algebra with structure constants.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedLieConformalAlgebra<R: Ring> {
    ring: R,
    table: StructureTable<R::Element>,
    index_set: IndexSet,
    names: Vec<String>,
    latex_names: Vec<String>,
    central: Vec<String>,
    weights: BTreeMap<String, u32>,
}

impl<R: Ring> FromStructureConstants<R> for GradedLieConformalAlgebra<R> {
    fn from_structure_constants(
        ring: R,
        table: StructureTable<R::Element>,
        spec: GeneratorSpec,
    ) -> Result<Self, LcaError> {
        let GeneratorSpec {
            index_set,
            names,
            latex_names,
            central_elements,
            weights,
        } = spec;

        for central in &central_elements {
            if index_set.contains(central) {
                return Err(LcaError::Names(
                    ErrorInfo::new(
                        "central-clash",
                        format!("central element '{central}' is also a generator label"),
                    )
                    .with_context("label", central.clone()),
                ));
            }
        }

        let names = match names {
            Some(names) if names.len() != index_set.len() => {
                return Err(names_error(
                    "count-mismatch",
                    "one display name is required per generator",
                ))
            }
            Some(names) => names,
            None => index_set.labels().to_vec(),
        };
        let mut all_names = names.clone();
        all_names.extend(central_elements.iter().cloned());
        let latex_names = match latex_names {
            Some(latex) if latex.len() != all_names.len() => {
                return Err(names_error(
                    "count-mismatch",
                    "one LaTeX name is required per generator, central elements included",
                ))
            }
            Some(latex) => latex,
            None => all_names.clone(),
        };

        let weights = match weights {
            Some(weights) if weights.len() != index_set.len() => {
                return Err(names_error(
                    "count-mismatch",
                    "one weight is required per non-central generator",
                ))
            }
            Some(weights) => weights,
            None => vec![1; index_set.len()],
        };
        let mut weight_map: BTreeMap<String, u32> = index_set
            .iter()
            .map(str::to_string)
            .zip(weights)
            .collect();
        for central in &central_elements {
            weight_map.insert(central.clone(), 0);
        }

        for (left, right) in table.pairs() {
            for label in [left, right] {
                if !index_set.contains(label) {
                    return Err(lookup_error(label));
                }
            }
        }
        for target in table.targets() {
            if !weight_map.contains_key(target) {
                return Err(lookup_error(target));
            }
        }

        tracing::debug!(
            ring = %ring.name(),
            generators = index_set.len(),
            central = central_elements.len(),
            pairs = table.pair_count(),
            "built graded Lie conformal algebra"
        );

        Ok(Self {
            ring,
            table,
            index_set,
            names,
            latex_names,
            central: central_elements,
            weights: weight_map,
        })
    }
}

impl<R: Ring> GradedLieConformalAlgebra<R> {
    /// The ground ring.
    pub fn base_ring(&self) -> &R {
        &self.ring
    }

    /// Number of generators, central elements included.
    pub fn ngens(&self) -> usize {
        self.index_set.len() + self.central.len()
    }

    /// Labels of every generator: non-central in rank order, then central.
    pub fn gens(&self) -> Vec<&str> {
        self.index_set
            .iter()
            .chain(self.central.iter().map(String::as_str))
            .collect()
    }

    /// Display names of every generator in the order of [`Self::gens`].
    pub fn variable_names(&self) -> Vec<&str> {
        self.names
            .iter()
            .chain(&self.central)
            .map(String::as_str)
            .collect()
    }

    /// LaTeX names in the order of [`Self::gens`].
    pub fn latex_names(&self) -> &[String] {
        &self.latex_names
    }

    /// Labels of the central generators.
    pub fn central_elements(&self) -> &[String] {
        &self.central
    }

    /// Labels of the non-central generators.
    pub fn index_set(&self) -> &IndexSet {
        &self.index_set
    }

    /// The structure-constant table the algebra was built from.
    pub fn structure_table(&self) -> &StructureTable<R::Element> {
        &self.table
    }

    /// Resolves a generator label or display name to its label.
    ///
    /// Labels take precedence: when a display name equals another generator's
    /// label, `name` resolves to the generator carrying that label.
    pub fn resolve(&self, name: &str) -> Result<&str, LcaError> {
        if let Some((label, _)) = self.weights.get_key_value(name) {
            return Ok(label.as_str());
        }
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .and_then(|rank| self.index_set.unrank(rank))
            .ok_or_else(|| lookup_error(name))
    }

    /// True when `name` resolves to a central generator.
    pub fn is_central(&self, name: &str) -> Result<bool, LcaError> {
        let label = self.resolve(name)?;
        Ok(self.central.iter().any(|central| central == label))
    }

    /// Display name of a generator label.
    pub fn display_name(&self, name: &str) -> Result<&str, LcaError> {
        let label = self.resolve(name)?;
        Ok(match self.index_set.rank(label) {
            Some(rank) => self.names[rank].as_str(),
            None => label,
        })
    }

    /// LaTeX name of a generator.
    pub fn latex_name(&self, name: &str) -> Result<&str, LcaError> {
        let label = self.resolve(name)?;
        let position = match self.index_set.rank(label) {
            Some(rank) => rank,
            None => {
                self.index_set.len()
                    + self
                        .central
                        .iter()
                        .position(|central| central == label)
                        .ok_or_else(|| lookup_error(label))?
            }
        };
        Ok(self.latex_names[position].as_str())
    }

    /// Conformal weight of a generator; central elements have weight `0`.
    pub fn degree(&self, name: &str) -> Result<u32, LcaError> {
        let label = self.resolve(name)?;
        self.weights
            .get(label)
            .copied()
            .ok_or_else(|| lookup_error(label))
    }

    /// Lambda-bracket `[a_lambda b]` of two generators with zero terms dropped.
    pub fn bracket(&self, a: &str, b: &str) -> Result<Bracket<R::Element>, LcaError> {
        let left = self.resolve(a)?;
        let right = self.resolve(b)?;
        let mut out = Bracket::new();
        let Some(weights) = self.table.get(left, right) else {
            return Ok(out);
        };
        for (weight, terms) in weights {
            let nonzero: BTreeMap<Target, R::Element> = terms
                .iter()
                .filter(|(_, coeff)| !self.ring.is_zero(coeff))
                .map(|(target, coeff)| (target.clone(), coeff.clone()))
                .collect();
            if !nonzero.is_empty() {
                out.insert(*weight, LinearCombination { terms: nonzero });
            }
        }
        Ok(out)
    }

    /// Renders a bracket in the `{1: K}` form.
    pub fn format_bracket(bracket: &Bracket<R::Element>) -> String {
        let parts: Vec<String> = bracket
            .iter()
            .map(|(weight, combination)| format!("{weight}: {combination}"))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }

    /// `(g0, g1, ..., K)` rendering of the generator names.
    pub fn gens_repr(&self) -> String {
        format!("({})", self.variable_names().join(", "))
    }
}

impl<R: Ring> fmt::Display for GradedLieConformalAlgebra<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lie conformal algebra with generators {} over {}",
            self.gens_repr(),
            self.ring.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lca_core::ring::{scalar, RationalField};
    use lca_core::Scalar;

    fn virasoro_like() -> GradedLieConformalAlgebra<RationalField> {
        let mut table: StructureTable<Scalar> = StructureTable::new();
        table.insert("L", "L", 0, "L", 1, scalar(1));
        table.insert("L", "L", 1, "L", 0, scalar(2));
        table.insert("L", "L", 3, "C", 0, "1/12".parse().unwrap());
        let mut spec = GeneratorSpec::new(IndexSet::new(["L"]).unwrap());
        spec.central_elements = vec!["C".into()];
        spec.weights = Some(vec![2]);
        GradedLieConformalAlgebra::from_structure_constants(RationalField, table, spec).unwrap()
    }

    #[test]
    fn bracket_formats_all_weights() {
        let algebra = virasoro_like();
        let bracket = algebra.bracket("L", "L").unwrap();
        assert_eq!(
            GradedLieConformalAlgebra::<RationalField>::format_bracket(&bracket),
            "{0: TL, 1: 2*L, 3: 1/12*C}"
        );
        assert_eq!(algebra.degree("L").unwrap(), 2);
        assert_eq!(algebra.degree("C").unwrap(), 0);
    }

    #[test]
    fn unknown_targets_are_rejected() {
        let mut table: StructureTable<Scalar> = StructureTable::new();
        table.insert("a", "a", 1, "Z", 0, scalar(1));
        let spec = GeneratorSpec::new(IndexSet::new(["a"]).unwrap());
        let err = GradedLieConformalAlgebra::from_structure_constants(RationalField, table, spec)
            .unwrap_err();
        assert!(matches!(err, LcaError::Lookup(_)));
    }

    #[test]
    fn central_label_may_not_be_a_generator() {
        let mut spec = GeneratorSpec::new(IndexSet::new(["K"]).unwrap());
        spec.central_elements = vec!["K".into()];
        let err = GradedLieConformalAlgebra::<RationalField>::from_structure_constants(
            RationalField,
            StructureTable::new(),
            spec,
        )
        .unwrap_err();
        assert_eq!(err.info().code, "central-clash");
    }

    #[test]
    fn linear_combination_signs() {
        let mut terms = BTreeMap::new();
        terms.insert(("K".to_string(), 0), scalar(-1));
        terms.insert(("L".to_string(), 2), scalar(3));
        let combination = LinearCombination { terms };
        assert_eq!(combination.to_string(), "-K + 3*T^(2)L");
    }

    #[test]
    fn labels_win_over_display_names() {
        let mut table: StructureTable<Scalar> = StructureTable::new();
        table.insert("x", "y", 1, "K", 0, scalar(3));
        let mut spec = GeneratorSpec::new(IndexSet::new(["x", "y"]).unwrap());
        spec.names = Some(vec!["y".into(), "x".into()]);
        spec.central_elements = vec!["K".into()];
        let algebra =
            GradedLieConformalAlgebra::from_structure_constants(RationalField, table, spec)
                .unwrap();
        assert_eq!(algebra.resolve("x").unwrap(), "x");
        assert_eq!(algebra.display_name("x").unwrap(), "y");
        assert_eq!(algebra.bracket("x", "y").unwrap()[&1].to_string(), "3*K");
    }
}
