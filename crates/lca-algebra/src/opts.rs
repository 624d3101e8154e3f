use std::fmt;

use lca_core::errors::{ErrorInfo, LcaError};
use lca_core::matrix::Matrix;
use lca_core::names::Names;
use lca_core::ring::{parse_scalar, IntegerModRing, IntegerRing, RationalField, Ring};
use serde::{Deserialize, Serialize};

use crate::free_bosons::{FreeBosons, FreeBosonsParams};
use crate::serde::{to_json, FreeBosonsSnapshot};

fn config_error(code: &str, err: impl ToString) -> LcaError {
    LcaError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Ground ring selected by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RingSpec {
    /// The integers.
    Integers,
    /// The rationals.
    #[default]
    Rationals,
    /// Integers modulo `modulus`.
    IntegersMod {
        /// Modulus, at least 2.
        modulus: u64,
    },
}

/// Configuration for a free Bosons algebra, loadable from YAML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FreeBosonsOpts {
    /// Ground ring.
    #[serde(default)]
    pub ring: RingSpec,
    /// Number of non-central generators.
    #[serde(default)]
    pub ngens: Option<usize>,
    /// Gram matrix rows; entries are integers or fractions written as strings.
    #[serde(default)]
    pub gram_matrix: Option<Vec<Vec<String>>>,
    /// Comma separated generator names, or a single base name.
    #[serde(default)]
    pub names: Option<String>,
    /// Alternative generator labels.
    #[serde(default)]
    pub index_set: Option<Vec<String>>,
}

impl FreeBosonsOpts {
    /// Parses options from YAML.
    pub fn from_yaml_str(data: &str) -> Result<Self, LcaError> {
        serde_yaml::from_str(data).map_err(|err| config_error("yaml-read", err))
    }

    /// Parses options from JSON.
    pub fn from_json_str(data: &str) -> Result<Self, LcaError> {
        serde_json::from_str(data).map_err(|err| config_error("json-read", err))
    }

    /// Renders the options as YAML.
    pub fn to_yaml_string(&self) -> Result<String, LcaError> {
        serde_yaml::to_string(self).map_err(|err| config_error("yaml-write", err))
    }

    /// Converts the textual options into builder parameters.
    pub fn params(&self) -> Result<FreeBosonsParams, LcaError> {
        let gram_matrix = match &self.gram_matrix {
            Some(rows) => {
                let parsed = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|entry| parse_scalar(entry))
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|err| config_error("gram-entry", err))?;
                Some(Matrix::from_rows(parsed)?)
            }
            None => None,
        };
        let names = self
            .names
            .as_deref()
            .map(str::parse::<Names>)
            .transpose()?;
        Ok(FreeBosonsParams {
            ngens: self.ngens,
            gram_matrix,
            names,
            index_set: self.index_set.clone(),
        })
    }
}

/// Free Bosons algebra over a ring chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyFreeBosons {
    /// Over the integers.
    Integers(FreeBosons<IntegerRing>),
    /// Over the rationals.
    Rationals(FreeBosons<RationalField>),
    /// Over the integers modulo `m`.
    IntegersMod(FreeBosons<IntegerModRing>),
}

impl AnyFreeBosons {
    /// Number of generators, central element included.
    pub fn ngens(&self) -> usize {
        match self {
            AnyFreeBosons::Integers(algebra) => algebra.ngens(),
            AnyFreeBosons::Rationals(algebra) => algebra.ngens(),
            AnyFreeBosons::IntegersMod(algebra) => algebra.ngens(),
        }
    }

    /// Name of the ground ring.
    pub fn ring_name(&self) -> String {
        match self {
            AnyFreeBosons::Integers(algebra) => algebra.base_ring().name(),
            AnyFreeBosons::Rationals(algebra) => algebra.base_ring().name(),
            AnyFreeBosons::IntegersMod(algebra) => algebra.base_ring().name(),
        }
    }

    /// Snapshot of the algebra, independent of the ring type.
    pub fn snapshot(&self) -> Result<FreeBosonsSnapshot, LcaError> {
        match self {
            AnyFreeBosons::Integers(algebra) => FreeBosonsSnapshot::capture(algebra),
            AnyFreeBosons::Rationals(algebra) => FreeBosonsSnapshot::capture(algebra),
            AnyFreeBosons::IntegersMod(algebra) => FreeBosonsSnapshot::capture(algebra),
        }
    }

    /// Pretty JSON snapshot.
    pub fn to_json(&self) -> Result<String, LcaError> {
        match self {
            AnyFreeBosons::Integers(algebra) => to_json(algebra),
            AnyFreeBosons::Rationals(algebra) => to_json(algebra),
            AnyFreeBosons::IntegersMod(algebra) => to_json(algebra),
        }
    }
}

impl fmt::Display for AnyFreeBosons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyFreeBosons::Integers(algebra) => fmt::Display::fmt(algebra, f),
            AnyFreeBosons::Rationals(algebra) => fmt::Display::fmt(algebra, f),
            AnyFreeBosons::IntegersMod(algebra) => fmt::Display::fmt(algebra, f),
        }
    }
}

/// Builds the algebra described by `opts`.
pub fn build_free_bosons(opts: &FreeBosonsOpts) -> Result<AnyFreeBosons, LcaError> {
    let params = opts.params()?;
    Ok(match &opts.ring {
        RingSpec::Integers => AnyFreeBosons::Integers(FreeBosons::new(IntegerRing, params)?),
        RingSpec::Rationals => AnyFreeBosons::Rationals(FreeBosons::new(RationalField, params)?),
        RingSpec::IntegersMod { modulus } => {
            let ring = IntegerModRing::new(*modulus)?;
            AnyFreeBosons::IntegersMod(FreeBosons::new(ring, params)?)
        }
    })
}
