//! Generator naming and enumerated index sets.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LcaError};

fn names_error(code: &str, message: impl Into<String>) -> LcaError {
    LcaError::Names(ErrorInfo::new(code, message))
}

/// Naming scheme requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Names {
    /// A single base name; expanded to `name0, name1, ...` for several generators.
    Prefix(String),
    /// One name per generator.
    Explicit(Vec<String>),
}

impl Names {
    /// Explicit list of names.
    pub fn explicit<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Names::Explicit(names.into_iter().map(Into::into).collect())
    }

    /// Expands the scheme into exactly `ngens` names.
    pub fn expand(&self, ngens: usize) -> Result<Vec<String>, LcaError> {
        let names = match self {
            Names::Prefix(prefix) if ngens == 1 => vec![prefix.clone()],
            Names::Prefix(prefix) => (0..ngens).map(|idx| format!("{prefix}{idx}")).collect(),
            Names::Explicit(names) => {
                if names.len() != ngens {
                    return Err(LcaError::Names(
                        ErrorInfo::new(
                            "count-mismatch",
                            "the number of names must equal the number of generators",
                        )
                        .with_context("names", names.len().to_string())
                        .with_context("ngens", ngens.to_string()),
                    ));
                }
                names.clone()
            }
        };
        for name in &names {
            validate_identifier(name)?;
        }
        Ok(names)
    }
}

impl FromStr for Names {
    type Err = LcaError;

    /// `"alpha"` is a prefix, `"alpha, beta"` an explicit list.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parts: Vec<String> = text
            .split(',')
            .map(|part| part.trim().to_string())
            .collect();
        if parts.iter().any(String::is_empty) {
            return Err(names_error("empty-name", format!("empty name in '{text}'")));
        }
        match parts.len() {
            1 => Ok(Names::Prefix(parts.into_iter().next().unwrap_or_default())),
            _ => Ok(Names::Explicit(parts)),
        }
    }
}

fn validate_identifier(name: &str) -> Result<(), LcaError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(LcaError::Names(
            ErrorInfo::new("invalid-name", format!("'{name}' is not a valid variable name"))
                .with_hint("names must match [A-Za-z_][A-Za-z0-9_]*"),
        ))
    }
}

/// Finite enumerated set of generator labels with a bijective rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct IndexSet {
    labels: Vec<String>,
    ranks: BTreeMap<String, usize>,
}

impl IndexSet {
    /// Builds an index set; labels must be unique.
    pub fn new<I, S>(labels: I) -> Result<Self, LcaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut ranks = BTreeMap::new();
        for (rank, label) in labels.iter().enumerate() {
            if ranks.insert(label.clone(), rank).is_some() {
                return Err(LcaError::Names(
                    ErrorInfo::new("duplicate-label", format!("label '{label}' appears twice"))
                        .with_context("label", label.clone()),
                ));
            }
        }
        Ok(Self { labels, ranks })
    }

    /// The index set `{0, ..., n-1}`.
    pub fn range(n: usize) -> Self {
        let labels: Vec<String> = (0..n).map(|idx| idx.to_string()).collect();
        let ranks = labels
            .iter()
            .enumerate()
            .map(|(rank, label)| (label.clone(), rank))
            .collect();
        Self { labels, ranks }
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the set has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of `label` in the enumeration.
    pub fn rank(&self, label: &str) -> Option<usize> {
        self.ranks.get(label).copied()
    }

    /// Label at position `rank`.
    pub fn unrank(&self, rank: usize) -> Option<&str> {
        self.labels.get(rank).map(String::as_str)
    }

    /// True when `label` belongs to the set.
    pub fn contains(&self, label: &str) -> bool {
        self.ranks.contains_key(label)
    }

    /// Iterates over labels in rank order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Labels in rank order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl TryFrom<Vec<String>> for IndexSet {
    type Error = LcaError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<IndexSet> for Vec<String> {
    fn from(set: IndexSet) -> Self {
        set.labels
    }
}

impl fmt::Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.labels.join(", "))
    }
}

/// Resolves generator names and the index set for `ngens` generators.
///
/// Names, when given, are expanded with [`Names::expand`]. Without an explicit
/// index set the names double as labels, and without either the labels are
/// `0..ngens`. When both are supplied their sizes must agree.
pub fn standardize_names_index_set(
    names: Option<&Names>,
    index_set: Option<&[String]>,
    ngens: usize,
) -> Result<(Option<Vec<String>>, IndexSet), LcaError> {
    let names = names.map(|names| names.expand(ngens)).transpose()?;
    let index_set = match (index_set, &names) {
        (Some(labels), _) => IndexSet::new(labels.iter().cloned())?,
        (None, Some(names)) => IndexSet::new(names.iter().cloned())?,
        (None, None) => IndexSet::range(ngens),
    };
    if index_set.len() != ngens {
        return Err(LcaError::Names(
            ErrorInfo::new(
                "count-mismatch",
                "the size of the indexing set must equal the number of generators",
            )
            .with_context("index_set", index_set.len().to_string())
            .with_context("ngens", ngens.to_string()),
        ));
    }
    Ok((names, index_set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_expands_only_for_several_generators() {
        let names = Names::Prefix("alpha".into());
        assert_eq!(names.expand(1).unwrap(), vec!["alpha"]);
        assert_eq!(
            names.expand(3).unwrap(),
            vec!["alpha0", "alpha1", "alpha2"]
        );
    }

    #[test]
    fn comma_string_parses_as_explicit_list() {
        let names: Names = "alpha, beta".parse().unwrap();
        assert_eq!(names, Names::explicit(["alpha", "beta"]));
        let single: Names = "phi".parse().unwrap();
        assert_eq!(single, Names::Prefix("phi".into()));
    }

    #[test]
    fn invalid_identifiers_are_rejected() {
        let err = Names::explicit(["ok", "2bad"]).expand(2).unwrap_err();
        assert_eq!(err.info().code, "invalid-name");
    }

    #[test]
    fn rank_is_a_bijection() {
        let set = IndexSet::new(["a", "b", "c"]).unwrap();
        for (rank, label) in set.iter().enumerate() {
            assert_eq!(set.rank(label), Some(rank));
            assert_eq!(set.unrank(rank), Some(label));
        }
        assert!(IndexSet::new(["a", "a"]).is_err());
    }

    #[test]
    fn deserialization_rebuilds_ranks() {
        let set: IndexSet = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(set.rank("y"), Some(1));
        assert!(serde_json::from_str::<IndexSet>(r#"["x","x"]"#).is_err());
    }

    #[test]
    fn defaults_to_integer_labels() {
        let (names, set) = standardize_names_index_set(None, None, 2).unwrap();
        assert!(names.is_none());
        assert_eq!(set.labels(), ["0", "1"]);
    }

    #[test]
    fn index_set_size_must_match() {
        let labels = vec!["x".to_string()];
        let err = standardize_names_index_set(None, Some(&labels), 2).unwrap_err();
        assert!(matches!(err, LcaError::Names(_)));
    }
}
