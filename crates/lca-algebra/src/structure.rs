use std::collections::{BTreeMap, BTreeSet};

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Target of a bracket coefficient: a generator label and the power of `T` applied to it.
pub type Target = (String, u32);

/// Coefficients of a single bracket, keyed by the power of lambda.
pub type WeightMap<E> = BTreeMap<u32, BTreeMap<Target, E>>;

/// Flat record of one structure constant, the serialized form of a [`StructureTable`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructureConstant<E> {
    /// Left generator label.
    pub left: String,
    /// Right generator label.
    pub right: String,
    /// Power of lambda the coefficient multiplies.
    pub weight: u32,
    /// Generator label of the resulting term.
    pub target: String,
    /// Power of `T` applied to the target generator.
    pub derivative: u32,
    /// Coefficient in the ground ring.
    pub value: E,
}

/// Sparse lambda-bracket table `(i, j) -> weight -> (target, derivative) -> coefficient`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureTable<E> {
    brackets: BTreeMap<(String, String), WeightMap<E>>,
}

impl<E> Default for StructureTable<E> {
    fn default() -> Self {
        Self {
            brackets: BTreeMap::new(),
        }
    }
}

impl<E> StructureTable<E> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a coefficient, returning the previous value for the same key.
    pub fn insert(
        &mut self,
        left: impl Into<String>,
        right: impl Into<String>,
        weight: u32,
        target: impl Into<String>,
        derivative: u32,
        value: E,
    ) -> Option<E> {
        self.brackets
            .entry((left.into(), right.into()))
            .or_default()
            .entry(weight)
            .or_default()
            .insert((target.into(), derivative), value)
    }

    /// All coefficients of the bracket of `left` with `right`.
    pub fn get(&self, left: &str, right: &str) -> Option<&WeightMap<E>> {
        self.brackets.get(&(left.to_string(), right.to_string()))
    }

    /// A single coefficient, if recorded.
    pub fn coefficient(
        &self,
        left: &str,
        right: &str,
        weight: u32,
        target: &str,
        derivative: u32,
    ) -> Option<&E> {
        self.get(left, right)?
            .get(&weight)?
            .get(&(target.to_string(), derivative))
    }

    /// Number of distinct ordered pairs `(i, j)` with a recorded bracket.
    pub fn pair_count(&self) -> usize {
        self.brackets.len()
    }

    /// Total number of recorded coefficients.
    pub fn len(&self) -> usize {
        self.brackets
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Ordered pairs with a recorded bracket, in deterministic order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.brackets
            .keys()
            .map(|(left, right)| (left.as_str(), right.as_str()))
    }

    /// Brackets of every recorded pair, in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &WeightMap<E>)> + '_ {
        self.brackets
            .iter()
            .map(|((left, right), weights)| (left.as_str(), right.as_str(), weights))
    }

    /// Every label mentioned as an operand or a target.
    pub fn labels(&self) -> BTreeSet<&str> {
        let mut labels = BTreeSet::new();
        for ((left, right), weights) in &self.brackets {
            labels.insert(left.as_str());
            labels.insert(right.as_str());
            for terms in weights.values() {
                labels.extend(terms.keys().map(|(target, _)| target.as_str()));
            }
        }
        labels
    }

    /// Labels appearing only as bracket targets.
    pub fn targets(&self) -> BTreeSet<&str> {
        self.brackets
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(|terms| terms.keys().map(|(target, _)| target.as_str()))
            .collect()
    }
}

impl<E: PartialEq> StructureTable<E> {
    /// True when the bracket of `(i, j)` equals the bracket of `(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.brackets.iter().all(|((left, right), weights)| {
            self.brackets
                .get(&(right.clone(), left.clone()))
                .map(|mirror| mirror == weights)
                .unwrap_or(false)
        })
    }
}

impl<E: Clone> StructureTable<E> {
    /// Flattens the table into records in deterministic order.
    pub fn constants(&self) -> Vec<StructureConstant<E>> {
        let mut out = Vec::with_capacity(self.len());
        for ((left, right), weights) in &self.brackets {
            for (weight, terms) in weights {
                for ((target, derivative), value) in terms {
                    out.push(StructureConstant {
                        left: left.clone(),
                        right: right.clone(),
                        weight: *weight,
                        target: target.clone(),
                        derivative: *derivative,
                        value: value.clone(),
                    });
                }
            }
        }
        out
    }
}

impl<E> FromIterator<StructureConstant<E>> for StructureTable<E> {
    fn from_iter<I: IntoIterator<Item = StructureConstant<E>>>(iter: I) -> Self {
        let mut table = StructureTable::new();
        for constant in iter {
            table.insert(
                constant.left,
                constant.right,
                constant.weight,
                constant.target,
                constant.derivative,
                constant.value,
            );
        }
        table
    }
}

impl<E: Serialize + Clone> Serialize for StructureTable<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.constants().serialize(serializer)
    }
}

impl<'de, E: Deserialize<'de>> Deserialize<'de> for StructureTable<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let constants = Vec::<StructureConstant<E>>::deserialize(deserializer)?;
        Ok(constants.into_iter().collect())
    }
}
