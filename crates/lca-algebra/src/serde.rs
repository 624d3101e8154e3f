use std::collections::BTreeMap;
use std::iter::FromIterator;

use ::serde::{Deserialize, Serialize};
use lca_core::errors::{ErrorInfo, LcaError};
use lca_core::matrix::Matrix;
use lca_core::names::Names;
use lca_core::provenance::{BuildProvenance, SchemaVersion};
use lca_core::ring::{parse_scalar, Ring};
use serde_json::{Map, Value};

use crate::free_bosons::{FreeBosons, FreeBosonsParams};
use crate::hash::stable_hash_string;

fn serde_error(code: &str, err: impl ToString) -> LcaError {
    LcaError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut ordered = BTreeMap::new();
            for (key, val) in map {
                ordered.insert(key, canonicalize(val));
            }
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => {
            let canonical_values = values.into_iter().map(canonicalize).collect();
            Value::Array(canonical_values)
        }
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic ordering.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, LcaError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical).map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Restores a value from canonical JSON bytes.
pub fn from_json_slice<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, LcaError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json-read", err))
}

/// Ring independent description of a free Bosons algebra.
///
/// Stores the construction inputs rather than the table; restoring rebuilds
/// the algebra and checks the recorded table hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeBosonsSnapshot {
    /// Schema version of the payload.
    pub schema_version: SchemaVersion,
    /// Ring name and table hash.
    pub provenance: BuildProvenance,
    /// Number of non-central generators.
    pub ngens: usize,
    /// Names as supplied at construction.
    #[serde(default)]
    pub names: Option<Names>,
    /// Index set as supplied at construction.
    #[serde(default)]
    pub index_set: Option<Vec<String>>,
    /// Display names of every generator, central element last.
    pub generators: Vec<String>,
    /// Gram matrix rows as canonical rational strings.
    pub gram_matrix: Vec<Vec<String>>,
}

impl FreeBosonsSnapshot {
    /// Records the inputs and table hash of `algebra`.
    pub fn capture<R: Ring>(algebra: &FreeBosons<R>) -> Result<Self, LcaError> {
        let ring = algebra.base_ring();
        let naming = algebra.naming();
        let gram_matrix = algebra
            .gram_matrix()
            .map(|entry| ring.to_scalar(entry).to_string())
            .to_rows();
        let tool_versions = [(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )]
        .into_iter()
        .collect();
        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance: BuildProvenance {
                table_hash: stable_hash_string(algebra.structure_table())?,
                ring: ring.name(),
                tool_versions,
            },
            ngens: algebra.rank(),
            names: naming.names.clone(),
            index_set: naming.index_set.clone(),
            generators: algebra
                .variable_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            gram_matrix,
        })
    }

    /// Rebuilds the algebra over `ring`, which must match the recorded ring.
    pub fn restore<R: Ring>(&self, ring: R) -> Result<FreeBosons<R>, LcaError> {
        if ring.name() != self.provenance.ring {
            return Err(LcaError::Serde(
                ErrorInfo::new("ring-mismatch", "snapshot was taken over a different ring")
                    .with_context("expected", self.provenance.ring.clone())
                    .with_context("actual", ring.name()),
            ));
        }
        let rows = self
            .gram_matrix
            .iter()
            .map(|row| {
                row.iter()
                    .map(|entry| parse_scalar(entry))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let params = FreeBosonsParams {
            ngens: Some(self.ngens),
            gram_matrix: Some(Matrix::from_rows(rows)?),
            names: self.names.clone(),
            index_set: self.index_set.clone(),
        };
        let algebra = FreeBosons::new(ring, params)?;
        let table_hash = stable_hash_string(algebra.structure_table())?;
        if table_hash != self.provenance.table_hash {
            return Err(LcaError::Serde(
                ErrorInfo::new("hash-mismatch", "rebuilt table does not match the snapshot")
                    .with_context("expected", self.provenance.table_hash.clone())
                    .with_context("actual", table_hash),
            ));
        }
        Ok(algebra)
    }
}

/// Serializes a free Bosons algebra to a JSON string.
pub fn to_json<R: Ring>(algebra: &FreeBosons<R>) -> Result<String, LcaError> {
    let snapshot = FreeBosonsSnapshot::capture(algebra)?;
    serde_json::to_string_pretty(&snapshot).map_err(|err| serde_error("json-serialize", err))
}

/// Restores a free Bosons algebra over `ring` from a JSON string.
pub fn from_json<R: Ring>(ring: R, data: &str) -> Result<FreeBosons<R>, LcaError> {
    let snapshot: FreeBosonsSnapshot = from_json_slice(data.as_bytes())?;
    snapshot.restore(ring)
}

/// Serializes a free Bosons algebra into a binary blob.
pub fn to_bytes<R: Ring>(algebra: &FreeBosons<R>) -> Result<Vec<u8>, LcaError> {
    let json = to_json(algebra)?;
    bincode::serialize(&json).map_err(|err| serde_error("bincode-serialize", err))
}

/// Rehydrates a free Bosons algebra over `ring` from a binary blob.
pub fn from_bytes<R: Ring>(ring: R, bytes: &[u8]) -> Result<FreeBosons<R>, LcaError> {
    let json: String =
        bincode::deserialize(bytes).map_err(|err| serde_error("bincode-deserialize", err))?;
    from_json(ring, &json)
}
