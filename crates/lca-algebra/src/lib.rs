#![deny(missing_docs)]
#![doc = "Structure-constant tables, graded Lie conformal algebras and the free Bosons construction."]

/// Free Bosons builder over a symmetric bilinear form.
pub mod free_bosons;
/// Graded algebras from structure constants.
pub mod graded;
mod hash;
/// Configuration loading and runtime ring selection.
pub mod opts;
/// Canonical JSON, snapshots and binary persistence.
pub mod serde;
/// Sparse lambda-bracket tables.
pub mod structure;

pub use crate::free_bosons::{
    FreeBosons, FreeBosonsParams, CENTRAL_LABEL, DEFAULT_PREFIX, PAIRING_WEIGHT,
};
pub use crate::graded::{
    Bracket, FromStructureConstants, GeneratorSpec, GradedLieConformalAlgebra, LinearCombination,
};
pub use crate::hash::stable_hash_string;
pub use crate::opts::{build_free_bosons, AnyFreeBosons, FreeBosonsOpts, RingSpec};
pub use crate::serde::{
    from_bytes, from_json, from_json_slice, to_bytes, to_canonical_json_bytes, to_json,
    FreeBosonsSnapshot,
};
pub use crate::structure::{StructureConstant, StructureTable, Target, WeightMap};
