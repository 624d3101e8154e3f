#![deny(missing_docs)]
#![doc = "Core error model, ground rings, matrices and generator naming for the LCA workspace."]

pub mod errors;
pub mod matrix;
pub mod names;
pub mod provenance;
pub mod ring;

pub use errors::{ErrorInfo, LcaError};
pub use matrix::{Matrix, MatrixSpace};
pub use names::{standardize_names_index_set, IndexSet, Names};
pub use provenance::{BuildProvenance, SchemaVersion};
pub use ring::{
    parse_scalar, scalar, IntegerModRing, IntegerRing, RationalField, Ring, RingElement, Scalar,
};
