//! Ground rings supplying the scalar coefficients of an algebra.
//!
//! Callers describe scalars as arbitrary precision rationals. A ring decides
//! which of them it contains and converts them into its own element type;
//! beyond that the builder only needs `zero`, `one` and a zero test.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LcaError};

/// Rational scalar used to describe matrix entries independently of the ring.
pub type Scalar = BigRational;

/// Bounds required from the elements of a [`Ring`].
pub trait RingElement:
    Clone + Debug + Display + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> RingElement for T where
    T: Clone + Debug + Display + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Ground ring contract: a name, the two constants and membership by coercion.
pub trait Ring: Clone + Debug + PartialEq + Send + Sync {
    /// Concrete element representation.
    type Element: RingElement;

    /// Human readable ring name (e.g. `Rational Field`).
    fn name(&self) -> String;

    /// Additive identity.
    fn zero(&self) -> Self::Element;

    /// Multiplicative identity.
    fn one(&self) -> Self::Element;

    /// Returns true when the element is the additive identity.
    fn is_zero(&self, value: &Self::Element) -> bool;

    /// Converts a rational scalar into the ring, failing when it is not a member.
    fn coerce(&self, value: &Scalar) -> Result<Self::Element, LcaError>;

    /// Canonical rational lift of an element; `coerce(to_scalar(x)) == x`.
    fn to_scalar(&self, value: &Self::Element) -> Scalar;

    /// Membership test, defined as successful coercion.
    fn contains(&self, value: &Scalar) -> bool {
        self.coerce(value).is_ok()
    }
}

fn not_a_member(ring: &str, value: &Scalar) -> LcaError {
    LcaError::Ring(
        ErrorInfo::new("not-a-member", format!("{value} is not an element of {ring}"))
            .with_context("ring", ring)
            .with_context("value", value.to_string()),
    )
}

/// Parses a scalar written as an integer (`-3`) or a fraction (`1/2`).
pub fn parse_scalar(text: &str) -> Result<Scalar, LcaError> {
    let trimmed = text.trim();
    BigRational::from_str(trimmed).map_err(|err| {
        LcaError::Ring(
            ErrorInfo::new("scalar-parse", format!("cannot parse '{trimmed}' as a rational: {err}"))
                .with_hint("use integers like -3 or fractions like 1/2"),
        )
    })
}

/// Builds a scalar from an integer.
pub fn scalar(value: i64) -> Scalar {
    BigRational::from_integer(BigInt::from(value))
}

/// The ring of rational integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntegerRing;

impl Ring for IntegerRing {
    type Element = BigInt;

    fn name(&self) -> String {
        "Integer Ring".to_string()
    }

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn one(&self) -> BigInt {
        BigInt::one()
    }

    fn is_zero(&self, value: &BigInt) -> bool {
        value.is_zero()
    }

    fn coerce(&self, value: &Scalar) -> Result<BigInt, LcaError> {
        if value.is_integer() {
            Ok(value.to_integer())
        } else {
            Err(not_a_member(&self.name(), value))
        }
    }

    fn to_scalar(&self, value: &BigInt) -> Scalar {
        BigRational::from_integer(value.clone())
    }
}

/// The field of rational numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RationalField;

impl Ring for RationalField {
    type Element = BigRational;

    fn name(&self) -> String {
        "Rational Field".to_string()
    }

    fn zero(&self) -> BigRational {
        BigRational::zero()
    }

    fn one(&self) -> BigRational {
        BigRational::one()
    }

    fn is_zero(&self, value: &BigRational) -> bool {
        value.is_zero()
    }

    fn coerce(&self, value: &Scalar) -> Result<BigRational, LcaError> {
        Ok(value.clone())
    }

    fn to_scalar(&self, value: &BigRational) -> Scalar {
        value.clone()
    }
}

/// The ring `Z/mZ`; elements are canonical residues in `0..m`.
///
/// Serialized as its modulus; deserialization applies the same check as [`IntegerModRing::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BigInt", into = "BigInt")]
pub struct IntegerModRing {
    modulus: BigInt,
}

impl IntegerModRing {
    /// Creates `Z/mZ`. The modulus must be at least 2.
    pub fn new(modulus: impl Into<BigInt>) -> Result<Self, LcaError> {
        let modulus = modulus.into();
        if modulus < BigInt::from(2) {
            return Err(LcaError::Ring(
                ErrorInfo::new("invalid-modulus", "the modulus must be at least 2")
                    .with_context("modulus", modulus.to_string()),
            ));
        }
        Ok(Self { modulus })
    }

    /// Returns the modulus `m`.
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    fn reduce(&self, value: &BigInt) -> BigInt {
        value.mod_floor(&self.modulus)
    }
}

impl TryFrom<BigInt> for IntegerModRing {
    type Error = LcaError;

    fn try_from(modulus: BigInt) -> Result<Self, Self::Error> {
        Self::new(modulus)
    }
}

impl From<IntegerModRing> for BigInt {
    fn from(ring: IntegerModRing) -> Self {
        ring.modulus
    }
}

impl Ring for IntegerModRing {
    type Element = BigInt;

    fn name(&self) -> String {
        format!("Ring of integers modulo {}", self.modulus)
    }

    fn zero(&self) -> BigInt {
        BigInt::zero()
    }

    fn one(&self) -> BigInt {
        BigInt::one()
    }

    fn is_zero(&self, value: &BigInt) -> bool {
        self.reduce(value).is_zero()
    }

    fn coerce(&self, value: &Scalar) -> Result<BigInt, LcaError> {
        let numer = self.reduce(value.numer());
        let denom = value.denom().abs();
        if denom.is_one() {
            return Ok(numer);
        }
        let egcd = denom.extended_gcd(&self.modulus);
        if !egcd.gcd.is_one() {
            return Err(not_a_member(&self.name(), value));
        }
        Ok(self.reduce(&(numer * egcd.x)))
    }

    fn to_scalar(&self, value: &BigInt) -> Scalar {
        BigRational::from_integer(self.reduce(value))
    }
}

impl Display for IntegerRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Display for RationalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Display for IntegerModRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(p: i64, q: i64) -> Scalar {
        BigRational::new(BigInt::from(p), BigInt::from(q))
    }

    #[test]
    fn integers_reject_fractions() {
        assert!(IntegerRing.contains(&scalar(-4)));
        assert!(!IntegerRing.contains(&frac(1, 2)));
    }

    #[test]
    fn mod_ring_inverts_denominators() {
        let z5 = IntegerModRing::new(5).unwrap();
        assert_eq!(z5.coerce(&frac(1, 2)).unwrap(), BigInt::from(3));
        assert_eq!(z5.coerce(&scalar(-1)).unwrap(), BigInt::from(4));
        let z4 = IntegerModRing::new(4).unwrap();
        assert!(!z4.contains(&frac(1, 2)));
    }

    #[test]
    fn modulus_below_two_is_rejected() {
        assert!(IntegerModRing::new(1).is_err());
    }

    #[test]
    fn deserialization_checks_the_modulus() {
        let z7 = IntegerModRing::new(7).unwrap();
        let json = serde_json::to_string(&z7).unwrap();
        assert_eq!(serde_json::from_str::<IntegerModRing>(&json).unwrap(), z7);

        for bad in [0, 1, -3] {
            let json = serde_json::to_string(&BigInt::from(bad)).unwrap();
            let err = serde_json::from_str::<IntegerModRing>(&json).unwrap_err();
            assert!(err.to_string().contains("modulus"));
        }
    }
}
