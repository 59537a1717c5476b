//! Arbitrary-precision integers and their big-endian byte form.
//!
//! [encode] and [decode] convert between [BigInt] and the minimal big-endian
//! two's-complement representation. The compact integer codec uses them for
//! values that do not fit its fixed-size classes.
//!
//! [U256] and [I256] are the 256-bit domain types carried over the wire. They
//! wrap `num-bigint` values and reject anything outside their range on
//! construction, so encoding one can never produce a body longer than 32 bytes.

use crate::Error;
use core::fmt;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, ToPrimitive, Zero};

/// Maximum number of body bytes carried by a 256-bit integer.
pub const MAX_BYTES: usize = 32;

const BITS: u64 = 256;

/// Encodes `value` as minimal big-endian two's complement.
///
/// Non-negative values whose top bit would otherwise be set gain a leading `0x00`.
pub fn encode(value: &BigInt) -> Vec<u8> {
    value.to_signed_bytes_be()
}

/// Decodes big-endian `bytes`, as two's complement if `signed` and as a magnitude
/// otherwise.
pub fn decode(bytes: &[u8], signed: bool) -> BigInt {
    if signed {
        BigInt::from_signed_bytes_be(bytes)
    } else {
        BigInt::from_bytes_be(Sign::Plus, bytes)
    }
}

/// An unsigned integer in `[0, 2^256)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U256(BigUint);

impl U256 {
    /// Returns `value` if it fits in 256 bits.
    pub fn new(value: BigUint) -> Result<Self, Error> {
        if value.bits() > BITS {
            return Err(Error::OutOfRange("U256"));
        }
        Ok(Self(value))
    }

    /// The value zero.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// The largest value, `2^256 - 1`.
    pub fn max() -> Self {
        Self((BigUint::one() << BITS) - 1u32)
    }

    /// Parses a base-10 string.
    pub fn from_dec_str(s: &str) -> Result<Self, Error> {
        let value =
            BigUint::parse_bytes(s.as_bytes(), 10).ok_or(Error::OutOfRange("U256"))?;
        Self::new(value)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Returns the value as a `u32` if it fits.
    pub fn to_u32(&self) -> Option<u32> {
        self.0.to_u32()
    }
}

macro_rules! impl_u256_from {
    ($($type:ty),*) => {
        $(
            impl From<$type> for U256 {
                fn from(value: $type) -> Self {
                    Self(BigUint::from(value))
                }
            }
        )*
    };
}
impl_u256_from!(u8, u16, u32, u64, u128);

impl TryFrom<BigUint> for U256 {
    type Error = Error;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<BigInt> for U256 {
    type Error = Error;

    fn try_from(value: BigInt) -> Result<Self, Self::Error> {
        let value = value.to_biguint().ok_or(Error::OutOfRange("U256"))?;
        Self::new(value)
    }
}

impl From<U256> for BigUint {
    fn from(value: U256) -> Self {
        value.0
    }
}

impl From<U256> for BigInt {
    fn from(value: U256) -> Self {
        BigInt::from(value.0)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A signed integer in `[-2^255, 2^255)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct I256(BigInt);

impl I256 {
    /// Returns `value` if it fits in 256 bits of two's complement.
    pub fn new(value: BigInt) -> Result<Self, Error> {
        let bits = match value.sign() {
            // -2^255 has a magnitude of 2^255 but still fits
            Sign::Minus => (value.magnitude() - 1u32).bits(),
            _ => value.bits(),
        };
        if bits > BITS - 1 {
            return Err(Error::OutOfRange("I256"));
        }
        Ok(Self(value))
    }

    /// The value zero.
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// The smallest value, `-2^255`.
    pub fn min() -> Self {
        Self(-(BigInt::one() << (BITS - 1)))
    }

    /// The largest value, `2^255 - 1`.
    pub fn max() -> Self {
        Self((BigInt::one() << (BITS - 1)) - 1i32)
    }

    /// Parses a base-10 string, with an optional leading `-`.
    pub fn from_dec_str(s: &str) -> Result<Self, Error> {
        let value = BigInt::parse_bytes(s.as_bytes(), 10).ok_or(Error::OutOfRange("I256"))?;
        Self::new(value)
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_inner(self) -> BigInt {
        self.0
    }

    /// Returns the value as an `i32` if it fits.
    pub fn to_i32(&self) -> Option<i32> {
        self.0.to_i32()
    }
}

macro_rules! impl_i256_from {
    ($($type:ty),*) => {
        $(
            impl From<$type> for I256 {
                fn from(value: $type) -> Self {
                    Self(BigInt::from(value))
                }
            }
        )*
    };
}
impl_i256_from!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl TryFrom<BigInt> for I256 {
    type Error = Error;

    fn try_from(value: BigInt) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<I256> for BigInt {
    fn from(value: I256) -> Self {
        value.0
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(&BigInt::from(0)), vec![0x00]);
        assert_eq!(encode(&BigInt::from(127)), vec![0x7f]);
        assert_eq!(encode(&BigInt::from(128)), vec![0x00, 0x80]);
        assert_eq!(encode(&BigInt::from(-1)), vec![0xff]);
        assert_eq!(encode(&BigInt::from(-128)), vec![0x80]);
        assert_eq!(encode(&BigInt::from(-129)), vec![0xff, 0x7f]);
        assert_eq!(
            encode(&BigInt::from(0x4000_0000u32)),
            vec![0x40, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(&[], false), BigInt::from(0));
        assert_eq!(decode(&[0xff], false), BigInt::from(255));
        assert_eq!(decode(&[0xff], true), BigInt::from(-1));
        assert_eq!(decode(&[0x00, 0x80], true), BigInt::from(128));
        assert_eq!(decode(&[0xff, 0x7f], true), BigInt::from(-129));
    }

    #[test]
    fn test_u256_range() {
        assert_eq!(U256::max().as_biguint().bits(), 256);
        let too_big = BigUint::one() << 256u32;
        assert_eq!(U256::new(too_big), Err(Error::OutOfRange("U256")));
        assert_eq!(
            U256::try_from(BigInt::from(-1)),
            Err(Error::OutOfRange("U256"))
        );
        assert_eq!(U256::from(7u8).to_u32(), Some(7));
        assert_eq!(U256::max().to_u32(), None);
    }

    #[test]
    fn test_i256_range() {
        assert!(I256::new(I256::min().into_inner()).is_ok());
        assert!(I256::new(I256::max().into_inner()).is_ok());
        assert_eq!(
            I256::new(I256::min().into_inner() - 1i32),
            Err(Error::OutOfRange("I256"))
        );
        assert_eq!(
            I256::new(I256::max().into_inner() + 1i32),
            Err(Error::OutOfRange("I256"))
        );
        assert_eq!(encode(I256::min().as_bigint()).len(), MAX_BYTES);
        assert_eq!(encode(I256::max().as_bigint()).len(), MAX_BYTES);
    }

    #[test]
    fn test_from_dec_str() {
        assert_eq!(U256::from_dec_str("42").unwrap(), U256::from(42u32));
        assert_eq!(I256::from_dec_str("-42").unwrap(), I256::from(-42));
        assert!(U256::from_dec_str("-1").is_err());
        assert!(U256::from_dec_str("abc").is_err());
        assert_eq!(
            U256::from_dec_str(
                "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            )
            .unwrap(),
            U256::max()
        );
        assert_eq!(U256::max().to_string().len(), 78);
    }
}
