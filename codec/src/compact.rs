//! Compact integer encoding.
//!
//! Integers are written in one of four size classes, selected by the top two bits
//! of the first ("mode") byte:
//!
//! | Prefix | Class      | Bytes   | Unsigned range          | Signed range                 |
//! |--------|------------|---------|-------------------------|------------------------------|
//! | `00`   | one-byte   | 1       | `[0, 0x40)`             | `[-0x20, 0x20)`              |
//! | `01`   | two-byte   | 2       | `[0x40, 0x4000)`        | `[-0x2000, 0x2000)`          |
//! | `10`   | four-byte  | 4       | `[0x4000, 0x40000000)`  | `[-0x20000000, 0x20000000)`  |
//! | `11`   | multi-byte | `1 + N` | everything else         | everything else              |
//!
//! In the fixed-size classes the value occupies the low six bits of the mode byte
//! followed by big-endian continuation bytes. Signed values reserve bit `0x20` of
//! the mode byte as a sign flag; negative values are produced by XOR-ing the
//! class prefix into the two's-complement bytes and are sign-extended on decode.
//!
//! In the multi-byte class the low six bits of the mode byte hold `N - 4`, where
//! `4 <= N <= 32` is the number of big-endian body bytes that follow.

use crate::{
    bigint::{self, I256, MAX_BYTES, U256},
    ByteCursor, DecodeInput, Decoder, Encoder, Error,
};
use bytes::{BufMut, Bytes, BytesMut};
use num_bigint::BigInt;
use tracing::debug;

const MASK_REST: u8 = 0xc0;
const MASK_MODE: u8 = 0x3f;
const MASK_MODE_NEG: u32 = 0xffff_ffc0;
const SIGN_FLAG: u8 = 0x20;

const ONE_BYTE_PREFIX: u8 = 0x00;
const ONE_BYTE_NEG_PREFIX: u8 = 0xc0;
const TWO_BYTE_PREFIX: u8 = 0x40;
const TWO_BYTE_NEG_PREFIX: u8 = 0x80;
const FOUR_BYTE_PREFIX: u8 = 0x80;
const FOUR_BYTE_NEG_PREFIX: u8 = 0x40;
const MULTI_BYTE_PREFIX: u8 = 0xc0;

/// Smallest number of body bytes in the multi-byte class.
const MIN_MULTI_BYTES: usize = 4;

const U_ONE_BYTE_BOUND: u32 = 0x40;
const U_TWO_BYTE_BOUND: u32 = U_ONE_BYTE_BOUND << 8;
const U_FOUR_BYTE_BOUND: u32 = U_ONE_BYTE_BOUND << 24;

const I_ONE_BYTE_BOUND: i32 = 0x20;
const I_TWO_BYTE_BOUND: i32 = I_ONE_BYTE_BOUND << 8;
const I_FOUR_BYTE_BOUND: i32 = I_ONE_BYTE_BOUND << 24;

/// Size class of a compact integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    OneByte,
    TwoByte,
    FourByte,
    /// Carries the number of body bytes following the mode byte.
    MultiByte(usize),
}

impl Mode {
    /// Returns the class selected by a raw mode byte.
    pub fn from_byte(mode: u8) -> Self {
        match mode & MASK_REST {
            ONE_BYTE_PREFIX => Self::OneByte,
            TWO_BYTE_PREFIX => Self::TwoByte,
            FOUR_BYTE_PREFIX => Self::FourByte,
            _ => Self::MultiByte((mode & MASK_MODE) as usize + MIN_MULTI_BYTES),
        }
    }

    /// Number of bytes following the mode byte.
    pub fn rest_len(self) -> usize {
        match self {
            Self::OneByte => 0,
            Self::TwoByte => 1,
            Self::FourByte => 3,
            Self::MultiByte(len) => len,
        }
    }

    /// Returns true for the one-, two- and four-byte classes.
    pub fn is_fixed(self) -> bool {
        !matches!(self, Self::MultiByte(_))
    }

    fn unsigned(value: u32) -> Self {
        if value < U_ONE_BYTE_BOUND {
            Self::OneByte
        } else if value < U_TWO_BYTE_BOUND {
            Self::TwoByte
        } else if value < U_FOUR_BYTE_BOUND {
            Self::FourByte
        } else {
            Self::MultiByte(MIN_MULTI_BYTES)
        }
    }

    fn signed(value: i32) -> Self {
        let in_bound = |bound: i32| (-bound..bound).contains(&value);
        if in_bound(I_ONE_BYTE_BOUND) {
            Self::OneByte
        } else if in_bound(I_TWO_BYTE_BOUND) {
            Self::TwoByte
        } else if in_bound(I_FOUR_BYTE_BOUND) {
            Self::FourByte
        } else {
            Self::MultiByte(MIN_MULTI_BYTES)
        }
    }

    /// Total encoded length, mode byte included.
    fn encoded_len(self) -> usize {
        1 + self.rest_len()
    }
}

/// A compact integer split into its mode byte and remaining body bytes, prior to
/// interpretation as a signed or unsigned value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecodedCompactInt {
    mode: u8,
    rest: Bytes,
}

impl DecodedCompactInt {
    /// Pairs a mode byte with its body, checking that the body length matches the
    /// length implied by the mode.
    pub fn new(mode: u8, rest: impl Into<Bytes>) -> Result<Self, Error> {
        let rest = rest.into();
        if rest.len() != Mode::from_byte(mode).rest_len() {
            return Err(Error::MalformedInteger("body length does not match mode"));
        }
        Ok(Self { mode, rest })
    }

    /// Splits a buffer produced by one of the compact encoders.
    fn from_encoded(encoded: Bytes) -> Self {
        Self {
            mode: encoded[0],
            rest: encoded.slice(1..),
        }
    }

    /// The raw mode byte.
    pub fn mode(&self) -> u8 {
        self.mode
    }

    /// The bytes following the mode byte.
    pub fn rest(&self) -> &Bytes {
        &self.rest
    }

    /// The size class selected by the mode byte.
    pub fn mode_class(&self) -> Mode {
        Mode::from_byte(self.mode)
    }

    /// Total encoded length, mode byte included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }
}

fn write_raw(value: &DecodedCompactInt, buf: &mut impl BufMut) {
    buf.put_u8(value.mode);
    buf.put_slice(&value.rest);
}

fn read_raw(cursor: &mut ByteCursor) -> Result<DecodedCompactInt, Error> {
    let mode = cursor.read_u8()?;
    let rest = cursor.read_bytes(Mode::from_byte(mode).rest_len())?;
    Ok(DecodedCompactInt { mode, rest })
}

/// Reassembles a fixed-size value from its (already sign-extended or masked) leading
/// bits and its continuation bytes.
fn assemble_fixed(head: u32, class: Mode, rest: &[u8]) -> Result<u32, Error> {
    match (class, rest) {
        (Mode::OneByte, []) => Ok(head),
        (Mode::TwoByte, [b1]) => Ok((head << 8) | u32::from(*b1)),
        (Mode::FourByte, [b1, b2, b3]) => Ok((head << 24)
            | (u32::from(*b1) << 16)
            | (u32::from(*b2) << 8)
            | u32::from(*b3)),
        _ => Err(Error::MalformedInteger("body length does not match mode")),
    }
}

/// Reads the body of a multi-byte value that must fit in 32 bits.
fn multi_byte_u32(rest: &[u8]) -> Result<[u8; 4], Error> {
    rest.try_into().map_err(|_| {
        debug!(len = rest.len(), "multi-byte body is not 4 bytes");
        Error::MalformedInteger("expected 4-byte body for 32-bit integer")
    })
}

/// Checks that a multi-byte body fits a 256-bit integer.
fn check_multi_byte_body(rest: &[u8]) -> Result<(), Error> {
    if rest.len() > MAX_BYTES {
        debug!(len = rest.len(), "multi-byte body exceeds 32 bytes");
        return Err(Error::MalformedInteger("multi-byte body exceeds 32 bytes"));
    }
    Ok(())
}

fn multi_byte_header(body_len: usize) -> u8 {
    debug_assert!((MIN_MULTI_BYTES..=MAX_BYTES).contains(&body_len));
    MULTI_BYTE_PREFIX | (body_len - MIN_MULTI_BYTES) as u8
}

/// Codec for compact unsigned integers.
///
/// Implements [Encoder] and [Decoder] for [DecodedCompactInt], `u32` and [U256].
#[derive(Clone, Copy, Debug, Default)]
pub struct CompactUnsignedIntCodec;

impl CompactUnsignedIntCodec {
    pub fn encode_u32(&self, value: u32) -> BytesMut {
        self.encode(&value)
    }

    pub fn encode_u256(&self, value: &U256) -> BytesMut {
        self.encode(value)
    }

    pub fn decode_u32(&self, input: impl DecodeInput) -> Result<u32, Error> {
        <Self as Decoder<u32>>::decode(self, input)
    }

    pub fn decode_u256(&self, input: impl DecodeInput) -> Result<U256, Error> {
        <Self as Decoder<U256>>::decode(self, input)
    }

    /// Interprets a decoded compact integer as a `u32`.
    ///
    /// Multi-byte values must carry exactly four body bytes.
    pub fn to_u32(&self, value: &DecodedCompactInt) -> Result<u32, Error> {
        match value.mode_class() {
            Mode::MultiByte(_) => Ok(u32::from_be_bytes(multi_byte_u32(&value.rest)?)),
            class => assemble_fixed(u32::from(value.mode & MASK_MODE), class, &value.rest),
        }
    }

    /// Interprets a decoded compact integer as a [U256].
    pub fn to_u256(&self, value: &DecodedCompactInt) -> Result<U256, Error> {
        if value.mode_class().is_fixed() {
            return self.to_u32(value).map(U256::from);
        }
        check_multi_byte_body(&value.rest)?;
        U256::try_from(bigint::decode(&value.rest, false))
    }

    pub fn from_u32(&self, value: u32) -> DecodedCompactInt {
        DecodedCompactInt::from_encoded(self.encode_u32(value).freeze())
    }

    pub fn from_u256(&self, value: &U256) -> DecodedCompactInt {
        DecodedCompactInt::from_encoded(self.encode_u256(value).freeze())
    }
}

/// Returns the multi-byte body of `value`: its big-endian bytes with a single
/// leading zero (the sign byte of the two's-complement form) removed.
fn u256_body(value: &U256) -> Vec<u8> {
    let mut bytes = bigint::encode(&BigInt::from(value.as_biguint().clone()));
    if let [0, ..] = bytes.as_slice() {
        bytes.remove(0);
    }
    bytes
}

/// Returns the value if it fits one of the fixed-size unsigned classes.
fn u256_as_fixed(value: &U256) -> Option<u32> {
    value.to_u32().filter(|v| *v < U_FOUR_BYTE_BOUND)
}

impl Encoder<DecodedCompactInt> for CompactUnsignedIntCodec {
    fn write(&self, value: &DecodedCompactInt, buf: &mut impl BufMut) {
        write_raw(value, buf);
    }

    fn encode_size(&self, value: &DecodedCompactInt) -> usize {
        value.len()
    }
}

impl Decoder<DecodedCompactInt> for CompactUnsignedIntCodec {
    fn read(&self, cursor: &mut ByteCursor) -> Result<DecodedCompactInt, Error> {
        read_raw(cursor)
    }
}

impl Encoder<u32> for CompactUnsignedIntCodec {
    fn write(&self, value: &u32, buf: &mut impl BufMut) {
        let value = *value;
        match Mode::unsigned(value) {
            Mode::OneByte => buf.put_u8(ONE_BYTE_PREFIX | value as u8),
            Mode::TwoByte => buf.put_u16((u16::from(TWO_BYTE_PREFIX) << 8) | value as u16),
            Mode::FourByte => buf.put_u32((u32::from(FOUR_BYTE_PREFIX) << 24) | value),
            Mode::MultiByte(_) => {
                buf.put_u8(MULTI_BYTE_PREFIX);
                buf.put_u32(value);
            }
        }
    }

    fn encode_size(&self, value: &u32) -> usize {
        Mode::unsigned(*value).encoded_len()
    }
}

impl Decoder<u32> for CompactUnsignedIntCodec {
    fn read(&self, cursor: &mut ByteCursor) -> Result<u32, Error> {
        self.to_u32(&read_raw(cursor)?)
    }
}

impl Encoder<U256> for CompactUnsignedIntCodec {
    fn write(&self, value: &U256, buf: &mut impl BufMut) {
        if let Some(small) = u256_as_fixed(value) {
            return self.write(&small, buf);
        }
        let body = u256_body(value);
        buf.put_u8(multi_byte_header(body.len()));
        buf.put_slice(&body);
    }

    fn encode_size(&self, value: &U256) -> usize {
        match u256_as_fixed(value) {
            Some(small) => self.encode_size(&small),
            None => 1 + value.as_biguint().bits().div_ceil(8) as usize,
        }
    }
}

impl Decoder<U256> for CompactUnsignedIntCodec {
    fn read(&self, cursor: &mut ByteCursor) -> Result<U256, Error> {
        self.to_u256(&read_raw(cursor)?)
    }
}

/// Codec for compact signed integers.
///
/// Implements [Encoder] and [Decoder] for [DecodedCompactInt], `i32` and [I256].
#[derive(Clone, Copy, Debug, Default)]
pub struct CompactSignedIntCodec;

impl CompactSignedIntCodec {
    pub fn encode_i32(&self, value: i32) -> BytesMut {
        self.encode(&value)
    }

    pub fn encode_i256(&self, value: &I256) -> BytesMut {
        self.encode(value)
    }

    pub fn decode_i32(&self, input: impl DecodeInput) -> Result<i32, Error> {
        <Self as Decoder<i32>>::decode(self, input)
    }

    pub fn decode_i256(&self, input: impl DecodeInput) -> Result<I256, Error> {
        <Self as Decoder<I256>>::decode(self, input)
    }

    /// Interprets a decoded compact integer as an `i32`.
    ///
    /// Fixed-size values are sign-extended when the sign flag is set. Multi-byte
    /// values must carry exactly four body bytes.
    pub fn to_i32(&self, value: &DecodedCompactInt) -> Result<i32, Error> {
        let class = value.mode_class();
        if !class.is_fixed() {
            return Ok(i32::from_be_bytes(multi_byte_u32(&value.rest)?));
        }
        let head = if value.mode & SIGN_FLAG == 0 {
            u32::from(value.mode & MASK_MODE)
        } else {
            u32::from(value.mode) | MASK_MODE_NEG
        };
        assemble_fixed(head, class, &value.rest).map(|v| v as i32)
    }

    /// Interprets a decoded compact integer as an [I256].
    pub fn to_i256(&self, value: &DecodedCompactInt) -> Result<I256, Error> {
        if value.mode_class().is_fixed() {
            return self.to_i32(value).map(I256::from);
        }
        check_multi_byte_body(&value.rest)?;
        I256::try_from(bigint::decode(&value.rest, true))
    }

    pub fn from_i32(&self, value: i32) -> DecodedCompactInt {
        DecodedCompactInt::from_encoded(self.encode_i32(value).freeze())
    }

    pub fn from_i256(&self, value: &I256) -> DecodedCompactInt {
        DecodedCompactInt::from_encoded(self.encode_i256(value).freeze())
    }
}

/// Returns the value if it fits one of the fixed-size signed classes.
fn i256_as_fixed(value: &I256) -> Option<i32> {
    value
        .to_i32()
        .filter(|v| (-I_FOUR_BYTE_BOUND..I_FOUR_BYTE_BOUND).contains(v))
}

impl Encoder<DecodedCompactInt> for CompactSignedIntCodec {
    fn write(&self, value: &DecodedCompactInt, buf: &mut impl BufMut) {
        write_raw(value, buf);
    }

    fn encode_size(&self, value: &DecodedCompactInt) -> usize {
        value.len()
    }
}

impl Decoder<DecodedCompactInt> for CompactSignedIntCodec {
    fn read(&self, cursor: &mut ByteCursor) -> Result<DecodedCompactInt, Error> {
        read_raw(cursor)
    }
}

impl Encoder<i32> for CompactSignedIntCodec {
    fn write(&self, value: &i32, buf: &mut impl BufMut) {
        let value = *value;
        let (one, two, four) = if value >= 0 {
            (ONE_BYTE_PREFIX, TWO_BYTE_PREFIX, FOUR_BYTE_PREFIX)
        } else {
            (ONE_BYTE_NEG_PREFIX, TWO_BYTE_NEG_PREFIX, FOUR_BYTE_NEG_PREFIX)
        };
        // Non-negative values have zeroed prefix bits, so XOR sets the tag. Negative
        // values have those bits set, so XOR with the negative prefix leaves the tag.
        match Mode::signed(value) {
            Mode::OneByte => buf.put_u8(value as u8 ^ one),
            Mode::TwoByte => buf.put_u16(value as u16 ^ (u16::from(two) << 8)),
            Mode::FourByte => buf.put_u32(value as u32 ^ (u32::from(four) << 24)),
            Mode::MultiByte(_) => {
                buf.put_u8(MULTI_BYTE_PREFIX);
                buf.put_i32(value);
            }
        }
    }

    fn encode_size(&self, value: &i32) -> usize {
        Mode::signed(*value).encoded_len()
    }
}

impl Decoder<i32> for CompactSignedIntCodec {
    fn read(&self, cursor: &mut ByteCursor) -> Result<i32, Error> {
        self.to_i32(&read_raw(cursor)?)
    }
}

impl Encoder<I256> for CompactSignedIntCodec {
    fn write(&self, value: &I256, buf: &mut impl BufMut) {
        if let Some(small) = i256_as_fixed(value) {
            return self.write(&small, buf);
        }
        let body = bigint::encode(value.as_bigint());
        buf.put_u8(multi_byte_header(body.len()));
        buf.put_slice(&body);
    }

    fn encode_size(&self, value: &I256) -> usize {
        match i256_as_fixed(value) {
            Some(small) => self.encode_size(&small),
            None => 1 + bigint::encode(value.as_bigint()).len(),
        }
    }
}

impl Decoder<I256> for CompactSignedIntCodec {
    fn read(&self, cursor: &mut ByteCursor) -> Result<I256, Error> {
        self.to_i256(&read_raw(cursor)?)
    }
}
