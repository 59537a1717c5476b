//! Length-prefixed byte strings.
//!
//! A byte string is its length as a compact unsigned integer followed by the raw
//! bytes. For portability the length must fit within a [u32].

use crate::{
    ByteCursor, CompactUnsignedIntCodec, DecodeInput, DecodedCompactInt, Decoder, Encoder, Error,
    RangeCfg,
};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

/// A byte sequence paired with its decoded length prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByteString {
    length: DecodedCompactInt,
    value: Bytes,
}

impl ByteString {
    /// Wraps `value`, computing its length prefix.
    ///
    /// Panics if `value` is longer than [u32::MAX] bytes.
    pub fn new(value: impl Into<Bytes>) -> Self {
        let value = value.into();
        let len = u32::try_from(value.len()).expect("ByteString length exceeds u32");
        Self {
            length: CompactUnsignedIntCodec.from_u32(len),
            value,
        }
    }

    /// Pairs an existing length prefix with `value`, checking that they agree.
    pub fn from_parts(length: DecodedCompactInt, value: impl Into<Bytes>) -> Result<Self, Error> {
        let value = value.into();
        let expected = CompactUnsignedIntCodec.to_u32(&length)?;
        if usize::try_from(expected).ok() != Some(value.len()) {
            return Err(Error::InvalidLength(value.len()));
        }
        Ok(Self { length, value })
    }

    pub fn length(&self) -> &DecodedCompactInt {
        &self.length
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn into_value(self) -> Bytes {
        self.value
    }
}

/// Codec for length-prefixed byte strings.
///
/// Implements [Encoder] and [Decoder] for [ByteString] and for bare [Bytes].
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteStringCodec {
    limit: RangeCfg,
}

impl ByteStringCodec {
    /// Creates a codec accepting byte strings of any length.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the lengths accepted when decoding.
    pub fn with_limit(mut self, limit: impl Into<RangeCfg>) -> Self {
        self.limit = limit.into();
        self
    }

    /// Encodes raw bytes, producing the same output as encoding `ByteString::new(value)`.
    pub fn encode_bytes(&self, value: &[u8]) -> BytesMut {
        let len = u32::try_from(value.len()).expect("ByteString length exceeds u32");
        let mut buffer =
            BytesMut::with_capacity(CompactUnsignedIntCodec.encode_size(&len) + value.len());
        CompactUnsignedIntCodec.write(&len, &mut buffer);
        buffer.put_slice(value);
        buffer
    }

    /// Decodes a byte string, returning only its bytes.
    pub fn decode_bytes(&self, input: impl DecodeInput) -> Result<Bytes, Error> {
        <Self as Decoder<Bytes>>::decode(self, input)
    }
}

impl Encoder<ByteString> for ByteStringCodec {
    fn write(&self, value: &ByteString, buf: &mut impl BufMut) {
        CompactUnsignedIntCodec.write(&value.length, buf);
        buf.put_slice(&value.value);
    }

    fn encode_size(&self, value: &ByteString) -> usize {
        value.length.len() + value.value.len()
    }
}

impl Decoder<ByteString> for ByteStringCodec {
    fn read(&self, cursor: &mut ByteCursor) -> Result<ByteString, Error> {
        let length: DecodedCompactInt = cursor.read_with(&CompactUnsignedIntCodec)?;
        let len = usize::try_from(CompactUnsignedIntCodec.to_u32(&length)?)
            .map_err(|_| Error::OutOfRange("usize"))?;
        if let Err(err) = self.limit.check(len) {
            debug!(len, limit = ?self.limit, "byte string length rejected");
            return Err(err);
        }
        let value = cursor.read_bytes(len)?;
        Ok(ByteString { length, value })
    }
}

impl Encoder<Bytes> for ByteStringCodec {
    fn write(&self, value: &Bytes, buf: &mut impl BufMut) {
        let len = u32::try_from(value.len()).expect("ByteString length exceeds u32");
        CompactUnsignedIntCodec.write(&len, buf);
        buf.put_slice(value);
    }

    fn encode_size(&self, value: &Bytes) -> usize {
        let len = u32::try_from(value.len()).expect("ByteString length exceeds u32");
        CompactUnsignedIntCodec.encode_size(&len) + value.len()
    }
}

impl Decoder<Bytes> for ByteStringCodec {
    fn read(&self, cursor: &mut ByteCursor) -> Result<Bytes, Error> {
        <Self as Decoder<ByteString>>::read(self, cursor).map(ByteString::into_value)
    }
}
