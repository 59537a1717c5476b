//! Core codec traits.
//!
//! Codecs are values rather than type-level implementations: a single type
//! (`Vec<u32>`, say) has several wire representations depending on context
//! (counted or fixed-size, compact or fixed-width elements). An [Encoder] or
//! [Decoder] therefore describes *how* to serialize a `T`, and composite codecs
//! such as [crate::Vector] are parameterised by the codec of their elements.

use crate::{ByteCursor, DecodeInput, Error};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

/// Writes values of type `T` to a buffer.
pub trait Encoder<T> {
    /// Encodes `value` by writing to `buf`.
    ///
    /// Implementations should panic if the buffer doesn't have enough capacity.
    fn write(&self, value: &T, buf: &mut impl BufMut);

    /// Returns the encoded length of `value`.
    ///
    /// This method MUST return the exact number of bytes that will be written by `write()`.
    fn encode_size(&self, value: &T) -> usize;

    /// Encodes `value` to a `BytesMut` buffer.
    ///
    /// Panics if the `write` implementation does not write the expected number of bytes.
    fn encode(&self, value: &T) -> BytesMut {
        let len = self.encode_size(value);
        let mut buffer = BytesMut::with_capacity(len);
        self.write(value, &mut buffer);
        assert_eq!(buffer.len(), len, "write() did not write expected bytes");
        buffer
    }
}

/// Reads values of type `T` from a [ByteCursor].
pub trait Decoder<T> {
    /// Reads a value starting at the cursor's position, advancing the cursor past
    /// exactly the bytes consumed.
    ///
    /// Returns an error if the input is malformed or ends early.
    fn read(&self, cursor: &mut ByteCursor) -> Result<T, Error>;

    /// Decodes a value from `input`, ensuring the input is fully consumed.
    ///
    /// Strings are treated as hex, byte buffers as raw bytes. See [DecodeInput].
    fn decode(&self, input: impl DecodeInput) -> Result<T, Error> {
        let mut cursor = input.into_cursor()?;
        let value = self.read(&mut cursor)?;

        let remaining = cursor.remaining();
        if remaining > 0 {
            debug!(remaining, position = cursor.position(), "unconsumed input");
            return Err(Error::ExtraData(remaining));
        }
        Ok(value)
    }

    /// Decodes a value from a hex string (optionally `0x`-prefixed), ensuring the
    /// input is fully consumed.
    fn decode_hex(&self, hex: &str) -> Result<T, Error> {
        self.decode(hex)
    }
}

/// A pair of [Encoder] and [Decoder] for the same type.
pub trait Codec<T>: Encoder<T> + Decoder<T> {}

// Automatically implement `Codec` for anything that both encodes and decodes `T`.
impl<T, C: Encoder<T> + Decoder<T>> Codec<T> for C {}

/// Concatenates byte sequences into a single contiguous buffer.
pub fn merge<B: AsRef<[u8]>>(parts: &[B]) -> Bytes {
    let len = parts.iter().map(|part| part.as_ref().len()).sum();
    let mut merged = BytesMut::with_capacity(len);
    for part in parts {
        merged.put_slice(part.as_ref());
    }
    merged.freeze()
}
