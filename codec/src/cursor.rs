//! Position-tracking reader over an immutable byte buffer.
//!
//! A [ByteCursor] is created for each top-level decode and handed by mutable
//! reference to every nested [Decoder]. Composite decoders rely on the cursor's
//! position to delimit their elements, so a decoder must advance the cursor by
//! exactly the number of bytes it consumed.
//!
//! Reads never copy: [ByteCursor::read_bytes] returns a slice of the shared
//! buffer. Every read checks bounds first and fails with
//! [Error::TruncatedInput] rather than panicking.

use crate::{util, Decoder, Error};
use bytes::{Buf, Bytes, BytesMut};

/// A byte buffer plus the offset of the next unread byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteCursor {
    buffer: Bytes,
    position: usize,
}

impl ByteCursor {
    /// Creates a cursor positioned at the start of `buffer`.
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self {
            buffer: buffer.into(),
            position: 0,
        }
    }

    /// Creates a cursor over the bytes of a hex string.
    ///
    /// See [util::from_hex] for the accepted formats.
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        Ok(Self::new(util::from_hex(hex)?))
    }

    /// The full underlying buffer, including bytes already consumed.
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Returns true if every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns an error if fewer than `needed` bytes remain.
    #[inline]
    pub fn ensure(&self, needed: usize) -> Result<(), Error> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(Error::TruncatedInput { needed, remaining });
        }
        Ok(())
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.ensure(1)?;
        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(byte)
    }

    /// Reads `len` bytes as a zero-copy slice of the underlying buffer.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes, Error> {
        self.ensure(len)?;
        let start = self.position;
        self.position += len;
        Ok(self.buffer.slice(start..self.position))
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        self.ensure(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(&self.buffer[self.position..self.position + N]);
        self.position += N;
        Ok(array)
    }

    /// Reads a value with `decoder`, continuing from the current position.
    pub fn read_with<T>(&mut self, decoder: &impl Decoder<T>) -> Result<T, Error> {
        decoder.read(self)
    }
}

impl From<Bytes> for ByteCursor {
    fn from(buffer: Bytes) -> Self {
        Self::new(buffer)
    }
}

impl From<Vec<u8>> for ByteCursor {
    fn from(buffer: Vec<u8>) -> Self {
        Self::new(buffer)
    }
}

impl From<&'static [u8]> for ByteCursor {
    fn from(buffer: &'static [u8]) -> Self {
        Self::new(buffer)
    }
}

/// Sources a top-level decode can read from.
///
/// Byte buffers are read as-is. Strings are parsed as hex first (see
/// [util::from_hex]). A [ByteCursor] is read from its current position.
pub trait DecodeInput {
    /// Converts the input into a cursor positioned at the first byte to decode.
    fn into_cursor(self) -> Result<ByteCursor, Error>;
}

impl DecodeInput for ByteCursor {
    fn into_cursor(self) -> Result<ByteCursor, Error> {
        Ok(self)
    }
}

impl DecodeInput for Bytes {
    fn into_cursor(self) -> Result<ByteCursor, Error> {
        Ok(ByteCursor::new(self))
    }
}

impl DecodeInput for BytesMut {
    fn into_cursor(self) -> Result<ByteCursor, Error> {
        Ok(ByteCursor::new(self.freeze()))
    }
}

impl DecodeInput for Vec<u8> {
    fn into_cursor(self) -> Result<ByteCursor, Error> {
        Ok(ByteCursor::new(self))
    }
}

impl DecodeInput for &[u8] {
    fn into_cursor(self) -> Result<ByteCursor, Error> {
        Ok(ByteCursor::new(Bytes::copy_from_slice(self)))
    }
}

impl<const N: usize> DecodeInput for &[u8; N] {
    fn into_cursor(self) -> Result<ByteCursor, Error> {
        Ok(ByteCursor::new(Bytes::copy_from_slice(self)))
    }
}

impl DecodeInput for &str {
    fn into_cursor(self) -> Result<ByteCursor, Error> {
        ByteCursor::from_hex(self)
    }
}

impl DecodeInput for String {
    fn into_cursor(self) -> Result<ByteCursor, Error> {
        ByteCursor::from_hex(&self)
    }
}

impl Buf for ByteCursor {
    fn remaining(&self) -> usize {
        ByteCursor::remaining(self)
    }

    fn chunk(&self) -> &[u8] {
        &self.buffer[self.position..]
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= ByteCursor::remaining(self),
            "cannot advance past end of cursor"
        );
        self.position += cnt;
    }
}
