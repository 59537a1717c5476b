//! Homogeneous sequences.
//!
//! A [Vector] lifts the codec of an element type to a codec of `Vec<T>`. In
//! counted mode the element count is written first as a 4-byte big-endian
//! integer. In fixed-size mode the count is known from context (a tuple, say)
//! and nothing but the elements is written.

use crate::{ByteCursor, Decoder, Encoder, Error, FixedIntCodec, RangeCfg};
use bytes::BufMut;
use tracing::{debug, trace};

/// Codec for sequences of values encoded by an inner codec `C`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vector<C> {
    inner: C,
    size: Option<usize>,
    limit: RangeCfg,
}

impl<C> Vector<C> {
    /// Creates a counted vector codec.
    pub fn new(inner: C) -> Self {
        Self::with_size(inner, None)
    }

    /// Creates a vector codec for exactly `size` elements, with no count on the wire.
    pub fn fixed(inner: C, size: usize) -> Self {
        Self::with_size(inner, Some(size))
    }

    /// Creates a fixed-size codec if `size` is given and a counted codec otherwise.
    pub fn with_size(inner: C, size: Option<usize>) -> Self {
        Self {
            inner,
            size,
            limit: RangeCfg::default(),
        }
    }

    /// Restricts the element counts accepted when decoding.
    ///
    /// In fixed-size mode the configured size itself is checked, so a size outside
    /// the limit fails every decode.
    pub fn with_limit(mut self, limit: impl Into<RangeCfg>) -> Self {
        self.limit = limit.into();
        self
    }

    /// The fixed element count, if any.
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// The element codec.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<T, C: Encoder<T>> Encoder<Vec<T>> for Vector<C> {
    /// Writes the elements, preceded by their count in counted mode.
    ///
    /// Panics in fixed-size mode if `values` does not hold exactly the configured
    /// number of elements.
    fn write(&self, values: &Vec<T>, buf: &mut impl BufMut) {
        match self.size {
            Some(size) => assert_eq!(
                values.len(),
                size,
                "fixed-size vector expects {size} elements"
            ),
            None => {
                let len = u32::try_from(values.len()).expect("Vector length exceeds u32");
                FixedIntCodec.write(&len, buf);
            }
        }
        for value in values {
            self.inner.write(value, buf);
        }
    }

    fn encode_size(&self, values: &Vec<T>) -> usize {
        let prefix = match self.size {
            Some(_) => 0,
            None => FixedIntCodec.encode_size(&0u32),
        };
        prefix
            + values
                .iter()
                .map(|value| self.inner.encode_size(value))
                .sum::<usize>()
    }
}

impl<T, C: Decoder<T>> Decoder<Vec<T>> for Vector<C> {
    fn read(&self, cursor: &mut ByteCursor) -> Result<Vec<T>, Error> {
        let len = match self.size {
            Some(size) => size,
            None => {
                let count: u32 = cursor.read_with(&FixedIntCodec)?;
                usize::try_from(count).map_err(|_| Error::OutOfRange("usize"))?
            }
        };
        if let Err(err) = self.limit.check(len) {
            debug!(
                len,
                fixed = self.size.is_some(),
                limit = ?self.limit,
                "vector length rejected"
            );
            return Err(err);
        }
        trace!(len, position = cursor.position(), "reading vector");

        // Never reserve more than the input could possibly hold.
        let mut values = Vec::with_capacity(len.min(cursor.remaining()));
        for _ in 0..len {
            values.push(self.inner.read(cursor)?);
        }
        Ok(values)
    }
}
