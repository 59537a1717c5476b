//! Fixed-width 32-bit integers.
//!
//! Written as four big-endian bytes regardless of magnitude. Counted vectors use
//! this form for their element count.

use crate::{ByteCursor, Decoder, Encoder, Error};
use bytes::BufMut;

const SIZE: usize = 4;

/// Codec for 4-byte big-endian `u32` and `i32` values.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedIntCodec;

impl Encoder<u32> for FixedIntCodec {
    #[inline]
    fn write(&self, value: &u32, buf: &mut impl BufMut) {
        buf.put_u32(*value);
    }

    #[inline]
    fn encode_size(&self, _: &u32) -> usize {
        SIZE
    }
}

impl Decoder<u32> for FixedIntCodec {
    #[inline]
    fn read(&self, cursor: &mut ByteCursor) -> Result<u32, Error> {
        cursor.read_array::<SIZE>().map(u32::from_be_bytes)
    }
}

impl Encoder<i32> for FixedIntCodec {
    #[inline]
    fn write(&self, value: &i32, buf: &mut impl BufMut) {
        buf.put_i32(*value);
    }

    #[inline]
    fn encode_size(&self, _: &i32) -> usize {
        SIZE
    }
}

impl Decoder<i32> for FixedIntCodec {
    #[inline]
    fn read(&self, cursor: &mut ByteCursor) -> Result<i32, Error> {
        cursor.read_array::<SIZE>().map(i32::from_be_bytes)
    }
}
