//! Serialize values exchanged with an Alephium node.
//!
//! # Overview
//!
//! A binary serialization library for the node's wire format, designed to:
//! - Encode integers in a compact, self-describing form with four size classes
//! - Encode byte strings and sequences by composing simpler codecs
//! - Decode untrusted input without panicking or reading past the buffer
//!
//! # Supported Types
//!
//! - Compact integers: `u32`, `i32`, [U256] and [I256] (see [compact])
//! - Fixed-width 4-byte integers: `u32` and `i32` (see [FixedIntCodec])
//! - Length-prefixed byte strings: [ByteString] and [bytes::Bytes]
//! - Sequences of any of the above, counted or fixed-size (see [Vector])
//!
//! Codecs are values implementing [Encoder] and [Decoder]. Composite codecs take
//! the codec of their elements as a parameter, so the same Rust type can be
//! written in whichever representation the surrounding protocol requires.
//!
//! # Example (Integers)
//!
//! ```
//! use alephium_codec::{CompactSignedIntCodec, CompactUnsignedIntCodec, U256};
//!
//! let codec = CompactUnsignedIntCodec;
//! assert_eq!(codec.encode_u32(0).as_ref(), &[0x00]);
//! assert_eq!(codec.encode_u32(64).as_ref(), &[0x40, 0x40]);
//! assert_eq!(codec.decode_u32(vec![0x40, 0x40]).unwrap(), 64);
//! assert_eq!(codec.decode_u32("0x4040").unwrap(), 64); // strings are hex
//!
//! let big = U256::from(u64::MAX);
//! let encoded = codec.encode_u256(&big);
//! assert_eq!(encoded[0], 0xc4); // multi-byte, 8 body bytes
//! assert_eq!(codec.decode_u256(encoded.freeze()).unwrap(), big);
//!
//! assert_eq!(CompactSignedIntCodec.encode_i32(-1).as_ref(), &[0x3f]);
//! ```
//!
//! # Example (Composition)
//!
//! ```
//! use alephium_codec::{
//!     ByteCursor, ByteStringCodec, CompactUnsignedIntCodec, Decoder, Encoder, Vector,
//! };
//! use bytes::Bytes;
//!
//! // A counted vector of compact integers
//! let numbers = Vector::new(CompactUnsignedIntCodec);
//! let encoded = numbers.encode(&vec![1u32, 2]);
//! assert_eq!(encoded.as_ref(), &[0x00, 0x00, 0x00, 0x02, 0x01, 0x02]);
//!
//! // A fixed-size pair of byte strings, as found inside a tuple
//! let pair = Vector::fixed(ByteStringCodec::new().with_limit(..=1024), 2);
//! let value = vec![Bytes::from_static(b"ab"), Bytes::from_static(b"c")];
//! let encoded = pair.encode(&value);
//! assert_eq!(encoded.as_ref(), &[0x02, b'a', b'b', 0x01, b'c']);
//!
//! // Decoders chain through a shared cursor
//! let mut cursor = ByteCursor::from_hex("0x0000000105020161").unwrap();
//! let first: Vec<u32> = cursor.read_with(&numbers).unwrap();
//! let second: Bytes = cursor.read_with(&ByteStringCodec::new()).unwrap();
//! assert_eq!(first, vec![5]);
//! assert_eq!(second, Bytes::from_static(b"\x01a"));
//! assert!(cursor.is_empty());
//! ```

pub mod bigint;
pub mod codec;
pub mod compact;
pub mod config;
pub mod cursor;
pub mod error;
pub mod types;
pub mod util;

// Re-export main types and traits
pub use bigint::{I256, U256};
pub use codec::{merge, Codec, Decoder, Encoder};
pub use compact::{CompactSignedIntCodec, CompactUnsignedIntCodec, DecodedCompactInt, Mode};
pub use config::RangeCfg;
pub use cursor::{ByteCursor, DecodeInput};
pub use error::Error;
pub use types::{
    bytestring::{ByteString, ByteStringCodec},
    fixed::FixedIntCodec,
    vector::Vector,
};
