//! Wire-format vectors and round trips through the public API.

use alephium_codec::{
    merge, ByteCursor, ByteString, ByteStringCodec, CompactSignedIntCodec,
    CompactUnsignedIntCodec, DecodedCompactInt, Decoder, Encoder, Error, Mode, Vector, I256, U256,
};
use bytes::Bytes;
use num_bigint::{BigInt, BigUint};
use rand::{rngs::StdRng, Rng, SeedableRng};
use test_case::test_case;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test_case(0x3f, 1; "one byte max")]
#[test_case(0x40, 2; "two byte min")]
#[test_case(0x3fff, 2; "two byte max")]
#[test_case(0x4000, 4; "four byte min")]
#[test_case(0x3fff_ffff, 4; "four byte max")]
#[test_case(0x4000_0000, 5; "multi byte min")]
fn test_unsigned_boundaries(value: u32, len: usize) {
    let encoded = CompactUnsignedIntCodec.encode_u32(value);
    assert_eq!(encoded.len(), len);
    assert_eq!(
        CompactUnsignedIntCodec.encode_u256(&U256::from(value)).len(),
        len
    );
}

#[test]
fn test_concrete_scenarios() {
    assert_eq!(CompactUnsignedIntCodec.encode_u32(0).as_ref(), &[0x00]);
    assert_eq!(CompactUnsignedIntCodec.encode_u32(64).as_ref(), &[0x40, 0x40]);
    assert_eq!(CompactSignedIntCodec.encode_i32(-1).as_ref(), &[0x3f]);
    assert_eq!(ByteStringCodec::new().encode_bytes(&[]).as_ref(), &[0x00]);
    assert_eq!(
        Vector::new(CompactUnsignedIntCodec)
            .encode(&vec![1u32, 2])
            .as_ref(),
        &[0x00, 0x00, 0x00, 0x02, 0x01, 0x02]
    );
}

#[test]
fn test_multi_byte_tag_without_body() {
    init_tracing();
    let expected = Error::TruncatedInput {
        needed: 9,
        remaining: 0,
    };
    let input = Bytes::from_static(&[0xc5]);
    assert_eq!(
        CompactUnsignedIntCodec.decode_u32(input.clone()).unwrap_err(),
        expected
    );
    assert_eq!(
        CompactUnsignedIntCodec.decode_u256(input.clone()).unwrap_err(),
        expected
    );
    assert_eq!(
        CompactSignedIntCodec.decode_i256(input.clone()).unwrap_err(),
        expected
    );
    let raw: Result<DecodedCompactInt, _> = CompactUnsignedIntCodec.decode(input);
    assert_eq!(raw.unwrap_err(), expected);
}

#[test]
fn test_hex_input() {
    let value: u32 = CompactUnsignedIntCodec.decode_hex("0x4040").unwrap();
    assert_eq!(value, 64);
    // Odd-length hex gains an implicit leading zero.
    let value: u32 = CompactUnsignedIntCodec.decode_hex("5").unwrap();
    assert_eq!(value, 5);
    let decoded: Bytes = ByteStringCodec::new().decode_hex("0x02abcd").unwrap();
    assert_eq!(decoded.as_ref(), &[0xab, 0xcd]);
}

#[test_case("0x05", 5; "prefixed")]
#[test_case("5", 5; "odd length")]
#[test_case("0", 0; "single zero nibble")]
#[test_case("0x4040", 64; "two byte")]
#[test_case("C000000001", 1; "upper case multi byte")]
fn test_decode_accepts_hex_strings(hex: &str, expected: u32) {
    assert_eq!(CompactUnsignedIntCodec.decode_u32(hex).unwrap(), expected);
    assert_eq!(
        CompactUnsignedIntCodec
            .decode_u32(String::from(hex))
            .unwrap(),
        expected
    );
    assert_eq!(
        CompactSignedIntCodec.decode_i256(hex).unwrap(),
        I256::from(expected)
    );
}

#[test]
fn test_decode_sources_agree() {
    let encoded = ByteStringCodec::new().encode_bytes(b"alph").freeze();
    let hex = alephium_codec::util::hex(&encoded);
    let codec = ByteStringCodec::new();

    let from_bytes = codec.decode_bytes(encoded.clone()).unwrap();
    let from_vec = codec.decode_bytes(encoded.to_vec()).unwrap();
    let from_slice = codec.decode_bytes(&encoded[..]).unwrap();
    let from_hex = codec.decode_bytes(hex.as_str()).unwrap();
    let from_cursor = codec.decode_bytes(ByteCursor::new(encoded)).unwrap();
    for decoded in [from_vec, from_slice, from_hex, from_cursor] {
        assert_eq!(decoded, from_bytes);
    }
    assert_eq!(from_bytes.as_ref(), b"alph");
}

#[test]
fn test_u256_roundtrip() {
    let mut rng = StdRng::seed_from_u64(42);
    let codec = CompactUnsignedIntCodec;
    let mut values = vec![U256::zero(), U256::max(), U256::from(u32::MAX)];
    for _ in 0..1_000 {
        let mut bytes = vec![0u8; rng.gen_range(1..=32)];
        rng.fill(&mut bytes[..]);
        values.push(U256::new(BigUint::from_bytes_be(&bytes)).unwrap());
    }
    for value in values {
        let encoded = codec.encode_u256(&value);
        let decoded = codec.decode_u256(encoded.clone().freeze()).unwrap();
        assert_eq!(decoded, value);

        // The intermediate form round-trips too.
        let raw = codec.from_u256(&value);
        assert_eq!(codec.encode(&raw), encoded);
        match raw.mode_class() {
            Mode::MultiByte(len) => assert!((4..=32).contains(&len)),
            class => assert_eq!(class.rest_len() + 1, encoded.len()),
        }
    }
}

#[test]
fn test_i256_roundtrip() {
    let mut rng = StdRng::seed_from_u64(43);
    let codec = CompactSignedIntCodec;
    let mut values = vec![I256::zero(), I256::min(), I256::max(), I256::from(i32::MIN)];
    for _ in 0..1_000 {
        let mut bytes = vec![0u8; rng.gen_range(1..=32)];
        rng.fill(&mut bytes[..]);
        values.push(I256::new(BigInt::from_signed_bytes_be(&bytes)).unwrap());
    }
    for value in values {
        let encoded = codec.encode_i256(&value);
        assert_eq!(codec.decode_i256(encoded.freeze()).unwrap(), value);
    }
}

#[test]
fn test_bytes_roundtrip() {
    let mut rng = StdRng::seed_from_u64(44);
    let codec = ByteStringCodec::new();
    for len in [0usize, 1, 63, 64, 1000, 0x4000] {
        let mut value = vec![0u8; len];
        rng.fill(&mut value[..]);
        let encoded = codec.encode_bytes(&value);
        assert_eq!(codec.decode_bytes(encoded.clone().freeze()).unwrap(), value);

        let bs = ByteString::new(value);
        assert_eq!(codec.encode(&bs), encoded);
    }
}

#[test]
fn test_vector_roundtrip() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(45);
    let values: Vec<i32> = (0..257).map(|_| rng.gen::<i32>() >> rng.gen_range(0..32)).collect();

    let counted = Vector::new(CompactSignedIntCodec);
    let encoded = counted.encode(&values).freeze();
    let decoded: Vec<i32> = counted.decode(encoded.clone()).unwrap();
    assert_eq!(decoded, values);
    assert_eq!(counted.encode(&decoded).freeze(), encoded);

    let fixed = Vector::fixed(CompactSignedIntCodec, values.len());
    let encoded = fixed.encode(&values).freeze();
    let decoded: Vec<i32> = fixed.decode(encoded.clone()).unwrap();
    assert_eq!(decoded, values);
    assert_eq!(counted.encode(&values).len(), encoded.len() + 4);
}

#[test]
fn test_struct_like_composition() {
    // A record of (u32, bytes, [i256; 2]) laid out field after field.
    let amount = 1_000_000u32;
    let payload = Bytes::from_static(b"contract-state");
    let pair = vec![I256::from(-7), I256::from(1i128 << 100)];
    let pair_codec = Vector::fixed(CompactSignedIntCodec, 2);

    let encoded = merge(&[
        CompactUnsignedIntCodec.encode_u32(amount),
        ByteStringCodec::new().encode_bytes(&payload),
        pair_codec.encode(&pair),
    ]);

    let mut cursor = ByteCursor::new(encoded);
    let decoded_amount: u32 = cursor.read_with(&CompactUnsignedIntCodec).unwrap();
    let decoded_payload: Bytes = cursor.read_with(&ByteStringCodec::new()).unwrap();
    let decoded_pair: Vec<I256> = cursor.read_with(&pair_codec).unwrap();
    assert!(cursor.is_empty());
    assert_eq!(decoded_amount, amount);
    assert_eq!(decoded_payload, payload);
    assert_eq!(decoded_pair, pair);
}

#[test]
fn test_garbage_never_panics() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(46);
    let vectors = Vector::new(Vector::new(ByteStringCodec::new())).with_limit(..=16);
    for _ in 0..5_000 {
        let mut input = vec![0u8; rng.gen_range(0..48)];
        rng.fill(&mut input[..]);
        let input = Bytes::from(input);

        let _ = CompactUnsignedIntCodec.decode_u32(input.clone());
        let _ = CompactUnsignedIntCodec.decode_u256(input.clone());
        let _ = CompactSignedIntCodec.decode_i32(input.clone());
        let _ = CompactSignedIntCodec.decode_i256(input.clone());
        let _ = ByteStringCodec::new().decode_bytes(input.clone());
        let _: Result<Vec<Vec<Bytes>>, _> = vectors.decode(input);
    }
}
