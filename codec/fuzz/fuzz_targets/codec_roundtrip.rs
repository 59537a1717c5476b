#![no_main]

use alephium_codec::{
    ByteStringCodec, CompactSignedIntCodec, CompactUnsignedIntCodec, Decoder, Encoder, Vector,
    I256, U256,
};
use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use num_bigint::{BigInt, BigUint};

fn roundtrip_u32(v: u32) {
    let codec = CompactUnsignedIntCodec;
    let encoded = codec.encode_u32(v);
    assert_eq!(codec.encode_size(&v), encoded.len());
    let decoded = codec
        .decode_u32(encoded.clone().freeze())
        .expect("Failed to decode u32!");
    assert_eq!(v, decoded);

    // The wide path must agree byte for byte.
    assert_eq!(codec.encode_u256(&U256::from(v)), encoded);
}

fn roundtrip_i32(v: i32) {
    let codec = CompactSignedIntCodec;
    let encoded = codec.encode_i32(v);
    assert_eq!(codec.encode_size(&v), encoded.len());
    let decoded = codec
        .decode_i32(encoded.clone().freeze())
        .expect("Failed to decode i32!");
    assert_eq!(v, decoded);
    assert_eq!(codec.encode_i256(&I256::from(v)), encoded);
}

fn roundtrip_u256(bytes: [u8; 32]) {
    let codec = CompactUnsignedIntCodec;
    let v = U256::new(BigUint::from_bytes_be(&bytes)).expect("32 bytes always fit");
    let encoded = codec.encode_u256(&v);
    assert_eq!(codec.encode_size(&v), encoded.len());
    assert!(encoded.len() <= 33);
    let decoded = codec
        .decode_u256(encoded.freeze())
        .expect("Failed to decode U256!");
    assert_eq!(v, decoded);
}

fn roundtrip_i256(bytes: [u8; 32]) {
    let codec = CompactSignedIntCodec;
    let v = I256::new(BigInt::from_signed_bytes_be(&bytes)).expect("32 bytes always fit");
    let encoded = codec.encode_i256(&v);
    assert_eq!(codec.encode_size(&v), encoded.len());
    assert!(encoded.len() <= 33);
    let decoded = codec
        .decode_i256(encoded.freeze())
        .expect("Failed to decode I256!");
    assert_eq!(v, decoded);
}

fn roundtrip_bytes(input: &[u8]) {
    let codec = ByteStringCodec::new();
    let encoded = codec.encode_bytes(input);
    assert_eq!(codec.encode(&Bytes::copy_from_slice(input)), encoded);
    let decoded = codec
        .decode_bytes(encoded.freeze())
        .expect("Failed to decode bytes!");
    assert_eq!(decoded.as_ref(), input);
}

fn roundtrip_vec(values: Vec<u32>, fixed: bool) {
    let codec = if fixed {
        Vector::fixed(CompactUnsignedIntCodec, values.len())
    } else {
        Vector::new(CompactUnsignedIntCodec)
    };
    let encoded = codec.encode(&values);
    assert_eq!(codec.encode_size(&values), encoded.len());
    let decoded: Vec<u32> = codec
        .decode(encoded.freeze())
        .expect("Failed to decode vector!");
    assert_eq!(values, decoded);
}

fn roundtrip_nested(values: Vec<Vec<i32>>) {
    let codec = Vector::new(Vector::new(CompactSignedIntCodec));
    let encoded = codec.encode(&values).freeze();
    let decoded: Vec<Vec<i32>> = codec
        .decode(encoded.clone())
        .expect("Failed to decode nested vector!");
    assert_eq!(values, decoded);
    assert_eq!(codec.encode(&decoded).freeze(), encoded);
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    U32(u32),
    I32(i32),
    U256([u8; 32]),
    I256([u8; 32]),
    Bytes(&'a [u8]),
    Vec(Vec<u32>),
    FixedVec(Vec<u32>),
    Nested(Vec<Vec<i32>>),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::U32(v) => roundtrip_u32(v),
        FuzzInput::I32(v) => roundtrip_i32(v),
        FuzzInput::U256(bytes) => roundtrip_u256(bytes),
        FuzzInput::I256(bytes) => roundtrip_i256(bytes),
        FuzzInput::Bytes(it) => roundtrip_bytes(it),
        FuzzInput::Vec(it) => roundtrip_vec(it, false),
        FuzzInput::FixedVec(it) => roundtrip_vec(it, true),
        FuzzInput::Nested(it) => roundtrip_nested(it),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
