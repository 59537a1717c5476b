#![no_main]

use alephium_codec::{
    ByteCursor, ByteString, ByteStringCodec, CompactSignedIntCodec, CompactUnsignedIntCodec,
    DecodedCompactInt, Decoder, Encoder, Vector,
};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

// Decoding arbitrary input must never panic, and anything that does decode must
// re-encode to exactly the bytes it was read from.
fuzz_target!(|data: &[u8]| {
    let input = Bytes::copy_from_slice(data);
    let unsigned = CompactUnsignedIntCodec;
    let signed = CompactSignedIntCodec;

    if let Ok(raw) = <CompactUnsignedIntCodec as Decoder<DecodedCompactInt>>::decode(
        &unsigned,
        input.clone(),
    ) {
        assert_eq!(unsigned.encode(&raw).as_ref(), data);
        let _ = unsigned.to_u32(&raw);
        let _ = unsigned.to_u256(&raw);
        let _ = signed.to_i32(&raw);
        let _ = signed.to_i256(&raw);
    }

    let codec = ByteStringCodec::new();
    if let Ok(bs) = <ByteStringCodec as Decoder<ByteString>>::decode(&codec, input.clone()) {
        assert_eq!(codec.encode(&bs).as_ref(), data);
    }

    let vectors = Vector::new(Vector::new(ByteStringCodec::new())).with_limit(..=1024);
    let decoded: Result<Vec<Vec<Bytes>>, _> = vectors.decode(input.clone());
    if let Ok(values) = decoded {
        // Byte-string lengths may have used a non-canonical prefix, so only the
        // element values are compared.
        let reencoded = vectors.encode(&values).freeze();
        let again: Vec<Vec<Bytes>> = vectors
            .decode(reencoded)
            .expect("Failed to decode re-encoded vectors!");
        assert_eq!(values, again);
    }

    // Read integers back to back until the input runs out or is malformed.
    let mut cursor = ByteCursor::new(input);
    while !cursor.is_empty() {
        let before = cursor.position();
        let result: Result<i32, _> = cursor.read_with(&signed);
        if result.is_err() {
            break;
        }
        assert!(cursor.position() > before);
    }
});
