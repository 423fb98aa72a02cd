use std::error::Error;

use bytes::BytesMut;
use rand::Rng;
use test_case::test_case;

use mysql_protocol::alloc::{ArenaAllocator, StdAllocator};
use mysql_protocol::common::StringFraming;
use mysql_protocol::encoding::{decode_length_encoded_bytes, decode_length_encoded_int};
use mysql_protocol::encoding::{encode_bytes, encode_length_encoded_int, prefix_size};
use mysql_protocol::errors::DecodeError;

#[test_case(0, b"\x00" ; "zero")]
#[test_case(250, b"\xfa" ; "largest single byte")]
#[test_case(251, b"\xfc\xfb\x00" ; "smallest two byte")]
#[test_case(0xffff, b"\xfc\xff\xff" ; "largest two byte")]
#[test_case(0x1_0000, b"\xfd\x00\x00\x01" ; "smallest three byte")]
#[test_case(0xff_ffff, b"\xfd\xff\xff\xff" ; "largest three byte")]
#[test_case(0x100_0000, b"\xfe\x00\x00\x00\x01\x00\x00\x00\x00" ; "smallest eight byte")]
#[test_case(u64::MAX, b"\xfe\xff\xff\xff\xff\xff\xff\xff\xff" ; "max")]
fn int_boundaries(value: u64, wire: &[u8]) {
    assert_eq!(&encode_length_encoded_int(value)[..], wire);
    assert_eq!(prefix_size(wire[0]), wire.len());
    assert_eq!(decode_length_encoded_int(wire), (Some(value), wire.len()));
}

#[test]
fn int_null() {
    assert_eq!(decode_length_encoded_int(b"\xfb\x01"), (None, 1));
}

#[test]
fn int_random() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let value: u64 = match rng.gen_range(0..4) {
            0 => rng.gen_range(0..251),
            1 => rng.gen_range(251..0x1_0000),
            2 => rng.gen_range(0x1_0000..0x100_0000),
            _ => rng.gen(),
        };
        let wire = encode_length_encoded_int(value);
        assert_eq!(decode_length_encoded_int(&wire), (Some(value), wire.len()));
    }
}

#[test]
fn bytes_framing() {
    let mut alloc = StdAllocator;
    let buf = encode_bytes(&mut alloc, b"abc", StringFraming::LengthEncoded);
    assert_eq!(&buf[..], b"\x03abc");
    let buf = encode_bytes(&mut alloc, b"abc", StringFraming::ZeroTerminated);
    assert_eq!(&buf[..], b"abc\x00");
    let buf = encode_bytes(&mut alloc, b"", StringFraming::LengthEncoded);
    assert_eq!(&buf[..], b"\x00");
}

#[test]
fn bytes_long_payload() -> Result<(), Box<dyn Error>> {
    let payload = vec![b'x'; 300];
    let mut alloc = ArenaAllocator::with_block_size(64);
    let buf = encode_bytes(&mut alloc, &payload, StringFraming::LengthEncoded);
    assert_eq!(&buf[..3], b"\xfc\x2c\x01");
    let (value, consumed) = decode_length_encoded_bytes(&buf)?;
    assert_eq!(value, Some(&payload[..]));
    assert_eq!(consumed, 303);
    Ok(())
}

#[test]
fn bytes_decode() -> Result<(), Box<dyn Error>> {
    assert_eq!(decode_length_encoded_bytes(b"\x02hi!")?, (Some(&b"hi"[..]), 3));
    assert_eq!(decode_length_encoded_bytes(b"\x00")?, (Some(&b""[..]), 1));
    assert_eq!(decode_length_encoded_bytes(b"\xfb")?, (None, 1));
    Ok(())
}

#[test]
fn bytes_truncated() {
    let mut buf = BytesMut::new();
    buf.extend_from_slice(b"\x0a12345");
    assert!(matches!(
        decode_length_encoded_bytes(&buf),
        Err(DecodeError::Underflow { needed: 5, .. })
    ));
    assert!(matches!(
        decode_length_encoded_bytes(b"\xfc\x01"),
        Err(DecodeError::Underflow { needed: 1, .. })
    ));
    assert!(matches!(
        decode_length_encoded_bytes(b""),
        Err(DecodeError::Underflow { needed: 1, .. })
    ));
}
