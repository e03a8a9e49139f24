use nom::{Err, IResult, Parser, error::ErrorKind};

use crate::nmea0183::{ChecksumMode, checksum_field};

fn error_code(res: IResult<&str, Option<u8>>) -> ErrorKind {
    match res {
        Err(Err::Error(error)) => error.code,
        other => panic!("Unexpected result {other:?}"),
    }
}

#[test]
fn test_checksum_ok() {
    let res = checksum_field(ChecksumMode::Required).parse("*1F");
    assert_eq!(res, Ok(("", Some(0x1F))));

    let res = checksum_field(ChecksumMode::Required).parse("*7a");
    assert_eq!(res, Ok(("", Some(0x7A))));
}

#[test]
fn test_checksum_large_hex() {
    let res = checksum_field(ChecksumMode::Required).parse("*1F43");
    assert_eq!(error_code(res), ErrorKind::Count);
}

#[test]
fn test_checksum_large_text() {
    let res = checksum_field(ChecksumMode::Required).parse("*1Fzz");
    assert_eq!(error_code(res), ErrorKind::Count);
}

#[test]
fn test_checksum_small() {
    let res = checksum_field(ChecksumMode::Required).parse("*1");
    assert_eq!(error_code(res), ErrorKind::Eof);
}

#[test]
fn test_checksum_non_hex() {
    let res = checksum_field(ChecksumMode::Required).parse("*1z");
    assert_eq!(error_code(res), ErrorKind::IsA);
}

#[test]
fn test_checksum_missing() {
    let res = checksum_field(ChecksumMode::Required).parse("");
    assert_eq!(error_code(res), ErrorKind::Char);

    let res = checksum_field(ChecksumMode::Optional).parse("");
    assert_eq!(res, Ok(("", None)));
}

#[test]
fn test_checksum_optional_still_validated() {
    let res = checksum_field(ChecksumMode::Optional).parse("*51");
    assert_eq!(res, Ok(("", Some(0x51))));

    let res = checksum_field(ChecksumMode::Optional).parse("*5");
    assert_eq!(error_code(res), ErrorKind::Eof);
}
