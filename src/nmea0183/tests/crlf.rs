use nom::{Err, IResult, Parser, error::ErrorKind};

use crate::nmea0183::{LineEndingMode, crlf};

fn assert_crlf_error(res: IResult<&str, ()>) {
    match res {
        Err(Err::Error(e)) => assert_eq!(e.code, ErrorKind::CrLf),
        other => panic!("Unexpected result {other:?}"),
    }
}

#[test]
fn test_crlf_required() {
    let res = crlf(LineEndingMode::Required).parse("12345\r\n");
    assert_eq!(res, Ok(("12345", ())));

    assert_crlf_error(crlf(LineEndingMode::Required).parse("12345"));
    assert_crlf_error(crlf(LineEndingMode::Required).parse("12345\n"));
    assert_crlf_error(crlf(LineEndingMode::Required).parse("123\r\n45\r\n"));
}

#[test]
fn test_crlf_forbidden() {
    let res = crlf(LineEndingMode::Forbidden).parse("12345");
    assert_eq!(res, Ok(("12345", ())));

    assert_crlf_error(crlf(LineEndingMode::Forbidden).parse("12345\r\n"));
    assert_crlf_error(crlf(LineEndingMode::Forbidden).parse("12345\n"));
}

#[test]
fn test_crlf_optional() {
    for i in ["12345\r\n", "12345\n", "12345"] {
        let res = crlf(LineEndingMode::Optional).parse(i);
        assert_eq!(res, Ok(("12345", ())), "input {i:?}");
    }

    assert_crlf_error(crlf(LineEndingMode::Optional).parse("123\r\n45"));
}
