//! Cross-crate behavior: the concrete flows the toolkit is built around.

use std::ops::ControlFlow;

use strand::codec::{url, utf8};
use strand::{sprint, Arg, ByteStr, Dict, Error, Pattern, Storage, StrStream, Stream};

#[test]
fn short_literal_is_inline_with_trailing_null() {
    let s = ByteStr::from_bytes(b"hi").unwrap();
    assert_eq!(s.storage(), Storage::Inline);
    assert_eq!(s.len(), 2);
    assert_eq!(s.as_slice(), b"hi");
    // The byte past the length is the interoperability null.
    // SAFETY: inline storage always holds INLINE_CAP bytes.
    let sentinel = unsafe { *s.as_slice().as_ptr().add(2) };
    assert_eq!(sentinel, 0);
}

#[test]
fn growing_an_inline_value_promotes_it() {
    let mut s = ByteStr::from_bytes(b"hi").unwrap();
    s.grow(100).unwrap();
    assert_eq!(s.storage(), Storage::Owned);
    assert_eq!(s.len(), 2);
    assert!(s.capacity() >= 102);
    assert_eq!(s.as_slice(), b"hi");
    let sentinel = unsafe { *s.as_slice().as_ptr().add(2) };
    assert_eq!(sentinel, 0);
}

#[test]
fn dictionary_sum_and_filter_flow() {
    let mut dict = Dict::new();
    for (name, value) in [("a", 1u64), ("b", 2), ("c", 3), ("d", 4), ("e", 5)] {
        dict.insert(ByteStr::from_bytes(name.as_bytes()).unwrap(), value)
            .unwrap();
    }

    let mut sum = 0;
    dict.for_each_entry(|_, v| {
        sum += *v;
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(sum, 15);

    dict.retain(|_, v| *v <= 3);
    assert_eq!(dict.get(b"d"), None);
    assert_eq!(dict.get(b"a"), Some(&1));
    assert_eq!(dict.len(), 3);
}

#[test]
fn url_encoding_flow() {
    let mut enc = ByteStr::new();
    url::encode(&mut enc, b"abcd $-hello_'").unwrap();
    assert_eq!(enc.as_slice(), b"abcd%20%24-hello_%27");

    let mut dec = ByteStr::new();
    url::decode(&mut dec, enc.as_slice()).unwrap();
    assert_eq!(dec.as_slice(), b"abcd $-hello_'");

    let mut bad = ByteStr::new();
    assert_eq!(url::decode(&mut bad, b"%ZY"), Err(Error::InvalidArgument));
}

#[test]
fn repeated_group_capture_flow() {
    let pattern = Pattern::new(b"(a|b)+").unwrap();
    let caps = pattern.captures(b"aabbabx").unwrap().unwrap();
    assert_eq!(caps.get(0), Some(&b"aabbab"[..]));
    assert_eq!(caps.get(1), Some(&b"b"[..]));
}

#[test]
fn codepoint_encoding_flow() {
    let mut bytes = ByteStr::new();
    utf8::encode(&mut bytes, &[0x24, 0x40, 0x1234, 0x10ffff]).unwrap();
    assert_eq!(bytes.as_slice(), b"\x24\x40\xe1\x88\xb4\xf4\x8f\xbf\xbf");

    let mut back = Vec::new();
    utf8::decode(bytes.as_slice(), &mut back).unwrap();
    assert_eq!(back, vec![0x24, 0x40, 0x1234, 0x10ffff]);
}

#[test]
fn printer_pattern_codec_pipeline() {
    // Print a report into a string, pick fields out of it with the pattern
    // engine, and round the payload through a codec.
    let who = ByteStr::from_bytes(b"strand").unwrap();
    let report = sprint(
        b"user=%P id=%u flag=%x",
        &[Arg::Str(&who), Arg::Uint(7001), Arg::Uint(0x2a)],
    )
    .unwrap();
    assert_eq!(report.as_slice(), b"user=strand id=7001 flag=2a");

    let id = Pattern::new(b"id=(\\d+)").unwrap();
    let caps = id.captures(report.as_slice()).unwrap().unwrap();
    assert_eq!(caps.get(1), Some(&b"7001"[..]));

    let mut encoded = ByteStr::new();
    strand::codec::base64::encode(&mut encoded, report.as_slice()).unwrap();
    let mut decoded = ByteStr::new();
    strand::codec::base64::decode(&mut decoded, encoded.as_slice()).unwrap();
    assert_eq!(decoded, report);
}

#[test]
fn stream_backed_concatenation_flow() {
    let mut out = ByteStr::new();
    {
        let mut stream = StrStream::new(&mut out);
        stream.write(b"k=").unwrap();
        stream
            .serialize(strand::SerialValue::I64(-12))
            .unwrap();
        stream.write(b";").unwrap();
    }
    assert_eq!(out.as_slice(), b"k=-12;");

    // Tokenize what was concatenated.
    let fields: Vec<&[u8]> = out.tokens(b"=;").collect();
    assert_eq!(fields, vec![&b"k"[..], b"-12"]);
}
