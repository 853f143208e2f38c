#![no_main]

use arbitrary::Arbitrary;
use bitgrep::query::BitPatternMatcher;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    pattern: &'a [u8],
    buf: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    // Compile arbitrary pattern bytes and match arbitrary buffers
    let Ok(matcher) = BitPatternMatcher::compile(input.pattern) else {
        return;
    };
    let res = matcher.match_prefix(input.buf);
    assert!(res.matched_len <= matcher.byte_len());
    assert_eq!(
        res.is_match,
        res.matched_len == matcher.byte_len()
    );
});
