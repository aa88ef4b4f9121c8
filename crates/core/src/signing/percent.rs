use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// OAuth parameter encoding: the RFC 3986 unreserved characters
/// (alphanumerics plus `-`, `.`, `_`, `~`) stay literal, every other byte
/// is percent-escaped — including `%` itself, so encoding is unambiguous.
///
/// This exact set must be used everywhere a value is encoded (parameter
/// normalization, the signature base string, the Authorization header).
/// Using a second, slightly different encoding anywhere makes signatures
/// fail verification server-side with no useful diagnostics.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` with the OAuth parameter encoding.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}
