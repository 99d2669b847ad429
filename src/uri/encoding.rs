use std::sync::OnceLock;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use regex::Regex;

/// Bytes escaped when encoding a whole URI: everything outside ASCII alphanumerics and
/// `; , / ? : @ & = + $ - _ . ! ~ * ' ( ) #`. Non-ASCII is always escaped.
const URI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Used for fragments whose escapes could not be decoded, so their `%` stays literal.
const URI_ENCODE_SET_KEEP_PERCENT: &AsciiSet = &URI_ENCODE_SET.remove(b'%');

// Escapes of reserved characters survive decoding untouched: # $ & + , / : ; = ? @
fn reserved_escape_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)%(?:2[346BCF]|3[ABDF]|40)").expect("invalid reserved escape regex")
    })
}

/// Decode a local reference and encode it again as a URI path.
///
/// Decoding first normalises references that are already (partially) percent-encoded, so a
/// value such as `plot%201.png` comes out identical to `plot 1.png` instead of being encoded
/// twice. Escapes of reserved characters are carried over verbatim, and escape runs that do
/// not decode to UTF-8 are kept as they are.
pub fn reencode_reference(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    let mut last = 0;

    for escape in reserved_escape_pattern().find_iter(value) {
        push_reencoded(&mut encoded, &value[last..escape.start()]);
        encoded.push_str(escape.as_str());
        last = escape.end();
    }
    push_reencoded(&mut encoded, &value[last..]);

    encoded
}

fn push_reencoded(out: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }

    match percent_decode_str(fragment).decode_utf8() {
        Ok(decoded) => out.extend(utf8_percent_encode(&decoded, URI_ENCODE_SET)),
        Err(_) => out.extend(utf8_percent_encode(fragment, URI_ENCODE_SET_KEEP_PERCENT)),
    }
}
