use crate::compat::{Cow, String};
use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode, utf8_percent_encode};

/// Fragment percent-encode set
/// C0 control + space, ", <, >, \`
pub const FRAGMENT_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Path percent-encode set
/// Fragment + #, ?, ^, {, }
pub const PATH_SET: &AsciiSet = &FRAGMENT_SET
    .add(b'#')
    .add(b'?')
    .add(b'^')
    .add(b'{')
    .add(b'}');

/// Userinfo percent-encode set
/// Path + /, :, ;, =, @, [, \, ], |
pub const USERINFO_SET: &AsciiSet = &PATH_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'|');

/// Query key/value component set: everything but `A-Z a-z 0-9 - _ . ~`.
/// Space is handled separately and written as `+`.
pub const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Write percent-encoded string directly to buffer
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    buffer.reserve(input.len());
    for chunk in utf8_percent_encode(input, encode_set) {
        buffer.push_str(chunk);
    }
}

/// Percent-encode with a set, borrowing when nothing needs escaping
pub fn percent_encode_with_set<'a>(input: &'a str, encode_set: &'static AsciiSet) -> Cow<'a, str> {
    utf8_percent_encode(input, encode_set).into()
}

/// Encode a query key or value into `buffer`, spaces become `+`.
pub fn encode_component_into(buffer: &mut String, input: &str) {
    for (i, piece) in input.split(' ').enumerate() {
        if i > 0 {
            buffer.push('+');
        }
        percent_encode_into(buffer, piece, COMPONENT_SET);
    }
}

/// Decode a query key or value: `+` is a space, invalid UTF-8 is replaced.
pub fn decode_component(input: &str) -> String {
    if !input.contains('+') {
        return percent_decode(input.as_bytes())
            .decode_utf8_lossy()
            .into_owned();
    }
    let bytes: crate::compat::Vec<u8> = input
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&bytes).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(input: &str) -> String {
        let mut buffer = String::new();
        encode_component_into(&mut buffer, input);
        buffer
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode("value with spaces"), "value+with+spaces");
        assert_eq!(encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode("1+1"), "1%2B1");
        assert_eq!(encode("safe-_.~"), "safe-_.~");
        assert_eq!(encode("[x]"), "%5Bx%5D");
        assert_eq!(encode("é"), "%C3%A9");
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("value+with+spaces"), "value with spaces");
        assert_eq!(decode_component("a%26b%3Dc"), "a&b=c");
        assert_eq!(decode_component("1%2B1"), "1+1");
        assert_eq!(decode_component("%C3%A9"), "é");
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%FF"), "\u{FFFD}");
    }

    #[test]
    fn test_path_and_fragment_sets() {
        assert_eq!(percent_encode_with_set("/a b/c?d", PATH_SET), "/a%20b/c%3Fd");
        assert_eq!(percent_encode_with_set("/already%20encoded", PATH_SET), "/already%20encoded");
        assert_eq!(percent_encode_with_set("top section", FRAGMENT_SET), "top%20section");
        assert_eq!(percent_encode_with_set("us:er@", USERINFO_SET), "us%3Aer%40");
    }
}
