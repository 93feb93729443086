//! Literal prefix extraction from regex patterns.
//!
//! A pattern like `http://foo\.com/.*` starts with bytes that any matching
//! URL must reproduce verbatim. The extractor recovers that leading literal
//! so such rules can be indexed in the prefix trie instead of the
//! sequential list.

use lazy_static::lazy_static;

/// Metacharacters that end the literal walk when unescaped.
const METACHARS: &[u8] = b".?*+[({$^|";

lazy_static! {
    static ref IS_METACHAR: [bool; 256] = {
        let mut table = [false; 256];
        for &byte in METACHARS {
            table[byte as usize] = true;
        }
        table
    };
}

/// Returns the longest leading byte sequence of `pattern` that matches
/// literally, possibly empty.
///
/// The walk ends at the first unescaped metacharacter or at the first `.*`
/// occurring anywhere in the pattern, whichever comes first. `\X` where X is
/// a metacharacter contributes X as a literal byte; a backslash before
/// anything else is a regex directive and ends the walk. The `.*` cap is
/// computed before escapes are interpreted, so an escape pair straddling the
/// cap is still consumed whole.
pub fn literal_prefix(pattern: &str) -> Vec<u8> {
    let bytes = pattern.as_bytes();
    let cap = pattern.find(".*").unwrap_or(pattern.len());

    let mut prefix = Vec::new();
    let mut pos = 0;
    while pos < cap {
        let byte = bytes[pos];
        if byte == b'\\' {
            match bytes.get(pos + 1) {
                Some(&escaped) if IS_METACHAR[escaped as usize] => {
                    prefix.push(escaped);
                    pos += 2;
                }
                // \d, \w, trailing backslash, ...: a directive, not a literal
                _ => break,
            }
        } else {
            if IS_METACHAR[byte as usize] {
                break;
            }
            prefix.push(byte);
            pos += 1;
        }
    }

    prefix
}
