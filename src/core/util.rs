//! Common utilities
//!
//! Byte-string search and replace. File contents are never decoded, so all
//! substitution happens on raw bytes.

use std::borrow::Cow;

/// Find the first occurrence of `needle` in `haystack`
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Replace every non-overlapping occurrence of `from` with `to`, scanning
/// left to right. Returns `None` when there is nothing to replace.
pub fn replace_bytes(haystack: &[u8], from: &[u8], to: &[u8]) -> Option<Vec<u8>> {
    if from.is_empty() {
        return None;
    }

    let mut out: Option<Vec<u8>> = None;
    let mut copied_up_to = 0;
    let mut i = 0;
    while i + from.len() <= haystack.len() {
        if &haystack[i..i + from.len()] == from {
            let buf = out.get_or_insert_with(|| Vec::with_capacity(haystack.len()));
            buf.extend_from_slice(&haystack[copied_up_to..i]);
            buf.extend_from_slice(to);
            i += from.len();
            copied_up_to = i;
        } else {
            i += 1;
        }
    }

    out.map(|mut buf| {
        buf.extend_from_slice(&haystack[copied_up_to..]);
        buf
    })
}

/// `replace_bytes` over a `Cow`, only allocating when something changed
pub fn replace_all<'a>(text: Cow<'a, [u8]>, from: &[u8], to: &[u8]) -> Cow<'a, [u8]> {
    match replace_bytes(&text, from, to) {
        Some(replaced) => Cow::Owned(replaced),
        None => text,
    }
}
