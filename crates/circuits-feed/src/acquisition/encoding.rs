// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Charset decoding and mojibake repair.
//!
//! The listing site serves UTF-8 while sometimes declaring a legacy
//! single-byte charset, so bodies are tried as UTF-8 first. Text that was
//! already decoded the wrong way shows tell-tale sequences (`â€™`, `Ã©`, ...)
//! that only arise when UTF-8 bytes are read one byte at a time as
//! Windows-1252; those are undone by re-encoding and re-decoding.

use crate::error::{FeedError, Result};
use encoding_rs::{Encoding, WINDOWS_1252};
use std::borrow::Cow;

/// What Windows-1252 shows for the UTF-8 continuation bytes 0x80..=0xBF.
const CONTINUATION_GLYPHS: &str = "€\u{81}‚ƒ„…†‡ˆ‰Š‹Œ\u{8d}Ž\u{8f}\u{90}‘’“”•–—˜™š›œ\u{9d}žŸ\
                                   \u{a0}¡¢£¤¥¦§¨©ª«¬\u{ad}®¯°±²³´µ¶·¸¹º»¼½¾¿";

/// Decode a response body: UTF-8 when valid, otherwise the declared charset
/// (Windows-1252 when none is declared or the label is unknown).
pub fn decode_body(bytes: &[u8], declared_charset: Option<&str>) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let encoding = declared_charset
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or(WINDOWS_1252);
    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(
            "body is neither UTF-8 nor clean {}; replacement characters inserted",
            encoding.name()
        );
    }
    decoded.into_owned()
}

/// Number of continuation bytes a UTF-8 lead byte announces, read back as
/// the Latin-1 letter Windows-1252 decodes it to.
fn continuation_count(lead: char) -> usize {
    match lead as u32 {
        0xC2..=0xDF => 1,
        0xE0..=0xEF => 2,
        0xF0..=0xF4 => 3,
        _ => 0,
    }
}

/// Whether the text contains a mojibake fingerprint: a lead-byte letter
/// (`Ã`, `â`, `Â`, ...) followed by exactly the number of continuation-byte
/// glyphs a UTF-8 sequence would need, e.g. `â€™` or `Ã©`.
pub fn has_mojibake(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.iter().enumerate().any(|(i, &lead)| {
        let needed = continuation_count(lead);
        needed > 0
            && chars.len() > i + needed
            && chars[i + 1..=i + needed]
                .iter()
                .all(|c| CONTINUATION_GLYPHS.contains(*c))
    })
}

/// Undo UTF-8-read-as-Windows-1252 corruption.
///
/// Repeats until no fingerprint is left or a round makes no progress, so
/// applying it twice gives the same result as applying it once. Text that
/// cannot be re-encoded is returned unchanged.
pub fn repair_mojibake(text: &str) -> Cow<'_, str> {
    if !has_mojibake(text) {
        return Cow::Borrowed(text);
    }

    let mut current = text.to_string();
    while has_mojibake(&current) {
        match reencode_once(&current) {
            Ok(next) if next != current => current = next,
            Ok(_) => break,
            Err(e) => {
                tracing::trace!("{e}");
                break;
            }
        }
    }
    Cow::Owned(current)
}

fn reencode_once(text: &str) -> Result<String> {
    let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
    if unmappable {
        return Err(FeedError::EncodingRepair(
            "text contains characters outside windows-1252".to_string(),
        ));
    }
    String::from_utf8(bytes.into_owned())
        .map_err(|e| FeedError::EncodingRepair(format!("re-decoded bytes are not UTF-8: {e}")))
}

/// Repair, decode HTML entities and collapse whitespace.
pub fn clean_text(raw: &str) -> String {
    let repaired = repair_mojibake(raw);
    let decoded = html_escape::decode_html_entities(repaired.as_ref());
    collapse_whitespace(&decoded)
}

/// Collapse every whitespace run to one space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the `charset=` parameter of a `Content-Type` header value.
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|part| part.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}
