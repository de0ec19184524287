//! Bounded text helpers
//!
//! Every string on the link lives in a fixed-capacity buffer. These cut
//! text to fit without splitting a character.

use heapless::String;

/// Longest prefix of `text` that fits in `max` bytes without splitting a character
pub fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Copy `text` into a bounded string, cutting on a character boundary
pub fn bounded<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    // Cannot fail: truncate() keeps the text within capacity
    let _ = out.push_str(truncate(text, N));
    out
}

/// Decode wire bytes into a bounded string
///
/// Invalid UTF-8 keeps the valid prefix and ends with U+FFFD, so the
/// result never matches a name the bytes did not spell out.
pub fn bounded_lossy<const N: usize>(bytes: &[u8]) -> String<N> {
    match core::str::from_utf8(bytes) {
        Ok(text) => bounded(text),
        Err(e) => {
            let valid = core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default();
            let marker = char::REPLACEMENT_CHARACTER;
            let mut out: String<N> = bounded(truncate(valid, N.saturating_sub(marker.len_utf8())));
            let _ = out.push(marker);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("idle", 8), "idle");
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        // 'é' is two bytes; cutting at 2 would split it
        assert_eq!(truncate("aé", 2), "a");
        assert_eq!(truncate("aé", 3), "aé");
    }

    #[test]
    fn test_bounded() {
        let s: String<4> = bounded("reboot");
        assert_eq!(s.as_str(), "rebo");
    }

    #[test]
    fn test_bounded_lossy_valid() {
        let s: String<8> = bounded_lossy(b"take");
        assert_eq!(s.as_str(), "take");
    }

    #[test]
    fn test_bounded_lossy_marks_invalid_bytes() {
        let s: String<8> = bounded_lossy(b"take\xFF");
        assert_eq!(s.as_str(), "take\u{FFFD}");
    }

    #[test]
    fn test_bounded_lossy_keeps_room_for_marker() {
        let s: String<6> = bounded_lossy(b"takeover\xFF");
        assert_eq!(s.as_str(), "tak\u{FFFD}");
    }
}
