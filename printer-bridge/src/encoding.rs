//! Big5 encoding utilities for Taiwanese thermal printers
//!
//! The shop's receipt printer expects Big5 for Chinese text. This module
//! provides:
//! - Big5 string width calculation (CJK is 2 columns, ASCII is 1)
//! - Truncating/padding to Big5 widths
//! - Converting UTF-8 buffers to Big5 while preserving ESC/POS commands

/// Get the Big5 byte width of a string
pub fn big5_width(s: &str) -> usize {
    let (cow, _, _) = encoding_rs::BIG5.encode(s);
    cow.len()
}

/// Truncate a string to fit within a Big5 byte width
pub fn truncate_big5(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let s_char = c.to_string();
        let (cow, _, _) = encoding_rs::BIG5.encode(&s_char);
        let char_len = cow.len();

        if width + char_len > max_width {
            break;
        }
        result.push(c);
        width += char_len;
    }
    result
}

/// Pad a string to a specific Big5 byte width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_big5(s: &str, width: usize, align_right: bool) -> String {
    let current_width = big5_width(s);
    if current_width >= width {
        return truncate_big5(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to Big5
///
/// ASCII bytes (0x00-0x7F) pass through untouched, which keeps ESC/POS
/// command sequences intact. Only bytes >= 0x80 are treated as UTF-8 text
/// and re-encoded. Chinese mode is re-enabled after any INIT (ESC @) found
/// mid-stream, since INIT resets it.
pub fn convert_to_big5(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() * 2);

    // FS & (0x1C 0x26) - Enable Chinese mode
    result.extend_from_slice(&[0x1C, 0x26]);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        // INIT (ESC @ = 0x1B 0x40) resets the printer, re-enable Chinese mode
        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);

            result.push(0x1B);
            result.push(0x40);
            result.extend_from_slice(&[0x1C, 0x26]);

            i += 2;
            continue;
        }

        if b < 128 {
            // ASCII byte (command or ASCII text)
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            // Part of a UTF-8 sequence
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);

    // FS . (0x1C 0x2E) - Exit Chinese mode
    result.extend_from_slice(&[0x1C, 0x2E]);

    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to Big5
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    let (big5, _, _) = encoding_rs::BIG5.encode(&s);
    result.extend_from_slice(&big5);
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big5_width() {
        assert_eq!(big5_width("hello"), 5);
        assert_eq!(big5_width("你好"), 4); // 2 Chinese chars = 4 bytes
        assert_eq!(big5_width("AB中文CD"), 8); // 4 ASCII + 2 Chinese
    }

    #[test]
    fn test_truncate_big5() {
        assert_eq!(truncate_big5("hello world", 5), "hello");
        assert_eq!(truncate_big5("你好世界", 4), "你好");
        assert_eq!(truncate_big5("AB中文", 4), "AB中");
    }

    #[test]
    fn test_pad_big5() {
        assert_eq!(pad_big5("hi", 5, false), "hi   ");
        assert_eq!(pad_big5("hi", 5, true), "   hi");
        assert_eq!(pad_big5("hello world", 5, false), "hello");
    }

    #[test]
    fn test_convert_preserves_ascii_commands() {
        // ESC a 1 (center) followed by Chinese text
        let input = [&[0x1B, 0x61, 0x01][..], "滷味".as_bytes()].concat();
        let output = convert_to_big5(&input);

        // Chinese mode enabled up front, command bytes intact
        assert_eq!(&output[..2], &[0x1C, 0x26]);
        assert!(output
            .windows(3)
            .any(|w| w == [0x1B, 0x61, 0x01]));
        // Trailing exit sequence
        assert_eq!(&output[output.len() - 2..], &[0x1C, 0x2E]);
    }

    #[test]
    fn test_convert_reenables_chinese_after_init() {
        let input = [0x41, 0x1B, 0x40, 0x42];
        let output = convert_to_big5(&input);
        // ... ESC @ followed immediately by FS &
        assert!(output
            .windows(4)
            .any(|w| w == [0x1B, 0x40, 0x1C, 0x26]));
    }
}
