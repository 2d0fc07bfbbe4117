//! Display width of grapheme clusters and of ANSI-decorated render rows.
//!
//! `egc_width` is the single authority for cluster width; the renderer and
//! the wrap segmenter never call `unicode_width` directly.
//!
//! Policy:
//! 1. Control clusters are zero width.
//! 2. Pictographic clusters (ZWJ sequences, VS16 presentation, regional
//!    indicator pairs, keycaps) are forced to 2 cells. Over-estimation only
//!    leaves a blank cell; under-estimation drifts the whole row.
//! 3. Everything else uses the widest scalar's `unicode_width` value.
//!
//! `visible_width` and `truncate_to_width` understand the escape sequences
//! the renderer emits (CSI styling, OSC and APC strings such as the cursor
//! marker) and treat them as zero width.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const ZWJ: char = '\u{200D}';
const VS16: char = '\u{FE0F}';
const KEYCAP: char = '\u{20E3}';

/// Width in terminal cells of a single extended grapheme cluster.
pub fn egc_width(g: &str) -> u16 {
    let mut chars = g.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    if first.is_control() {
        return 0;
    }
    if first.is_ascii() && g.len() == 1 {
        return 1;
    }
    if g.chars().any(|c| c == ZWJ || c == VS16 || c == KEYCAP) || is_regional_pair(g) {
        return 2;
    }
    let widest = g
        .chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .max()
        .unwrap_or(0);
    widest.clamp(1, 2) as u16
}

fn is_regional_pair(g: &str) -> bool {
    let regional = |c: char| ('\u{1F1E6}'..='\u{1F1FF}').contains(&c);
    let mut it = g.chars();
    matches!((it.next(), it.next()), (Some(a), Some(b)) if regional(a) && regional(b))
}

/// Iterate `(is_escape, fragment)` pieces of a decorated string.
fn pieces(s: &str) -> Vec<(bool, &str)> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut plain_start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] != 0x1b {
            i += 1;
            continue;
        }
        if plain_start < i {
            out.push((false, &s[plain_start..i]));
        }
        let start = i;
        i += 1;
        match bytes.get(i) {
            Some(b'[') => {
                i += 1;
                while i < bytes.len() && !(0x40..=0x7e).contains(&bytes[i]) {
                    i += 1;
                }
                i = (i + 1).min(bytes.len());
            }
            Some(b']') | Some(b'_') | Some(b'P') => {
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == 0x07 {
                        i += 1;
                        break;
                    }
                    if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            Some(_) => i += 1,
            None => {}
        }
        out.push((true, &s[start..i]));
        plain_start = i;
    }
    if plain_start < bytes.len() {
        out.push((false, &s[plain_start..]));
    }
    out
}

/// Visible width of a string that may contain escape sequences.
pub fn visible_width(s: &str) -> usize {
    pieces(s)
        .into_iter()
        .filter(|(esc, _)| !esc)
        .flat_map(|(_, text)| text.graphemes(true))
        .map(|g| egc_width(g) as usize)
        .sum()
}

/// Truncate to at most `max` visible cells, keeping every escape sequence so
/// styling state stays balanced. Never splits a cluster.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut used = 0usize;
    for (esc, text) in pieces(s) {
        if esc {
            out.push_str(text);
            continue;
        }
        for g in text.graphemes(true) {
            let w = egc_width(g) as usize;
            if used + w > max {
                break;
            }
            used += w;
            out.push_str(g);
        }
    }
    out
}

/// Strip every escape sequence, leaving the visible text.
pub fn strip_escapes(s: &str) -> String {
    pieces(s)
        .into_iter()
        .filter(|(esc, _)| !esc)
        .map(|(_, t)| t)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_cjk_widths() {
        assert_eq!(egc_width("a"), 1);
        assert_eq!(egc_width("漢"), 2);
        assert_eq!(egc_width("\u{7}"), 0);
        assert_eq!(egc_width(""), 0);
    }

    #[test]
    fn pictographic_sequences_are_wide() {
        assert_eq!(egc_width("👨\u{200D}👩\u{200D}👧"), 2);
        assert_eq!(egc_width("1\u{FE0F}\u{20E3}"), 2);
        assert_eq!(egc_width("🇯🇵"), 2);
    }

    #[test]
    fn visible_width_ignores_styling_and_markers() {
        let s = "\x1b[7mab\x1b[27m\x1b_modal:c\x07c\x1b]52;c;Zm9v\x07";
        assert_eq!(visible_width(s), 3);
        assert_eq!(strip_escapes(s), "abc");
    }

    #[test]
    fn truncate_keeps_escapes_and_whole_clusters() {
        let s = "\x1b[34m漢字ab\x1b[0m";
        let t = truncate_to_width(s, 3);
        assert_eq!(strip_escapes(&t), "漢");
        assert!(t.ends_with("\x1b[0m"));
        assert_eq!(visible_width(&truncate_to_width("hello", 10)), 5);
    }
}
