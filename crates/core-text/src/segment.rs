//! Normalization + segmentation adapter.
//!
//! Contract:
//! - `normalize` returns the NFC form of raw input (typed keys, pastes,
//!   clipboard reads) so a decomposed `e + ◌́` and a precomposed `é` occupy the
//!   same single column once inserted.
//! - `segments` splits one logical line into grapheme clusters carrying their
//!   column index and display width. Clusters are in order, non-overlapping
//!   and concatenate back to the input line.
//! - Does not log content.

use crate::egc_width;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub cluster: &'a str,
    pub col: usize,
    pub width: u16,
}

/// NFC normalization of raw input.
pub fn normalize(input: &str) -> String {
    input.nfc().collect()
}

/// Segment a line into clusters with their column index and width.
pub fn segments(line: &str) -> Vec<Segment<'_>> {
    line.graphemes(true)
        .enumerate()
        .map(|(col, cluster)| Segment {
            cluster,
            col,
            width: egc_width(cluster),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nfc_equivalence_single_cluster() {
        let decomposed = normalize("e\u{0301}");
        let composed = normalize("\u{00E9}");
        assert_eq!(decomposed, composed);
        assert_eq!(segments(&decomposed).len(), 1);
    }

    #[test]
    fn segments_cover_the_line_in_order() {
        let s = "漢😀a b";
        let segs = segments(s);
        let joined: String = segs.iter().map(|seg| seg.cluster).collect();
        assert_eq!(joined, s);
        for (idx, seg) in segs.iter().enumerate() {
            assert_eq!(seg.col, idx);
        }
        assert_eq!(segs[0].width, 2);
        assert_eq!(segs[2].width, 1);
    }
}
