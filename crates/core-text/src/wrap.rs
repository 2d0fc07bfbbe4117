//! Word-wrap segmenter.
//!
//! Splits one logical line into chunks whose visible width fits `max_width`.
//! Breaks happen at the start of a word that follows whitespace when such an
//! opportunity exists inside the chunk; otherwise the chunk is cut at the
//! cluster that would overflow (long words are hard-broken).
//!
//! Every chunk records its `[start, end)` column range in the source line so
//! cursor and selection offsets can be mapped back to a wrapped row.
//! Invariants:
//! * chunks are contiguous: `chunks[i].end == chunks[i+1].start`;
//! * the first chunk starts at 0 and the last ends at the line length;
//! * an empty line (or zero width) yields exactly one empty chunk.

use crate::segment::segments;
use crate::width::visible_width;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapSegment {
    pub text: String,
    /// First column (inclusive) in the source line.
    pub start: usize,
    /// Last column (exclusive) in the source line.
    pub end: usize,
}

impl WrapSegment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split a line into word-wrapped chunks of at most `max_width` cells.
pub fn word_wrap_line(line: &str, max_width: usize) -> Vec<WrapSegment> {
    let segs = segments(line);
    if segs.is_empty() || max_width == 0 {
        return vec![WrapSegment {
            text: line.to_string(),
            start: 0,
            end: segs.len(),
        }];
    }
    if visible_width(line) <= max_width {
        return vec![WrapSegment {
            text: line.to_string(),
            start: 0,
            end: segs.len(),
        }];
    }

    let mut chunks = Vec::new();
    let mut chunk_start = 0usize;
    let mut current_width = 0usize;
    // Column where the next word begins after whitespace, and the chunk width up to it.
    let mut wrap_opp: Option<(usize, usize)> = None;

    let push = |chunks: &mut Vec<WrapSegment>, start: usize, end: usize| {
        let text: String = segs[start..end].iter().map(|s| s.cluster).collect();
        chunks.push(WrapSegment { text, start, end });
    };

    for (idx, seg) in segs.iter().enumerate() {
        let w = seg.width as usize;
        if current_width + w > max_width {
            if let Some((opp, opp_width)) = wrap_opp
                && opp > chunk_start
            {
                push(&mut chunks, chunk_start, opp);
                chunk_start = opp;
                current_width -= opp_width;
            }
            // The word carried over from the break may itself leave no room.
            if current_width + w > max_width && chunk_start < idx {
                push(&mut chunks, chunk_start, idx);
                chunk_start = idx;
                current_width = 0;
            }
            wrap_opp = None;
        }
        current_width += w;

        let is_ws = crate::grapheme::is_whitespace(seg.cluster);
        if is_ws
            && let Some(next) = segs.get(idx + 1)
            && !crate::grapheme::is_whitespace(next.cluster)
        {
            wrap_opp = Some((idx + 1, current_width));
        }
    }
    push(&mut chunks, chunk_start, segs.len());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(chunks: &[WrapSegment]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn short_line_is_single_chunk() {
        let chunks = word_wrap_line("hello", 10);
        assert_eq!(texts(&chunks), vec!["hello"]);
        assert_eq!((chunks[0].start, chunks[0].end), (0, 5));
    }

    #[test]
    fn empty_line_yields_one_empty_chunk() {
        let chunks = word_wrap_line("", 10);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
    }

    #[test]
    fn breaks_long_words_hard() {
        let chunks = word_wrap_line("abcdefgh", 3);
        assert_eq!(texts(&chunks), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn breaks_at_word_start_after_whitespace() {
        let chunks = word_wrap_line("hello world again", 12);
        assert_eq!(texts(&chunks), vec!["hello world ", "again"]);
        assert_eq!(chunks[1].start, 12);
        assert_eq!(chunks[1].end, 17);
    }

    #[test]
    fn wide_clusters_count_two_cells() {
        let chunks = word_wrap_line("漢字漢字", 5);
        assert_eq!(texts(&chunks), vec!["漢字", "漢字"]);
        assert_eq!(chunks[1].start, 2);
    }

    #[test]
    fn carried_word_is_hard_broken_when_it_still_overflows() {
        let chunks = word_wrap_line(" 漢漢x漢", 6);
        assert_eq!(texts(&chunks), vec![" ", "漢漢x", "漢"]);
        for chunk in &chunks {
            assert!(visible_width(&chunk.text) <= 6);
        }
    }

    proptest! {
        #[test]
        fn chunks_are_contiguous_and_cover_the_line(line in "[a-z ]{0,60}", width in 1usize..20) {
            let chunks = word_wrap_line(&line, width);
            prop_assert!(!chunks.is_empty());
            prop_assert_eq!(chunks[0].start, 0);
            prop_assert_eq!(chunks.last().unwrap().end, line.chars().count());
            for pair in chunks.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
            prop_assert_eq!(joined, line);
        }

        #[test]
        fn chunks_fit_width(line in "[a-z]{1,8}( [a-z]{1,8}){0,6}", width in 8usize..20) {
            for chunk in word_wrap_line(&line, width) {
                prop_assert!(visible_width(chunk.text.trim_end()) <= width);
            }
        }

        #[test]
        fn wide_clusters_never_overflow(line in "[a-z漢字 ]{0,40}", width in 2usize..20) {
            let chunks = word_wrap_line(&line, width);
            for chunk in &chunks {
                prop_assert!(visible_width(&chunk.text) <= width, "{:?}", chunk.text);
            }
            let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
            prop_assert_eq!(joined, line);
        }
    }
}
