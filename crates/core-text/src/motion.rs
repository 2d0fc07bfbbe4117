//! Word boundary search.
//!
//! Two families live here:
//! * `word_right` / `word_left` - the host editor's word hops (readline
//!   style, line-local). Whitespace is skipped first, then one run of either
//!   punctuation or word clusters is crossed.
//! * `word_end` - the modal `e` / `E` motion. Always advances at least one
//!   cluster, crosses line boundaries, and lands *on* the last cluster of the
//!   next run. `big` treats every non-blank cluster as one class (`E`).
//!
//! Free of editor state; callers pass lines and columns.

use crate::{Position, grapheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Blank,
    Punct,
    Word,
}

fn class(g: &str, big: bool) -> Class {
    if grapheme::is_whitespace(g) {
        Class::Blank
    } else if !big && grapheme::is_punctuation(g) {
        Class::Punct
    } else {
        Class::Word
    }
}

/// Column after skipping whitespace and then one run of same-class clusters.
pub fn word_right(line: &str, col: usize) -> usize {
    let clusters: Vec<&str> = grapheme::iter(line).collect();
    let mut c = col.min(clusters.len());
    while c < clusters.len() && class(clusters[c], false) == Class::Blank {
        c += 1;
    }
    if let Some(first) = clusters.get(c) {
        let run = class(first, false);
        while c < clusters.len() && class(clusters[c], false) == run {
            c += 1;
        }
    }
    c
}

/// Column reached by skipping whitespace backwards and then one run.
pub fn word_left(line: &str, col: usize) -> usize {
    let clusters: Vec<&str> = grapheme::iter(line).collect();
    let mut c = col.min(clusters.len());
    while c > 0 && class(clusters[c - 1], false) == Class::Blank {
        c -= 1;
    }
    if c > 0 {
        let run = class(clusters[c - 1], false);
        while c > 0 && class(clusters[c - 1], false) == run {
            c -= 1;
        }
    }
    c
}

/// End of the next word (`e`, or `E` when `big`). Returns `pos` unchanged when
/// no further word exists in the document.
pub fn word_end(lines: &[String], pos: Position, big: bool) -> Position {
    let mut line = pos.line;
    let mut clusters: Vec<&str> = match lines.get(line) {
        Some(l) => grapheme::iter(l).collect(),
        None => return pos,
    };
    let mut c = pos.col + 1;
    loop {
        while c < clusters.len() && class(clusters[c], big) == Class::Blank {
            c += 1;
        }
        if c < clusters.len() {
            break;
        }
        if line + 1 >= lines.len() {
            return pos;
        }
        line += 1;
        clusters = grapheme::iter(&lines[line]).collect();
        c = 0;
    }
    let run = class(clusters[c], big);
    while c + 1 < clusters.len() && class(clusters[c + 1], big) == run {
        c += 1;
    }
    Position::new(line, c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn word_right_hops_words() {
        let s = "alpha beta gamma";
        assert_eq!(word_right(s, 0), 5);
        assert_eq!(word_right(s, 5), 10);
        assert_eq!(word_right(s, 10), 16);
        assert_eq!(word_right(s, 16), 16);
    }

    #[test]
    fn word_right_treats_punctuation_as_its_own_run() {
        let s = "foo.bar(x)";
        assert_eq!(word_right(s, 0), 3);
        assert_eq!(word_right(s, 3), 4);
        assert_eq!(word_right(s, 7), 8);
    }

    #[test]
    fn word_left_hops_back() {
        let s = "alpha beta gamma";
        assert_eq!(word_left(s, 10), 6);
        assert_eq!(word_left(s, 6), 0);
        assert_eq!(word_left(s, 0), 0);
    }

    #[test]
    fn word_end_lands_on_last_cluster() {
        let l = lines("alpha beta");
        assert_eq!(word_end(&l, Position::new(0, 0), false), Position::new(0, 4));
        assert_eq!(word_end(&l, Position::new(0, 4), false), Position::new(0, 9));
        assert_eq!(word_end(&l, Position::new(0, 9), false), Position::new(0, 9));
    }

    #[test]
    fn word_end_crosses_lines_and_big_ignores_punctuation() {
        let l = lines("ab\n  foo.bar");
        assert_eq!(word_end(&l, Position::new(0, 1), false), Position::new(1, 4));
        assert_eq!(word_end(&l, Position::new(0, 1), true), Position::new(1, 8));
    }
}
