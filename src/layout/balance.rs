//! Balanced title line breaking.
//!
//! Greedy wrapping decides *how many* lines a title needs; this module then decides *where*
//! the breaks go so the lines have similar lengths. The search is exhaustive and its tie
//! breaking is part of the contract: the first candidate in lexicographic split order wins,
//! which the preview renderer reproduces exactly.

use crate::layout::fit::{MAX_TITLE_LINES, fit_title_font_size};
use crate::layout::metrics::{max_chars_per_line, text_len, wrap_greedy};

/// Final title layout: the lines to draw and the size to draw them at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TitleLayout {
    pub lines: Vec<String>,
    pub font_size: u32,
    /// Set when at least one line is wider than the line budget: the four-line clamp could not
    /// be balanced, or a single word is longer than a whole line.
    pub overflow: bool,
}

impl TitleLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line advance in pixels (`font_size × 1.1`).
    pub fn line_height(&self) -> f64 {
        f64::from(self.font_size) * crate::layout::consts::TITLE_LINE_HEIGHT_RATIO
    }
}

/// Fit the font size for `title`, then balance its lines at that size.
pub fn layout_title(title: &str, max_width: f64) -> TitleLayout {
    let fit = fit_title_font_size(title, max_width);
    let layout = balance_title_text(title, max_width, fit.font_size);
    tracing::debug!(
        base_lines = fit.base_lines,
        font_size = layout.font_size,
        lines = layout.lines.len(),
        overflow = layout.overflow,
        "title layout"
    );
    layout
}

/// Split the upper-cased `title` into at most four balanced lines at `font_size`.
pub fn balance_title_text(title: &str, max_width: f64, font_size: u32) -> TitleLayout {
    let upper = title.to_uppercase();
    let max_chars = max_chars_per_line(max_width, f64::from(font_size));
    let greedy = wrap_greedy(&upper, max_chars);
    let words: Vec<&str> = upper.split_whitespace().collect();

    let finish = |lines: Vec<String>, overflow: bool| TitleLayout {
        lines,
        font_size,
        overflow,
    };

    match greedy.len() {
        0 => finish(vec![String::new()], false),
        1 => {
            let overflow = exceeds(&greedy, max_chars);
            finish(greedy, overflow)
        }
        n if n <= MAX_TITLE_LINES => match best_split(&words, n, max_chars) {
            Some(lines) => finish(lines, false),
            None => {
                let overflow = exceeds(&greedy, max_chars);
                finish(greedy, overflow)
            }
        },
        _ => {
            let mut clamped: Vec<String> = greedy[..MAX_TITLE_LINES - 1].to_vec();
            clamped.push(greedy[MAX_TITLE_LINES - 1..].join(" "));
            let clamped_words: Vec<&str> = clamped.iter().flat_map(|l| l.split(' ')).collect();
            match best_split(&clamped_words, MAX_TITLE_LINES, max_chars) {
                Some(lines) => finish(lines, false),
                None => {
                    tracing::debug!(
                        greedy_lines = greedy.len(),
                        max_chars,
                        "title clamped to four lines without balancing"
                    );
                    finish(clamped, true)
                }
            }
        }
    }
}

fn exceeds(lines: &[String], max_chars: usize) -> bool {
    lines.iter().any(|l| text_len(l) > max_chars)
}

/// Exhaustively split `words` into `parts` non-empty lines, none longer than `max_chars`,
/// minimizing the spread between the longest and shortest line.
///
/// Candidates are visited in lexicographic order of their break indices and only a strictly
/// smaller spread replaces the current best, so the earliest split wins ties. For two lines
/// the spread is `|len1 - len2|`; for more it is the largest pairwise difference. The cost is
/// O(n^(parts-1)), which titles (usually under fifteen words) keep small.
fn best_split(words: &[&str], parts: usize, max_chars: usize) -> Option<Vec<String>> {
    if parts == 0 || words.len() < parts {
        return None;
    }

    // prefix[i] = total chars of words[..i]
    let mut prefix = Vec::with_capacity(words.len() + 1);
    prefix.push(0usize);
    for w in words {
        let last = *prefix.last().unwrap_or(&0);
        prefix.push(last + text_len(w));
    }
    let line_len = |a: usize, b: usize| prefix[b] - prefix[a] + (b - a - 1);

    let mut search = SplitSearch {
        n: words.len(),
        parts,
        max_chars,
        line_len: &line_len,
        cuts: Vec::with_capacity(parts + 1),
        best: None,
    };
    search.cuts.push(0);
    search.visit(0);

    let (cuts, _) = search.best?;
    Some(
        cuts.windows(2)
            .map(|w| words[w[0]..w[1]].join(" "))
            .collect(),
    )
}

struct SplitSearch<'a> {
    n: usize,
    parts: usize,
    max_chars: usize,
    line_len: &'a dyn Fn(usize, usize) -> usize,
    cuts: Vec<usize>,
    best: Option<(Vec<usize>, usize)>,
}

impl SplitSearch<'_> {
    fn visit(&mut self, start: usize) {
        let placed = self.cuts.len() - 1;
        if placed == self.parts - 1 {
            if (self.line_len)(start, self.n) > self.max_chars {
                return;
            }
            self.cuts.push(self.n);
            let spread = self.spread();
            if self.best.as_ref().is_none_or(|(_, s)| spread < *s) {
                self.best = Some((self.cuts.clone(), spread));
            }
            self.cuts.pop();
            return;
        }

        // Leave at least one word for each remaining line.
        let remaining = self.parts - 1 - placed;
        for end in (start + 1)..=(self.n - remaining) {
            if (self.line_len)(start, end) > self.max_chars {
                continue;
            }
            self.cuts.push(end);
            self.visit(end);
            self.cuts.pop();
        }
    }

    fn spread(&self) -> usize {
        let mut lo = usize::MAX;
        let mut hi = 0usize;
        for w in self.cuts.windows(2) {
            let len = (self.line_len)(w[0], w[1]);
            lo = lo.min(len);
            hi = hi.max(len);
        }
        hi - lo
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/balance.rs"]
mod tests;
