use crate::layout::metrics::count_lines;

/// Font size every title is first measured at.
pub const BASE_FONT_SIZE: u32 = 80;
/// Smallest font size the fitter will shrink to.
pub const MIN_FONT_SIZE: u32 = 40;
/// Largest font size the fitter will grow to.
pub const MAX_FONT_SIZE: u32 = 90;
/// Titles never render on more lines than this.
pub const MAX_TITLE_LINES: usize = 4;

/// Result of fitting a title: the chosen size and the line count measured at the base size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitDecision {
    pub font_size: u32,
    pub base_lines: usize,
}

/// Choose the title font size for `max_width`.
///
/// Short titles (one or two lines at the base size) grow while they stay within two lines.
/// Three- and four-line titles grow only while the line count is unchanged, so a bigger font
/// never silently reflows them into fewer lines. Longer titles shrink until they fit in four
/// lines; if even the minimum size does not fit, the base size is kept and the balancer
/// clamps the overflow.
pub fn fit_title_font_size(title: &str, max_width: f64) -> FitDecision {
    let base_lines = count_lines(title, max_width, BASE_FONT_SIZE);

    let font_size = match base_lines {
        0..=2 => grow_while(title, max_width, |n| n <= 2),
        3 => grow_while(title, max_width, |n| n == 3),
        4 => grow_while(title, max_width, |n| n == 4),
        _ => (MIN_FONT_SIZE..BASE_FONT_SIZE)
            .rev()
            .find(|&size| count_lines(title, max_width, size) <= MAX_TITLE_LINES)
            .unwrap_or(BASE_FONT_SIZE),
    };

    FitDecision {
        font_size,
        base_lines,
    }
}

/// Shorthand for [`fit_title_font_size`] when only the size matters.
pub fn auto_fit_font_size(title: &str, max_width: f64) -> u32 {
    fit_title_font_size(title, max_width).font_size
}

fn grow_while(title: &str, max_width: f64, keep: impl Fn(usize) -> bool) -> u32 {
    let mut best = BASE_FONT_SIZE;
    for size in (BASE_FONT_SIZE + 1)..=MAX_FONT_SIZE {
        if !keep(count_lines(title, max_width, size)) {
            break;
        }
        best = size;
    }
    best
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
