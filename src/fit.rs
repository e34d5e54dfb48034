use crate::text_metrics::TextMetrics;

/// Smallest font size the fitter will accept. At this floor the result is
/// taken even if the block overflows the box vertically.
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Line height as a multiple of the font size. Approximates typical spacing
/// for the default font stack without a per-font metrics lookup.
pub const LINE_HEIGHT_RATIO: f32 = 1.4;

/// A fitted label: the chosen font size and the wrapped lines in visual
/// top-to-bottom order. Recomputed per render, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub font_size: f32,
    pub lines: Vec<String>,
}

impl FitResult {
    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT_RATIO
    }
}

/// Finds the largest font size in `[MIN_FONT_SIZE, base_font_size]` whose
/// greedily wrapped lines fit `box_w` x `box_h`, stepping down one unit at a
/// time. At the floor the last attempt is accepted as-is, so the result
/// always carries at least one line and never drops label content.
pub fn fit_text(
    text: &str,
    box_w: f32,
    box_h: f32,
    base_font_size: f32,
    metrics: &dyn TextMetrics,
) -> FitResult {
    let floor = MIN_FONT_SIZE.min(base_font_size);
    let mut font_size = base_font_size.max(floor);

    loop {
        let lines = wrap_text(text, box_w, font_size, metrics);
        let block_height = lines.len() as f32 * font_size * LINE_HEIGHT_RATIO;
        if block_height <= box_h || font_size <= floor {
            return FitResult { font_size, lines };
        }
        font_size = (font_size - 1.0).max(floor);
    }
}

/// Greedy word wrap against measured widths. Words wider than the box on
/// their own are hard-broken character by character.
fn wrap_text(text: &str, box_w: f32, font_size: f32, metrics: &dyn TextMetrics) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if metrics.text_width(&candidate, font_size) <= box_w {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if metrics.text_width(word, font_size) <= box_w {
            current.push_str(word);
        } else {
            let mut chunks = break_word(word, box_w, font_size, metrics);
            if let Some(last) = chunks.pop() {
                lines.extend(chunks);
                current = last;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Splits an oversized word into the minimum chunks that each fit `box_w`.
/// Every chunk keeps at least one character so progress is guaranteed even
/// when a single glyph is wider than the box.
fn break_word(word: &str, box_w: f32, font_size: f32, metrics: &dyn TextMetrics) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    for ch in word.chars() {
        let mut candidate = chunk.clone();
        candidate.push(ch);
        if !chunk.is_empty() && metrics.text_width(&candidate, font_size) > box_w {
            chunks.push(std::mem::take(&mut chunk));
            chunk.push(ch);
        } else {
            chunk = candidate;
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_metrics::{FontMetrics, HeuristicMetrics, TextMetrics};

    fn fit(text: &str, w: f32, h: f32) -> FitResult {
        fit_text(text, w, h, 14.0, &HeuristicMetrics)
    }

    #[test]
    fn short_label_keeps_base_font_size() {
        let result = fit("Go", 200.0, 80.0);
        assert_eq!(result.font_size, 14.0);
        assert_eq!(result.lines, vec!["Go"]);
    }

    #[test]
    fn font_size_stays_within_bounds() {
        for text in ["x", "some medium label here", &"word ".repeat(40)] {
            let result = fit(text, 90.0, 50.0);
            assert!(result.font_size >= MIN_FONT_SIZE);
            assert!(result.font_size <= 14.0);
            assert!(!result.lines.is_empty());
        }
    }

    #[test]
    fn empty_text_still_returns_one_line() {
        let result = fit("", 100.0, 40.0);
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0], "");
    }

    #[test]
    fn long_text_shrinks_and_wraps() {
        let result = fit("this label is far too long for such a small box", 80.0, 40.0);
        assert!(result.font_size < 14.0);
        assert!(result.lines.len() > 1);
    }

    #[test]
    fn floor_fit_is_accepted_even_when_overflowing() {
        let result = fit(&"overflow ".repeat(30), 60.0, 20.0);
        assert_eq!(result.font_size, MIN_FONT_SIZE);
        assert!(!result.lines.is_empty());
    }

    #[test]
    fn oversized_word_is_hard_broken_without_losing_characters() {
        let word = "Supercalifragilisticexpialidocious";
        let result = fit(word, 50.0, 30.0);
        assert!(result.lines.len() > 1);
        let rejoined: String = result.lines.concat();
        assert_eq!(rejoined, word);
    }

    #[test]
    fn hard_break_chunks_individually_fit() {
        let metrics = HeuristicMetrics;
        let word = "abcdefghijklmnopqrstuvwxyz";
        let chunks = break_word(word, 40.0, 10.0, &metrics);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(metrics.text_width(chunk, 10.0) <= 40.0);
        }
        assert_eq!(chunks.concat(), word);
    }

    #[test]
    fn single_glyph_wider_than_box_is_kept() {
        let result = fit("W", 1.0, 10.0);
        assert_eq!(result.lines, vec!["W"]);
    }

    #[test]
    fn heuristic_and_precise_agree_on_line_counts_for_short_labels() {
        let Some(precise) = FontMetrics::load("sans-serif") else {
            return;
        };
        for text in ["Start", "Check input", "Save and exit", "Is valid?"] {
            let a = fit_text(text, 120.0, 60.0, 14.0, &HeuristicMetrics).lines.len() as i64;
            let b = fit_text(text, 120.0, 60.0, 14.0, &precise).lines.len() as i64;
            assert!(
                (a - b).abs() <= 1,
                "line counts diverged for {text:?}: heuristic {a}, precise {b}"
            );
        }
    }

    #[test]
    fn wrap_respects_measured_width() {
        let metrics = HeuristicMetrics;
        let lines = wrap_text("alpha beta gamma delta", 60.0, 10.0, &metrics);
        for line in &lines {
            // Hard-broken chunks aside, every wrapped line fits the box.
            assert!(metrics.text_width(line, 10.0) <= 60.0, "line too wide: {line:?}");
        }
    }
}
