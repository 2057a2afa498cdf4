//! Text measurement for the builtin Helvetica faces, in millimetres.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

// Helvetica advance widths for ASCII 32..=126, 1/1000 em (Adobe AFM).
const REGULAR_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// Anything outside the table (including the rupee sign) gets the width of a space.
const DEFAULT_WIDTH: u16 = 278;

const MM_PER_PT: f32 = 25.4 / 72.0;

pub fn char_width(weight: FontWeight, ch: char) -> u16 {
    let code = ch as u32;
    if !(32..=126).contains(&code) {
        return DEFAULT_WIDTH;
    }
    let index = (code - 32) as usize;
    match weight {
        FontWeight::Regular => REGULAR_WIDTHS[index],
        FontWeight::Bold => BOLD_WIDTHS[index],
    }
}

/// Width of `text` set at `font_size` points, in millimetres.
pub fn text_width(text: &str, weight: FontWeight, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| char_width(weight, ch) as u32).sum();
    units as f32 * font_size / 1000.0 * MM_PER_PT
}

/// Break `text` into lines no wider than `max_width` millimetres.
///
/// Lines break between words; a single word wider than the limit is split
/// between characters. Explicit newlines are kept. Always yields at least
/// one line.
pub fn split_text_to_size(text: &str, weight: FontWeight, font_size: f32, max_width: f32) -> Vec<String> {
    let fits = |s: &str| text_width(s, weight, font_size) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current = word.to_string();
                continue;
            }
            for ch in word.chars() {
                current.push(ch);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
        lines.push(current);
    }

    lines
}
