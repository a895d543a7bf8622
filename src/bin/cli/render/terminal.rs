use hanja_lib::catalog::{CharacterRecord, Grade};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Wrap `text` in `code` when colors are on
pub fn paint(text: &str, code: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", code, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Cut to `max` characters, marking the cut with "..."
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

/// Grade badge with a color per band: 8급-6급 green, 5급-3급 yellow, above cyan
pub fn grade_badge(grade: Grade, use_color: bool) -> String {
    let code = match grade.rank() {
        1..=5 => Color::GREEN,
        6..=11 => Color::YELLOW,
        _ => Color::CYAN,
    };
    paint(&format!("{:<4}", grade.label()), code, use_color)
}

/// One search result line: grade, glyph, reading, meaning
pub fn record_line(record: &CharacterRecord, meaning_width: usize, use_color: bool) -> String {
    format!(
        "{} {} {:<4} {}",
        grade_badge(record.grade, use_color),
        paint(&record.hanja, Color::BOLD, use_color),
        record.main_sound,
        truncate_chars(&record.meaning, meaning_width),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("물 수", 10), "물 수");
        assert_eq!(truncate_chars("가나다라마바", 5), "가나...");
    }

    #[test]
    fn test_paint_without_color_is_plain() {
        assert_eq!(paint("水", Color::BOLD, false), "水");
        assert_eq!(paint("水", Color::BOLD, true), "\x1b[1m水\x1b[0m");
    }
}
