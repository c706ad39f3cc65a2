use crate::{config::FontRole, text::painter::TextPainter};

/// Greedy word wrap against measured pixel widths.
///
/// Words are appended while `current + " " + word` fits in `max_width`. Once `max_lines` lines
/// are committed the remaining words are dropped without any overflow marker. A word that is
/// wider than `max_width` on its own is split at character boundaries.
pub fn wrap_words(
    painter: &dyn TextPainter,
    role: FontRole,
    text: &str,
    max_width: i32,
    max_lines: usize,
) -> Vec<String> {
    let fits = |s: &str| painter.measure(role, s).width() <= max_width;

    let mut lines = Vec::<String>::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if lines.len() >= max_lines {
            break;
        }

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
            if lines.len() >= max_lines {
                break;
            }
        }

        if fits(word) {
            current = word.to_string();
            continue;
        }

        let mut pieces = split_oversized(word, &fits);
        current = pieces.pop().unwrap_or_default();
        for piece in pieces {
            lines.push(piece);
            if lines.len() >= max_lines {
                current.clear();
                break;
            }
        }
    }

    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    lines
}

/// Split one word into the fewest leading pieces that fit; a single glyph is never split further.
fn split_oversized(word: &str, fits: &dyn Fn(&str) -> bool) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut acc = String::new();
    for c in word.chars() {
        let mut next = acc.clone();
        next.push(c);
        if acc.is_empty() || fits(&next) {
            acc = next;
        } else {
            pieces.push(std::mem::replace(&mut acc, c.to_string()));
        }
    }
    if !acc.is_empty() {
        pieces.push(acc);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use image::RgbImage;

    use super::*;
    use crate::{foundation::core::Rgb8, text::painter::TextBounds};

    /// Every char is 10px wide, 20px tall.
    struct Mono;

    impl TextPainter for Mono {
        fn measure(&self, _role: FontRole, text: &str) -> TextBounds {
            TextBounds {
                left: 0,
                top: 0,
                right: 10 * text.chars().count() as i32,
                bottom: 20,
            }
        }

        fn draw(&self, _: &mut RgbImage, _: FontRole, _: i32, _: i32, _: Rgb8, _: &str) {}
    }

    fn wrap(text: &str, max_width: i32) -> Vec<String> {
        wrap_words(&Mono, FontRole::Title, text, max_width, 3)
    }

    #[test]
    fn short_title_is_one_line() {
        assert_eq!(wrap("Mob Psycho 100", 200), vec!["Mob Psycho 100"]);
    }

    #[test]
    fn breaks_when_next_word_overflows() {
        // "aaa bbb" = 70px fits, "aaa bbb ccc" = 110px does not.
        assert_eq!(wrap("aaa bbb ccc ddd", 100), vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn exact_fit_is_accepted() {
        assert_eq!(wrap("aaaa bbbbb", 100), vec!["aaaa bbbbb"]);
    }

    #[test]
    fn caps_at_three_lines_and_drops_the_rest() {
        let lines = wrap("one two three four five six", 50);
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn oversized_word_is_split_within_budget() {
        let lines = wrap("abcdefghijkl xy", 50);
        assert_eq!(lines, vec!["abcde", "fghij", "kl xy"]);
        for l in &lines {
            assert!(Mono.measure(FontRole::Title, l).width() <= 50);
        }
    }

    #[test]
    fn oversized_word_respects_line_cap() {
        let lines = wrap("abcdefghijklmnopqrstuvwxyz", 50);
        assert_eq!(lines, vec!["abcde", "fghij", "klmno"]);
    }

    #[test]
    fn whitespace_only_title_has_no_lines() {
        assert!(wrap("   ", 100).is_empty());
    }
}
