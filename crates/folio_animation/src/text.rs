//! Typewriter-style text substitution
//!
//! A reveal replaces an element's text with a configured string, one unit at
//! a time. The configured string is opaque: it is split into Unicode scalar
//! values (or words) and never normalised.

/// Unit of substitution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextDelimiter {
    #[default]
    Character,
    Word,
}

/// Text to reveal over the course of a tween
#[derive(Clone, Debug, PartialEq)]
pub struct TextReveal {
    pub value: String,
    pub delimiter: TextDelimiter,
}

impl TextReveal {
    /// Reveal `value` character by character
    pub fn characters(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            delimiter: TextDelimiter::Character,
        }
    }

    /// Reveal `value` word by word
    pub fn words(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            delimiter: TextDelimiter::Word,
        }
    }

    /// Number of substitution units in the target string
    pub fn len(&self) -> usize {
        match self.delimiter {
            TextDelimiter::Character => self.value.chars().count(),
            TextDelimiter::Word => self.value.split(' ').count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Text shown at `progress` (clamped to 0.0..=1.0)
    ///
    /// The first `n` units come from the target string and the remainder of
    /// `original` (past those `n` units) is kept, so a longer original text
    /// is overwritten progressively rather than cleared up front. Once every
    /// target unit is shown the result is exactly the target string.
    pub fn render(&self, original: &str, progress: f32) -> String {
        let progress = progress.clamp(0.0, 1.0);
        match self.delimiter {
            TextDelimiter::Character => {
                let target: Vec<char> = self.value.chars().collect();
                let shown = revealed_units(target.len(), progress);
                if shown == target.len() {
                    return self.value.clone();
                }
                target[..shown]
                    .iter()
                    .copied()
                    .chain(original.chars().skip(shown))
                    .collect()
            }
            TextDelimiter::Word => {
                let target: Vec<&str> = self.value.split(' ').collect();
                let shown = revealed_units(target.len(), progress);
                if shown == target.len() {
                    return self.value.clone();
                }
                target[..shown]
                    .iter()
                    .copied()
                    .chain(original.split(' ').skip(shown))
                    .filter(|w| !w.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }
}

fn revealed_units(len: usize, progress: f32) -> usize {
    ((len as f32 * progress).round() as usize).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_characters_reveal_progressively() {
        let reveal = TextReveal::characters("lens");
        assert_eq!(reveal.render("", 0.0), "");
        assert_eq!(reveal.render("", 0.5), "le");
        assert_eq!(reveal.render("", 1.0), "lens");
    }

    #[test]
    fn test_original_text_overwritten_in_place() {
        let reveal = TextReveal::characters("ab");
        assert_eq!(reveal.render("wxyz", 0.0), "wxyz");
        assert_eq!(reveal.render("wxyz", 0.5), "axyz");
        assert_eq!(reveal.render("wxyz", 1.0), "ab");
    }

    #[test]
    fn test_longer_original_dropped_at_end() {
        let reveal = TextReveal::words("capturing stories");
        assert_eq!(reveal.render("lorem ipsum dolor sit", 0.5), "capturing ipsum dolor sit");
        assert_eq!(reveal.render("lorem ipsum dolor sit", 1.0), "capturing stories");
    }

    #[test]
    fn test_opaque_multibyte_content() {
        // Mis-encoded sequences are revealed as-is, one scalar at a time
        let reveal = TextReveal::characters("lens â€“ not");
        assert_eq!(reveal.len(), 12);
        assert_eq!(reveal.render("", 6.0 / 12.0), "lens â");
        assert_eq!(reveal.render("", 1.0), "lens â€“ not");
    }

    #[test]
    fn test_word_reveal() {
        let reveal = TextReveal::words("capturing stories through");
        assert_eq!(reveal.len(), 3);
        assert_eq!(reveal.render("", 0.34), "capturing");
        assert_eq!(reveal.render("", 1.0), "capturing stories through");
    }

    #[test]
    fn test_progress_clamped() {
        let reveal = TextReveal::characters("abc");
        assert_eq!(reveal.render("", 1.4), "abc");
        assert_eq!(reveal.render("", -0.2), "");
    }
}
