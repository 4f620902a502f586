//! Text normalization applied before synthesis and cache-key computation
//!
//! Coaching responses carry decorative punctuation ("우와~!!") that changes
//! nothing about the spoken output. Normalizing before the cache key is
//! computed makes cosmetically different responses collide on the same key.
//!
//! Rule set (fixed, documented contract):
//! 1. remove every `~`
//! 2. collapse runs of `!` to a single `!`
//! 3. collapse runs of `?` to a single `?`
//! 4. trim surrounding whitespace
//!
//! The function is idempotent: normalizing already-normalized text is a
//! no-op.

/// Normalize response text for synthesis
#[must_use]
pub fn normalize_for_tts(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        match ch {
            '~' => continue,
            '!' | '?' if prev == Some(ch) => continue,
            _ => {},
        }
        out.push(ch);
        prev = Some(ch);
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_tildes() {
        assert_eq!(normalize_for_tts("우리 아가~ 잘했어~"), "우리 아가 잘했어");
    }

    #[test]
    fn collapses_repeated_exclamation_marks() {
        assert_eq!(normalize_for_tts("잘했어!!!"), "잘했어!");
    }

    #[test]
    fn collapses_repeated_question_marks() {
        assert_eq!(normalize_for_tts("뭐야??"), "뭐야?");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_for_tts("  안녕!  "), "안녕!");
    }

    #[test]
    fn keeps_alternating_punctuation() {
        // Only runs of the same character collapse.
        assert_eq!(normalize_for_tts("뭐?!?!"), "뭐?!?!");
    }

    #[test]
    fn normalized_text_is_a_fixed_point() {
        let once = normalize_for_tts("우와~!! 물이야~??");
        let twice = normalize_for_tts(&once);
        assert_eq!(once, twice);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn idempotent_for_arbitrary_input(text in ".*") {
                let once = normalize_for_tts(&text);
                prop_assert_eq!(normalize_for_tts(&once), once.clone());
            }

            #[test]
            fn output_never_contains_tilde(text in ".*") {
                prop_assert!(!normalize_for_tts(&text).contains('~'));
            }
        }
    }
}
