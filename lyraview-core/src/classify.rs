/// Emotional-texture annotations were written in two spellings over the
/// life of the log; both are noise for transcript purposes.
const NOISE_MARKERS: &[&str] = &["💭 Emotional Texture:", "💭 Emotional texture:"];

/// Early logs carried Lyra's reasoning as its own detached line.
const LEGACY_THINKING_MARKER: &str = "🧠 Lyra's Thoughts:";

const TIMESTAMP_OPENER: &str = "[2025-";
const TIMEZONE_SUFFIX: &str = "BST]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Discard,
    LegacyThinking(String),
    Candidate,
}

/// Decide what a raw log line is before any parsing happens.
///
/// The candidate gate requires both the year-prefixed bracket opener and
/// the `BST]` suffix; lines from any other era or timezone are dropped.
/// That narrowing is inherited from the historical log writer and kept
/// verbatim.
pub fn classify_line(line: &str) -> LineClass {
    if NOISE_MARKERS.iter().any(|marker| line.contains(marker)) {
        return LineClass::Discard;
    }

    if let Some(at) = line.find(LEGACY_THINKING_MARKER) {
        let text = line[at + LEGACY_THINKING_MARKER.len()..].trim().to_string();
        return LineClass::LegacyThinking(text);
    }

    if line.contains(TIMESTAMP_OPENER) && line.contains(TIMEZONE_SUFFIX) {
        return LineClass::Candidate;
    }

    LineClass::Discard
}

#[cfg(test)]
mod tests {
    use super::{LineClass, classify_line};

    #[test]
    fn discards_emotional_texture_lines_in_both_spellings() {
        assert_eq!(
            classify_line("💭 Emotional Texture: warm and open"),
            LineClass::Discard
        );
        assert_eq!(
            classify_line("💭 Emotional texture: quiet focus"),
            LineClass::Discard
        );
    }

    #[test]
    fn extracts_legacy_thinking_text_after_marker() {
        let class = classify_line("🧠 Lyra's Thoughts:   considering options  ");
        assert_eq!(
            class,
            LineClass::LegacyThinking("considering options".to_string())
        );
    }

    #[test]
    fn legacy_thinking_marker_with_no_text_yields_empty_content() {
        assert_eq!(
            classify_line("🧠 Lyra's Thoughts:"),
            LineClass::LegacyThinking(String::new())
        );
    }

    #[test]
    fn accepts_candidate_with_timestamp_and_timezone_suffix() {
        assert_eq!(
            classify_line("[2025-06-01 10:00:00 BST] 🧍 Aurora: Hello"),
            LineClass::Candidate
        );
    }

    #[test]
    fn drops_line_lacking_timezone_suffix_even_if_well_formed() {
        assert_eq!(
            classify_line("[2025-06-01 10:00:00 UTC] 🧍 Aurora: Hello"),
            LineClass::Discard
        );
    }

    #[test]
    fn drops_line_from_another_year() {
        assert_eq!(
            classify_line("[2024-12-31 23:59:59 BST] 🧍 Aurora: Hello"),
            LineClass::Discard
        );
    }

    #[test]
    fn drops_unstructured_chatter() {
        assert_eq!(classify_line("session resumed"), LineClass::Discard);
        assert_eq!(classify_line(""), LineClass::Discard);
    }

    #[test]
    fn noise_marker_wins_over_candidate_shape() {
        assert_eq!(
            classify_line("[2025-06-01 10:00:00 BST] 💭 Emotional Texture: tender"),
            LineClass::Discard
        );
    }
}
