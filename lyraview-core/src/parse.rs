use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ParsedMessage, SlotId, SpeakerKind};

/// `[<timestamp> BST] <glyph> <label>: <body>`. The body may span
/// newlines, so the trailing capture is dot-all.
static MESSAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*\[([^\]]*BST)\]\s*(✨|🧍|🎤)\s*([^:]*):\s?(.*)$").expect("valid regex")
});

/// Parse a candidate line into a message record.
///
/// Returns `None` when the grammar does not match (missing glyph,
/// missing colon); the caller drops the line without comment.
pub fn parse_candidate(id: SlotId, line: &str) -> Option<ParsedMessage> {
    let caps = MESSAGE_RE.captures(line)?;

    let timestamp = caps[1].to_string();
    let speaker_raw = caps[3].trim().to_string();
    let body = caps[4].to_string();

    Some(ParsedMessage {
        id,
        timestamp,
        speaker_kind: speaker_kind(&speaker_raw),
        speaker_raw,
        body,
        thinking: None,
    })
}

/// The label may carry a parenthetical or arrow-delimited suffix such as
/// `Lyra (voice)` or `Lyra → Aurora`; only the base name decides the
/// speaker. Anything that is not Lyra is Aurora, and an empty label
/// degenerates to the system speaker.
fn speaker_kind(label: &str) -> SpeakerKind {
    let base = label.split(['(', '→']).next().unwrap_or_default();
    let base = base.split("->").next().unwrap_or_default().trim();

    if base.is_empty() {
        SpeakerKind::System
    } else if base.eq_ignore_ascii_case("lyra") {
        SpeakerKind::Lyra
    } else {
        SpeakerKind::Aurora
    }
}
