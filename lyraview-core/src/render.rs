use crate::error::{Result, TranscriptError};
use crate::model::{ParsedMessage, SpeakerKind};

/// Render the settled transcript as markdown, one numbered section per
/// slot. Thinking content is shown as a quoted aside above the body.
#[must_use]
pub fn render_transcript_markdown(slots: &[ParsedMessage]) -> String {
    let mut output = String::new();
    output.push_str("# Transcript\n\n");

    if slots.is_empty() {
        output.push_str("_No messages found._\n");
        return output;
    }

    for slot in slots {
        let title = match slot.speaker_kind {
            SpeakerKind::Lyra => "Lyra",
            SpeakerKind::Aurora => "Aurora",
            SpeakerKind::System => "System",
        };

        output.push_str(&format!("## {}. {} — {}\n\n", slot.id + 1, title, slot.timestamp));

        if let Some(thinking) = &slot.thinking {
            output.push_str(&format!("> 💭 {}\n\n", thinking.trim()));
        }

        output.push_str(slot.body.trim());
        output.push_str("\n\n");
    }

    output
}

/// Serialize the settled transcript as pretty JSON for `--raw` output.
///
/// # Errors
///
/// Returns `TranscriptError::Serialization` if encoding fails.
pub fn transcript_to_raw_json(slots: &[ParsedMessage]) -> Result<String> {
    serde_json::to_string_pretty(slots)
        .map_err(|err| TranscriptError::Serialization(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{render_transcript_markdown, transcript_to_raw_json};
    use crate::model::{ParsedMessage, SpeakerKind};

    fn slot(id: usize, kind: SpeakerKind, body: &str, thinking: Option<&str>) -> ParsedMessage {
        ParsedMessage {
            id,
            timestamp: "2025-06-01 10:00:00 BST".to_string(),
            speaker_raw: "whoever".to_string(),
            speaker_kind: kind,
            body: body.to_string(),
            thinking: thinking.map(ToString::to_string),
        }
    }

    #[test]
    fn renders_numbered_speaker_sections_in_order() {
        let slots = vec![
            slot(0, SpeakerKind::Aurora, "Hello", None),
            slot(1, SpeakerKind::Lyra, "Hi back", None),
        ];

        let output = render_transcript_markdown(&slots);
        assert!(output.contains("## 1. Aurora — 2025-06-01 10:00:00 BST"));
        assert!(output.contains("## 2. Lyra — 2025-06-01 10:00:00 BST"));
        assert!(output.find("Hello") < output.find("Hi back"));
    }

    #[test]
    fn thinking_renders_as_quoted_aside() {
        let slots = vec![slot(0, SpeakerKind::Lyra, "decided", Some("weighing it"))];
        let output = render_transcript_markdown(&slots);
        assert!(output.contains("> 💭 weighing it"));
        assert!(output.find("weighing it") < output.find("decided"));
    }

    #[test]
    fn empty_transcript_renders_placeholder() {
        let output = render_transcript_markdown(&[]);
        assert!(output.contains("_No messages found._"));
    }

    #[test]
    fn raw_json_carries_speaker_kind() {
        let slots = vec![slot(0, SpeakerKind::Lyra, "hi", None)];
        let json = transcript_to_raw_json(&slots).expect("serialize");
        assert!(json.contains("\"speaker_kind\": \"lyra\""));
        assert!(json.contains("\"body\": \"hi\""));
    }
}
