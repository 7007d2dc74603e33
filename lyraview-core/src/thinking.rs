use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ParsedMessage, SlotId, ThinkingAttachment};

static INLINE_THINKING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<thinking>(.*?)</thinking>").expect("valid regex"));

/// Pull the first inline `<thinking>` region out of the body.
///
/// Only the first region is extracted (non-greedy); any further regions
/// stay in the body verbatim. A message that already carries thinking is
/// left alone: attached content is never re-parsed.
pub fn extract_inline_thinking(message: &mut ParsedMessage) {
    if message.thinking.is_some() {
        return;
    }

    let Some(caps) = INLINE_THINKING_RE.captures(&message.body) else {
        return;
    };

    let inner = caps[1].trim().to_string();
    let range = caps.get(0).map(|whole| whole.range());

    if let Some(range) = range {
        let mut body = message.body.clone();
        body.replace_range(range, "");
        message.body = body.trim().to_string();
        message.thinking = Some(inner);
    }
}

/// Bind a legacy detached thinking block to the most recent Lyra slot.
///
/// With no eligible predecessor the block is an orphan and is dropped
/// without error.
pub fn bind_attachment(last_lyra_slot: Option<SlotId>, text: String) -> Option<ThinkingAttachment> {
    last_lyra_slot.map(|target_slot| ThinkingAttachment { target_slot, text })
}

#[cfg(test)]
mod tests {
    use super::{bind_attachment, extract_inline_thinking};
    use crate::model::{ParsedMessage, SpeakerKind};

    fn lyra_message(body: &str) -> ParsedMessage {
        ParsedMessage {
            id: 0,
            timestamp: "2025-06-01 10:00:05 BST".to_string(),
            speaker_raw: "Lyra".to_string(),
            speaker_kind: SpeakerKind::Lyra,
            body: body.to_string(),
            thinking: None,
        }
    }

    #[test]
    fn extracts_first_inline_region_and_trims_body() {
        let mut message = lyra_message("before <thinking>inner reasoning</thinking> after");
        extract_inline_thinking(&mut message);
        assert_eq!(message.thinking.as_deref(), Some("inner reasoning"));
        assert_eq!(message.body, "before  after");
    }

    #[test]
    fn second_region_stays_in_body_verbatim() {
        let mut message =
            lyra_message("<thinking>one</thinking> mid <thinking>two</thinking> end");
        extract_inline_thinking(&mut message);
        assert_eq!(message.thinking.as_deref(), Some("one"));
        assert_eq!(message.body, "mid <thinking>two</thinking> end");
    }

    #[test]
    fn body_without_region_passes_through_unchanged() {
        let mut message = lyra_message("nothing to see");
        extract_inline_thinking(&mut message);
        assert_eq!(message.thinking, None);
        assert_eq!(message.body, "nothing to see");
    }

    #[test]
    fn already_attached_thinking_is_never_reparsed() {
        let mut message = lyra_message("<thinking>late</thinking> rest");
        message.thinking = Some("earlier".to_string());
        extract_inline_thinking(&mut message);
        assert_eq!(message.thinking.as_deref(), Some("earlier"));
        assert_eq!(message.body, "<thinking>late</thinking> rest");
    }

    #[test]
    fn region_spanning_newlines_is_extracted() {
        let mut message = lyra_message("a <thinking>line one\nline two</thinking> b");
        extract_inline_thinking(&mut message);
        assert_eq!(message.thinking.as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn attachment_binds_to_last_lyra_slot() {
        let attachment =
            bind_attachment(Some(4), "considering options".to_string()).expect("must bind");
        assert_eq!(attachment.target_slot, 4);
        assert_eq!(attachment.text, "considering options");
    }

    #[test]
    fn orphan_attachment_is_dropped() {
        assert!(bind_attachment(None, "nowhere to go".to_string()).is_none());
    }
}
