use std::fmt;

use serde::Serialize;

/// Position of a message in the filtered transcript. Assigned once at
/// parse time, never reused.
pub type SlotId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerKind {
    Lyra,
    Aurora,
    System,
}

impl fmt::Display for SpeakerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lyra => write!(f, "lyra"),
            Self::Aurora => write!(f, "aurora"),
            Self::System => write!(f, "system"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedMessage {
    pub id: SlotId,
    pub timestamp: String,
    pub speaker_raw: String,
    pub speaker_kind: SpeakerKind,
    pub body: String,
    pub thinking: Option<String>,
}

/// A legacy detached thinking block bound to an already-emitted slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThinkingAttachment {
    pub target_slot: SlotId,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Generated,
    Uploaded,
    LegacySharedUploaded,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated => write!(f, "generated"),
            Self::Uploaded => write!(f, "uploaded"),
            Self::LegacySharedUploaded => write!(f, "legacy-shared"),
        }
    }
}

/// One image reference found in a message body. `raw_token` is the
/// exact substring to substitute, kept verbatim so replacement stays
/// idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub kind: ImageKind,
    pub raw_path: String,
    pub raw_token: String,
}

/// Outcome of one asset resolution. An absent `asset_url` means the
/// resolution failed softly; the pipeline keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub raw_path: String,
    pub asset_url: Option<String>,
}
