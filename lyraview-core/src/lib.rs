pub mod assemble;
pub mod classify;
pub mod error;
pub mod hydrate;
pub mod model;
pub mod parse;
pub mod render;
pub mod source;
pub mod surface;
pub mod thinking;

pub use assemble::HistoryAssembler;
pub use classify::{LineClass, classify_line};
pub use error::{Result, TranscriptError};
pub use model::{
    ImageKind, ImageReference, ParsedMessage, ResolvedAsset, SlotId, SpeakerKind,
    ThinkingAttachment,
};
pub use render::{render_transcript_markdown, transcript_to_raw_json};
pub use source::{AssetSource, HistorySource};
pub use surface::{RenderSurface, TranscriptBuffer};
