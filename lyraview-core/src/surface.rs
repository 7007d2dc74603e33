use std::sync::Mutex;

use crate::model::{ParsedMessage, SlotId};

/// The ordered container the transcript is emitted into.
///
/// Slots are appended synchronously in transcript order; hydration and
/// legacy thinking attachment later replace the content of an existing
/// slot by id. Slot order itself never changes.
pub trait RenderSurface: Send + Sync {
    fn append_slot(&self, slot: ParsedMessage);
    fn replace_body(&self, id: SlotId, body: String);
    fn replace_thinking(&self, id: SlotId, thinking: String);
}

/// In-memory render surface backing the CLI output and tests.
#[derive(Debug, Default)]
pub struct TranscriptBuffer {
    slots: Mutex<Vec<ParsedMessage>>,
}

impl TranscriptBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<ParsedMessage> {
        self.slots.lock().expect("slot buffer lock").clone()
    }
}

impl RenderSurface for TranscriptBuffer {
    fn append_slot(&self, slot: ParsedMessage) {
        self.slots.lock().expect("slot buffer lock").push(slot);
    }

    fn replace_body(&self, id: SlotId, body: String) {
        let mut slots = self.slots.lock().expect("slot buffer lock");
        if let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) {
            slot.body = body;
        }
    }

    fn replace_thinking(&self, id: SlotId, thinking: String) {
        let mut slots = self.slots.lock().expect("slot buffer lock");
        if let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) {
            slot.thinking = Some(thinking);
        }
    }
}
