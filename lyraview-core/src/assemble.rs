use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::classify::{LineClass, classify_line};
use crate::error::Result;
use crate::hydrate;
use crate::model::SpeakerKind;
use crate::parse::parse_candidate;
use crate::source::{AssetSource, HistorySource};
use crate::surface::RenderSurface;
use crate::thinking;

/// Drives classification, parsing, thinking extraction and image
/// hydration over the raw history in order.
///
/// Slot creation is strictly synchronous and matches filtered input
/// order. Hydration runs as fire-and-forget tasks, one per image
/// reference, each scoped to its own already-positioned slot; their
/// completion order can never reorder the transcript. Tasks are never
/// cancelled and carry no timeout.
pub struct HistoryAssembler {
    assets: Arc<dyn AssetSource>,
    surface: Arc<dyn RenderSurface>,
    tasks: Vec<JoinHandle<()>>,
    last_lyra_slot: Option<usize>,
    next_slot_id: usize,
}

impl HistoryAssembler {
    pub fn new(assets: Arc<dyn AssetSource>, surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            assets,
            surface,
            tasks: Vec::new(),
            last_lyra_slot: None,
            next_slot_id: 0,
        }
    }

    /// Reconstruct the whole transcript from the history collaborator.
    ///
    /// The only terminal error is failure of the history source itself;
    /// every per-line and per-asset failure is handled locally.
    ///
    /// # Errors
    ///
    /// Returns the history source's error unchanged.
    pub fn reconstruct(&mut self, history: &dyn HistorySource) -> Result<()> {
        for line in history.load()? {
            self.ingest_line(&line);
        }
        Ok(())
    }

    /// Feed one raw line through the pipeline.
    pub fn ingest_line(&mut self, line: &str) {
        match classify_line(line) {
            LineClass::Discard => {}
            LineClass::LegacyThinking(text) => self.attach_legacy_thinking(text),
            LineClass::Candidate => self.ingest_candidate(line),
        }
    }

    fn attach_legacy_thinking(&mut self, text: String) {
        // Orphan blocks (no preceding Lyra message) are dropped silently.
        if let Some(attachment) = thinking::bind_attachment(self.last_lyra_slot, text) {
            self.surface
                .replace_thinking(attachment.target_slot, attachment.text);
        }
    }

    fn ingest_candidate(&mut self, line: &str) {
        let Some(mut message) = parse_candidate(self.next_slot_id, line) else {
            return;
        };
        self.next_slot_id += 1;

        thinking::extract_inline_thinking(&mut message);

        if message.speaker_kind == SpeakerKind::Lyra {
            self.last_lyra_slot = Some(message.id);
        }

        let references = hydrate::scan_image_references(&message.body);
        let slot_id = message.id;
        let body = Arc::new(Mutex::new(message.body.clone()));

        self.surface.append_slot(message);

        for reference in references {
            let assets = Arc::clone(&self.assets);
            let surface = Arc::clone(&self.surface);
            let body = Arc::clone(&body);

            self.tasks.push(tokio::spawn(async move {
                let asset = hydrate::resolve_reference(assets.as_ref(), &reference).await;
                let replacement = hydrate::substitution_for(&reference, &asset);

                // Tasks for sibling references share the body state, so
                // partial hydration is visible but each token lands in
                // the right place whatever the completion order.
                let mut current = body.lock().await;
                *current = hydrate::apply_substitution(&current, &reference, &replacement);
                surface.replace_body(slot_id, current.clone());
            }));
        }
    }

    /// Await every outstanding hydration task.
    ///
    /// Joining is optional for embedders; the CLI and tests use it to
    /// observe the settled transcript deterministically.
    pub async fn settle(&mut self) {
        for task in self.tasks.drain(..) {
            if task.await.is_err() {
                debug!("hydration task aborted before settling");
            }
        }
    }
}
