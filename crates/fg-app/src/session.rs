use std::time::Instant;
use fg_core::notify::Notifier;
use fg_core::preview::ModalPreview;
use fg_core::{GridController, GridMode, Page, SingleController, SingleMode};
use crate::textures::TextureCache;

/// Page-level state the UI reads every frame.
pub struct Session {
    pub page: Page,
    pub single: SingleController,
    pub grid: GridController,
    pub notifier: Notifier,
    /// Built on the first preview request.
    pub modal: Option<ModalPreview>,
    pub textures: TextureCache,
}

impl Session {
    pub fn new() -> Self {
        Self {
            page: Page::default(),
            single: SingleController::new(SingleMode),
            grid: GridController::new(GridMode::default()),
            notifier: Notifier::new(),
            modal: None,
            textures: TextureCache::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.single.is_loading()
            || self.grid.is_loading()
            || self.single.view().downloading
            || self.grid.view().downloading
    }

    pub fn needs_animation(&self, now: Instant) -> bool {
        self.is_busy() || self.notifier.is_animating(now)
    }

    /// Next time an idle window must wake up without input.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.notifier.next_deadline(now)
    }

    pub fn scroll_locked(&self) -> bool {
        self.modal.as_ref().is_some_and(ModalPreview::scroll_locked)
    }

    /// Display URLs of both pages, for texture bookkeeping.
    pub fn displayed_urls(&self) -> Vec<&str> {
        self.single
            .view()
            .image_url
            .into_iter()
            .chain(self.grid.view().image_url)
            .collect()
    }
}
