use log::debug;

/// Ways the user can dismiss the preview. All of them end in [`ModalPreview::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTrigger {
    CloseButton,
    Backdrop,
    Escape,
}

/// Full-size image viewer.
///
/// Built on first use and then reused for the lifetime of the window.
#[derive(Debug, Default)]
pub struct ModalPreview {
    image_url: Option<String>,
    open: bool,
}

impl ModalPreview {
    pub fn create() -> Self {
        debug!("Creating preview modal");
        Self::default()
    }

    /// Returns the modal in `slot`, constructing it the first time.
    pub fn ensure(slot: &mut Option<ModalPreview>) -> &mut ModalPreview {
        slot.get_or_insert_with(Self::create)
    }

    pub fn open(&mut self, url: impl Into<String>) {
        self.image_url = Some(url.into());
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn dismiss(&mut self, trigger: ModalTrigger) {
        debug!("Preview dismissed via {:?}", trigger);
        self.close();
    }

    pub fn destroy(self) {
        debug!("Destroying preview modal");
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Scrolling of the underlying page is suspended while the modal is up.
    pub fn scroll_locked(&self) -> bool {
        self.open
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_construction() {
        let mut slot: Option<ModalPreview> = None;
        ModalPreview::ensure(&mut slot).open("/img/42.png");
        ModalPreview::ensure(&mut slot).open("/img/43.png");

        let modal = slot.unwrap();
        assert!(modal.is_open());
        assert_eq!(modal.image_url(), Some("/img/43.png"));
    }

    #[test]
    fn test_every_trigger_closes_and_unlocks_scroll() {
        for trigger in [ModalTrigger::CloseButton, ModalTrigger::Backdrop, ModalTrigger::Escape] {
            let mut modal = ModalPreview::create();
            modal.open("/img/42.png");
            assert!(modal.scroll_locked());

            modal.dismiss(trigger);
            assert!(!modal.is_open());
            assert!(!modal.scroll_locked());
        }
    }

    #[test]
    fn test_close_when_closed_is_harmless() {
        let mut modal = ModalPreview::create();
        modal.dismiss(ModalTrigger::Escape);
        assert!(!modal.is_open());
        assert_eq!(modal.image_url(), None);
    }
}
