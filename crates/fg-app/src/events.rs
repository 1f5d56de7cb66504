use std::path::PathBuf;
use fg_core::error::DownloadError;
use fg_core::result::{GridResult, SingleResult};
use fg_core::{Completion, DownloadPlan, Page};
use crate::ui::UiEvent;

#[derive(Debug)]
pub enum FgEvent {
    Ui(UiEvent),
    Gen(GenEvent),
}

/// Results of background work, delivered back to the UI thread.
#[derive(Debug)]
pub enum GenEvent {
    SingleFinished(Completion<SingleResult>),
    GridFinished(Completion<GridResult>),
    DownloadFinished {
        page: Page,
        plan: DownloadPlan,
        outcome: Result<PathBuf, DownloadError>,
    },
    ImageLoaded {
        url: String,
        image: egui::ColorImage,
    },
    ImageFailed {
        url: String,
        error: String,
    },
}
