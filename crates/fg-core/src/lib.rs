mod page;
pub mod controller;
pub mod error;
pub mod mode;
pub mod notify;
pub mod preview;
pub mod request;
pub mod result;
pub mod seeds;
pub mod service;
pub mod view;

pub use page::Page;
pub use controller::{Applied, Completion, GenerationController, PanelView, RequestToken, Submission};
pub use mode::{DownloadPlan, GenerationMode, GridDetails, GridMode, SingleDetails, SingleMode};

pub type SingleController = GenerationController<SingleMode>;
pub type GridController = GenerationController<GridMode>;
