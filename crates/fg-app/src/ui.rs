mod top_panel;
mod side_panel;
mod central_panel;
mod toast;
mod preview_modal;

pub use top_panel::TopPanel;
pub use side_panel::SidePanel;
pub use central_panel::CentralPanel;
pub use toast::ToastLayer;
pub use preview_modal::PreviewModal;

use std::sync::Arc;
use egui::Context;
use log::error;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;
use fg_core::preview::ModalTrigger;
use fg_core::request::{GridForm, SingleForm};
use fg_core::Page;
use crate::events::FgEvent;
use crate::gfx::GfxState;
use crate::session::Session;

#[derive(Debug, Clone)]
pub enum UiEvent {
    SelectPage(Page),
    GenerateSingle(SingleForm),
    GenerateGrid(GridForm),
    Download(Page),
    OpenPreview(String),
    ClosePreview(ModalTrigger),
}

pub struct UiContext {
    pub event_loop_proxy: Arc<EventLoopProxy<FgEvent>>,
}

impl UiContext {
    pub fn new(event_loop_proxy: Arc<EventLoopProxy<FgEvent>>) -> Self {
        Self { event_loop_proxy }
    }

    pub fn send_event(&self, event: UiEvent) {
        if self.event_loop_proxy.send_event(FgEvent::Ui(event)).is_err() {
            error!("Dropped UI event: event loop is closed");
        }
    }
}

pub struct UiState {
    pub(crate) egui_state: egui_winit::State,
    pub(crate) egui_ctx: egui::Context,
    pub(crate) egui_renderer: egui_wgpu::Renderer,

    components: Vec<Box<dyn UiComponent>>,
    pub(crate) ui_ctx: UiContext,
}

impl UiState {
    pub fn new(gfx: &GfxState, window: Arc<Window>, event_loop_proxy: Arc<EventLoopProxy<FgEvent>>) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gfx.device, gfx.config.format, egui_wgpu::RendererOptions::default());

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            components: Vec::new(),
            ui_ctx: UiContext::new(event_loop_proxy),
        }
    }

    pub fn draw(&mut self, window: &Window, session: &Session) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);

        self.egui_ctx.run(raw_input, |ctx| {
            for component in self.components.iter_mut() {
                component.show(ctx, &self.ui_ctx, session);
            }
        })
    }

    pub fn add_component(&mut self, component: Box<dyn UiComponent>) {
        self.components.push(component);
    }
}

/// A piece of the window. Components read the session and report user
/// intent through [`UiContext::send_event`]; they never mutate it.
pub trait UiComponent {
    fn show(&mut self, ctx: &Context, ui_ctx: &UiContext, session: &Session);
}
