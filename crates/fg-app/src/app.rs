use std::sync::Arc;
use std::time::{Duration, Instant};
use log::error;
use winit::{
    event::*,
    event_loop::ActiveEventLoop,
};
use winit::application::ApplicationHandler;
use winit::event_loop::{ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{WindowAttributes, WindowId};
use crate::config::AppConfig;
use crate::events::FgEvent;
use crate::state::AppState;

/// Repaint interval while a spinner or toast is animating.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    event_loop_proxy: Arc<EventLoopProxy<FgEvent>>,
    config: AppConfig,
    state: Option<AppState>,
}

impl App {
    pub fn new(event_loop: &mut EventLoop<FgEvent>, config: AppConfig) -> Self {
        let event_loop_proxy = Arc::new(event_loop.create_proxy());

        Self {
            event_loop_proxy,
            config,
            state: None,
        }
    }
}

impl ApplicationHandler<FgEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attributes = WindowAttributes::default()
            .with_title("Face Generator")
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 860.0));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Could not create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(AppState::new(window.clone(), self.event_loop_proxy.clone(), &self.config)) {
            Ok(state) => {
                window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                error!("Could not initialise graphics: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FgEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            FgEvent::Ui(e) => state.on_ui_event(e),
            FgEvent::Gen(e) => state.on_gen_event(e),
        }
        state.window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        if state.window.id() != window_id {
            return;
        }

        // Let egui handle the event first
        let response = state.ui.egui_state.on_window_event(&state.window, &event);

        if response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                state.resize(physical_size);
                state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = state.render() {
                    error!("Render failed: {}", e);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match &self.state {
            Some(state) if state.needs_animation() => {
                state.window.request_redraw();
                event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + FRAME_INTERVAL));
            }
            Some(state) => match state.next_deadline() {
                Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
                None => event_loop.set_control_flow(ControlFlow::Wait),
            },
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
