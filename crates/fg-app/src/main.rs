mod app;
mod state;
mod ui;
mod events;
mod gfx;
mod error;
mod config;
mod client;
mod download;
mod session;
mod textures;

use winit::event_loop::{ControlFlow, EventLoop};
use crate::config::AppConfig;
use crate::events::FgEvent;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load()?;

    let mut event_loop: EventLoop<FgEvent> = EventLoop::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = app::App::new(&mut event_loop, config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
