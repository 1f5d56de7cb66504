use std::sync::Arc;
use std::time::Instant;
use egui_wgpu::wgpu;
use egui_wgpu::wgpu::StoreOp;
use log::{debug, error, info, warn};
use winit::event_loop::EventLoopProxy;
use winit::window::Window;
use fg_core::controller::{dispatch, fetch_download};
use fg_core::preview::ModalPreview;
use fg_core::{Applied, Completion, GenerationMode, Page, Submission};
use crate::client::HttpGenerationService;
use crate::config::AppConfig;
use crate::download::FileSink;
use crate::events::{FgEvent, GenEvent};
use crate::gfx::GfxState;
use crate::session::Session;
use crate::ui;
use crate::ui::{UiEvent, UiState};

pub struct AppState {
    pub(crate) window: Arc<Window>,
    event_loop_proxy: Arc<EventLoopProxy<FgEvent>>,

    pub gfx: GfxState,
    pub ui: UiState,
    pub session: Session,

    service: Arc<HttpGenerationService>,
    sink: Arc<FileSink>,
}

impl AppState {
    pub async fn new(
        window: Arc<Window>,
        event_loop_proxy: Arc<EventLoopProxy<FgEvent>>,
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        let gfx = GfxState::new(window.clone()).await?;
        let mut ui_state = UiState::new(&gfx, window.clone(), event_loop_proxy.clone());

        ui_state.add_component(Box::new(ui::TopPanel::default()));
        ui_state.add_component(Box::new(ui::SidePanel::default()));
        ui_state.add_component(Box::new(ui::CentralPanel::default()));
        ui_state.add_component(Box::new(ui::PreviewModal::default()));
        ui_state.add_component(Box::new(ui::ToastLayer::default()));

        info!("Generation service at {}", config.api_url);
        info!("Downloads go to {}", config.download_dir.display());

        Ok(Self {
            window,
            event_loop_proxy,
            gfx,
            ui: ui_state,
            session: Session::new(),
            service: Arc::new(HttpGenerationService::new(config.api_url.clone())),
            sink: Arc::new(FileSink::new(config.download_dir.clone())),
        })
    }

    fn push_event(proxy: &EventLoopProxy<FgEvent>, event: GenEvent) {
        if proxy.send_event(FgEvent::Gen(event)).is_err() {
            warn!("Event loop closed before background work finished");
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.gfx.resize(new_size);
        }
    }

    pub fn needs_animation(&self) -> bool {
        self.session.needs_animation(Instant::now())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.session.next_deadline(Instant::now())
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        self.session.notifier.prune(Instant::now());

        let output = self.gfx.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.gfx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder")
        });

        let full_output = self.ui.draw(&self.window, &self.session);

        let platform_output = full_output.platform_output.clone();
        self.ui.egui_state.handle_platform_output(&self.window, platform_output);

        let shapes = full_output.shapes.clone();
        let pixels_per_point = full_output.pixels_per_point;
        let paint_jobs = self.ui.egui_ctx.tessellate(shapes, pixels_per_point);

        let screen_desc = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.ui.egui_renderer.update_texture(&self.gfx.device, &self.gfx.queue, *id, delta);
        }

        self.ui.egui_renderer.update_buffers(
            &self.gfx.device,
            &self.gfx.queue,
            &mut encoder,
            &paint_jobs,
            &screen_desc,
        );

        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.1, g: 0.1, b: 0.1, a: 1.0 }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            self.ui.egui_renderer.render(&mut rpass.forget_lifetime(), &paint_jobs, &screen_desc);
        }

        for id in &full_output.textures_delta.free {
            self.ui.egui_renderer.free_texture(id);
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    pub fn on_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::SelectPage(page) => {
                debug!("Switching to the {} page", page.id());
                self.session.page = page;
                // The preview belongs to the page it was opened from.
                if let Some(modal) = self.session.modal.take() {
                    modal.destroy();
                }
            }
            UiEvent::GenerateSingle(form) => match self.session.single.submit(&form) {
                Ok(submission) => self.spawn_generation::<fg_core::SingleMode>(submission, GenEvent::SingleFinished),
                Err(e) => self.session.notifier.error(e.to_string()),
            },
            UiEvent::GenerateGrid(form) => match self.session.grid.submit(&form) {
                Ok(submission) => self.spawn_generation::<fg_core::GridMode>(submission, GenEvent::GridFinished),
                Err(e) => self.session.notifier.error(e.to_string()),
            },
            UiEvent::Download(page) => self.spawn_download(page),
            UiEvent::OpenPreview(url) => {
                ModalPreview::ensure(&mut self.session.modal).open(url);
            }
            UiEvent::ClosePreview(trigger) => {
                if let Some(modal) = self.session.modal.as_mut() {
                    modal.dismiss(trigger);
                }
            }
        }
    }

    /// Applies the result of background work.
    pub fn on_gen_event(&mut self, event: GenEvent) {
        let session = &mut self.session;

        match event {
            GenEvent::SingleFinished(completion) => {
                if session.single.apply(completion, &mut session.notifier) == Applied::Result {
                    self.forget_stale_textures();
                }
            }
            GenEvent::GridFinished(completion) => {
                if session.grid.apply(completion, &mut session.notifier) == Applied::Result {
                    self.forget_stale_textures();
                }
            }
            GenEvent::DownloadFinished { page, plan, outcome } => match page {
                Page::Single => session.single.finish_download(&plan, outcome, &mut session.notifier),
                Page::Grid => session.grid.finish_download(&plan, outcome, &mut session.notifier),
            },
            GenEvent::ImageLoaded { url, image } => {
                session.textures.insert(&self.ui.egui_ctx, url, image);
            }
            GenEvent::ImageFailed { url, error } => {
                warn!("Could not load {}: {}", url, error);
                session.textures.fail(url);
            }
        }

        self.load_displayed_images();
    }

    fn forget_stale_textures(&mut self) {
        let keep = self.session.displayed_urls();
        let keep: Vec<String> = keep.into_iter().map(str::to_string).collect();
        let keep: Vec<&str> = keep.iter().map(String::as_str).collect();
        self.session.textures.retain_only(&keep);
    }

    fn spawn_generation<M: GenerationMode>(
        &self,
        submission: Submission<M::Request>,
        finished: fn(Completion<M::Output>) -> GenEvent,
    ) {
        let service = self.service.clone();
        let proxy = self.event_loop_proxy.clone();

        tokio::spawn(async move {
            let completion = dispatch::<M>(&*service, submission).await;
            Self::push_event(&proxy, finished(completion));
        });
    }

    fn spawn_download(&mut self, page: Page) {
        let plan = match page {
            Page::Single => self.session.single.download_plan(),
            Page::Grid => self.session.grid.download_plan(),
        };
        let Some(plan) = plan else {
            return;
        };
        self.session.notifier.info(format!("Preparing {}...", plan.file_name));

        let service = self.service.clone();
        let sink = self.sink.clone();
        let proxy = self.event_loop_proxy.clone();

        tokio::spawn(async move {
            let outcome = fetch_download(&*service, &*sink, &plan).await;
            Self::push_event(&proxy, GenEvent::DownloadFinished { page, plan, outcome });
        });
    }

    /// Starts fetching every displayed image that has no texture yet.
    fn load_displayed_images(&mut self) {
        let urls: Vec<String> = self
            .session
            .displayed_urls()
            .into_iter()
            .map(str::to_string)
            .collect();

        for url in urls {
            if !self.session.textures.begin(&url) {
                continue;
            }

            let service = self.service.clone();
            let proxy = self.event_loop_proxy.clone();

            tokio::spawn(async move {
                let event = match service.fetch_image(&url).await {
                    Ok(image) => GenEvent::ImageLoaded { url, image },
                    Err(error) => {
                        error!("Image fetch failed: {}", error);
                        GenEvent::ImageFailed { url, error }
                    }
                };
                Self::push_event(&proxy, event);
            });
        }
    }
}
