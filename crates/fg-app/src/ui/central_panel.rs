use egui::{Color32, Context, RichText, Ui};
use fg_core::view::Panel;
use fg_core::{GridDetails, Page, PanelView, SingleDetails};
use crate::session::Session;
use crate::textures::TextureSlot;
use crate::ui::{UiComponent, UiContext, UiEvent};

/// Result area of the active page: empty hint, spinner or image plus
/// details, with the error banner on top when there is one.
#[derive(Default)]
pub struct CentralPanel {}

impl UiComponent for CentralPanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &UiContext, session: &Session) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt(session.page.id())
                .auto_shrink([false; 2])
                .enable_scrolling(!session.scroll_locked())
                .show(ui, |ui| match session.page {
                    Page::Single => {
                        show_page(ui, ui_ctx, session, Page::Single, session.single.view(), single_details)
                    }
                    Page::Grid => {
                        show_page(ui, ui_ctx, session, Page::Grid, session.grid.view(), grid_details)
                    }
                });
        });

        if session.grid.view().downloading {
            preparing_download(ctx);
        }
    }
}

fn show_page<D>(
    ui: &mut Ui,
    ui_ctx: &UiContext,
    session: &Session,
    page: Page,
    view: PanelView<'_, D>,
    details: fn(&mut Ui, &D),
) {
    if let Some(error) = view.error {
        error_banner(ui, error);
        ui.add_space(8.0);
    }

    match view.panel {
        Panel::Empty => {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label(RichText::new("No faces yet").size(20.0).color(Color32::GRAY));
                ui.label("Pick your settings on the left and press generate.");
            });
        }
        Panel::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.spinner();
                ui.label(RichText::new("Generating...").color(Color32::YELLOW));
            });
        }
        Panel::Result => {
            ui.horizontal(|ui| {
                let label = if view.downloading { "⏳ Downloading..." } else { "⬇ Download" };
                if ui
                    .add_enabled(view.download_enabled && !view.downloading, egui::Button::new(label))
                    .clicked()
                {
                    ui_ctx.send_event(UiEvent::Download(page));
                }
            });
            ui.add_space(8.0);

            if let Some(url) = view.image_url {
                result_image(ui, ui_ctx, session, url);
            }
            ui.add_space(8.0);

            if let Some(d) = view.details {
                details(ui, d);
            }
        }
    }
}

fn result_image(ui: &mut Ui, ui_ctx: &UiContext, session: &Session, url: &str) {
    match session.textures.get(url) {
        Some(TextureSlot::Ready(texture)) => {
            let response = ui.add(
                egui::Image::new(texture)
                    .max_width(ui.available_width().min(768.0))
                    .corner_radius(8.0)
                    .sense(egui::Sense::click()),
            );
            if response.on_hover_text("Click to preview").clicked() {
                ui_ctx.send_event(UiEvent::OpenPreview(url.to_string()));
            }
        }
        Some(TextureSlot::Failed) => {
            ui.label(RichText::new("Could not load image").color(Color32::RED));
        }
        Some(TextureSlot::Loading) | None => {
            ui.spinner();
        }
    }
}

fn single_details(ui: &mut Ui, details: &SingleDetails) {
    egui::Grid::new("single_details").num_columns(2).show(ui, |ui| {
        for (label, value) in [
            ("Seed", &details.seed),
            ("Truncation", &details.truncation),
            ("Enhancement", &details.enhancement),
            ("Generated at", &details.time),
            ("Generation time (s)", &details.elapsed),
        ] {
            ui.label(RichText::new(label).color(Color32::GRAY));
            ui.label(value.as_str());
            ui.end_row();
        }
    });
}

fn grid_details(ui: &mut Ui, details: &GridDetails) {
    ui.label(
        RichText::new(format!("Grid: {} | Seeds: {}", details.dimensions, details.seed_listing))
            .small()
            .color(Color32::GRAY),
    );
    egui::Grid::new("grid_details").num_columns(2).show(ui, |ui| {
        for (label, value) in [
            ("Grid", &details.dimensions),
            ("Faces generated", &details.generated_count),
            ("Generation time (s)", &details.elapsed),
        ] {
            ui.label(RichText::new(label).color(Color32::GRAY));
            ui.label(value.as_str());
            ui.end_row();
        }
    });
}

fn error_banner(ui: &mut Ui, message: &str) {
    egui::Frame::new()
        .fill(Color32::from_rgb(60, 20, 20))
        .stroke(egui::Stroke::new(1.0, Color32::from_rgb(200, 80, 80)))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("⚠").color(Color32::from_rgb(255, 120, 120)));
                ui.label(RichText::new(message).color(Color32::from_rgb(255, 180, 180)));
            });
        });
}

fn preparing_download(ctx: &Context) {
    egui::Area::new(egui::Id::new("preparing_download"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Preparing download...");
                });
            });
        });
}
