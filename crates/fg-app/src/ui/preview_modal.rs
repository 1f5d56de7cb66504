use egui::{Color32, Context, RichText, Sense};
use fg_core::preview::ModalTrigger;
use crate::session::Session;
use crate::textures::TextureSlot;
use crate::ui::{UiComponent, UiContext, UiEvent};

/// Draws the full-size preview when the session's modal is open.
#[derive(Default)]
pub struct PreviewModal {}

impl UiComponent for PreviewModal {
    fn show(&mut self, ctx: &Context, ui_ctx: &UiContext, session: &Session) {
        let Some(modal) = session.modal.as_ref().filter(|m| m.is_open()) else {
            return;
        };

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ui_ctx.send_event(UiEvent::ClosePreview(ModalTrigger::Escape));
        }

        let screen = ctx.screen_rect();

        egui::Area::new(egui::Id::new("preview_modal"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(230));
                let backdrop = ui.allocate_rect(screen, Sense::click());

                let mut image_clicked = false;
                let content = screen.shrink(48.0);
                ui.scope_builder(egui::UiBuilder::new().max_rect(content), |ui| {
                    ui.horizontal(|ui| {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button(RichText::new("✖").size(20.0)).clicked() {
                                ui_ctx.send_event(UiEvent::ClosePreview(ModalTrigger::CloseButton));
                            }
                            if ui
                                .button(RichText::new("⬇").size(18.0))
                                .on_hover_text("Download")
                                .clicked()
                            {
                                ui_ctx.send_event(UiEvent::Download(session.page));
                            }
                        });
                    });

                    ui.vertical_centered(|ui| {
                        match modal.image_url().and_then(|url| session.textures.get(url)) {
                            Some(TextureSlot::Ready(texture)) => {
                                let image = ui.add(
                                    egui::Image::new(texture)
                                        .max_size(ui.available_size())
                                        .sense(Sense::click()),
                                );
                                image_clicked = image.clicked();
                            }
                            _ => {
                                ui.spinner();
                            }
                        }
                    });
                });

                if backdrop.clicked() && !image_clicked {
                    ui_ctx.send_event(UiEvent::ClosePreview(ModalTrigger::Backdrop));
                }
            });
    }
}
