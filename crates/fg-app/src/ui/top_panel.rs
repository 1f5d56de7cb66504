use egui::{Color32, Context, RichText};
use fg_core::view::UiPhase;
use fg_core::Page;
use crate::session::Session;
use crate::ui::{UiComponent, UiContext, UiEvent};

#[derive(Default)]
pub struct TopPanel {}

impl UiComponent for TopPanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &UiContext, session: &Session) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🎭 Face Generator");
                ui.separator();

                for page in Page::all() {
                    let label = format!("{} {}", page.icon(), page.name());
                    if ui.selectable_label(session.page == page, label).clicked() && session.page != page {
                        ui_ctx.send_event(UiEvent::SelectPage(page));
                    }
                }

                ui.separator();

                let phase = match session.page {
                    Page::Single => session.single.view().phase,
                    Page::Grid => session.grid.view().phase,
                };
                let (text, color) = match phase {
                    UiPhase::Empty => ("Ready", Color32::GRAY),
                    UiPhase::Loading => ("Generating...", Color32::YELLOW),
                    UiPhase::Result => ("Done", Color32::GREEN),
                    UiPhase::ErrorShown => ("Failed", Color32::RED),
                };
                ui.label(RichText::new("Status:").color(Color32::LIGHT_BLUE));
                ui.label(RichText::new(text).color(color));
            });
        });
    }
}
