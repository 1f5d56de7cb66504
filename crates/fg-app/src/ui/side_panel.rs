use egui::{Color32, Context, RichText, TextEdit, Ui};
use fg_core::request::{GridForm, SingleForm};
use fg_core::Page;
use crate::session::Session;
use crate::ui::{UiComponent, UiContext, UiEvent};

const MAX_GRID_SIDE: usize = 5;

/// Generation forms. The input values live here, the controllers only
/// see them once the user presses generate.
#[derive(Default)]
pub struct SidePanel {
    pub single: SingleForm,
    pub grid: GridForm,
}

impl SidePanel {
    fn show_single(&mut self, ui: &mut Ui, ui_ctx: &UiContext, busy: bool) {
        ui.heading(RichText::new("🎲 Seed").size(16.0));
        ui.add(
            TextEdit::singleline(&mut self.single.seed)
                .desired_width(f32::INFINITY)
                .hint_text("Leave empty for a random face"),
        );

        ui.add_space(8.0);
        truncation_slider(ui, &mut self.single.truncation);
        ui.checkbox(&mut self.single.enhance, "Enhance face");

        ui.add_space(8.0);
        if generate_button(ui, "🎨 Generate Face", busy) {
            ui_ctx.send_event(UiEvent::GenerateSingle(self.single.clone()));
        }
    }

    fn show_grid(&mut self, ui: &mut Ui, ui_ctx: &UiContext, busy: bool) {
        ui.heading(RichText::new("▦ Grid Size").size(16.0));

        ui.horizontal(|ui| {
            side_picker(ui, "rows_select", "Rows", &mut self.grid.rows);
            side_picker(ui, "cols_select", "Columns", &mut self.grid.cols);
        });

        ui.label(
            RichText::new(format!(
                "{} faces • {} px",
                self.grid.total_faces(),
                self.grid.resolution_label()
            ))
            .small()
            .color(Color32::LIGHT_BLUE),
        );

        ui.add_space(8.0);
        truncation_slider(ui, &mut self.grid.truncation);
        ui.checkbox(&mut self.grid.enhance, "Enhance faces");

        ui.add_space(8.0);
        if generate_button(ui, "🎨 Generate Grid", busy) {
            ui_ctx.send_event(UiEvent::GenerateGrid(self.grid.clone()));
        }
    }
}

impl UiComponent for SidePanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &UiContext, session: &Session) {
        egui::SidePanel::left("side_panel")
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.heading(session.page.name());
                ui.label(
                    RichText::new(session.page.description())
                        .small()
                        .color(Color32::GRAY),
                );
                ui.separator();

                match session.page {
                    Page::Single => self.show_single(ui, ui_ctx, session.single.is_loading()),
                    Page::Grid => self.show_grid(ui, ui_ctx, session.grid.is_loading()),
                }

                ui.separator();

                ui.collapsing("💭 Tips", |ui| {
                    ui.label("✓ Lower truncation gives more typical faces");
                    ui.label("✓ Higher truncation gives more variety");
                    ui.label("✓ Reuse a seed to get the same face again");
                });
            });
    }
}

fn truncation_slider(ui: &mut Ui, value: &mut f64) {
    ui.add(
        egui::Slider::new(value, 0.0..=1.0)
            .step_by(0.05)
            .text("Truncation"),
    );
}

fn side_picker(ui: &mut Ui, id: &str, label: &str, value: &mut usize) {
    egui::ComboBox::new(id, label)
        .selected_text(value.to_string())
        .show_ui(ui, |ui| {
            for n in 1..=MAX_GRID_SIDE {
                ui.selectable_value(value, n, n.to_string());
            }
        });
}

/// Disabled while a request of this page is in flight.
fn generate_button(ui: &mut Ui, text: &str, busy: bool) -> bool {
    let label = if busy { "⏳ Generating..." } else { text };
    ui.add_enabled(
        !busy,
        egui::Button::new(RichText::new(label).size(14.0))
            .min_size(egui::vec2(ui.available_width(), 30.0)),
    )
    .clicked()
}
