use std::time::Instant;
use egui::{Color32, Context, RichText};
use fg_core::notify::ToastKind;
use crate::session::Session;
use crate::ui::{UiComponent, UiContext};

const MARGIN: f32 = 16.0;
/// Horizontal travel of the slide animation.
const SLIDE_DISTANCE: f32 = 420.0;

#[derive(Default)]
pub struct ToastLayer {}

impl UiComponent for ToastLayer {
    fn show(&mut self, ctx: &Context, _ui_ctx: &UiContext, session: &Session) {
        let Some(toast) = session.notifier.current() else {
            return;
        };

        let offset = toast.offset(Instant::now()) * SLIDE_DISTANCE;
        let fill = match toast.kind {
            ToastKind::Success => Color32::from_rgb(34, 197, 94),
            ToastKind::Error => Color32::from_rgb(239, 68, 68),
            ToastKind::Info => Color32::from_rgb(59, 130, 246),
        };

        egui::Area::new(egui::Id::new("notification_toast"))
            .order(egui::Order::Tooltip)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-MARGIN + offset, MARGIN))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(24, 12))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(format!("{} {}", toast.kind.icon(), toast.message))
                                .color(Color32::WHITE),
                        );
                    });
            });
    }
}
