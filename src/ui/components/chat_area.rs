use eframe::egui;

use crate::ui::pane::{Avatar, Bubble, BubblePart, ChatPane};

pub const PANE_ID: &str = "agent-assist";

const AVATAR_SIZE: f32 = 28.0;
const BUBBLE_WIDTH_RATIO: f32 = 0.7;

pub fn render(ui: &mut egui::Ui, pane: &mut ChatPane) {
    egui::ScrollArea::vertical()
        .id_salt(PANE_ID)
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for bubble in pane.bubbles() {
                render_bubble(ui, bubble);
                ui.add_space(6.0);
            }

            if pane.take_scroll_request() {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}

fn render_bubble(ui: &mut egui::Ui, bubble: &Bubble) {
    let parts = bubble.parts();
    if parts[0] == BubblePart::Avatar {
        ui.with_layout(egui::Layout::left_to_right(egui::Align::TOP), |ui| {
            for part in parts {
                render_part(ui, bubble, part);
            }
        });
    } else {
        // right-to-left lays the first widget at the far edge
        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
            for part in parts.into_iter().rev() {
                render_part(ui, bubble, part);
            }
        });
    }
}

fn render_part(ui: &mut egui::Ui, bubble: &Bubble, part: BubblePart) {
    match part {
        BubblePart::Avatar => render_avatar(ui, bubble.avatar),
        BubblePart::Body => render_body(ui, bubble),
    }
}

fn render_body(ui: &mut egui::Ui, bubble: &Bubble) {
    let max_width = ui.available_width() * BUBBLE_WIDTH_RATIO;
    egui::Frame::new()
        .fill(body_fill(ui, bubble.avatar))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.vertical(|ui| {
                ui.add(egui::Label::new(bubble.text()).wrap());
                ui.label(
                    egui::RichText::new(bubble.displayed_at.format("%H:%M").to_string())
                        .small()
                        .weak(),
                );
            });
        });
}

fn render_avatar(ui: &mut egui::Ui, avatar: Avatar) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), egui::Sense::hover());
    let (color, glyph) = match avatar {
        Avatar::Agent => (egui::Color32::from_rgb(0x2b, 0x6c, 0xb0), "A"),
        Avatar::Visitor => (egui::Color32::from_rgb(0x3a, 0x9d, 0x5d), "V"),
    };

    let painter = ui.painter();
    painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, color);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        glyph,
        egui::FontId::proportional(14.0),
        egui::Color32::WHITE,
    );
}

fn body_fill(ui: &egui::Ui, avatar: Avatar) -> egui::Color32 {
    let visuals = ui.visuals();
    match avatar {
        Avatar::Agent => visuals.faint_bg_color,
        Avatar::Visitor => visuals.extreme_bg_color,
    }
}
