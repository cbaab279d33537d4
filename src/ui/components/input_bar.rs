use eframe::egui;

use crate::common::submission;

pub const TEXTAREA_ID: &str = "message-textarea";

const SEND_BUTTON_WIDTH: f32 = 64.0;

/// Draws the chat form. Returns the trimmed text when the visitor submits
/// something non-blank; the textarea itself is left untouched.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> Option<String> {
    let textarea_id = egui::Id::new(TEXTAREA_ID);
    let focused = ui.memory(|memory| memory.has_focus(textarea_id));
    let modifiers = ui.input(|input| input.modifiers);

    // Consumed before the textarea runs, otherwise it would insert a newline.
    let mut submit = enter_submits(focused, modifiers)
        && ui.input_mut(|input| input.consume_key(egui::Modifiers::NONE, egui::Key::Enter));

    ui.horizontal(|ui| {
        let width = (ui.available_width() - SEND_BUTTON_WIDTH).max(0.0);
        ui.add(
            egui::TextEdit::multiline(input_text)
                .id(textarea_id)
                .desired_rows(2)
                .desired_width(width)
                .hint_text("Type a message…"),
        );
        if ui.button("Send").clicked() {
            submit = true;
        }
    });

    form_result(submit, input_text)
}

/// Plain Enter in the focused textarea submits; Shift+Enter is a newline.
fn enter_submits(focused: bool, modifiers: egui::Modifiers) -> bool {
    focused && !modifiers.shift && !modifiers.alt && !modifiers.command
}

fn form_result(submit: bool, input_text: &str) -> Option<String> {
    if submit { submission(input_text) } else { None }
}
