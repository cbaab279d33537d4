use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::{WidgetCommand, WidgetEvent};

use super::components::{chat_area, input_bar};
use super::state::AppState;

const CHAT_FORM_ID: &str = "chat-form";
const REPAINT_INTERVAL: Duration = Duration::from_millis(200);

pub struct ChatApp {
    state: AppState,
    title: String,
    command_sender: mpsc::Sender<WidgetCommand>,
    event_receiver: mpsc::Receiver<WidgetEvent>,
    shutdown: CancellationToken,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        state: AppState,
        title: String,
        command_sender: mpsc::Sender<WidgetCommand>,
        event_receiver: mpsc::Receiver<WidgetEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            state,
            title,
            command_sender,
            event_receiver,
            shutdown,
        }
    }

    fn handle_widget_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                WidgetEvent::TranscriptReceived(messages) => {
                    let added = self.state.apply_transcript(messages);
                    if added > 0 {
                        log::debug!("Rendered {added} new messages");
                    }
                }
                WidgetEvent::MessageSent => self.state.message_sent(),
                WidgetEvent::SendFailed(reason) => self.state.send_failed(&reason),
            }
        }
    }

    fn send_command(&mut self, text: String) {
        if let Err(err) = self
            .command_sender
            .try_send(WidgetCommand::SendMessage(text))
        {
            log::warn!("Failed to send command to network: {err}");
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_widget_events();

        egui::TopBottomPanel::bottom(CHAT_FORM_ID).show(ctx, |ui| {
            ui.add_space(4.0);
            if let Some(text) = input_bar::render(ui, &mut self.state.input_text) {
                self.send_command(text);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.title);
            ui.separator();
            chat_area::render(ui, &mut self.state.pane);
        });

        // Worker events arrive without input, so keep polling the channel.
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

impl Drop for ChatApp {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
