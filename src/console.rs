//! Terminal front end: prints new transcript lines and sends stdin lines.

use chrono::{DateTime, Local};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::{
    ChatMessage, Transcript, TranscriptMode, WidgetCommand, WidgetEvent, submission,
};
use crate::error::WidgetError;

pub async fn run(
    command_sender: mpsc::Sender<WidgetCommand>,
    mut event_receiver: mpsc::Receiver<WidgetEvent>,
    mode: TranscriptMode,
    shutdown: CancellationToken,
) -> Result<(), WidgetError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut transcript = Transcript::new(mode);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = &mut ctrl_c => {
                log::info!("Interrupted");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    log::info!("stdin closed");
                    break;
                };
                if let Some(text) = submission(&line) {
                    if command_sender.send(WidgetCommand::SendMessage(text)).await.is_err() {
                        log::warn!("Network worker is gone");
                        break;
                    }
                }
            }
            event = event_receiver.recv() => {
                let Some(event) = event else { break };
                match event {
                    WidgetEvent::TranscriptReceived(messages) => {
                        for message in &transcript.reconcile(messages) {
                            let line = format_line(message, Local::now());
                            stdout.write_all(line.as_bytes()).await?;
                        }
                        stdout.flush().await?;
                    }
                    WidgetEvent::MessageSent => log::debug!("Message accepted by backend"),
                    WidgetEvent::SendFailed(reason) => {
                        log::warn!("Message not delivered ({reason}); type it again to retry");
                    }
                }
            }
        }
    }

    shutdown.cancel();
    Ok(())
}

pub fn format_line(message: &ChatMessage, displayed_at: DateTime<Local>) -> String {
    format!(
        "[{}] {}: {}\n",
        displayed_at.format("%H:%M:%S"),
        message.sender,
        message.message
    )
}
