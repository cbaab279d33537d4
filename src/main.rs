use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use webchat_widget::common::{SessionId, Visitor, WidgetCommand, WidgetEvent};
use webchat_widget::config::{self, WidgetConfig};
use webchat_widget::console;
use webchat_widget::error::WidgetError;
use webchat_widget::network::{Backend, WidgetClient};
use webchat_widget::ui::{AppState, ChatApp};

#[derive(Parser)]
#[command(
    name = "webchat_widget",
    version,
    about = "Chat widget polling a web chat backend"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Backend base URL, overrides config and environment
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Run in the terminal: print the transcript, send each stdin line
    Console,
}

#[tokio::main]
async fn main() -> Result<(), WidgetError> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    app_config.apply_env_overrides();
    if let Some(url) = cli.backend_url {
        app_config.backend_url = url;
    }

    let backend = Backend::new(&app_config)?;
    let visitor = Visitor::new(SessionId::generate(), app_config.visitor.clone());

    // UI -> network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);
    let shutdown = CancellationToken::new();

    let client = WidgetClient::new(
        backend,
        visitor,
        app_config.poll_interval(),
        event_tx,
        cmd_rx,
        shutdown.clone(),
    );
    let worker = tokio::spawn(client.run());

    let result = match cli.mode {
        Some(Mode::Console) => {
            console::run(
                cmd_tx,
                event_rx,
                app_config.transcript_mode,
                shutdown.clone(),
            )
            .await
        }
        None => run_window(&app_config, cmd_tx, event_rx, shutdown.clone()),
    };

    shutdown.cancel();
    if let Err(err) = worker.await {
        log::error!("Network worker panicked: {err}");
    }
    result
}

fn run_window(
    app_config: &WidgetConfig,
    cmd_tx: mpsc::Sender<WidgetCommand>,
    event_rx: mpsc::Receiver<WidgetEvent>,
    shutdown: CancellationToken,
) -> Result<(), WidgetError> {
    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);
    let title = app_config.window_title.clone();
    let mode = app_config.transcript_mode;

    eframe::run_native(
        &app_config.window_title,
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!("Chat window started");

            Ok(Box::new(ChatApp::new(
                cc,
                AppState::new(mode),
                title.clone(),
                cmd_tx.clone(),
                event_receiver,
                shutdown.clone(),
            )))
        }),
    )
    .map_err(|err| WidgetError::Ui(err.to_string()))
}
