use std::time::Duration;

use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webchat_widget::common::{
    SessionId, TranscriptMode, Visitor, VisitorIdentity, WidgetCommand, WidgetEvent,
};
use webchat_widget::config::WidgetConfig;
use webchat_widget::network::{Backend, WidgetClient};
use webchat_widget::ui::AppState;

const WAIT: Duration = Duration::from_secs(5);
// Long enough that only the initial tick fires during a test.
const SLOW_POLL: Duration = Duration::from_secs(3600);

struct Harness {
    commands: mpsc::Sender<WidgetCommand>,
    events: mpsc::Receiver<WidgetEvent>,
    shutdown: CancellationToken,
    worker: JoinHandle<()>,
}

impl Harness {
    fn start(server: &MockServer, poll_interval: Duration) -> Self {
        let config = WidgetConfig {
            backend_url: server.uri(),
            ..WidgetConfig::default()
        };
        let backend = Backend::new(&config).expect("valid backend url");
        let visitor = Visitor::new(SessionId::generate(), VisitorIdentity::default());
        let (commands, command_receiver) = mpsc::channel(16);
        let (event_sender, events) = mpsc::channel(16);
        let shutdown = CancellationToken::new();

        let client = WidgetClient::new(
            backend,
            visitor,
            poll_interval,
            event_sender,
            command_receiver,
            shutdown.clone(),
        );
        let worker = tokio::spawn(client.run());

        Self {
            commands,
            events,
            shutdown,
            worker,
        }
    }

    async fn next_event(&mut self) -> WidgetEvent {
        timeout(WAIT, self.events.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event channel closed")
    }

    async fn send(&self, text: &str) {
        self.commands
            .send(WidgetCommand::SendMessage(text.to_string()))
            .await
            .expect("worker is running");
    }

    async fn stop(self) {
        self.shutdown.cancel();
        timeout(WAIT, self.worker)
            .await
            .expect("worker did not stop")
            .expect("worker panicked");
    }
}

async fn mount_transcript(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn requests_to(server: &MockServer, verb: &str, route: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.method.as_str() == verb && request.url.path() == route)
        .collect()
}

#[tokio::test]
async fn polls_immediately_and_renders_every_message_in_order() {
    let server = MockServer::start().await;
    mount_transcript(
        &server,
        json!([
            { "sender": "Alex", "message": "Welcome", "purpose": "agent" },
            { "sender": "Takuya", "message": "Hi", "purpose": "customer" }
        ]),
    )
    .await;

    let mut harness = Harness::start(&server, SLOW_POLL);
    let WidgetEvent::TranscriptReceived(messages) = harness.next_event().await else {
        panic!("expected a transcript");
    };

    let mut state = AppState::new(TranscriptMode::Full);
    assert_eq!(state.apply_transcript(messages), 2);
    let texts: Vec<String> = state.pane.bubbles().iter().map(|b| b.text()).collect();
    assert_eq!(texts, vec!["Alex: Welcome", "Takuya: Hi"]);

    harness.stop().await;
}

#[tokio::test]
async fn keeps_polling_on_the_interval() {
    let server = MockServer::start().await;
    mount_transcript(&server, json!([])).await;

    let mut harness = Harness::start(&server, Duration::from_millis(50));
    for _ in 0..3 {
        assert!(matches!(
            harness.next_event().await,
            WidgetEvent::TranscriptReceived(_)
        ));
    }
    harness.stop().await;

    assert!(requests_to(&server, "GET", "/transcript").await.len() >= 3);
}

#[tokio::test]
async fn successful_send_clears_input_and_refreshes() {
    let server = MockServer::start().await;
    mount_transcript(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/messageToGenesys"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = Harness::start(&server, SLOW_POLL);
    let mut state = AppState::new(TranscriptMode::Full);
    state.input_text = "  Hello there  ".to_string();
    harness.send(&state.input_text).await;

    let mut transcripts = 0;
    let mut sent = false;
    let mut refreshed_after_send = false;
    while !(refreshed_after_send && transcripts == 2) {
        match harness.next_event().await {
            WidgetEvent::TranscriptReceived(_) => {
                transcripts += 1;
                refreshed_after_send |= sent;
            }
            WidgetEvent::MessageSent => {
                sent = true;
                state.message_sent();
            }
            WidgetEvent::SendFailed(reason) => panic!("send failed: {reason}"),
        }
    }
    harness.stop().await;

    assert_eq!(state.input_text, "");
    assert_eq!(requests_to(&server, "GET", "/transcript").await.len(), 2);

    let posts = requests_to(&server, "POST", "/messageToGenesys").await;
    assert_eq!(posts.len(), 1);
    let body: Value = serde_json::from_slice(&posts[0].body).unwrap();
    assert_eq!(body["message"], "Hello there");
    assert_eq!(body["nickname"], "Takuya");
}

#[tokio::test]
async fn blank_submission_issues_no_request() {
    let server = MockServer::start().await;
    mount_transcript(&server, json!([])).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = Harness::start(&server, SLOW_POLL);
    harness.next_event().await;
    harness.send("   \n\t ").await;
    harness.send("").await;

    assert!(
        timeout(Duration::from_millis(300), harness.events.recv())
            .await
            .is_err()
    );
    harness.stop().await;
}

#[tokio::test]
async fn failed_send_keeps_input_and_skips_refresh() {
    let server = MockServer::start().await;
    mount_transcript(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/messageToGenesys"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut harness = Harness::start(&server, SLOW_POLL);
    harness.next_event().await;

    let mut state = AppState::new(TranscriptMode::Full);
    state.input_text = "Hello there".to_string();
    harness.send(&state.input_text).await;

    match harness.next_event().await {
        WidgetEvent::SendFailed(reason) => state.send_failed(&reason),
        other => panic!("expected send failure, got {other:?}"),
    }
    harness.stop().await;

    assert_eq!(state.input_text, "Hello there");
    assert_eq!(requests_to(&server, "GET", "/transcript").await.len(), 1);
}

#[tokio::test]
async fn failed_poll_renders_nothing_and_worker_survives() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transcript"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut harness = Harness::start(&server, Duration::from_millis(50));
    assert!(
        timeout(Duration::from_millis(300), harness.events.recv())
            .await
            .is_err()
    );
    assert!(!harness.worker.is_finished());
    harness.stop().await;

    assert!(!requests_to(&server, "GET", "/transcript").await.is_empty());
}

#[tokio::test]
async fn cancellation_aborts_slow_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transcript"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let harness = Harness::start(&server, SLOW_POLL);
    tokio::time::sleep(Duration::from_millis(100)).await;
    harness.stop().await;
}

#[tokio::test]
async fn closing_the_command_channel_stops_the_worker() {
    let server = MockServer::start().await;
    mount_transcript(&server, json!([])).await;

    let Harness {
        commands, worker, ..
    } = Harness::start(&server, SLOW_POLL);
    drop(commands);

    timeout(WAIT, worker)
        .await
        .expect("worker did not stop")
        .expect("worker panicked");
}
