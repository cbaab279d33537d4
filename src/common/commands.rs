/// Commands the UI sends down to the network worker.
#[derive(Debug, Clone)]
pub enum WidgetCommand {
    /// Raw textarea content; the worker applies the trim rule again.
    SendMessage(String),
}
