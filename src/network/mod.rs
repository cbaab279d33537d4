pub mod backend;
pub mod client;
pub mod poller;

pub use backend::Backend;
pub use client::WidgetClient;
pub use poller::TranscriptPoller;
