pub mod app;
pub mod components;
pub mod pane;
pub mod state;

pub use app::ChatApp;
pub use state::AppState;
