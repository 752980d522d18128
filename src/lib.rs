pub mod app;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod greeting;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod refresh;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use dataset::Dataset;
pub use provider::{DogApiProvider, ResourceProvider};
pub use refresh::{RefreshController, RefreshOutcome};
pub use scheduler::spawn_refresh_loop;
pub use state::AppState;
