pub mod api;
pub mod app;
pub mod availability;
pub mod calendar;
pub mod chart;
pub mod config;
pub mod controller;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod subscription;
pub mod ui;
pub mod view;

pub use api::ApiClient;
pub use app::router;
pub use config::Config;
pub use controller::Controller;
pub use state::AppState;
