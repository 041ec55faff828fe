//! HTTP surface of the hashlink mapping service.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod state;
pub mod validation;

pub use app::App;
pub use config::Cli;
pub use state::{AppState, RuntimeMode};
