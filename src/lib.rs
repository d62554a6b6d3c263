pub mod access;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod services;
pub mod state;
pub mod utils;

pub use app::app;
pub use state::AppState;
