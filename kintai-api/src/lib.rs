pub mod adapters;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod router;
pub mod routes;

pub use app_state::AppState;
