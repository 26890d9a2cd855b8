pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod summary;
pub mod ui;

pub use app::router;
pub use chart::{AlignPolicy, align, align_with, display_range};
pub use config::Config;
pub use state::AppState;
