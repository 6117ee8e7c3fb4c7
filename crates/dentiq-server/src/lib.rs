pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod state;

pub use config::{AppConfig, BootstrapConfig, LoggingConfig, ServerConfig, StorageConfig};
pub use error::ApiError;
pub use observability::{init_tracing, shutdown_tracing};
pub use server::{DentiqServer, ServerBuilder, build_app};
pub use state::AppState;
