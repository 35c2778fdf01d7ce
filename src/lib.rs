pub mod config;
pub mod error;
pub mod handler;
pub mod lifecycle;
pub mod logger;
pub mod response;
pub mod server;
pub mod serving;
pub mod url;

pub use error::{ConfigError, StartError};
pub use lifecycle::{CodePresenter, Controller, ServerState};
pub use server::FileServer;
pub use serving::{ServingConfig, SharedServing};
