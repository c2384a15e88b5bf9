// src/lib.rs
pub mod config;
pub mod error;
pub mod message;
pub mod services;

pub use config::ClientConfig;
pub use error::{ChatError, ConfigError, TransportError};
pub use services::conversation::{SessionEnd, ask, run_conversation};
pub use services::transport::{HttpTransport, Transport};
