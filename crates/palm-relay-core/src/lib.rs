//! Palm Relay Core - relay palm photos to a multimodal LLM.
//!
//! A single HTTP handler takes a base64 image data URL, attaches a fixed
//! prompt pair, calls the configured upstream API, and returns the text it
//! produced.
//!
//! ```text
//! validate → credential → payload → upstream call → extract text → respond
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use palm_relay_core::{server, Config, Relay};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> palm_relay_core::Result<()> {
//!     let config = Config::load()?;
//!     let relay = Arc::new(Relay::from_config(&config)?);
//!     let app = server::router(relay, &config.server);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8787").await.unwrap();
//!     server::serve(listener, app, std::future::pending()).await.unwrap();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod prompt;
pub mod relay;
pub mod server;
pub mod upstream;

pub use config::Config;
pub use error::{ConfigError, RelayError, Result};
pub use prompt::PromptSet;
pub use relay::Relay;
pub use upstream::{extract_text, ImageInput, ProviderAdapter, ProviderFactory};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
