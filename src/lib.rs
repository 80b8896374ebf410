//! # shuttle-ai
//!
//! Thin async client for the ShuttleAI HTTP API.
//!
//! The crate knows the base URL and header conventions of the service and
//! nothing more: every call is a single POST to `{base_url}/{task}` with either
//! a JSON body or an audio upload, authenticated with a bearer token. Success
//! bodies are returned as raw bytes; failures are normalized into [`Error`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use shuttle_ai::{CancellationToken, ShuttleClient};
//!
//! #[tokio::main]
//! async fn main() -> shuttle_ai::Result<()> {
//!     let client = ShuttleClient::new("your-api-key")?;
//!     let body = client
//!         .dispatch(
//!             "chat/completions",
//!             "application/json",
//!             json!({"model": "shuttle-2.5", "messages": [{"role": "user", "content": "Hi"}]}),
//!             &CancellationToken::new(),
//!         )
//!         .await?;
//!     println!("{}", String::from_utf8_lossy(&body));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client configuration, builder and request dispatch |
//! | [`transport`] | Injectable HTTP transport and the default reqwest implementation |
//! | [`error`] | Error taxonomy and failure-body decoding |

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ClientConfig, Payload, ShuttleClient, ShuttleClientBuilder, DEFAULT_BASE_URL};
pub use error::{Error, ErrorBody, ErrorContext};
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use tokio_util::sync::CancellationToken;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
