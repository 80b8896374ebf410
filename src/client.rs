//! ShuttleAI client: configuration and the request dispatcher.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod dispatch;
mod payload;

pub use builder::ShuttleClientBuilder;
pub use dispatch::{ClientConfig, ShuttleClient, DEFAULT_BASE_URL};
pub use payload::Payload;
