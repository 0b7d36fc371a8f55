//! Queue between the web server and the worker.
//!
//! ## Architecture
//!
//! ```text
//! Webhooks → Web Server → event queue → Worker → EventHandler
//! ```

pub mod publisher;
pub mod types;

pub use publisher::Publisher;
pub use types::InboundEvent;
