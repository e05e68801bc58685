// Public modules
pub mod chat;
pub mod client;
pub mod directory;
pub mod error;
pub mod observability;
pub mod poll;
pub mod render;
pub mod types;
pub mod utils;

// Re-exports
pub use client::Deskmate;
pub use error::{Error, Result};
pub use poll::{StatusPoller, StatusSnapshot};
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
