pub mod constants;
pub mod error;
pub mod message;

pub use constants::*;
pub use error::{Result, SseError};
pub use message::SseMessage;
