pub mod config;
pub mod delivery;
pub mod discovery;
pub mod error;
pub mod message;
pub mod platform;
pub mod render;
pub mod resolve;

pub use error::SendmailError;
pub type Result<T> = std::result::Result<T, SendmailError>;
