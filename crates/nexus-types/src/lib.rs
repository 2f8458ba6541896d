pub mod message;
pub mod block;
pub mod event;
pub mod upload;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::ChatError;
pub type Result<T> = std::result::Result<T, ChatError>;
