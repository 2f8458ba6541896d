//! Nexus chat core: conversation state machine, markup parsing and
//! clipboard tracking, with no platform dependencies.

pub mod ports;
pub mod event_bus;
pub mod markup;
pub mod clipboard;
pub mod upload;
pub mod history;
pub mod state;
pub mod orchestrator;


pub use orchestrator::ChatOrchestrator;
pub use state::{ChatAction, ChatState, Effect, Phase};
