//! Conversation view for Nexus: a thin egui layer over `nexus-core`.

pub mod state;
pub mod theme;
pub mod panels;

#[cfg(test)]
mod tests;
