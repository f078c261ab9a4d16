pub mod basic_cards;
pub mod cards;
pub mod checkpoint;
pub mod client;
pub mod config;
pub mod effects;
pub mod error;
pub mod events;
pub mod gameplay;
pub mod hooks;
pub mod library;
pub mod modifiers;
pub mod prompters;
pub mod scheduler;
pub mod zones;

#[cfg(feature = "test")]
pub mod tests;
