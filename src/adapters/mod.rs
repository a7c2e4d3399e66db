// Adapters layer: concrete implementations for external systems (catalog HTTP, result export).

pub mod export;
pub mod scryfall;
