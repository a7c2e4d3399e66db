pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::scryfall::ScryfallClient;
pub use core::reducer::{reduce, AggregateState, SweepEvent, Tagged};
pub use core::sweep::SweepEngine;
pub use domain::selection::SelectionStore;
pub use utils::error::{Result, SweepError};
