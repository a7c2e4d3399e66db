pub mod catalog;
pub mod orchestrator;
pub mod reducer;
pub mod sweep;

pub use crate::domain::model::{CardRecord, SearchPage, SourceSet};
pub use crate::domain::ports::{CardCatalog, ConfigProvider};
pub use crate::utils::error::Result;
