use crate::domain::model::{SearchPage, SourceSet};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote card catalog.
#[async_trait]
pub trait CardCatalog: Send + Sync {
    /// Fetches one page of a card search. `url` is either an initial search
    /// URL or a continuation link returned by a previous page, used verbatim.
    async fn fetch_page(&self, url: &str) -> Result<SearchPage>;

    async fn fetch_sets(&self) -> Result<Vec<SourceSet>>;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_base_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn excluded_set_types(&self) -> &[String];
    fn include_digital(&self) -> bool;
    fn selected_sets(&self) -> &[String];
}
