use crate::domain::model::SourceSet;
use crate::domain::ports::CardCatalog;
use crate::utils::error::Result;

/// Set types that never list priced paper cards.
pub const DEFAULT_EXCLUDED_SET_TYPES: [&str; 3] = ["alchemy", "token", "memorabilia"];

/// Selectable sets, loaded once from the catalog.
#[derive(Debug, Clone, Default)]
pub struct SetCatalog {
    sets: Vec<SourceSet>,
}

impl SetCatalog {
    pub async fn load<C: CardCatalog + ?Sized>(
        catalog: &C,
        excluded_set_types: &[String],
        include_digital: bool,
    ) -> Result<Self> {
        let all = catalog.fetch_sets().await?;
        let total = all.len();
        let catalog = Self::from_sets(all, excluded_set_types, include_digital);
        tracing::info!("📚 Loaded {} of {} set(s) from catalog", catalog.len(), total);
        Ok(catalog)
    }

    pub fn from_sets(sets: Vec<SourceSet>, excluded_set_types: &[String], include_digital: bool) -> Self {
        let sets = sets
            .into_iter()
            .filter(|set| !excluded_set_types.iter().any(|t| t == &set.set_type))
            .filter(|set| include_digital || !set.digital)
            .collect();
        Self { sets }
    }

    pub fn sets(&self) -> &[SourceSet] {
        &self.sets
    }

    pub fn find(&self, code: &str) -> Option<&SourceSet> {
        self.sets.iter().find(|set| set.code.eq_ignore_ascii_case(code))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
