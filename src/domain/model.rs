use serde::{Deserialize, Serialize};

/// A set (expansion, printing group) listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSet {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub icon_svg_uri: String,
    #[serde(default)]
    pub digital: bool,
    pub set_type: String,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub card_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetList {
    pub data: Vec<SourceSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardPrices {
    #[serde(default)]
    pub eur: Option<String>,
}

/// One priced printing of a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub set: String,
    pub name: String,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    /// Double-faced cards carry their images per face.
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default)]
    pub prices: CardPrices,
    #[serde(default)]
    pub collector_number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
}

impl CardRecord {
    pub fn price(&self) -> Option<&str> {
        self.prices.eur.as_deref()
    }

    pub fn has_price(&self) -> bool {
        self.prices.eur.is_some()
    }

    /// Numeric price used for ordering. Present but non-numeric prices rank
    /// below every numeric one.
    pub fn price_value(&self) -> f64 {
        self.price()
            .and_then(|p| p.trim().parse::<f64>().ok())
            .filter(|v| !v.is_nan())
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// Normal-size image, falling back to the front face.
    pub fn image_url(&self) -> Option<&str> {
        if let Some(ref uris) = self.image_uris {
            return uris.normal.as_deref();
        }
        self.card_faces
            .as_ref()
            .and_then(|faces| faces.first())
            .and_then(|face| face.image_uris.as_ref())
            .and_then(|uris| uris.normal.as_deref())
    }
}

/// One page of a card search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub data: Vec<CardRecord>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
}

impl SearchPage {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Error body returned by the catalog for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogErrorBody {
    #[serde(default)]
    pub status: u16,
    pub code: String,
    #[serde(default)]
    pub details: String,
}

/// Why a page fetch did not produce a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FetchFailure {
    NetworkError(String),
    DecodeError(String),
    UpstreamError { status: u16, details: String },
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::NetworkError(msg) => write!(f, "network error: {}", msg),
            FetchFailure::DecodeError(msg) => write!(f, "decode error: {}", msg),
            FetchFailure::UpstreamError { status, details } => {
                write!(f, "upstream error {}: {}", status, details)
            }
        }
    }
}

/// Failure marker kept per source in the aggregate state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub url: String,
    pub reason: FetchFailure,
}
