//! Serde mirrors of the card API objects, limited to the fields we consume.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<RawCard>,
}

/// A raw card as returned by the search and named-lookup endpoints.
///
/// Everything except `id` and `name` is defaulted: the API omits fields
/// freely (no oracle text on vanilla creatures, no images on some layouts).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImageUris {
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

impl RawCard {
    /// Best available image URL, empty when the card has none.
    pub fn image_url(&self) -> String {
        self.image_uris
            .as_ref()
            .and_then(|uris| uris.normal.clone().or_else(|| uris.large.clone()))
            .unwrap_or_default()
    }
}
