//! Domain records for the restaurant API.
//!
//! # Design
//! Field names follow Rust conventions; serde attributes carry the wire
//! names. Image URLs are parsed at decode time, so a malformed URL is a
//! decode error rather than something the UI discovers later.
//! The mock-server crate defines its own copies of these shapes; the
//! integration tests catch drift between the two.

use serde::{Deserialize, Serialize};
use url::Url;

/// Separator placed between filter names in a restaurant's tag line.
pub const TAG_SEPARATOR: &str = " • ";

/// A restaurant as returned by `GET /restaurants`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub image_url: Url,
    /// Signed on the wire; a negative estimate decodes and renders as-is.
    pub delivery_time_minutes: i64,
    #[serde(rename = "filterIds")]
    pub filter_ids: Vec<String>,
}

/// A filter tag as returned by `GET /filter/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Filter {
    pub id: String,
    pub name: String,
    pub image_url: Url,
}

/// Open/closed state as returned by `GET /open/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestaurantStatus {
    pub restaurant_id: String,
    pub is_currently_open: bool,
}

/// Wire envelope of the restaurant list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RestaurantsEnvelope {
    pub restaurants: Vec<Restaurant>,
}

impl Restaurant {
    pub fn has_filter(&self, filter_id: &str) -> bool {
        self.filter_ids.iter().any(|id| id == filter_id)
    }

    /// Names of the filters in `filters` attached to this restaurant, in
    /// `filters` order, joined by [`TAG_SEPARATOR`]. Ids with no matching
    /// filter are skipped.
    pub fn filter_tags_text(&self, filters: &[Filter]) -> String {
        filters
            .iter()
            .filter(|filter| self.has_filter(&filter.id))
            .map(|filter| filter.name.as_str())
            .collect::<Vec<_>>()
            .join(TAG_SEPARATOR)
    }

    /// Rating with one decimal place, e.g. `4.6`.
    pub fn rating_text(&self) -> String {
        format!("{:.1}", self.rating)
    }

    pub fn delivery_time_text(&self) -> String {
        delivery_time_text(self.delivery_time_minutes)
    }
}

/// Human-readable delivery estimate: `"25 mins"`, `"1 hour"`,
/// `"1 hour 30 mins"`.
pub fn delivery_time_text(minutes: i64) -> String {
    if minutes < 60 {
        return if minutes == 1 {
            "1 min".to_string()
        } else {
            format!("{minutes} mins")
        };
    }
    let hours = minutes / 60;
    let remaining = minutes % 60;
    match (hours, remaining) {
        (1, 0) => "1 hour".to_string(),
        (h, 0) => format!("{h} hours"),
        (h, m) => format!("{h} hour {m} mins"),
    }
}

/// Sort filters for display: descending by name.
pub fn sort_filters_for_display(filters: &mut [Filter]) {
    filters.sort_by(|a, b| b.name.cmp(&a.name));
}
