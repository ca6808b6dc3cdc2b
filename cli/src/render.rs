//! Plain-text rendering of the list screen.

use munchies_core::{Filter, Restaurant, RestaurantListState};

/// Find the filter a user typed, by exact id or case-insensitive name.
pub fn resolve_filter<'a>(filters: &'a [Filter], wanted: &str) -> Option<&'a str> {
    filters
        .iter()
        .find(|f| f.id == wanted)
        .or_else(|| filters.iter().find(|f| f.name.eq_ignore_ascii_case(wanted)))
        .map(|f| f.id.as_str())
}

/// One line of filter chips in display order, selected ones marked `[x]`.
pub fn chips(state: &RestaurantListState) -> String {
    state
        .filters
        .iter()
        .map(|f| {
            let mark = if state.is_filter_selected(&f.id) { 'x' } else { ' ' };
            format!("[{mark}] {}", f.name)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn restaurant_card(state: &RestaurantListState, restaurant: &Restaurant) -> String {
    let mut card = format!(
        "{}  ★ {}  ({})",
        restaurant.name,
        restaurant.rating_text(),
        restaurant.delivery_time_text()
    );
    let tags = state.filter_tags_text(restaurant);
    if !tags.is_empty() {
        card.push_str("\n    ");
        card.push_str(&tags);
    }
    card
}
