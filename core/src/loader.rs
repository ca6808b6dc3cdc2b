//! State behind the restaurant list screen.
//!
//! # Design
//! `RestaurantListState` is a plain container with public fields. The
//! transition methods (`begin_load`, `restaurants_loaded`, `filters_loaded`,
//! `load_failed`, `finish_load`) are synchronous so a host that performs its
//! own I/O can drive them directly; [`RestaurantListState::load`] drives the
//! same transitions from the fetch traits.
//!
//! A load cycle fetches the restaurants, then only the filters they
//! reference. Failure at either stage sets `error_message` and leaves the
//! lists as they were at that point; there is no automatic retry.

use std::collections::BTreeSet;

use log::{info, warn};

use crate::error::ApiError;
use crate::fetch::{FilterFetching, RestaurantFetching};
use crate::selection::FilterSelection;
use crate::types::{sort_filters_for_display, Filter, Restaurant};

pub const LOAD_ERROR_PREFIX: &str = "Failed to load data";

#[derive(Debug, Clone)]
pub struct RestaurantListState {
    pub restaurants: Vec<Restaurant>,
    /// Filters referenced by `restaurants`, descending by name.
    pub filters: Vec<Filter>,
    pub selection: FilterSelection,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl Default for RestaurantListState {
    fn default() -> Self {
        Self {
            restaurants: Vec::new(),
            filters: Vec::new(),
            selection: FilterSelection::new(),
            is_loading: true,
            error_message: None,
        }
    }
}

impl RestaurantListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    /// Store a fresh restaurant list and return the distinct filter ids it
    /// references, in sorted order.
    pub fn restaurants_loaded(&mut self, restaurants: Vec<Restaurant>) -> Vec<String> {
        self.restaurants = restaurants;
        referenced_filter_ids(&self.restaurants)
    }

    pub fn filters_loaded(&mut self, mut filters: Vec<Filter>) {
        sort_filters_for_display(&mut filters);
        self.filters = filters;
    }

    pub fn load_failed(&mut self, error: &ApiError) {
        warn!("restaurant list load failed: {error}");
        self.error_message = Some(format!("{LOAD_ERROR_PREFIX}: {error}"));
    }

    pub fn finish_load(&mut self) {
        self.is_loading = false;
    }

    /// Run one full load cycle. Errors end up in `error_message`.
    pub async fn load<R, F>(&mut self, restaurants: &R, filters: &F)
    where
        R: RestaurantFetching + ?Sized,
        F: FilterFetching + ?Sized,
    {
        self.begin_load();
        match self.fetch_all(restaurants, filters).await {
            Ok(()) => info!(
                "loaded {} restaurants and {} filters",
                self.restaurants.len(),
                self.filters.len()
            ),
            Err(err) => self.load_failed(&err),
        }
        self.finish_load();
    }

    async fn fetch_all<R, F>(&mut self, restaurants: &R, filters: &F) -> Result<(), ApiError>
    where
        R: RestaurantFetching + ?Sized,
        F: FilterFetching + ?Sized,
    {
        let fetched = restaurants.fetch_restaurants().await?;
        let ids = self.restaurants_loaded(fetched);
        let fetched = filters.fetch_filters(&ids).await?;
        self.filters_loaded(fetched);
        Ok(())
    }

    pub fn filtered_restaurants(&self) -> Vec<&Restaurant> {
        self.selection.apply(&self.restaurants)
    }

    pub fn toggle_filter(&mut self, filter_id: &str) -> bool {
        self.selection.toggle(filter_id)
    }

    pub fn is_filter_selected(&self, filter_id: &str) -> bool {
        self.selection.is_selected(filter_id)
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
    }

    /// Tag line for `restaurant` using the currently loaded filters.
    pub fn filter_tags_text(&self, restaurant: &Restaurant) -> String {
        restaurant.filter_tags_text(&self.filters)
    }
}

/// Distinct filter ids across all restaurants.
pub fn referenced_filter_ids(restaurants: &[Restaurant]) -> Vec<String> {
    restaurants
        .iter()
        .flat_map(|r| r.filter_ids.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
