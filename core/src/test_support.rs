//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::error::ApiError;
use crate::fetch::{FilterFetching, RestaurantFetching, StatusFetching};
use crate::types::{Filter, Restaurant, RestaurantStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Restaurants,
    Filter(String),
    Status(String),
}

/// In-memory backend with per-endpoint failure switches. Records every call.
#[derive(Default)]
pub struct MockNetwork {
    pub restaurants: Vec<Restaurant>,
    pub filters: Vec<Filter>,
    pub status: Option<RestaurantStatus>,
    pub restaurants_error: Option<ApiError>,
    pub filters_error: Option<ApiError>,
    pub status_error: Option<ApiError>,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl MockNetwork {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RestaurantFetching for MockNetwork {
    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.record(Call::Restaurants);
        match &self.restaurants_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.restaurants.clone()),
        }
    }
}

#[async_trait]
impl FilterFetching for MockNetwork {
    async fn fetch_filter(&self, id: &str) -> Result<Filter, ApiError> {
        self.record(Call::Filter(id.to_string()));
        if let Some(err) = &self.filters_error {
            return Err(err.clone());
        }
        self.filters
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| ApiError::HttpStatus {
                status: 404,
                body: format!("no filter {id}"),
            })
    }
}

#[async_trait]
impl StatusFetching for MockNetwork {
    async fn fetch_restaurant_status(&self, id: &str) -> Result<RestaurantStatus, ApiError> {
        self.record(Call::Status(id.to_string()));
        if let Some(err) = &self.status_error {
            return Err(err.clone());
        }
        self.status.clone().ok_or_else(|| ApiError::HttpStatus {
            status: 500,
            body: String::new(),
        })
    }
}

pub fn offline() -> ApiError {
    ApiError::Transport("not connected to the internet".to_string())
}

pub fn filter(id: &str, name: &str) -> Filter {
    Filter {
        id: id.to_string(),
        name: name.to_string(),
        image_url: Url::parse(&format!("https://example.com/{id}.png")).unwrap(),
    }
}

pub fn restaurant(id: &str, name: &str, filter_ids: &[&str]) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        rating: 4.0,
        image_url: Url::parse(&format!("https://example.com/{id}.png")).unwrap(),
        delivery_time_minutes: 25,
        filter_ids: filter_ids.iter().map(|s| s.to_string()).collect(),
    }
}

/// "Top Rated", "Fast Delivery", "Eat-In" as filter-1..3.
pub fn all_filters() -> Vec<Filter> {
    vec![
        filter("filter-1", "Top Rated"),
        filter("filter-2", "Fast Delivery"),
        filter("filter-3", "Eat-In"),
    ]
}

/// Three restaurants tagged {1,2,3}, {1,2} and {1}.
pub fn all_restaurants() -> Vec<Restaurant> {
    vec![
        restaurant("rest-1", "Great Food Place", &["filter-1", "filter-2", "filter-3"]),
        restaurant("rest-2", "Pizza Palace", &["filter-1", "filter-2"]),
        restaurant("rest-3", "Burger Bar", &["filter-1"]),
    ]
}

pub fn status(restaurant_id: &str, open: bool) -> RestaurantStatus {
    RestaurantStatus {
        restaurant_id: restaurant_id.to_string(),
        is_currently_open: open,
    }
}
