//! State behind the restaurant detail screen: open/closed status, fetched
//! independently of the list every time a detail view opens.

use log::{debug, warn};

use crate::error::ApiError;
use crate::fetch::StatusFetching;
use crate::types::RestaurantStatus;

pub const STATUS_ERROR_MESSAGE: &str = "Unable to load restaurant status";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantStatusState {
    restaurant_id: String,
    /// `None` until a status arrives, and again after a failed load.
    pub is_open: Option<bool>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl RestaurantStatusState {
    pub fn new(restaurant_id: impl Into<String>) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            is_open: None,
            is_loading: true,
            error_message: None,
        }
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    pub fn begin_load(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    pub fn status_loaded(&mut self, status: &RestaurantStatus) {
        if status.restaurant_id != self.restaurant_id {
            warn!(
                "status for {} answered with restaurant id {}",
                self.restaurant_id, status.restaurant_id
            );
        }
        self.is_open = Some(status.is_currently_open);
    }

    pub fn load_failed(&mut self, error: &ApiError) {
        warn!("status for {} failed: {error}", self.restaurant_id);
        self.error_message = Some(STATUS_ERROR_MESSAGE.to_string());
        self.is_open = None;
    }

    pub fn finish_load(&mut self) {
        self.is_loading = false;
    }

    pub async fn load<S: StatusFetching + ?Sized>(&mut self, fetcher: &S) {
        self.begin_load();
        match fetcher.fetch_restaurant_status(&self.restaurant_id).await {
            Ok(status) => {
                debug!("{} open: {}", self.restaurant_id, status.is_currently_open);
                self.status_loaded(&status);
            }
            Err(err) => self.load_failed(&err),
        }
        self.finish_load();
    }

    /// `"Open"`, `"Closed"` or `"Status unavailable"`; `None` while loading.
    pub fn status_text(&self) -> Option<&'static str> {
        if self.is_loading {
            return None;
        }
        Some(match self.is_open {
            Some(true) => "Open",
            Some(false) => "Closed",
            None => "Status unavailable",
        })
    }
}
