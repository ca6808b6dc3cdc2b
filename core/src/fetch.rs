//! Fetch contracts consumed by the list and detail state containers.
//!
//! Each screen depends only on the capability it needs, so tests can hand
//! in a double for one trait without implementing the others.

use async_trait::async_trait;
use futures::future::try_join_all;
use log::debug;

use crate::error::ApiError;
use crate::types::{Filter, Restaurant, RestaurantStatus};

#[async_trait]
pub trait RestaurantFetching: Send + Sync {
    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, ApiError>;
}

#[async_trait]
pub trait FilterFetching: Send + Sync {
    async fn fetch_filter(&self, id: &str) -> Result<Filter, ApiError>;

    /// Fetch every id concurrently and join. The first failure fails the
    /// whole batch; no partial list is returned. Output follows `ids` order.
    async fn fetch_filters(&self, ids: &[String]) -> Result<Vec<Filter>, ApiError> {
        debug!("fetching {} filters", ids.len());
        try_join_all(ids.iter().map(|id| self.fetch_filter(id))).await
    }
}

#[async_trait]
pub trait StatusFetching: Send + Sync {
    async fn fetch_restaurant_status(&self, id: &str) -> Result<RestaurantStatus, ApiError>;
}

/// Everything the app needs from the backend.
pub trait MunchiesApi: RestaurantFetching + FilterFetching + StatusFetching {}

impl<T> MunchiesApi for T where T: RestaurantFetching + FilterFetching + StatusFetching + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use url::Url;

    /// Resolves filters after a per-id delay so completion order differs
    /// from request order.
    struct SlowFilters {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl SlowFilters {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FilterFetching for SlowFilters {
        async fn fetch_filter(&self, id: &str) -> Result<Filter, ApiError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let delay = match id {
                "a" => 30,
                "b" => 10,
                _ => 20,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if id == "bad" {
                return Err(ApiError::HttpStatus {
                    status: 404,
                    body: String::new(),
                });
            }
            Ok(Filter {
                id: id.to_string(),
                name: id.to_uppercase(),
                image_url: Url::parse("https://example.com/f.png").unwrap(),
            })
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn fetch_filters_runs_requests_concurrently() {
        let fetcher = SlowFilters::new();
        let filters = fetcher.fetch_filters(&ids(&["a", "b", "c"])).await.unwrap();
        let got: Vec<_> = filters.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(got, ["a", "b", "c"]);
        assert_eq!(fetcher.peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fetch_filters_fails_as_a_whole() {
        let fetcher = SlowFilters::new();
        let err = fetcher
            .fetch_filters(&ids(&["a", "bad", "c"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn fetch_filters_with_no_ids_is_empty() {
        let fetcher = SlowFilters::new();
        assert!(fetcher.fetch_filters(&[]).await.unwrap().is_empty());
    }
}
