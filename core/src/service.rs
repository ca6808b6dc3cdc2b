//! Network-backed implementation of the fetch traits.
//!
//! `NetworkService` glues the pure `MunchiesClient` to an `HttpTransport`:
//! build the request, execute it, parse the response.

use async_trait::async_trait;
use log::warn;

use crate::client::MunchiesClient;
use crate::error::ApiError;
use crate::fetch::{FilterFetching, RestaurantFetching, StatusFetching};
use crate::transport::HttpTransport;
use crate::types::{Filter, Restaurant, RestaurantStatus};

#[derive(Debug, Clone)]
pub struct NetworkService<T> {
    client: MunchiesClient,
    transport: T,
}

impl<T: HttpTransport> NetworkService<T> {
    pub fn new(client: MunchiesClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &MunchiesClient {
        &self.client
    }
}

#[cfg(feature = "reqwest")]
impl NetworkService<crate::transport::ReqwestTransport> {
    /// Service talking to `config.base_url` over reqwest.
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self, ApiError> {
        let transport = crate::transport::ReqwestTransport::new(config)?;
        Ok(Self::new(MunchiesClient::new(&config.base_url), transport))
    }
}

#[async_trait]
impl<T: HttpTransport> RestaurantFetching for NetworkService<T> {
    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        let response = self
            .transport
            .execute(self.client.build_list_restaurants())
            .await?;
        self.client
            .parse_list_restaurants(response)
            .inspect_err(|e| warn!("restaurant list failed: {e}"))
    }
}

#[async_trait]
impl<T: HttpTransport> FilterFetching for NetworkService<T> {
    async fn fetch_filter(&self, id: &str) -> Result<Filter, ApiError> {
        let response = self.transport.execute(self.client.build_get_filter(id)).await?;
        self.client
            .parse_get_filter(response)
            .inspect_err(|e| warn!("filter {id} failed: {e}"))
    }
}

#[async_trait]
impl<T: HttpTransport> StatusFetching for NetworkService<T> {
    async fn fetch_restaurant_status(&self, id: &str) -> Result<RestaurantStatus, ApiError> {
        let response = self
            .transport
            .execute(self.client.build_get_restaurant_status(id))
            .await?;
        self.client
            .parse_restaurant_status(response)
            .inspect_err(|e| warn!("status for {id} failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpRequest, HttpResponse};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned responses keyed by URL and records every request.
    #[derive(Default)]
    struct CannedTransport {
        responses: HashMap<String, HttpResponse>,
        seen: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn with(mut self, url: &str, status: u16, body: &str) -> Self {
            self.responses
                .insert(url.to_string(), HttpResponse::new(status, body));
            self
        }
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request.url.clone());
            self.responses
                .get(&request.url)
                .cloned()
                .ok_or_else(|| ApiError::Transport(format!("connection refused: {}", request.url)))
        }
    }

    const BASE: &str = "http://api.test/api/v1";

    fn service(transport: CannedTransport) -> NetworkService<CannedTransport> {
        NetworkService::new(MunchiesClient::new(BASE), transport)
    }

    fn filter_body(id: &str, name: &str) -> String {
        format!(r#"{{"id":"{id}","name":"{name}","image_url":"https://example.com/{id}.png"}}"#)
    }

    #[tokio::test]
    async fn fetch_restaurants_goes_through_transport() {
        let transport = CannedTransport::default().with(
            &format!("{BASE}/restaurants"),
            200,
            r#"{"restaurants":[{"id":"1","name":"Pizza Palace","rating":4.2,
                "image_url":"https://example.com/1.png","delivery_time_minutes":25,
                "filterIds":["f1"]}]}"#,
        );
        let service = service(transport);
        let restaurants = service.fetch_restaurants().await.unwrap();
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name, "Pizza Palace");
        assert_eq!(
            *service.transport.seen.lock().unwrap(),
            vec![format!("{BASE}/restaurants")]
        );
    }

    #[tokio::test]
    async fn fetch_filters_requests_each_id() {
        let transport = CannedTransport::default()
            .with(&format!("{BASE}/filter/f1"), 200, &filter_body("f1", "Top Rated"))
            .with(&format!("{BASE}/filter/f2"), 200, &filter_body("f2", "Take-Out"));
        let service = service(transport);
        let filters = service
            .fetch_filters(&["f1".to_string(), "f2".to_string()])
            .await
            .unwrap();
        let names: Vec<_> = filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Top Rated", "Take-Out"]);
        assert_eq!(service.transport.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn one_missing_filter_fails_the_batch() {
        let transport = CannedTransport::default()
            .with(&format!("{BASE}/filter/f1"), 200, &filter_body("f1", "Top Rated"))
            .with(&format!("{BASE}/filter/f2"), 404, "");
        let err = service(transport)
            .fetch_filters(&["f1".to_string(), "f2".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_transport_error() {
        let err = service(CannedTransport::default())
            .fetch_restaurant_status("1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn fetch_status_parses_body() {
        let transport = CannedTransport::default().with(
            &format!("{BASE}/open/1"),
            200,
            r#"{"restaurant_id":"1","is_currently_open":true}"#,
        );
        let status = service(transport).fetch_restaurant_status("1").await.unwrap();
        assert!(status.is_currently_open);
    }
}
