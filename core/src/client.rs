//! Stateless HTTP request builder and response parser for the restaurant API.
//!
//! # Design
//! `MunchiesClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the HTTP round-trip, keeping this
//! layer deterministic and free of I/O.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Filter, Restaurant, RestaurantStatus, RestaurantsEnvelope};

/// Synchronous, stateless client for the restaurant API.
#[derive(Debug, Clone)]
pub struct MunchiesClient {
    base_url: String,
}

impl MunchiesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_restaurants(&self) -> HttpRequest {
        self.get("/restaurants".to_string())
    }

    pub fn build_get_filter(&self, id: &str) -> HttpRequest {
        self.get(format!("/filter/{}", path_segment(id)))
    }

    pub fn build_get_restaurant_status(&self, id: &str) -> HttpRequest {
        self.get(format!("/open/{}", path_segment(id)))
    }

    /// Unwraps the `{ "restaurants": [...] }` envelope.
    pub fn parse_list_restaurants(&self, response: HttpResponse) -> Result<Vec<Restaurant>, ApiError> {
        let envelope: RestaurantsEnvelope = decode(response)?;
        Ok(envelope.restaurants)
    }

    pub fn parse_get_filter(&self, response: HttpResponse) -> Result<Filter, ApiError> {
        decode(response)
    }

    pub fn parse_restaurant_status(&self, response: HttpResponse) -> Result<RestaurantStatus, ApiError> {
        decode(response)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{path}", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Percent-encode `id` so it stays a single path segment. `/`, `?` and `#`
/// in an id never change which endpoint is hit.
fn path_segment(id: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(id)
}

/// Reject statuses outside `[200,300)`, then deserialize the body.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    Ok(serde_json::from_str(&response.body)?)
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESTAURANTS: &str = r#"{"restaurants":[{
        "id":"7450001","name":"Wayne Burgers","rating":4.6,
        "image_url":"https://food-delivery.umain.io/images/restaurant/burgers.png",
        "delivery_time_minutes":9,
        "filterIds":["5c64dea3-a4ac-4151-a2e3-42e7919a925d","614fd642-3fa6-4f15-8786-dd3a8358cd78"]
    }]}"#;

    fn client() -> MunchiesClient {
        MunchiesClient::new("http://localhost:3000/api/v1")
    }

    #[test]
    fn build_list_restaurants_produces_correct_request() {
        let req = client().build_list_restaurants();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/v1/restaurants");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_get_filter_appends_id() {
        let req = client().build_get_filter("5c64dea3-a4ac-4151-a2e3-42e7919a925d");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:3000/api/v1/filter/5c64dea3-a4ac-4151-a2e3-42e7919a925d"
        );
    }

    #[test]
    fn build_get_restaurant_status_appends_id() {
        let req = client().build_get_restaurant_status("7450001");
        assert_eq!(req.url, "http://localhost:3000/api/v1/open/7450001");
    }

    #[test]
    fn reserved_characters_in_ids_stay_in_one_segment() {
        let client = client();
        assert_eq!(
            client.build_get_filter("a?b").url,
            "http://localhost:3000/api/v1/filter/a%3Fb"
        );
        assert_eq!(
            client.build_get_filter("a#b").url,
            "http://localhost:3000/api/v1/filter/a%23b"
        );
        assert_eq!(
            client.build_get_restaurant_status("../restaurants").url,
            "http://localhost:3000/api/v1/open/..%2Frestaurants"
        );
    }

    #[test]
    fn encoded_ids_survive_url_parsing() {
        let req = client().build_get_filter("../restaurants?x#y");
        let url = url::Url::parse(&req.url).unwrap();
        assert_eq!(url.path(), "/api/v1/filter/..%2Frestaurants%3Fx%23y");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = MunchiesClient::new("http://localhost:3000/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
        assert_eq!(
            client.build_list_restaurants().url,
            "http://localhost:3000/api/v1/restaurants"
        );
    }

    #[test]
    fn parse_list_restaurants_unwraps_envelope() {
        let restaurants = client()
            .parse_list_restaurants(HttpResponse::new(200, RESTAURANTS))
            .unwrap();
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name, "Wayne Burgers");
        assert_eq!(restaurants[0].filter_ids.len(), 2);
    }

    #[test]
    fn parse_list_restaurants_rejects_bare_array() {
        let err = client()
            .parse_list_restaurants(HttpResponse::new(200, "[]"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_accepts_any_2xx() {
        let restaurants = client()
            .parse_list_restaurants(HttpResponse::new(203, r#"{"restaurants":[]}"#))
            .unwrap();
        assert!(restaurants.is_empty());
    }

    #[test]
    fn parse_get_filter_success() {
        let body = r#"{"id":"5c64dea3-a4ac-4151-a2e3-42e7919a925d","name":"Top Rated",
            "image_url":"https://food-delivery.umain.io/images/filter/filter_top_rated.png"}"#;
        let filter = client().parse_get_filter(HttpResponse::new(200, body)).unwrap();
        assert_eq!(filter.name, "Top Rated");
    }

    #[test]
    fn parse_get_filter_not_found_is_http_error() {
        let err = client()
            .parse_get_filter(HttpResponse::new(404, "not found"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 404, .. }));
        assert!(err.is_network());
    }

    #[test]
    fn parse_restaurant_status_success() {
        let body = r#"{"restaurant_id":"7450001","is_currently_open":true}"#;
        let status = client()
            .parse_restaurant_status(HttpResponse::new(200, body))
            .unwrap();
        assert_eq!(status.restaurant_id, "7450001");
        assert!(status.is_currently_open);
    }

    #[test]
    fn parse_restaurant_status_server_error() {
        let err = client()
            .parse_restaurant_status(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        match err {
            ApiError::HttpStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_restaurant_status_bad_json() {
        let err = client()
            .parse_restaurant_status(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(!err.is_network());
    }
}
