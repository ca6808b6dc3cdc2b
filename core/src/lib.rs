//! API client core for the Munchies restaurant browser.
//!
//! # Overview
//! Fetches restaurants, the filters they reference and per-restaurant
//! open/closed status from the food-delivery REST API, and keeps the state
//! the list and detail screens render from.
//!
//! # Design
//! - `MunchiesClient` is stateless and I/O free: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`. Hosts that own
//!   their networking (the C ABI) use only this layer.
//! - `HttpTransport` executes requests; `NetworkService` combines the two and
//!   implements the fetch traits (`RestaurantFetching`, `FilterFetching`,
//!   `StatusFetching`).
//! - `RestaurantListState` and `RestaurantStatusState` are explicit state
//!   containers driven by those traits, so tests swap in doubles.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod loader;
pub mod selection;
pub mod service;
pub mod status;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::MunchiesClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use fetch::{FilterFetching, MunchiesApi, RestaurantFetching, StatusFetching};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use loader::RestaurantListState;
pub use selection::FilterSelection;
pub use service::NetworkService;
pub use status::RestaurantStatusState;
pub use transport::HttpTransport;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use types::{Filter, Restaurant, RestaurantStatus};
