//! C-ABI wrapper around `munchies-core`.
//!
//! # Overview
//! Exposes the restaurant API through `extern "C"` functions so a mobile host
//! with its own networking stack can build requests, execute them, and hand
//! the responses back for parsing. The selection and formatting rules are
//! exposed too, so the host renders exactly what the Rust state containers
//! would.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-endpoint `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiResult` envelope with `FfiDataTag` + `void* data` conveys
//!   success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `munchies_free_*` function to release them.

pub mod types;

use std::cmp::Ordering;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use munchies_core::types::delivery_time_text;
use munchies_core::{FilterSelection, HttpResponse};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `base_url` (e.g. `https://host/api/v1`).
///
/// Returns null if `base_url` is null, not UTF-8, or if an internal panic
/// occurs. The caller must free the returned pointer with
/// `munchies_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_client_new(base_url: *const c_char) -> *mut FfiMunchiesClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { from_c_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let client = munchies_core::MunchiesClient::new(url);
        Box::into_raw(Box::new(FfiMunchiesClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `munchies_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_client_free(client: *mut FfiMunchiesClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request listing all restaurants.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `munchies_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_build_list_restaurants(
    client: *const FfiMunchiesClient,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_restaurants())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request fetching one filter by id.
///
/// Returns null if `client` or `id` is null, or if `id` is not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_build_get_filter(
    client: *const FfiMunchiesClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(id) = (unsafe { from_c_str(id) }) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_get_filter(id))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request fetching a restaurant's open/closed status.
///
/// Returns null if `client` or `id` is null, or if `id` is not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_build_get_restaurant_status(
    client: *const FfiMunchiesClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(id) = (unsafe { from_c_str(id) }) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_get_restaurant_status(id))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null or
/// non-UTF-8 body becomes an empty string.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = unsafe { from_c_str(resp.body) }.unwrap_or("");
    HttpResponse::new(resp.status, body)
}

/// Shared null checks and panic guard for every `munchies_parse_*`.
fn parse_with<F>(
    client: *const FfiMunchiesClient,
    response: *const FfiHttpResponse,
    op: &str,
    parse: F,
) -> *mut FfiResult
where
    F: FnOnce(&munchies_core::MunchiesClient, HttpResponse) -> *mut FfiResult,
{
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        parse(&client.inner, ffi_response_to_core(resp))
    }))
    .unwrap_or_else(|_| FfiResult::panic(&format!("panic in {op}")))
}

/// Parse the response of a list-restaurants request.
///
/// Returns a result with `data_tag = RestaurantList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_parse_list_restaurants(
    client: *const FfiMunchiesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(client, response, "munchies_parse_list_restaurants", |c, resp| {
        match c.parse_list_restaurants(resp) {
            Ok(restaurants) => FfiResult::ok_restaurant_list(restaurants),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

/// Parse the response of a get-filter request.
///
/// Returns a result with `data_tag = Filter` on success.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_parse_get_filter(
    client: *const FfiMunchiesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(client, response, "munchies_parse_get_filter", |c, resp| {
        match c.parse_get_filter(resp) {
            Ok(filter) => FfiResult::ok_filter(filter),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

/// Parse the response of a restaurant-status request.
///
/// Returns a result with `data_tag = RestaurantStatus` on success.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_parse_restaurant_status(
    client: *const FfiMunchiesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(client, response, "munchies_parse_restaurant_status", |c, resp| {
        match c.parse_restaurant_status(resp) {
            Ok(status) => FfiResult::ok_status(status),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Selection and display helpers
// ---------------------------------------------------------------------------

/// Sort `filters` in place for display: descending by name. Entries with a
/// null or non-UTF-8 name sort last.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_sort_filters(filters: *mut FfiFilter, len: u32) {
    if filters.is_null() || len == 0 {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let filters = unsafe { std::slice::from_raw_parts_mut(filters, len as usize) };
        filters.sort_by(|a, b| {
            let a = unsafe { from_c_str(a.name) };
            let b = unsafe { from_c_str(b.name) };
            match (a, b) {
                (Some(a), Some(b)) => b.cmp(a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    }));
}

/// True when every id in `selected` is one of the restaurant's filter ids.
/// An empty selection matches every restaurant. Returns false for a null or
/// malformed restaurant.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_restaurant_matches(
    restaurant: *const FfiRestaurant,
    selected: *const *const c_char,
    selected_len: u32,
) -> bool {
    catch_unwind(|| {
        if restaurant.is_null() {
            return false;
        }
        let Some(restaurant) = (unsafe { (*restaurant).to_core() }) else {
            return false;
        };
        let selection: FilterSelection = unsafe { borrow_array(selected, selected_len) }
            .iter()
            .filter_map(|ptr| unsafe { from_c_str(*ptr) })
            .collect();
        selection.matches(&restaurant)
    })
    .unwrap_or(false)
}

/// Names of `filters` attached to `restaurant`, in `filters` order, joined by
/// `" • "`. Returns null if `restaurant` is null or malformed. Free with
/// `munchies_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_filter_tags_text(
    restaurant: *const FfiRestaurant,
    filters: *const FfiFilter,
    filters_len: u32,
) -> *mut c_char {
    catch_unwind(|| {
        if restaurant.is_null() {
            return std::ptr::null_mut();
        }
        let Some(restaurant) = (unsafe { (*restaurant).to_core() }) else {
            return std::ptr::null_mut();
        };
        let filters: Vec<_> = unsafe { borrow_array(filters, filters_len) }
            .iter()
            .filter_map(|f| unsafe { f.to_core() })
            .collect();
        to_c_string(&restaurant.filter_tags_text(&filters))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Delivery estimate text, e.g. `"25 mins"` or `"1 hour 30 mins"`. Free with
/// `munchies_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_delivery_time_text(minutes: i64) -> *mut c_char {
    catch_unwind(|| to_c_string(&delivery_time_text(minutes))).unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `munchies_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        req.free_fields();
    });
}

/// Free an `FfiResult` returned by any `munchies_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        result.free_data();
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn munchies_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
