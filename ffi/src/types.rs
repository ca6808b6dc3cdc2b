//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion and release helpers
//! live here to keep `lib.rs` focused on the `extern "C"` surface.
//!
//! Arrays handed to C are boxed slices, so they are released with the same
//! length they were created with.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use munchies_core::{ApiError, Filter, HttpMethod, Restaurant, RestaurantStatus};
use url::Url;

/// Opaque handle to a `MunchiesClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiMunchiesClient {
    pub(crate) inner: munchies_core::MunchiesClient,
}

// ---------------------------------------------------------------------------
// String and array helpers
// ---------------------------------------------------------------------------

/// Copy `s` into a heap C string. Interior NULs are dropped.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    let cleaned: String = s.chars().filter(|c| *c != '\0').collect();
    CString::new(cleaned).unwrap_or_default().into_raw()
}

/// Borrow a C string as `&str`. Null and non-UTF-8 input yield `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn from_c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

/// Leak `items` as a boxed slice. Empty input yields null.
pub(crate) fn into_raw_array<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let ptr = Box::into_raw(items.into_boxed_slice()) as *mut T;
    (ptr, len)
}

/// Reclaim an array produced by `into_raw_array`.
pub(crate) fn from_raw_array<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

/// View a caller-owned array as a slice. Null yields an empty slice.
///
/// # Safety
/// `ptr` must be null or point to `len` initialized values outliving `'a`.
pub(crate) unsafe fn borrow_array<'a, T>(ptr: *const T, len: u32) -> &'a [T] {
    if ptr.is_null() || len == 0 {
        return &[];
    }
    unsafe { std::slice::from_raw_parts(ptr, len as usize) }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `munchies_build_*` functions. The C caller executes the request
/// and passes the response back through `munchies_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: munchies_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .iter()
            .map(|(k, v)| FfiHeader {
                key: to_c_string(k),
                value: to_c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_array(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: to_c_string(&req.url),
            headers,
            headers_len,
        }))
    }

    pub(crate) fn free_fields(&self) {
        free_c_string(self.url);
        for header in from_raw_array(self.headers, self.headers_len) {
            free_c_string(header.key);
            free_c_string(header.value);
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing a request and passes a
/// pointer to a `munchies_parse_*` function. The FFI layer reads but does not
/// free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Domain records
// ---------------------------------------------------------------------------

/// A restaurant exposed to C.
#[repr(C)]
pub struct FfiRestaurant {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub rating: f64,
    pub image_url: *mut c_char,
    pub delivery_time_minutes: i64,
    pub filter_ids: *mut *mut c_char,
    pub filter_ids_len: u32,
}

impl FfiRestaurant {
    pub(crate) fn from_core(r: &Restaurant) -> Self {
        let ids: Vec<*mut c_char> = r.filter_ids.iter().map(|id| to_c_string(id)).collect();
        let (filter_ids, filter_ids_len) = into_raw_array(ids);
        FfiRestaurant {
            id: to_c_string(&r.id),
            name: to_c_string(&r.name),
            rating: r.rating,
            image_url: to_c_string(r.image_url.as_str()),
            delivery_time_minutes: r.delivery_time_minutes,
            filter_ids,
            filter_ids_len,
        }
    }

    /// Rebuild the core record. `None` when a field is null, not UTF-8, or
    /// the image URL does not parse.
    ///
    /// # Safety
    /// All pointers must be null or valid for reads.
    pub(crate) unsafe fn to_core(&self) -> Option<Restaurant> {
        let filter_ids = unsafe { borrow_array(self.filter_ids as *const *mut c_char, self.filter_ids_len) }
            .iter()
            .map(|ptr| unsafe { from_c_str(*ptr) }.map(str::to_string))
            .collect::<Option<Vec<_>>>()?;
        Some(Restaurant {
            id: unsafe { from_c_str(self.id) }?.to_string(),
            name: unsafe { from_c_str(self.name) }?.to_string(),
            rating: self.rating,
            image_url: Url::parse(unsafe { from_c_str(self.image_url) }?).ok()?,
            delivery_time_minutes: self.delivery_time_minutes,
            filter_ids,
        })
    }

    pub(crate) fn free_fields(&self) {
        free_c_string(self.id);
        free_c_string(self.name);
        free_c_string(self.image_url);
        for id in from_raw_array(self.filter_ids, self.filter_ids_len) {
            free_c_string(id);
        }
    }
}

/// A list of restaurants exposed to C.
#[repr(C)]
pub struct FfiRestaurantList {
    pub items: *mut FfiRestaurant,
    pub len: u32,
}

/// A filter tag exposed to C.
#[repr(C)]
pub struct FfiFilter {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub image_url: *mut c_char,
}

impl FfiFilter {
    pub(crate) fn from_core(f: &Filter) -> Self {
        FfiFilter {
            id: to_c_string(&f.id),
            name: to_c_string(&f.name),
            image_url: to_c_string(f.image_url.as_str()),
        }
    }

    /// # Safety
    /// All pointers must be null or valid for reads.
    pub(crate) unsafe fn to_core(&self) -> Option<Filter> {
        Some(Filter {
            id: unsafe { from_c_str(self.id) }?.to_string(),
            name: unsafe { from_c_str(self.name) }?.to_string(),
            image_url: Url::parse(unsafe { from_c_str(self.image_url) }?).ok()?,
        })
    }

    pub(crate) fn free_fields(&self) {
        free_c_string(self.id);
        free_c_string(self.name);
        free_c_string(self.image_url);
    }
}

/// Open/closed state exposed to C.
#[repr(C)]
pub struct FfiRestaurantStatus {
    pub restaurant_id: *mut c_char,
    pub is_currently_open: bool,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Transport = 2,
    Decode = 3,
    Panic = 4,
    NullArg = 5,
}

/// Tag that tells `munchies_free_result` what `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    RestaurantList = 1,
    Filter = 2,
    RestaurantStatus = 3,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiResult {
    fn ok(data_tag: FfiDataTag, data: *mut std::ffi::c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message: to_c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a `FfiRestaurantList`.
    pub(crate) fn ok_restaurant_list(restaurants: Vec<Restaurant>) -> *mut Self {
        let items: Vec<FfiRestaurant> = restaurants.iter().map(FfiRestaurant::from_core).collect();
        let (items, len) = into_raw_array(items);
        let list = Box::new(FfiRestaurantList { items, len });
        Self::ok(FfiDataTag::RestaurantList, Box::into_raw(list) as *mut std::ffi::c_void)
    }

    /// Build a success result carrying a single `FfiFilter`.
    pub(crate) fn ok_filter(filter: Filter) -> *mut Self {
        let filter = Box::new(FfiFilter::from_core(&filter));
        Self::ok(FfiDataTag::Filter, Box::into_raw(filter) as *mut std::ffi::c_void)
    }

    /// Build a success result carrying a `FfiRestaurantStatus`.
    pub(crate) fn ok_status(status: RestaurantStatus) -> *mut Self {
        let status = Box::new(FfiRestaurantStatus {
            restaurant_id: to_c_string(&status.restaurant_id),
            is_currently_open: status.is_currently_open,
        });
        Self::ok(FfiDataTag::RestaurantStatus, Box::into_raw(status) as *mut std::ffi::c_void)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::HttpStatus { .. } => FfiErrorCode::Http,
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::Decode(_) => FfiErrorCode::Decode,
        };
        Self::err(code, err.status().unwrap_or(0), &err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, &format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg)
    }

    /// Release the payload according to `data_tag`.
    pub(crate) fn free_data(&self) {
        if self.data.is_null() {
            return;
        }
        match self.data_tag {
            FfiDataTag::RestaurantList => {
                let list = unsafe { Box::from_raw(self.data as *mut FfiRestaurantList) };
                for item in from_raw_array(list.items, list.len) {
                    item.free_fields();
                }
            }
            FfiDataTag::Filter => {
                let filter = unsafe { Box::from_raw(self.data as *mut FfiFilter) };
                filter.free_fields();
            }
            FfiDataTag::RestaurantStatus => {
                let status = unsafe { Box::from_raw(self.data as *mut FfiRestaurantStatus) };
                free_c_string(status.restaurant_id);
            }
            FfiDataTag::None => {}
        }
    }
}
