//! C-ABI bindings over the facade, for embedding into a host process
//! (mobile runtime, browser extension shell) across a language boundary.
//!
//! Every function here is null-safe at the boundary: a null or
//! non-UTF-8 C string yields the documented typed failure value rather
//! than panicking or dereferencing invalid memory.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::facade;

unsafe fn c_str_to_rust<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

#[no_mangle]
pub extern "C" fn urlfilter_init() -> bool {
    facade::native_init()
}

#[no_mangle]
pub unsafe extern "C" fn urlfilter_load_filter_rules(text: *const c_char) -> bool {
    match c_str_to_rust(text) {
        Some(text) => facade::native_load_filter_rules(text),
        None => false,
    }
}

#[no_mangle]
pub unsafe extern "C" fn urlfilter_should_block(url: *const c_char) -> bool {
    match c_str_to_rust(url) {
        Some(url) => facade::native_filter_url(url),
        None => false,
    }
}

#[no_mangle]
pub unsafe extern "C" fn urlfilter_should_block_with_context(
    url: *const c_char,
    document_url: *const c_char,
    resource_type: *const c_char,
) -> bool {
    let url = match c_str_to_rust(url) {
        Some(u) => u,
        None => return false,
    };
    let document_url = c_str_to_rust(document_url).unwrap_or("");
    let resource_type = c_str_to_rust(resource_type).unwrap_or("");
    facade::native_filter_url_with_context(url, document_url, resource_type)
}

#[no_mangle]
pub extern "C" fn urlfilter_clear_filters() -> bool {
    facade::native_clear_filters()
}

#[no_mangle]
pub extern "C" fn urlfilter_cleanup() {
    facade::native_cleanup();
}

/// Returns an owned C string the caller must free with
/// `urlfilter_free_string`, or null on empty/invalid input.
#[no_mangle]
pub unsafe extern "C" fn urlfilter_normalize_url(url: *const c_char) -> *mut c_char {
    let url = match c_str_to_rust(url) {
        Some(u) => u,
        None => return std::ptr::null_mut(),
    };
    match facade::native_normalize_url(url) {
        Some(normalized) => match CString::new(normalized) {
            Ok(cstring) => cstring.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        None => std::ptr::null_mut(),
    }
}

/// Returns an owned C string the caller must free with
/// `urlfilter_free_string`, or null on empty/invalid input.
#[no_mangle]
pub unsafe extern "C" fn urlfilter_extract_domain(url: *const c_char) -> *mut c_char {
    let url = match c_str_to_rust(url) {
        Some(u) => u,
        None => return std::ptr::null_mut(),
    };
    match facade::native_extract_domain(url) {
        Some(domain) => match CString::new(domain) {
            Ok(cstring) => cstring.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        None => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by `urlfilter_normalize_url` or
/// `urlfilter_extract_domain`. Null-safe.
#[no_mangle]
pub unsafe extern "C" fn urlfilter_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
