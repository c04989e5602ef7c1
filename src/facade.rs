//! Process-wide singleton entry point.
//!
//! Every function here is null-safe: an uninitialized engine, an empty
//! input, or an internal `FilterError` collapses to the documented
//! typed failure value. No error ever escapes this module.

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::engine::{EngineConfig, FilterEngine};
use crate::url;

static ENGINE: Lazy<Mutex<Option<FilterEngine>>> = Lazy::new(|| Mutex::new(None));

/// Create the engine if absent and initialize it. Idempotent.
pub fn native_init() -> bool {
    let mut guard = ENGINE.lock();
    if guard.is_none() {
        *guard = Some(FilterEngine::new(EngineConfig::default()));
    }
    match guard.as_ref().unwrap().initialize() {
        Ok(()) => true,
        Err(e) => {
            log::error!("native_init failed: {}", e);
            false
        }
    }
}

/// Load additional filter rules into the singleton engine.
pub fn native_load_filter_rules(text: &str) -> bool {
    let guard = ENGINE.lock();
    match guard.as_ref() {
        Some(engine) => match engine.load_filter_rules(text) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("native_load_filter_rules failed: {}", e);
                false
            }
        },
        None => false,
    }
}

/// Evaluate a bare URL with no document context or resource type.
pub fn native_filter_url(request_url: &str) -> bool {
    native_filter_url_with_context(request_url, "", "")
}

/// Evaluate a request with full context.
pub fn native_filter_url_with_context(request_url: &str, document_url: &str, resource_type: &str) -> bool {
    let guard = ENGINE.lock();
    match guard.as_ref() {
        Some(engine) => engine.should_block(request_url, document_url, resource_type),
        None => false,
    }
}

/// Clear all rules from the singleton engine.
pub fn native_clear_filters() -> bool {
    let guard = ENGINE.lock();
    match guard.as_ref() {
        Some(engine) => {
            engine.clear_filters();
            true
        }
        None => false,
    }
}

/// Normalize a URL; `None` on empty input.
pub fn native_normalize_url(request_url: &str) -> Option<String> {
    if request_url.is_empty() {
        return None;
    }
    Some(url::normalize(request_url))
}

/// Extract a URL's host; `None` on empty input.
pub fn native_extract_domain(request_url: &str) -> Option<String> {
    if request_url.is_empty() {
        return None;
    }
    Some(url::extract_domain(request_url))
}

/// Destroy the singleton engine. Idempotent.
pub fn native_cleanup() {
    let mut guard = ENGINE.lock();
    *guard = None;
}
