//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Run seeds
//! - Visibility detection

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a new run's obstacle field
#[cfg(target_arch = "wasm32")]
pub fn random_seed() -> u64 {
    getrandom::u64().unwrap_or_else(|e| {
        log::warn!("getrandom failed ({}), seeding from clock", e);
        js_sys::Date::now() as u64
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn random_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Whether the page is currently hidden (tab switched, minimized)
#[cfg(target_arch = "wasm32")]
pub fn document_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.visibility_state() == web_sys::VisibilityState::Hidden)
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn document_hidden() -> bool {
    false
}
