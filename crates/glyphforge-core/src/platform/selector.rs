//! Process-wide adapter cache.
//!
//! The discovery engine takes a caller-owned [`Adapter`]; this module is the
//! convenience accessor for callers that want the one-per-process value.
//! Its lifecycle is explicit: [`clear_adapter_cache`] drops the cached
//! instance and [`reload_adapter`] re-detects, so tests (and embedders that
//! hot-swap platforms) never depend on construction order.

use super::Adapter;
use crate::error::CoreResult;
use std::sync::{Arc, Mutex};
use tracing::debug;

static CACHED: Mutex<Option<Arc<Adapter>>> = Mutex::new(None);

/// The adapter for the running platform, constructing and caching it on
/// first use.
pub fn current_adapter() -> CoreResult<Arc<Adapter>> {
    let mut cached = CACHED.lock().unwrap_or_else(|poison| poison.into_inner());
    if let Some(adapter) = cached.as_ref() {
        return Ok(Arc::clone(adapter));
    }
    let adapter = Arc::new(Adapter::detect()?);
    debug!("created platform adapter: {}", adapter.platform().as_str());
    *cached = Some(Arc::clone(&adapter));
    Ok(adapter)
}

/// Drop the cached adapter and detect again.
pub fn reload_adapter() -> CoreResult<Arc<Adapter>> {
    clear_adapter_cache();
    current_adapter()
}

/// Drop the cached adapter. The next [`current_adapter`] call re-detects.
pub fn clear_adapter_cache() {
    let mut cached = CACHED.lock().unwrap_or_else(|poison| poison.into_inner());
    if cached.take().is_some() {
        debug!("adapter cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test body: the cache is process-global, and parallel tests
    // touching it would race each other.
    #[test]
    fn caches_clears_and_reloads() {
        clear_adapter_cache();
        let first = current_adapter().unwrap();
        let second = current_adapter().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        clear_adapter_cache();
        let third = current_adapter().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first.platform(), third.platform());

        let fourth = reload_adapter().unwrap();
        assert!(!Arc::ptr_eq(&third, &fourth));
    }
}
