use leptos::logging::warn;

/// Blocking browser alert. On non-wasm targets the message is only logged.
#[cfg(target_arch = "wasm32")]
pub(crate) fn alert(message: &str) {
    match web_sys::window() {
        Some(w) => {
            let _ = w.alert_with_message(message);
        }
        None => warn!("[table] alert: {}", message),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn alert(message: &str) {
    warn!("[table] alert: {}", message);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_alert_off_browser_only_logs() {
        // Must not reach web_sys, which panics outside wasm32.
        alert("Please select at least one row to delete.");
    }
}
