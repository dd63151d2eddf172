//! Blocking user-facing notices for validation failures.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

/// Show `message` modally. Outside the browser this only logs.
pub fn blocking_notice(message: &str) {
    log::info!("notice: {message}");
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.alert_with_message(message) {
            log::warn!("failed to show notice: {err:?}");
        }
    }
}
