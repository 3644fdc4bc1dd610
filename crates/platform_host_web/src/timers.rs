//! Browser timer service and wall-clock helper.

use platform_host::{TimerFuture, TimerService};

#[derive(Debug, Clone, Copy, Default)]
/// Timer service backed by `setTimeout`.
pub struct WebTimerService;

impl TimerService for WebTimerService {
    fn sleep(&self, delay_ms: u32) -> TimerFuture {
        #[cfg(target_arch = "wasm32")]
        {
            Box::pin(gloo_timers::future::TimeoutFuture::new(delay_ms))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = delay_ms;
            Box::pin(async {})
        }
    }
}

/// Milliseconds since the Unix epoch.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}
