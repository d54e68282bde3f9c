//! Cooperative scheduling yields.
//!
//! One FreeRTOS tick between per-address bus transactions keeps
//! lower-priority tasks scheduled during a sweep; a longer delay paces
//! the idle poll loop. Host builds compile both to no-ops.

/// Milliseconds the dispatcher sleeps when a poll returns no line.
pub const IDLE_DELAY_MS: u32 = 10;

/// Yield for one scheduler tick between consecutive addresses.
///
/// This is pacing, not backoff: it carries no ordering guarantee beyond
/// happening between transactions.
pub fn pace() {
    #[cfg(all(not(test), target_arch = "xtensa"))]
    unsafe {
        esp_idf_svc::sys::vTaskDelay(1);
    }
}

/// Idle delay between transport polls when no line arrived.
pub fn idle() {
    #[cfg(all(not(test), target_arch = "xtensa"))]
    esp_idf_svc::hal::delay::FreeRtos::delay_ms(IDLE_DELAY_MS);
}
