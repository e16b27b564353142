//! Leptos MultiTap Utilities
//!
//! Detects a burst of taps (e.g. five taps on a logo) as a hidden gesture.
//! Each tap must land within the window of the previous one, otherwise the
//! count starts over.

use leptos::prelude::*;

/// Pure tap counter, driven by caller-supplied timestamps
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapCounter {
    threshold: u32,
    window_ms: f64,
    count: u32,
    last_tap: Option<f64>,
}

impl TapCounter {
    pub const fn new(threshold: u32, window_ms: f64) -> Self {
        Self {
            threshold,
            window_ms,
            count: 0,
            last_tap: None,
        }
    }

    /// Record a tap at `now_ms`; true when the threshold is reached
    pub fn register(&mut self, now_ms: f64) -> bool {
        let in_window = self
            .last_tap
            .is_some_and(|last| now_ms - last <= self.window_ms);
        self.count = if in_window { self.count + 1 } else { 1 };
        self.last_tap = Some(now_ms);

        if self.count >= self.threshold {
            self.reset();
            return true;
        }
        false
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.last_tap = None;
    }
}

/// Milliseconds from the page's performance clock
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default()
}

/// Tap handler bound to a component
#[derive(Clone, Copy)]
pub struct MultiTap {
    counter: StoredValue<TapCounter>,
    on_trigger: Callback<()>,
}

impl MultiTap {
    /// Feed one tap; runs the callback when the burst completes
    pub fn tap(&self) {
        let now = now_ms();
        let mut fired = false;
        self.counter.update_value(|counter| fired = counter.register(now));
        if fired {
            self.on_trigger.run(());
        }
    }
}

/// Create a multi-tap handler for the current component
pub fn use_multi_tap(threshold: u32, window_ms: f64, on_trigger: Callback<()>) -> MultiTap {
    MultiTap {
        counter: StoredValue::new(TapCounter::new(threshold, window_ms)),
        on_trigger,
    }
}
