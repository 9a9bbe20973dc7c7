// Throttled logging for scroll and resize handlers.
//
// Scroll listeners fire every frame; logging from them unthrottled floods
// the console and stalls the page it is trying to describe.

use std::sync::atomic::{AtomicUsize, Ordering};

const WINDOW: usize = 100;
const LOGS_PER_WINDOW: usize = 5;

/// Call counter for one high-frequency log site.
pub struct Throttle {
    tag: &'static str,
    count: AtomicUsize,
}

impl Throttle {
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            count: AtomicUsize::new(0),
        }
    }

    /// Logs the first few messages out of every hundred calls.
    pub fn log(&self, message: impl FnOnce() -> String) {
        let count = self.count.fetch_add(1, Ordering::Relaxed) % WINDOW;
        match verdict(count) {
            Verdict::Log => zoon::println!("{}: {}", self.tag, message()),
            Verdict::Announce => {
                zoon::println!("{}: rate limit reached, suppressing further messages", self.tag)
            }
            Verdict::Skip => {}
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Log,
    Announce,
    Skip,
}

fn verdict(count_in_window: usize) -> Verdict {
    match count_in_window {
        count if count < LOGS_PER_WINDOW => Verdict::Log,
        LOGS_PER_WINDOW => Verdict::Announce,
        _ => Verdict::Skip,
    }
}
