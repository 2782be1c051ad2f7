//! OpenGL debug output - routes GL debug messages to the engine logger
//!
//! Messages are counted per severity and identical messages are grouped so a
//! session report can be printed at shutdown.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use colored::*;
use rustc_hash::FxHashMap;
use kerberos_rhi::{engine_error, engine_trace, engine_warn};
use crate::gl::consts;

const SOURCE: &str = "kerberos::OpenGLDebug";

static DEBUG_STATS: DebugStatsTracker = DebugStatsTracker::new();

/// Distinct messages tracked for duplicate detection; later new messages are not tracked
const MAX_TRACKED_MESSAGES: usize = 1024;

static MESSAGE_TRACKER: Mutex<Option<FxHashMap<String, u32>>> = Mutex::new(None);

/// Debug message counts since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugMessageStats {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub notification: u32,
}

impl DebugMessageStats {
    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low + self.notification
    }
}

struct DebugStatsTracker {
    high: AtomicU32,
    medium: AtomicU32,
    low: AtomicU32,
    notification: AtomicU32,
}

impl DebugStatsTracker {
    const fn new() -> Self {
        Self {
            high: AtomicU32::new(0),
            medium: AtomicU32::new(0),
            low: AtomicU32::new(0),
            notification: AtomicU32::new(0),
        }
    }

    fn counter(&self, severity: u32) -> Option<&AtomicU32> {
        match severity {
            consts::DEBUG_SEVERITY_HIGH => Some(&self.high),
            consts::DEBUG_SEVERITY_MEDIUM => Some(&self.medium),
            consts::DEBUG_SEVERITY_LOW => Some(&self.low),
            consts::DEBUG_SEVERITY_NOTIFICATION => Some(&self.notification),
            _ => None,
        }
    }

    fn get_stats(&self) -> DebugMessageStats {
        DebugMessageStats {
            high: self.high.load(Ordering::Relaxed),
            medium: self.medium.load(Ordering::Relaxed),
            low: self.low.load(Ordering::Relaxed),
            notification: self.notification.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.high.store(0, Ordering::Relaxed);
        self.medium.store(0, Ordering::Relaxed);
        self.low.store(0, Ordering::Relaxed);
        self.notification.store(0, Ordering::Relaxed);
    }
}

/// Returns how many times `message` has been seen, this one included
///
/// `None` once [`MAX_TRACKED_MESSAGES`] distinct messages are tracked and
/// `message` is not one of them.
fn track_message(message: &str) -> Option<u32> {
    let mut guard = match MESSAGE_TRACKER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let messages = guard.get_or_insert_with(FxHashMap::default);
    if let Some(count) = messages.get_mut(message) {
        *count += 1;
        return Some(*count);
    }
    if messages.len() >= MAX_TRACKED_MESSAGES {
        return None;
    }
    messages.insert(message.to_string(), 1);
    Some(1)
}

/// Distinct messages currently tracked (at most [`MAX_TRACKED_MESSAGES`])
pub fn tracked_message_count() -> usize {
    match MESSAGE_TRACKER.lock() {
        Ok(guard) => guard.as_ref().map_or(0, FxHashMap::len),
        Err(poisoned) => poisoned.into_inner().as_ref().map_or(0, FxHashMap::len),
    }
}

pub fn debug_message_stats() -> DebugMessageStats {
    DEBUG_STATS.get_stats()
}

pub fn reset_debug_message_stats() {
    DEBUG_STATS.reset();
    if let Ok(mut guard) = MESSAGE_TRACKER.lock() {
        *guard = None;
    }
}

/// `glDebugMessageCallback` receiver
///
/// High and medium severities log as errors, low as warnings and
/// notifications as traces. Notifications are logged on first sight only;
/// once the duplicate tracker is full, new notifications are counted but not
/// logged until [`reset_debug_message_stats`].
pub fn opengl_message_callback(_source: u32, _message_type: u32, id: u32, severity: u32, message: &str) {
    if let Some(counter) = DEBUG_STATS.counter(severity) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
    let seen = track_message(message);

    match severity {
        consts::DEBUG_SEVERITY_HIGH | consts::DEBUG_SEVERITY_MEDIUM => {
            engine_error!(SOURCE, "[GL {}] {}", id, message);
        }
        consts::DEBUG_SEVERITY_LOW => {
            engine_warn!(SOURCE, "[GL {}] {}", id, message);
        }
        consts::DEBUG_SEVERITY_NOTIFICATION => {
            // Drivers repeat buffer-placement notifications every frame
            if seen == Some(1) {
                engine_trace!(SOURCE, "[GL {}] {}", id, message);
            }
        }
        _ => {
            engine_warn!(SOURCE, "[GL {}] unknown severity 0x{:04X}: {}", id, severity, message);
        }
    }
}

/// Print the debug message statistics of the session
pub fn print_debug_message_report() {
    let stats = debug_message_stats();

    if stats.total() == 0 {
        println!("\n{}", "✓ No GL debug messages".green().bold());
        return;
    }

    println!("\n{}", "=== GL Debug Output Report ===".bright_blue().bold());
    if stats.high > 0 {
        println!("  {} {}", "High:".red().bold(), stats.high);
    }
    if stats.medium > 0 {
        println!("  {} {}", "Medium:".red(), stats.medium);
    }
    if stats.low > 0 {
        println!("  {} {}", "Low:".yellow(), stats.low);
    }
    if stats.notification > 0 {
        println!("  {} {}", "Notification:".bright_black(), stats.notification);
    }
    println!("  {} {}", "Total:".white().bold(), stats.total());

    if let Ok(guard) = MESSAGE_TRACKER.lock() {
        let repeated = guard.as_ref()
            .map_or(0, |messages| messages.values().filter(|&&count| count > 1).count());
        if repeated > 0 {
            println!("\n  {} {} message(s) appeared multiple times", "ℹ".cyan(), repeated);
        }
        if guard.as_ref().is_some_and(|messages| messages.len() >= MAX_TRACKED_MESSAGES) {
            println!("  {} duplicate tracking stopped at {} distinct messages", "ℹ".cyan(), MAX_TRACKED_MESSAGES);
        }
    }
    println!("{}\n", "==============================".bright_blue().bold());
}

#[cfg(test)]
#[path = "opengl_debug_tests.rs"]
mod tests;
