//! Unit tests for GL debug output routing
//!
//! The statistics are process-wide, so these tests run serially.

use serial_test::serial;
use crate::gl::consts;
use crate::opengl_debug::{
    debug_message_stats, opengl_message_callback, print_debug_message_report,
    reset_debug_message_stats, tracked_message_count, DebugMessageStats, MAX_TRACKED_MESSAGES,
};

#[test]
#[serial]
fn test_messages_are_counted_per_severity() {
    reset_debug_message_stats();
    opengl_message_callback(0, 0, 1, consts::DEBUG_SEVERITY_HIGH, "buffer overflow");
    opengl_message_callback(0, 0, 2, consts::DEBUG_SEVERITY_MEDIUM, "slow path");
    opengl_message_callback(0, 0, 3, consts::DEBUG_SEVERITY_LOW, "redundant state");
    opengl_message_callback(0, 0, 4, consts::DEBUG_SEVERITY_NOTIFICATION, "buffer placed in VRAM");
    opengl_message_callback(0, 0, 4, consts::DEBUG_SEVERITY_NOTIFICATION, "buffer placed in VRAM");

    assert_eq!(
        debug_message_stats(),
        DebugMessageStats { high: 1, medium: 1, low: 1, notification: 2 }
    );
    assert_eq!(debug_message_stats().total(), 5);
    print_debug_message_report();
}

#[test]
#[serial]
fn test_unknown_severity_is_not_counted() {
    reset_debug_message_stats();
    opengl_message_callback(0, 0, 9, 0x1234, "odd driver");
    assert_eq!(debug_message_stats().total(), 0);
}

#[test]
#[serial]
fn test_reset_clears_counts() {
    opengl_message_callback(0, 0, 1, consts::DEBUG_SEVERITY_LOW, "something");
    reset_debug_message_stats();
    assert_eq!(debug_message_stats(), DebugMessageStats::default());
    print_debug_message_report();
}

// ============================================================================
// DUPLICATE TRACKER
// ============================================================================

#[test]
#[serial]
fn test_tracker_stops_growing_at_capacity() {
    reset_debug_message_stats();
    let emitted = MAX_TRACKED_MESSAGES as u32 + 10;
    for index in 0..emitted {
        let message = format!("buffer {} placed in VRAM", index);
        opengl_message_callback(0, 0, 7, consts::DEBUG_SEVERITY_NOTIFICATION, &message);
    }

    assert_eq!(tracked_message_count(), MAX_TRACKED_MESSAGES);
    assert_eq!(debug_message_stats().notification, emitted);

    // Already tracked messages keep counting once the tracker is full
    opengl_message_callback(0, 0, 7, consts::DEBUG_SEVERITY_NOTIFICATION, "buffer 0 placed in VRAM");
    assert_eq!(tracked_message_count(), MAX_TRACKED_MESSAGES);
    print_debug_message_report();

    reset_debug_message_stats();
    assert_eq!(tracked_message_count(), 0);
}
