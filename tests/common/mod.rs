//! Shared test infrastructure for sunlamp-scheduler integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use sunlamp_scheduler::{Lamp, MonotonicClock, WallClock, WallTime, Weekday};

// ============================================================================
// Mock Clock
// ============================================================================

/// Mock clock with controllable wall and monotonic time
pub struct MockClock {
    wall: Cell<WallTime>,
    now_ms: Cell<u32>,
}

impl MockClock {
    pub fn new(wall: WallTime) -> Self {
        Self {
            wall: Cell::new(wall),
            now_ms: Cell::new(0),
        }
    }

    /// Advance the monotonic counter, wrapping like the real thing
    pub fn advance_ms(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get().wrapping_add(ms));
    }

    pub fn set_now_ms(&self, now_ms: u32) {
        self.now_ms.set(now_ms);
    }

    pub fn set_wall(&self, wall: WallTime) {
        self.wall.set(wall);
    }
}

impl WallClock for MockClock {
    fn wall_time(&self) -> WallTime {
        self.wall.get()
    }
}

impl MonotonicClock for MockClock {
    fn now_ms(&self) -> u32 {
        self.now_ms.get()
    }
}

// ============================================================================
// Mock Lamp
// ============================================================================

/// Mock lamp that records every brightness push for testing
pub struct MockLamp {
    brightness: f32,
    history: heapless::Vec<f32, 64>,
}

impl MockLamp {
    pub fn new() -> Self {
        Self {
            brightness: 0.0,
            history: heapless::Vec::new(),
        }
    }

    pub fn last_brightness(&self) -> f32 {
        self.brightness
    }

    pub fn history(&self) -> &[f32] {
        &self.history
    }
}

impl Lamp for MockLamp {
    fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness;
        let _ = self.history.push(brightness);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Shorthand for building a wall-clock reading
pub fn wall(weekday: Weekday, hour: u8, minute: u8) -> WallTime {
    WallTime::new(weekday, hour, minute)
}

/// Compare brightness values with floating-point tolerance
pub fn brightness_eq(a: f32, b: f32) -> bool {
    const EPSILON: f32 = 0.001;
    (a - b).abs() < EPSILON
}
