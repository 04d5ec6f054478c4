//! Application-level configuration constants.

// UI behavior
pub const ERROR_TOAST_MS: u32 = 5_000;
pub const WINNER_REVEAL_DELAY_MS: u32 = 500;

// Spin animation styling: starts fast, decelerates smoothly, no bounce.
pub const SPIN_EASING: &str = "cubic-bezier(0.2, 0.8, 0.2, 1)";

// Wheel rendering
pub const WHEEL_SIZE: u32 = 440;
pub const HUB_RADIUS: f64 = 30.0;
pub const MAX_LABEL_CHARS: usize = 15;
pub const POINTER_COLOR: &str = "#d65a20";
pub const SEGMENT_COLORS: [&str; 8] = [
    "#1e3a5f", "#254670", "#2d5280", "#1e3a5f", "#254670", "#2d5280", "#1e3a5f", "#254670",
];

// Header defaults
pub const DEFAULT_EVENT_TITLE: &str = "Year-End Draw";
