//! Application-level configuration constants.

// Side-count bounds
pub const MIN_SIDES: u32 = 2;
pub const MAX_CUSTOM_SIDES: u32 = 100;

// Default values at mount
pub const DEFAULT_SIDES: u32 = 6;
pub const DEFAULT_CUSTOM_SIDES: u32 = 6;

// Flicker sequence
pub const MIN_FLICKERS: u32 = 15;
pub const FLICKER_SPREAD: u32 = 10;
pub const FLICKER_MS: f64 = 75.0;
pub const SLOWDOWN_STEPS: u32 = 5;
pub const SLOWDOWN_START: f64 = 1.5;
pub const SLOWDOWN_INCREMENT: f64 = 0.2;

// Non-flicker phases
pub const WIND_UP_MS: u32 = 100;
pub const SETTLE_MS: u32 = 300;
pub const DECAY_MS: u32 = 500;

// UI behavior
pub const VISUAL_SELECTOR: &str = ".animated-dice-visual";
pub const WARNING_DISPLAY_MS: u32 = 3_000;
