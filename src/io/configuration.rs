//! Runtime constants and configuration defaults

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Rule table file loaded when no path is given
pub const DEFAULT_RULES_FILE: &str = "rules.json";

/// Sprite directory searched when none is given
pub const DEFAULT_SPRITE_DIR: &str = "sprites";

/// Pixel pitch of one board cell in rendered output
pub const SPRITE_PITCH: u32 = 128;
