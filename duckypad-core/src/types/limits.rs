//! duckyPad Pro firmware limits

/// Keys addressable by a profile: 20 switches plus two rotary encoders
/// with three events each.
pub const TOTAL_KEYS: u8 = 26;

/// Profiles the SD card can hold.
pub const MAX_PROFILES: usize = 64;

pub const MAX_PROFILE_NAME_LENGTH: usize = 16;

pub const MAX_LABEL_CHARS_PER_LINE_PORTRAIT: usize = 5;
pub const MAX_LABEL_CHARS_PORTRAIT: usize = 10;
pub const MAX_LABEL_CHARS_PER_LINE_LANDSCAPE: usize = 4;
pub const MAX_LABEL_CHARS_LANDSCAPE: usize = 8;
