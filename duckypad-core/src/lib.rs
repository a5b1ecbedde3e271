pub mod types;
pub mod profile_info;

pub use types::*;

// Re-export commonly used types
pub use types::key::{KeyAction, KeyDef, KeyId, KeyMap, Label};
pub use types::switcher::{SwitchKind, Switcher};
pub use types::color::Rgb;
pub use types::profile::{Orientation, ProfileConfig, ResolvedScript};
pub use types::errors::{CompileError, ValidationError};
pub use profile_info::{ProfileEntry, ProfileIndex, PROFILE_INDEX_OFFSET, PROFILE_INFO_FILE};

pub type Result<T> = std::result::Result<T, CompileError>;
