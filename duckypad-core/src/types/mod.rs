pub mod color;
pub mod errors;
pub mod key;
pub mod limits;
pub mod profile;
pub mod switcher;

pub use limits::*;
