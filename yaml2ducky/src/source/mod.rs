pub mod ast;
pub mod loader;

pub use ast::*;
pub use loader::{default_templates_dir, load_source_file, load_template_file, parse_source};
