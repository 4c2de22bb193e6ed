//! Decorator rendering: salts, templates, and post-render formatting.

pub mod formatter;
pub mod registry;
pub mod renderer;
pub mod salt;

pub use formatter::{CommandFormatter, NoopFormatter, SourceFormatter};
pub use registry::{TemplateRegistry, HEADER_TEMPLATE, WRAPPER_TEMPLATE};
pub use renderer::{required_imports, FileHeader, Renderer};
pub use salt::{find_salt, resolve_salt, salt_marker, Salt, SaltSource};
