pub mod body;
pub mod encode;
pub mod escape;
pub mod formatter;
pub mod fs;

pub use body::BodyContent;
pub use encode::encode_uri_component;
pub use escape::{escape_html, escape_script_json};
pub use formatter::{format_bytes, format_percentage};
pub use fs::write_atomic;
