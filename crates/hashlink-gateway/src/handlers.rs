pub mod fallback;
pub mod health;
pub mod url;

pub use fallback::not_found_handler;
pub use health::health_handler;
pub use url::{create_mapping_handler, resolve_mapping_handler};
