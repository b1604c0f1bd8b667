pub mod credential;
pub mod format;
pub mod loader;
mod types;

pub use credential::{delete_token, resolve_token, store_token, TOKEN_ENV};
pub use format::{detect_format, ConfigFormat};
pub use loader::{discover_config, find_config, load_config, search_dirs, CONFIG_NAME};
pub use types::{Config, Destination, ParseMode};
