//! TOML config file loading and creation.

mod loader;
mod paths;
mod template;


pub use loader::{load_default, load_from_path, load_or_create};
pub use paths::{create_default_config, default_config_path};
pub(crate) use paths::write_replacing;
pub(crate) use template::default_config_toml;
