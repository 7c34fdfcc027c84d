//! User configuration: on-disk locations and `settings.conf`.

pub mod paths;
pub mod settings;

pub use paths::{config_dir, default_downloads_dir, logs_dir, resolve_settings_config_path};
pub use settings::{
    DEFAULT_FILTERS, SKELETON_SETTINGS_CONTENT, Settings, load_settings_from, parse_settings,
    settings,
};
