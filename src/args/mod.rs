//! Command-line argument parsing and the non-interactive modes.

pub mod definition;
pub mod export;
pub mod search;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, RunMode};
pub use export::handle_export;
pub use search::{collect_matches, handle_search};
pub use utils::determine_log_level;
