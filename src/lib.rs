//! Library entry for AnimeVerse: catalog client, renderers, controllers and
//! the terminal front end, exposed for the binary and integration tests.

pub mod app;
pub mod args;
pub mod config;
pub mod events;
pub mod logic;
pub mod render;
pub mod sources;
pub mod state;
pub mod ui;
pub mod util;

#[cfg(test)]
mod test_utils;
