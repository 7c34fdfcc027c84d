//! Terminal front end: session wiring, terminal setup and the event loop.

/// Runtime event loop and background task plumbing.
mod runtime;
/// Controllers and surface for one page session.
pub mod session;
/// Terminal setup and restoration utilities.
mod terminal;

pub use runtime::run;
pub use session::Session;
