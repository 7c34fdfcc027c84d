//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`.
/// - Unknown levels fall back to `info`.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        return "debug".to_string();
    }
    let level = args.log_level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => "info".to_string(),
    }
}
