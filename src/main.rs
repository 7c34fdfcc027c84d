//! AnimeVerse binary entrypoint kept minimal. The full runtime lives in `app`.

use std::fmt;
use std::sync::OnceLock;

use animeverse::app::{self, Session};
use animeverse::args::{self, Args, RunMode};
use animeverse::config;
use clap::Parser;

struct AnimeVerseTimer;

impl tracing_subscriber::fmt::time::FormatTime for AnimeVerseTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T%H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initialize tracing to `<config_dir>/logs/animeverse.log`, or stderr if that fails.
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = config::logs_dir();
    log_path.push("animeverse.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(AnimeVerseTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so startup is never blocked
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(AnimeVerseTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Args::parse();
    init_logging(&args::determine_log_level(&cli));

    let mut settings = config::settings();
    cli.apply_overrides(&mut settings);
    tracing::info!(
        api = %settings.api_base_url,
        filter_mode = settings.filter_mode.as_config_key(),
        "AnimeVerse starting"
    );

    let with_gallery = !cli.no_gallery;
    let code = match cli.run_mode() {
        RunMode::Tui => match app::run(settings, with_gallery).await {
            Ok(()) => 0,
            Err(err) => {
                tracing::error!(error = %err, "application error");
                eprintln!("animeverse: {err}");
                1
            }
        },
        RunMode::ExportHtml(path) => {
            let session = Session::from_settings(&settings, with_gallery);
            let result = args::handle_export(
                &session,
                &settings.filters,
                cli.filter.as_deref(),
                cli.pages,
                &path,
            )
            .await;
            session.shutdown();
            match result {
                Ok(p) => {
                    println!("Wrote {}", p.display());
                    0
                }
                Err(err) => {
                    tracing::error!(error = %err, "export failed");
                    eprintln!("animeverse: export failed: {err}");
                    1
                }
            }
        }
        RunMode::Search(query) => {
            let session = Session::from_settings(&settings, false);
            let n = args::handle_search(&session, Some(&query), cli.filter.as_deref(), cli.pages)
                .await;
            session.shutdown();
            i32::from(n == 0)
        }
        RunMode::FilterOnly(tag) => {
            let session = Session::from_settings(&settings, false);
            let n = args::handle_search(&session, None, Some(&tag), cli.pages).await;
            session.shutdown();
            i32::from(n == 0)
        }
    };
    tracing::info!(code, "AnimeVerse exited");
    if code != 0 {
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    /// What: FormatTime impl writes a non-empty timestamp without panicking
    #[test]
    fn timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let _ = super::AnimeVerseTimer.format_time(&mut writer);
        assert!(buf.contains("-T"));
    }
}
