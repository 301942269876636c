//! Terminal preview of a page manifest.
//!
//! Lays the manifest's sections out as a simulated page and lets you scroll
//! it, showing the nav bar highlight the browser build would show.

mod config;
mod page;
mod renderer;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};
use waypost_core::{PageSession, parse_manifest};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const LOG_FILE: &str = "waypost.log";
const CONFIG_FILE: &str = "waypost.toml";

fn main() {
    let Some(path) = manifest_path(std::env::args()) else {
        eprintln!("Usage: waypost <manifest.json>");
        std::process::exit(1);
    };
    let reload_handle = match init_tracing() {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("waypost: cannot open {LOG_FILE}: {err:#}");
            std::process::exit(1);
        }
    };
    if let Err(err) = run(&path, &reload_handle) {
        error!("{err:?}");
        eprintln!("waypost: {err:#}");
        std::process::exit(1);
    }
}

/// The manifest argument, if one was given. Read before the log file is
/// created.
fn manifest_path(mut args: impl Iterator<Item = String>) -> Option<PathBuf> {
    args.nth(1).map(PathBuf::from)
}

fn run(path: &Path, reload_handle: &ReloadHandle) -> Result<()> {
    let config = config::load_config(Path::new(CONFIG_FILE));
    set_log_level(reload_handle, &config.log_level);

    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut manifest =
        parse_manifest(&data).with_context(|| format!("parsing {}", path.display()))?;
    if let Some(tracker) = config.tracker {
        info!(?tracker, "tracker tuning overridden by {CONFIG_FILE}");
        manifest.tracker = tracker;
    }

    let mut session = PageSession::new(manifest);
    session.set_theme(config.theme);
    session.set_viewport_width(config.viewport_width);
    info!(
        path = %path.display(),
        layout = ?session.layout(),
        sections = session.tracker().rendered_sections().len(),
        "starting preview"
    );

    renderer::run_preview(session, &config)
}

fn init_tracing() -> Result<ReloadHandle> {
    let file = File::create(LOG_FILE)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file))
                .with_filter(filter_layer),
        )
        .init();
    Ok(handle)
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "failed to apply log level: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| (*s).to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn manifest_path_requires_an_argument() {
        assert_eq!(manifest_path(args(&["waypost"])), None);
        assert_eq!(manifest_path(args(&[])), None);
    }

    #[test]
    fn manifest_path_takes_first_argument() {
        assert_eq!(
            manifest_path(args(&["waypost", "site.json", "extra"])),
            Some(PathBuf::from("site.json"))
        );
    }
}
