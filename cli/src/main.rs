use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use yacs::Session;
use yacs_config::{DEFAULT_LOG_FILTER, YacsConfig};

/// Log to the first writable candidate file. Command output owns stdout, so
/// without a file there is no log output at all.
fn init_tracing(config_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let mut skipped = Vec::new();
    let Some((path, file)) = log_file_candidates()
        .into_iter()
        .find_map(|path| match open_append(&path) {
            Ok(file) => Some((path, file)),
            Err(e) => {
                skipped.push(format!("{}: {e}", path.display()));
                None
            }
        })
    else {
        tracing_subscriber::registry().with(env_filter).init();
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .init();
    tracing::info!(path = %path.display(), "Logging initialized");
    for reason in skipped {
        tracing::warn!("Skipped log file {reason}");
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `~/.yacs/logs/yacs.log`, then `./.yacs/logs/yacs.log`.
fn log_file_candidates() -> Vec<PathBuf> {
    let home = YacsConfig::path().and_then(|config| config.parent().map(Path::to_path_buf));
    home.into_iter()
        .chain([PathBuf::from(".yacs")])
        .map(|dir| dir.join("logs").join("yacs.log"))
        .collect()
}

fn main() -> Result<()> {
    let config_result = YacsConfig::load();
    let config = match &config_result {
        Ok(Some(config)) => Some(config),
        _ => None,
    };
    init_tracing(config.map_or(DEFAULT_LOG_FILTER, YacsConfig::log_filter));

    if let Err(e) = &config_result {
        eprintln!("warning: {e}; using defaults");
    }

    let mut session = match config {
        Some(config) => Session::from_config(config),
        None => Session::from_config(&YacsConfig::default()),
    };
    tracing::info!(backend = session.backend_name(), "Session started");

    let stdin = io::stdin();
    yacs::run(&mut session, stdin.lock(), io::stdout().lock(), io::stderr().lock())
}
