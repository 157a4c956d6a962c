mod categorize;
mod export;
mod logging;
mod models;
mod notify;
mod ops;
mod report;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let data_dir = get_data_dir()?;
    // Keep the handle alive for the life of the process. Logging is
    // best-effort: a read-only data dir should not stop the app.
    let _logger = match logging::init(&data_dir.join("logs")) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e}");
            None
        }
    };

    let store = store::KvStore::open(&data_dir.join("kharch.db"))?;
    let mut state = ops::AppState::load(&store);

    match args.len() {
        1 => run::as_tui(&mut state, &store),
        2.. => run::as_cli(&args, &mut state, &store),
        _ => {
            eprintln!("Usage: kharch [command]");
            Ok(())
        }
    }
}

fn get_data_dir() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "kharch", "Kharch")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
