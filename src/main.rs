use sunslider::app::SunsliderApp;
use sunslider::cli::Args;
use sunslider::paths::{self, PathConfig};

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use log::{debug, info};

fn main() -> Result<()> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());

    // Ensure directories exist
    if let Err(e) = paths::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {:#}", e);
    }

    init_logger(&args, &path_config)?;

    info!("Sunslider starting...");
    debug!("Command-line args: {:?}", args);
    info!(
        "Config path: {}",
        paths::config_file("sunslider.json", &path_config).display()
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Sunslider v{} • Europe/Stockholm", env!("CARGO_PKG_VERSION")))
            .with_inner_size([900.0, 600.0])
            .with_resizable(true),
        persist_window: true,
        persistence_path: Some(paths::config_file("sunslider.json", &path_config)),
        ..Default::default()
    };

    eframe::run_native(
        "Sunslider",
        native_options,
        Box::new(move |cc| {
            // Load persisted app state if available, then apply CLI overrides
            let mut app = SunsliderApp::from_storage(cc.storage);
            app.apply_args(&args);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {}", e))
}

/// Console logger (respects RUST_LOG) or file logger with `--log`.
fn init_logger(args: &Args, path_config: &PathConfig) -> Result<()> {
    let log_level = args.log_level();

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| paths::data_file("sunslider.log", path_config));

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .init();
    }

    Ok(())
}
