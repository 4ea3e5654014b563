mod actions;
mod app;
mod config;
mod controller;
mod error;
mod fs_utils;
mod input;
mod mode;
#[cfg(test)]
mod test_support;
mod ui;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ConfigBuilder, WriteLogger};

use crate::config::{default_config_path, load_file, LogConfig, Overrides};
use crate::controller::Controller;
use crate::fs_utils::{LocalFs, SystemLauncher};
use crate::input::run_app;

#[derive(Parser)]
#[command(name = "tansu", about = "Browse volumes and directories in the terminal")]
struct Args {
    /// Directory to open instead of the volume menu
    start: Option<PathBuf>,
    /// Settings file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Where to write the log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Puts the terminal back into cooked mode on the main screen when dropped,
/// including on early returns and panics during setup or the event loop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("cannot enable raw mode")?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen).context("cannot enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

fn init_logging(log: &LogConfig) {
    let Some(path) = &log.file else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = fs::File::create(path) {
        let _ = WriteLogger::init(log.level, log_config, log_file);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = match args.config.or_else(default_config_path) {
        Some(path) => load_file(&path)?,
        None => Default::default(),
    };
    let config = file.resolve(Overrides {
        start_path: args.start,
        log_file: args.log_file,
    })?;
    init_logging(&config.log);
    info!("tansu starting");

    let start_path = config.browser.start_path.clone();
    let mut controller = Controller::new(LocalFs, SystemLauncher, config.browser);
    if let Some(path) = start_path {
        if let Err(err) = controller.open_directory(path) {
            controller.report(err);
        }
    }

    let guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("cannot set up terminal")?;

    let res = run_app(&mut terminal, &mut controller);
    drop(guard);

    info!("tansu exiting");
    res.context("terminal I/O failed")
}
