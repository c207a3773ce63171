mod config;
mod error;
mod models;
mod storage;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::storage::FileStore;
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/blogboard/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cannot locate user data directory"))?
        .join("blogboard");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 日志写入数据目录下的文件，终端留给 TUI
fn init_logging(data_dir: &Path, config: &Config) -> Result<()> {
    let log_file = File::options()
        .create(true)
        .append(true)
        .open(data_dir.join("blogboard.log"))?;

    let filter = EnvFilter::try_from_env("BLOGBOARD_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| AppError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

fn main() -> Result<()> {
    let data_dir = get_data_dir()?;
    let config = Config::load(&data_dir.join("config.toml"))?;
    init_logging(&data_dir, &config)?;

    tracing::info!(data_dir = %data_dir.display(), "starting blogboard");

    // 恢复状态
    let store = FileStore::new(&data_dir);
    let mut app = App::open(Box::new(store), config)?;

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("exiting");

    result.map_err(AppError::from)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let tick = app.config.tick();
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key.code) {
                    break;
                }
            }
        }

        app.tick(Instant::now());
    }
    Ok(())
}
