//! wslmate - WSL Manager
//!
//! A TUI over the `wsl` command line:
//! - Install distros from the online catalog
//! - Run, export, delete and shut down installed distros
//! - Move a distro's storage to another directory
//! - Re-import exported archives
//!
//! Usage: wslmate [--help] [--version]

mod app;
mod config;
mod error;
mod logging;
mod modules;
mod types;
mod ui;
mod wsl;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("wslmate {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let _log_guard = logging::init();

    if let Err(e) = run_app() {
        tracing::error!(error = %format!("{:#}", e), "wslmate exited with an error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"wslmate - WSL Manager

USAGE:
    wslmate [OPTIONS]

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information

KEYBINDINGS:
    1-4              Switch tabs
    ,                Settings
    ?                Help
    j/k              Navigate up/down
    Enter            Select/confirm
    r                Refresh the current list
    q                Quit

TABS:
    [1] Install      Install a distro from the online catalog
    [2] Distros      Run, export, delete installed distros; shut down all
    [3] Relocate     Move a distro to the import path (export, unregister, import)
    [4] Archives     Re-import <name>-ex.tar files from the export path
    [,] Settings     Export and import paths

ENVIRONMENT:
    WSLMATE_CONFIG   Config file path (default: <config dir>/wslmate/config.json)
    WSLMATE_TOOL     Program to run instead of `wsl`
    WSLMATE_LOG=1    Write a log file to <local data dir>/wslmate/
    RUST_LOG         Log filter when logging is enabled (default: info)
"#
    );
}

fn run_app() -> Result<()> {
    let config = config::Config::load().context("Failed to load configuration")?;
    let mut app = App::new(config, wsl::Wsl::new(wsl::WslCli::from_env()));
    tracing::info!(tool = app.tool(), "starting");

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Restore the terminal on panic, otherwise it stays in raw mode
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = execute!(std::io::stdout(), crossterm::cursor::Show);
        original_hook(info);
    }));

    let result = main_loop(&mut terminal, &mut app);

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // The working popup is on screen now; run the queued command.
        // Redraw before reading keys so its result shows immediately.
        if app.has_pending() {
            app.run_pending();
            continue;
        }

        app.update_timers();

        // Poll for events with timeout (for flash message expiry)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }
}
