use calendar_todo::config::Config;
use calendar_todo::logging::init_logging;
use calendar_todo::ui::{run_app, App};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_logging(config.log_file.as_deref(), &config.log_level)?;

    let today = config.today();
    log::info!("Starting session, today is {}", today);
    let mut app = App::new(today);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("Event loop failed: {}", err);
        eprintln!("{:?}", err);
    }
    Ok(())
}
