use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::catalog::{CatalogClient, CatalogWorker};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    startup::init_logging();
    let settings = settings::load_settings();

    let store = startup::open_store(&settings);
    let catalog = CatalogWorker::spawn(CatalogClient::new(&settings.api));

    let mut app = App::new();
    // Populate the home list before the first frame shows up.
    catalog.request("");

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &catalog,
            store.as_ref(),
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
