//! ufcities - Brazilian state and city picker
//!
//! Loads the states once at startup, lets the user choose one from a
//! dropdown, and lists the chosen state's cities sorted by name.

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

use ufcities::application::{
    App, EventReceiver, EventSender, event_channel, spawn_cities_fetch, spawn_states_fetch,
};
use ufcities::config::{Cli, Config};
use ufcities::infrastructure::{LocalityClient, logging};
use ufcities::presentation::{InputAction, InputHandler, render_ui};

const TICK: Duration = Duration::from_millis(50);

/// Entry point.
///
/// Sets up logging and the terminal, runs the event loop until the user
/// quits, then aborts outstanding requests and restores the terminal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from(Cli::parse());
    logging::init(&config.log_file)?;
    tracing::info!(base_url = %config.base_url, "starting");

    let client = LocalityClient::new(config.base_url.clone())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let res = run_app(&mut terminal, &mut app, &client);
    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        println!("{err:?}");
    }
    tracing::info!("exiting");

    Ok(())
}

/// Main event loop.
///
/// Each iteration applies finished fetches, redraws, then waits up to one
/// tick for a key press. Fetches run on the tokio runtime and report back
/// through the event channel.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &LocalityClient,
) -> io::Result<()> {
    let (events, mut inbox): (EventSender, EventReceiver) = event_channel();

    if let Some(request) = app.begin_state_load() {
        spawn_states_fetch(client.clone(), request, events.clone());
    }

    loop {
        while let Ok(event) = inbox.try_recv() {
            app.apply_event(event);
        }

        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match InputHandler::handle_key_event(app, key.code, key.modifiers) {
                InputAction::Continue => {}
                InputAction::FetchCities(request) => {
                    spawn_cities_fetch(client.clone(), request, events.clone());
                }
                InputAction::Quit => return Ok(()),
            }
        }
    }
}
