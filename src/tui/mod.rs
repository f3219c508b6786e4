pub mod app;
pub mod ui;

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use app::{App, InputMode, ViewMode};
use crate::models::Frequency;
use ui::ui;

pub fn run_tui() -> Result<(), Box<dyn Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new();

    // Run loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

/// Event loop with a 1-second timer tick. The tick only does work while a
/// task timer is running; returning from this function tears the loop down,
/// so no further tick can fire.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_secs(1);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match app.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Tab | KeyCode::Char('v') => app.next_view(),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        _ => match app.view_mode {
                            ViewMode::Today => match key.code {
                                KeyCode::Char('a') => app.start_add_task(),
                                KeyCode::Char(' ') => app.cycle_selected_status(),
                                KeyCode::Char('e') => app.start_edit_title(),
                                KeyCode::Char('t') => app.toggle_selected_timer(),
                                KeyCode::Char('J') => app.move_selected(true),
                                KeyCode::Char('K') => app.move_selected(false),
                                KeyCode::Char('d') | KeyCode::Delete => {
                                    app.delete_selected_task()
                                }
                                _ => {}
                            },
                            ViewMode::Habits => match key.code {
                                KeyCode::Char('a') => app.start_add_habit(Frequency::Daily),
                                KeyCode::Char('w') => {
                                    app.start_add_habit(Frequency::Weekdays)
                                }
                                KeyCode::Char(' ') => app.toggle_selected_habit(),
                                KeyCode::Char('d') | KeyCode::Delete => {
                                    app.delete_selected_habit()
                                }
                                _ => {}
                            },
                            ViewMode::Stats => {}
                        },
                    },
                    InputMode::Editing => match key.code {
                        KeyCode::Enter => app.handle_input(),
                        KeyCode::Esc => app.cancel_input(),
                        KeyCode::Char(c) => app.input_buffer.push(c),
                        KeyCode::Backspace => {
                            app.input_buffer.pop();
                        }
                        _ => {}
                    },
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}
