use std::fs::OpenOptions;
use std::sync::Mutex;

use crossterm::event;
use linegrid::config::LogSettings;
use linegrid::input::{event_action, KeyAction};
use linegrid::{load_config, Editor, Intent, Terminal};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = load_config();
    init_logging(&settings.log)?;

    let mut editor = Editor::from_settings(&settings.editor);
    let mut terminal = Terminal::new()?;
    terminal.render(&editor.snapshot(), &settings)?;

    // Main event loop
    loop {
        match event_action(event::read()?) {
            KeyAction::Quit => break,
            KeyAction::None => continue,
            KeyAction::Intent(intent) => {
                if let Intent::Resize { width, height } = intent {
                    terminal.set_size(width, height);
                }
                editor.apply(intent)?;
            }
        }
        terminal.render(&editor.snapshot(), &settings)?;
    }

    Ok(())
}

/// Send tracing output to the configured log file, if any
fn init_logging(log: &LogSettings) -> anyhow::Result<()> {
    let Some(path) = &log.file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log.level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
