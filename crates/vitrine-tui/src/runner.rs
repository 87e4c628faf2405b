//! Main TUI runner - entry point and event loop

use tracing::{info, warn};
use vitrine_app::config::Settings;
use vitrine_app::Engine;
use vitrine_core::Result;

use super::{event, render, terminal};

/// Run the showcase until the user quits.
///
/// Must be called inside a multi-threaded tokio runtime: the event loop
/// blocks on terminal polling while background tasks fetch the catalog and
/// probe images.
pub async fn run(settings: Settings) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    // Build the engine first so configuration errors reach a normal terminal
    let mut engine = Engine::new(settings)?;

    let mut term = ratatui::init();
    if let Err(e) = terminal::enable_mouse() {
        warn!("{}", e);
    }

    engine.start();
    let result = run_loop(&mut term, &mut engine);

    if let Err(e) = &result {
        warn!("Event loop stopped: {}", e);
    }
    engine.shutdown();
    terminal::disable_mouse();
    ratatui::restore();
    info!("Terminal restored");

    result
}

/// Main event loop
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Results from background tasks and the signal handler
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &mut engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
