//! Frame loop for the netpulse demo
//!
//! The main thread is the consumer context: every frame it drains the
//! consumer queue (running the subscriber callbacks), folds the forwarded
//! updates into [`AppState`], redraws, and polls the keyboard.

use crate::{
    app::{AppState, ObservationController, Update},
    ui::render,
};
use color_eyre::eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use netpulse::ConsumerLoop;
use netpulse::config::EVENT_POLL_MS;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

pub async fn run(
    mut terminal: DefaultTerminal,
    state: &mut AppState,
    controller: &mut ObservationController,
    consumer: &mut ConsumerLoop,
    updates: &mut UnboundedReceiver<Update>,
) -> Result<()> {
    loop {
        consumer.drain();
        while let Ok(update) = updates.try_recv() {
            state.apply(update);
        }
        state.observing = controller.is_observing();

        terminal.draw(|frame| render(frame, state))?;

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('s') => {
                        // Lifecycle toggle: pause cancels everything, resume
                        // re-subscribes with fresh registrations.
                        if controller.is_observing() {
                            controller.stop();
                        } else {
                            state.last_error = None;
                            controller.start();
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    controller.stop();
    Ok(())
}
