//! Engine - the application controller
//!
//! Owns the TEA state (catalog, layout handle, carousel), the message
//! channel and the HTTP client. Frontends feed it input messages, call
//! [`Engine::drain_pending_messages`] before drawing, and call
//! [`Engine::shutdown`] once [`Engine::should_quit`] turns true.

use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;
use vitrine_core::prelude::*;

use crate::config::Settings;
use crate::loader;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::{AppPhase, AppState};

/// Capacity of the message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for Vitrine.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, background tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Shared by the catalog fetch and image probes
    client: Client,
}

impl Engine {
    /// Create the engine. Must be called inside a tokio runtime.
    ///
    /// Fails on an invalid asset base URL or when the HTTP client cannot be
    /// built.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = loader::build_client(Duration::from_millis(settings.catalog.timeout_ms))?;
        let state = AppState::with_settings(settings)?;
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);

        signals::spawn_signal_handler(msg_tx.clone());

        Ok(Self {
            state,
            msg_tx,
            msg_rx,
            client,
        })
    }

    /// Kick off the initial catalog fetch
    pub fn start(&mut self) {
        info!("Starting with asset base {}", self.state.assets);
        self.process_message(Message::LoadCatalog);
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.client);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Tear down: stop accepting messages, drop late results and release
    /// the carousel.
    pub fn shutdown(&mut self) {
        self.state.phase = AppPhase::Quitting;
        self.msg_rx.close();

        let mut dropped = 0;
        while self.msg_rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!("Dropped {} messages during shutdown", dropped);
        }

        self.state.modal.teardown();
        self.state.reset_layout();
        info!("Engine shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridContent, LOAD_FAILURE_MESSAGE};
    use vitrine_core::{Catalog, Product};

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.catalog.base_url = "http://127.0.0.1:9".into();
        settings.catalog.probe_images = false;
        settings
    }

    #[tokio::test]
    async fn test_invalid_base_url_fails() {
        let mut settings = settings();
        settings.catalog.base_url = "ftp://nope".into();
        assert!(Engine::new(settings).is_err());
    }

    #[tokio::test]
    async fn test_drain_processes_queued_messages() {
        let mut engine = Engine::new(settings()).unwrap();
        let catalog = Catalog::new(vec![Product {
            name: "Scarf".into(),
            ..Default::default()
        }]);

        engine
            .msg_sender()
            .send(Message::CatalogLoaded {
                generation: 0,
                catalog,
            })
            .await
            .unwrap();
        engine.msg_sender().send(Message::OpenCard(0)).await.unwrap();

        assert_eq!(engine.drain_pending_messages(), 2);
        assert!(engine.state.layout.is_some());
        assert!(engine.state.modal.is_open());
    }

    #[tokio::test]
    async fn test_quit_message() {
        let mut engine = Engine::new(settings()).unwrap();
        engine.process_message(Message::Quit);
        assert!(engine.should_quit());
    }

    #[tokio::test]
    async fn test_shutdown_releases_carousel() {
        let mut engine = Engine::new(settings()).unwrap();
        engine.process_message(Message::CatalogLoaded {
            generation: 0,
            catalog: Catalog::new(vec![Product {
                name: "Scarf".into(),
                ..Default::default()
            }]),
        });
        engine.process_message(Message::OpenCard(0));
        assert_eq!(engine.state.modal.live_carousels(), 1);

        engine.shutdown();

        assert!(engine.should_quit());
        assert_eq!(engine.state.modal.live_carousels(), 0);
        assert!(!engine.state.modal.is_visible());
    }

    #[tokio::test]
    async fn test_start_against_unreachable_host_shows_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let mut settings = settings();
        settings.catalog.base_url = format!("http://{addr}");
        let mut engine = Engine::new(settings).unwrap();

        engine.start();
        assert_eq!(engine.state.grid.content(), &GridContent::Loading);

        let msg = tokio::time::timeout(Duration::from_secs(5), engine.msg_rx.recv())
            .await
            .unwrap()
            .unwrap();
        engine.process_message(msg);

        assert_eq!(
            engine.state.grid.content(),
            &GridContent::Failed(LOAD_FAILURE_MESSAGE.into())
        );
    }
}
