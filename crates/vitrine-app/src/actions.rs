//! Action handlers: UpdateAction dispatch and background task spawning

use std::process::Command;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::loader;
use crate::message::Message;
use crate::UpdateAction;

/// Execute an action by spawning a background task.
///
/// Every task reports back through `msg_tx`; none of them touch state.
pub fn handle_action(action: UpdateAction, msg_tx: mpsc::Sender<Message>, client: &Client) {
    match action {
        UpdateAction::LoadCatalog { generation, url } => {
            spawn_catalog_load(client.clone(), generation, url, msg_tx);
        }

        UpdateAction::ProbeImages { generation, urls } => {
            spawn_image_probes(client.clone(), generation, urls, msg_tx);
        }

        UpdateAction::StartCloseTransition {
            generation,
            duration_ms,
        } => {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(duration_ms)).await;
                let _ = msg_tx.send(Message::ModalCloseFinished { generation }).await;
            });
        }

        UpdateAction::OpenBuyLink { url, browser } => {
            // Spawning the opener is quick; no need for a task
            if let Err(e) = open_url_in_browser(&url, &browser) {
                warn!("Failed to open {} in browser: {}", url, e);
            }
        }
    }
}

fn spawn_catalog_load(
    client: Client,
    generation: u64,
    url: String,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        let message = match loader::fetch_catalog(&client, &url).await {
            Ok(catalog) => Message::CatalogLoaded {
                generation,
                catalog,
            },
            Err(e) => {
                error!("{}", e);
                Message::CatalogLoadFailed {
                    generation,
                    error: e.to_string(),
                }
            }
        };
        let _ = msg_tx.send(message).await;
    });
}

fn spawn_image_probes(
    client: Client,
    generation: u64,
    urls: Vec<String>,
    msg_tx: mpsc::Sender<Message>,
) {
    debug!("Probing {} images (generation {})", urls.len(), generation);
    tokio::spawn(async move {
        loader::probe_images(&client, urls, |url, ok| {
            let msg_tx = msg_tx.clone();
            async move {
                let _ = msg_tx
                    .send(Message::ImageSettled {
                        generation,
                        url,
                        ok,
                    })
                    .await;
            }
        })
        .await;
    });
}

/// Open a URL in the system browser.
///
/// If `browser` is non-empty, uses it as the browser command.
/// Otherwise uses the platform-default browser opener.
pub(crate) fn open_url_in_browser(url: &str, browser: &str) -> std::io::Result<()> {
    if !browser.is_empty() {
        Command::new(browser).arg(url).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd").args(["/C", "start", "", url]).spawn()?;
        return Ok(());
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no browser opener available for this platform",
        ));
    }

    #[allow(unreachable_code)]
    Ok(())
}
