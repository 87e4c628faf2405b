//! Catalog loader and image probes
//!
//! One GET for the catalog, no retry. Transport errors, non-2xx statuses and
//! malformed JSON all become [`Error::CatalogLoad`]. Image probes are HEAD
//! requests whose only job is to report when an image has settled.

use std::future::Future;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use reqwest::Client;
use vitrine_core::prelude::*;
use vitrine_core::Catalog;

/// Probes in flight at once
pub const PROBE_CONCURRENCY: usize = 8;

/// Build the HTTP client shared by the catalog fetch and image probes
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("vitrine/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::catalog_load(format!("failed to build HTTP client: {e}")))
}

/// Fetch and parse the catalog at `url`
pub async fn fetch_catalog(client: &Client, url: &str) -> Result<Catalog> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::catalog_load(format!("request to {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::catalog_load(format!("{url} returned HTTP {status}")));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| Error::catalog_load(format!("reading {url} failed: {e}")))?;

    Catalog::from_json(&body)
        .map_err(|e| Error::catalog_load(format!("{url} is not a product list: {e}")))
}

/// HEAD an image. `true` when it answered with a success status.
pub async fn probe_image(client: &Client, url: &str) -> bool {
    match client.head(url).send().await {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            trace!("Probe for {} failed: {}", url, e);
            false
        }
    }
}

/// Probe every URL with bounded concurrency, awaiting `on_settled` with each
/// result as it arrives
pub async fn probe_images<F, Fut>(client: &Client, urls: Vec<String>, on_settled: F)
where
    F: Fn(String, bool) -> Fut,
    Fut: Future<Output = ()>,
{
    stream::iter(urls)
        .for_each_concurrent(PROBE_CONCURRENCY, |url| {
            let on_settled = &on_settled;
            async move {
                let ok = probe_image(client, &url).await;
                on_settled(url, ok).await;
            }
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned response per connection; returns the base URL
    async fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let response = format!(
                        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{addr}")
    }

    fn client() -> Client {
        build_client(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_catalog_success() {
        let base = serve(
            "200 OK",
            r#"[{"name":"Scarf","category":"knit","colors":["red"],"extra":1},{"name":"Tote"}]"#,
        )
        .await;

        let catalog = fetch_catalog(&client(), &format!("{base}/json/products.json"))
            .await
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().name, "Scarf");
        assert!(catalog.get(1).unwrap().images.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_catalog_server_error() {
        let base = serve("500 Internal Server Error", "oops").await;

        let err = fetch_catalog(&client(), &base).await.unwrap_err();

        assert!(matches!(err, Error::CatalogLoad { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_catalog_malformed_json() {
        let base = serve("200 OK", r#"{"not":"a list"}"#).await;

        let err = fetch_catalog(&client(), &base).await.unwrap_err();

        assert!(matches!(err, Error::CatalogLoad { .. }));
    }

    #[tokio::test]
    async fn test_fetch_catalog_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetch_catalog(&client(), &format!("http://{addr}/products.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CatalogLoad { .. }));
    }

    #[tokio::test]
    async fn test_probe_images_settles_every_url() {
        let ok_base = serve("200 OK", "").await;
        let missing_base = serve("404 Not Found", "").await;
        let urls = vec![format!("{ok_base}/a.jpg"), format!("{missing_base}/b.jpg")];

        let settled = Mutex::new(Vec::new());
        probe_images(&client(), urls.clone(), |url, ok| {
            settled.lock().unwrap().push((url, ok));
            async {}
        })
        .await;

        let mut settled = settled.into_inner().unwrap();
        settled.sort();
        let mut expected = vec![(urls[0].clone(), true), (urls[1].clone(), false)];
        expected.sort();
        assert_eq!(settled, expected);
    }
}
