//! Fetching raw documents from NuGet feeds.

use std::time::Duration;

use reqwest::Client;

use nugraph_util::errors::NugraphError;

use crate::auth;
use crate::repository::NuGetFeed;

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Build a shared reqwest client for feed requests.
pub fn build_client(timeout: Duration) -> miette::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("nugraph/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            NugraphError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}

/// Download raw bytes from a URL, with authentication and retries.
///
/// Server errors, timeouts and connection failures are retried up to
/// `retries` attempts in total with linear backoff. Returns `Ok(None)` for 404.
pub async fn download_bytes(
    client: &Client,
    feed: &NuGetFeed,
    url: &str,
    retries: u32,
) -> miette::Result<Option<Vec<u8>>> {
    let attempts = retries.max(1);
    let mut last_err = String::new();

    for attempt in 0..attempts {
        if attempt > 0 {
            tracing::debug!("retrying {url} (attempt {})", attempt + 1);
            tokio::time::sleep(RETRY_DELAY * attempt).await;
        }

        let req = auth::apply_auth(client.get(url), feed);

        match req.send().await {
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                if !status.is_success() {
                    return Err(NugraphError::Network {
                        message: format!("HTTP {status} fetching {url}"),
                    }
                    .into());
                }

                let bytes = resp.bytes().await.map_err(|e| NugraphError::Network {
                    message: format!("Failed to read response from {url}: {e}"),
                })?;
                return Ok(Some(bytes.to_vec()));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = format!("{e}");
                continue;
            }
            Err(e) => {
                return Err(NugraphError::Network {
                    message: format!("Request to {url} failed: {e}"),
                }
                .into());
            }
        }
    }

    Err(NugraphError::Network {
        message: format!("Failed after {attempts} attempts for {url}: {last_err}"),
    }
    .into())
}

/// Download a text document (nuspec, version index).
pub async fn download_text(
    client: &Client,
    feed: &NuGetFeed,
    url: &str,
    retries: u32,
) -> miette::Result<Option<String>> {
    match download_bytes(client, feed, url, retries).await? {
        Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).to_string())),
        None => Ok(None),
    }
}
