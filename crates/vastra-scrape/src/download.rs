//! Fetching remote images (post thumbnails, inspiration photos).

use std::time::Duration;

use reqwest::Client;

use vastra_core::{Error, Result};

/// Some CDNs refuse requests without a browser-like agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest image body accepted from a third-party host.
pub const MAX_DOWNLOAD_BYTES: usize = 20 * 1024 * 1024;

/// GET `url` and return the body. Only `http(s)` URLs are fetched.
pub async fn download(client: &Client, url: &str) -> Result<Vec<u8>> {
    download_limited(client, url, MAX_DOWNLOAD_BYTES).await
}

/// [`download`] with an explicit size cap, checked against the declared
/// length and again while the body streams in.
pub async fn download_limited(client: &Client, url: &str, max_bytes: usize) -> Result<Vec<u8>> {
    if !url.starts_with("http") {
        return Err(Error::Validation(format!("not an http url: {}", url)));
    }
    let mut response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
        .timeout(DOWNLOAD_TIMEOUT)
        .send()
        .await
        .map_err(|e| Error::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Upstream(format!("{} returned {}", url, status)));
    }
    let too_large = || Error::Upstream(format!("{} is larger than {} bytes", url, max_bytes));
    if response.content_length().is_some_and(|len| len > max_bytes as u64) {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| Error::Http(e.to_string()))?
    {
        if body.len() + chunk.len() > max_bytes {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
