//! Remote asset fetcher.
//!
//! Downloads a publicly reachable image and returns its bytes and
//! content type. Any non-success status or transport error is a
//! failure; partial data is never returned.

/// Content type assumed when the remote server sends none.
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Why an asset download failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("Asset download failed: GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The request itself failed (network, DNS, TLS, truncated body).
    #[error("Asset download failed: GET {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Download an image, returning `(bytes, content_type)`.
pub async fn fetch_image(
    client: &reqwest::Client,
    url: &str,
) -> Result<(Vec<u8>, String), FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_string());

    let bytes = response
        .bytes()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?
        .to_vec();

    Ok((bytes, content_type))
}
