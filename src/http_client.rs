use anyhow::Result;
use reqwest::{header, Client};
use std::time::Duration;

/// Creates an HTTP client configured to look like a regular browser session.
/// The User-Agent is deliberately absent here: it is drawn from the pool per
/// request so consecutive fetches do not share a fingerprint.
pub fn create_http_client(timeout: Duration) -> Result<Client> {
    let mut headers = header::HeaderMap::new();

    // Standard browser headers, values matching what the target site sees
    // from Russian-locale browsers
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(
        header::ACCEPT_ENCODING,
        header::HeaderValue::from_static("gzip, deflate, br"),
    );
    headers.insert(header::DNT, header::HeaderValue::from_static("1"));
    headers.insert(
        header::CONNECTION,
        header::HeaderValue::from_static("keep-alive"),
    );
    headers.insert(
        "Upgrade-Insecure-Requests",
        header::HeaderValue::from_static("1"),
    );

    let client = Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .cookie_store(true)
        .build()?;

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_http_client_succeeds() {
        let result = create_http_client(Duration::from_secs(15));
        assert!(result.is_ok(), "Client creation should succeed");
    }

    #[test]
    fn test_create_http_client_with_short_timeout() {
        let result = create_http_client(Duration::from_millis(100));
        assert!(result.is_ok());
    }
}
