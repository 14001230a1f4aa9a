use std::time::Duration;

use log::debug;
use reqwest::{Client, Proxy};
use thiserror::Error;

/// Desktop browser user agent; some subscription panels refuse unknown clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Failed to create tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    pub proxy: Option<String>,
}

/// `NONE` or an empty string disables the upstream proxy; anything else is
/// used as the proxy URL.
pub fn parse_proxy(proxy_str: &str) -> ProxyConfig {
    if proxy_str.is_empty() || proxy_str == "NONE" {
        return ProxyConfig { proxy: None };
    }
    ProxyConfig {
        proxy: Some(proxy_str.to_string()),
    }
}

/// Request options for [`web_get`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub timeout: Duration,
    pub proxy: ProxyConfig,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            proxy: ProxyConfig::default(),
        }
    }
}

/// Makes an HTTP GET request to the specified URL
///
/// # Returns
/// * `Ok(String)` - The response body, unparsed
/// * `Err(FetchError)` - Network error, timeout or non-2xx status
pub async fn web_get_async(url: &str, options: &FetchOptions) -> Result<String, FetchError> {
    let mut client_builder = Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str());

    if let Some(proxy) = &options.proxy.proxy {
        debug!("Using proxy {} for {}", proxy, url);
        client_builder = client_builder.proxy(Proxy::all(proxy).map_err(FetchError::Client)?);
    }

    let client = client_builder.build().map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(FetchError::Request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    response.text().await.map_err(FetchError::Body)
}

/// Synchronous version of web_get_async that uses a current-thread tokio runtime
pub fn web_get(url: &str, options: &FetchOptions) -> Result<String, FetchError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(FetchError::Runtime)?;

    rt.block_on(web_get_async(url, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_proxy() {
        assert_eq!(parse_proxy("NONE"), ProxyConfig { proxy: None });
        assert_eq!(parse_proxy(""), ProxyConfig { proxy: None });
        assert_eq!(
            parse_proxy("http://127.0.0.1:8080"),
            ProxyConfig {
                proxy: Some("http://127.0.0.1:8080".to_string())
            }
        );
    }

    #[test]
    fn test_default_fetch_options() {
        let options = FetchOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert!(options.user_agent.starts_with("Mozilla/5.0"));
        assert!(options.proxy.proxy.is_none());
    }

    #[test]
    fn test_web_get_invalid_url_fails() {
        let err = web_get("not a url", &FetchOptions::default()).unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
