//! HTTP client for cycani.org
//!
//! Provides a rate-limited HTTP client for the landing page and the signed
//! catalog API. Errors are surfaced to the caller; the client never retries
//! on its own (retry is a user-re-issued intent at the store level).

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{CycaniError, Result};
use crate::signature::sign_now;
use crate::url::{build_catalog_api_url, BASE_URL};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Catalog section id the home feed requests
const CATALOG_TYPE: &str = "20";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the site (overridable for tests)
    pub base_url: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 30,
        }
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
        }
    }

    /// Acquire permission to make a request
    ///
    /// If called before the minimum interval has passed since the last
    /// request, sleeps until the interval has elapsed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Source of raw payloads for the home feeds
///
/// The store talks to the network through this seam so tests can substitute
/// a scripted source.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    /// Fetch the landing-page HTML (carousel source)
    async fn fetch_home(&self) -> Result<String>;

    /// Fetch one catalog page as raw JSON
    async fn fetch_catalog_page(&self, page: u32) -> Result<String>;
}

/// HTTP client for cycani.org
///
/// Handles both outbound calls the library makes:
/// - GET of the site root for the carousel HTML
/// - signed form POST to the catalog API
pub struct CycaniClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl CycaniClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(CycaniError::Http)?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the landing page HTML
    ///
    /// # Errors
    /// - `Http` - transport or server errors
    /// - `NotFound` - server returned 404
    pub async fn fetch_home(&self) -> Result<String> {
        self.rate_limiter.acquire().await;

        let url = format!("{}/", self.base_url);
        debug!(%url, "fetching landing page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(CycaniError::Http)?;

        Self::read_body(response, &url).await
    }

    /// Fetch one catalog page from the signed API
    ///
    /// Attaches the `time`/`key` pair derived from the current clock along
    /// with the fixed filter fields the home feed uses.
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    ///
    /// # Errors
    /// - `Http` - transport or server errors
    /// - `NotFound` - server returned 404
    pub async fn fetch_catalog_page(&self, page: u32) -> Result<String> {
        self.rate_limiter.acquire().await;

        let sig = sign_now();
        let url = build_catalog_api_url(&self.base_url);
        debug!(%url, page, "fetching catalog page");

        let form = [
            ("type", CATALOG_TYPE.to_string()),
            ("class", String::new()),
            ("area", String::new()),
            ("lang", String::new()),
            ("version", String::new()),
            ("state", String::new()),
            ("letter", String::new()),
            ("page", page.to_string()),
            ("time", sig.time),
            ("key", sig.key),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(CycaniError::Http)?;

        Self::read_body(response, &url).await
    }

    async fn read_body(response: reqwest::Response, url: &str) -> Result<String> {
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CycaniError::NotFound(url.to_string()));
        }

        let response = response.error_for_status().map_err(CycaniError::Http)?;
        response.text().await.map_err(CycaniError::Http)
    }

    /// Get a reference to the rate limiter (for testing)
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait::async_trait]
impl CatalogSource for CycaniClient {
    async fn fetch_home(&self) -> Result<String> {
        CycaniClient::fetch_home(self).await
    }

    async fn fetch_catalog_page(&self, page: u32) -> Result<String> {
        CycaniClient::fetch_catalog_page(self, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> ClientConfig {
        ClientConfig {
            base_url,
            requests_per_second: 1000.0,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(2.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://www.cycani.org");
        assert_eq!(config.requests_per_second, 2.0);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation() {
        assert!(CycaniClient::new().is_ok());
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire() {
        let limiter = RateLimiter::new(10.0); // 100ms interval

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        let elapsed = start.elapsed();

        // Second acquire should wait at least 100ms
        assert!(elapsed >= Duration::from_millis(90)); // Allow small tolerance
    }

    #[tokio::test]
    async fn test_fetch_home_returns_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>carousel</html>"))
            .mount(&server)
            .await;

        let client = CycaniClient::with_config(test_config(server.uri())).unwrap();
        let html = client.fetch_home().await.unwrap();
        assert_eq!(html, "<html>carousel</html>");
    }

    #[tokio::test]
    async fn test_fetch_home_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = CycaniClient::with_config(test_config(server.uri())).unwrap();
        let result = client.fetch_home().await;
        assert!(matches!(result, Err(CycaniError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_catalog_page_posts_signed_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/index.php/api/vod"))
            .and(body_string_contains("type=20"))
            .and(body_string_contains("page=3"))
            .and(body_string_contains("time="))
            .and(body_string_contains("key="))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"list":[]}"#))
            .mount(&server)
            .await;

        let client = CycaniClient::with_config(test_config(server.uri())).unwrap();
        let body = client.fetch_catalog_page(3).await.unwrap();
        assert_eq!(body, r#"{"list":[]}"#);
    }

    #[tokio::test]
    async fn test_fetch_catalog_page_server_error_is_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/index.php/api/vod"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = CycaniClient::with_config(test_config(server.uri())).unwrap();
        let result = client.fetch_catalog_page(1).await;
        assert!(matches!(result, Err(CycaniError::Http(_))));
    }
}
