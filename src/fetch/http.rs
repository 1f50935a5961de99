// src/fetch/http.rs
// =============================================================================
// The HTTP fetcher used for real crawls.
//
// Key functionality:
// - Sends a GET request with the configured User-Agent
// - Caps the number of requests in flight with a semaphore
// - Follows a limited number of redirects and reports the final URL
// - Turns reqwest failures into a small set of FetchError kinds
//
// The crawler may hand us a whole level of URLs at once; the semaphore is
// what keeps only `max_connections` of them on the wire.
// =============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;

use super::{FetchedResponse, Fetcher};
use crate::config::CrawlerConfig;
use crate::error::{CrawlError, FetchError};

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    permits: Arc<Semaphore>,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .pool_max_idle_per_host(config.max_connections)
            .build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            permits: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    // Permits not currently held by a request
    pub fn available_connections(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse, FetchError> {
        // The semaphore is never closed, so acquire only fails if it was
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| FetchError::Other { message: e.to_string() })?;

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(categorize_error)?;

        check_status(response.status())?;

        let final_url = response.url().clone();
        let status = response.status().as_u16();
        let body = response.text().await.map_err(categorize_error)?;

        Ok(FetchedResponse {
            requested_url: url.to_string(),
            url: final_url,
            status,
            body,
        })
    }
}

// Only 2xx responses count as pages. Redirects were already followed by
// the client, so a 3xx here means the redirect could not be followed.
fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            code: status.as_u16(),
        })
    }
}

// Categorizes different error types from reqwest
fn categorize_error(error: reqwest::Error) -> FetchError {
    let error_string = error.to_string().to_lowercase();

    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            FetchError::Dns
        } else {
            FetchError::Connection
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        FetchError::Ssl
    } else {
        FetchError::Other {
            message: error.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a semaphore and not buffer_unordered(N)?
//    - The crawler fans out a whole level at once and does not know the cap
//    - Each fetch holds one permit for as long as its request is on the wire
//    - The permit is dropped at the end of fetch(), on success or error
//
// 2. Why is a 3xx status an error?
//    - The client follows redirects itself (up to max_redirects)
//    - response.url() is then the final URL, which links are resolved against
//    - A 3xx that reaches us had no usable Location header
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Minimal HTTP/1.1 server on 127.0.0.1. It answers `/old` with a 301 to
    // `/new` and everything else with a small page, holding every request
    // for a moment so overlapping requests can be counted.
    #[derive(Default)]
    struct LocalSite {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        user_agents: Mutex<Vec<String>>,
    }

    async fn serve(site: Arc<LocalSite>) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let site = site.clone();
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        let n = socket.read(&mut chunk).await.unwrap();
                        if n == 0 {
                            return;
                        }
                        head.extend_from_slice(&chunk[..n]);
                    }
                    let head = String::from_utf8_lossy(&head).to_string();

                    let now = site.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    site.peak.fetch_max(now, Ordering::SeqCst);
                    for line in head.lines() {
                        if let Some((name, value)) = line.split_once(':') {
                            if name.eq_ignore_ascii_case("user-agent") {
                                site.user_agents.lock().unwrap().push(value.trim().to_string());
                            }
                        }
                    }
                    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

                    tokio::time::sleep(Duration::from_millis(50)).await;
                    site.in_flight.fetch_sub(1, Ordering::SeqCst);

                    let response = if path == "/old" {
                        "HTTP/1.1 301 Moved Permanently\r\nLocation: /new\r\n\
                         Content-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_string()
                    } else {
                        let body = format!("<p>{path}</p>");
                        format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\
                             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        )
                    };
                    socket.write_all(response.as_bytes()).await.unwrap();
                    socket.shutdown().await.ok();
                });
            }
        });

        addr
    }

    #[tokio::test]
    async fn test_requests_capped_and_identified() {
        let site = Arc::new(LocalSite::default());
        let addr = serve(site.clone()).await;

        let config = CrawlerConfig {
            user_agent: "test-bot".to_string(),
            max_connections: 2,
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        let urls: Vec<String> = (0..6).map(|i| format!("http://{addr}/page{i}")).collect();
        let results = futures::future::join_all(urls.iter().map(|url| fetcher.fetch(url))).await;
        for (url, result) in urls.iter().zip(results) {
            let page = result.unwrap();
            assert_eq!(&page.requested_url, url);
            assert_eq!(page.status, 200);
            assert!(page.body.contains("/page"));
        }
        assert_eq!(site.peak.load(Ordering::SeqCst), 2);
        assert_eq!(fetcher.available_connections(), 2);

        let old = format!("http://{addr}/old");
        let page = fetcher.fetch(&old).await.unwrap();
        assert_eq!(page.requested_url, old);
        assert_eq!(page.url.path(), "/new");
        assert!(page.url.as_str().ends_with("/new"));

        // Six pages, plus the redirect and the request it led to
        let user_agents = site.user_agents.lock().unwrap().clone();
        assert_eq!(user_agents.len(), 8);
        assert!(user_agents.iter().all(|ua| ua == "test-bot"));
    }

    #[test]
    fn test_success_status_passes() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(check_status(StatusCode::NO_CONTENT).is_ok());
    }

    #[test]
    fn test_error_status_is_reported() {
        assert_eq!(
            check_status(StatusCode::NOT_FOUND),
            Err(FetchError::Status { code: 404 })
        );
        assert_eq!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(FetchError::Status { code: 500 })
        );
    }

    #[test]
    fn test_connection_cap_from_config() {
        let config = CrawlerConfig {
            max_connections: 5,
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        assert_eq!(fetcher.available_connections(), 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CrawlerConfig {
            max_connections: 0,
            ..Default::default()
        };
        assert!(matches!(
            HttpFetcher::new(&config),
            Err(CrawlError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_unparseable_url_is_fetch_error() {
        let fetcher = HttpFetcher::new(&CrawlerConfig::default()).unwrap();
        let result = fetcher.fetch("not a url").await;
        assert!(result.is_err());
        // The permit is released again afterwards
        assert_eq!(fetcher.available_connections(), 3);
    }
}
