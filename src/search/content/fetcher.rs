//! HTTP content fetching with timeouts
//!
//! Fetches web page content from URLs returned by search results. Every
//! failure is logged and reported as "no content"; one bad URL never
//! aborts a batch.
//!
//! Unless private hosts are allowed, the host check applies to every
//! redirect hop and to the addresses a hostname resolves to.

use async_trait::async_trait;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use reqwest::redirect::Policy;
use reqwest::{header, Client};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::{Host, Url};

use super::config::ContentFetchConfig;
use super::extractor::extract_text;

/// Sanitized plain text for one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedContent {
    pub url: String,
    pub text: String,
}

/// Content fetch error types
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),
    /// HTTP request error
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// HTTP non-success status
    #[error("HTTP {0} for: {1}")]
    HttpStatus(u16, String),
    /// No content could be extracted
    #[error("No content extracted from: {0}")]
    NoContent(String),
    /// URL is unsafe (localhost, private IP, non-http scheme)
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),
}

/// Retrieves and sanitizes the text of a single page
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch `url` and return at most `max_chars` characters of text,
    /// or `None` if the page could not be retrieved
    async fn fetch(&self, url: &str, max_chars: usize) -> Option<RetrievedContent>;
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Resolver that refuses hostnames pointing at private addresses
struct PublicOnlyResolver;

impl Resolve for PublicOnlyResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            match HttpContentFetcher::resolve_public(name.as_str()).await {
                Ok(addrs) => Ok(Box::new(addrs.into_iter()) as Addrs),
                Err(e) => Err(Box::new(e) as BoxError),
            }
        })
    }
}

/// Content fetcher backed by `reqwest`
pub struct HttpContentFetcher {
    client: Client,
    config: ContentFetchConfig,
}

impl HttpContentFetcher {
    /// Create a new content fetcher
    pub fn new(config: ContentFetchConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(Self::redirect_policy(&config));
        if !config.allow_private_hosts {
            builder = builder.dns_resolver(Arc::new(PublicOnlyResolver));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Follow at most `max_redirects` hops, stopping at any unsafe target
    fn redirect_policy(config: &ContentFetchConfig) -> Policy {
        let max_redirects = config.max_redirects;
        let allow_private_hosts = config.allow_private_hosts;
        Policy::custom(move |attempt| {
            if attempt.previous().len() >= max_redirects {
                attempt.error("too many redirects")
            } else if !Self::redirect_allowed(allow_private_hosts, attempt.url()) {
                attempt.stop()
            } else {
                attempt.follow()
            }
        })
    }

    /// Whether a redirect to `target` may be followed
    pub fn redirect_allowed(allow_private_hosts: bool, target: &Url) -> bool {
        allow_private_hosts || Self::is_safe_url(target.as_str())
    }

    /// Fetch content from a single URL, reporting why it failed
    pub async fn fetch_content(
        &self,
        url: &str,
        max_chars: usize,
    ) -> Result<RetrievedContent, FetchError> {
        if !self.config.allow_private_hosts && !Self::is_safe_url(url) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        debug!("Fetching content from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        // Only a refused redirect hop leaves a 3xx here
        if status.is_redirection() {
            let target = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or(url);
            return Err(FetchError::UnsafeUrl(target.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let text = extract_text(&html, max_chars);
        if text.is_empty() {
            return Err(FetchError::NoContent(url.to_string()));
        }

        info!("Fetched {} chars from: {}", text.chars().count(), url);

        Ok(RetrievedContent {
            url: url.to_string(),
            text,
        })
    }

    /// Check if URL is safe to fetch (http/https, not localhost/private IP)
    pub fn is_safe_url(url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return false,
        };

        if !["http", "https"].contains(&parsed.scheme()) {
            return false;
        }

        match parsed.host() {
            Some(Host::Domain(domain)) => {
                let domain = domain.to_lowercase();
                domain != "localhost" && !domain.ends_with(".localhost")
            }
            Some(Host::Ipv4(ip)) => !Self::is_private_ip(IpAddr::V4(ip)),
            Some(Host::Ipv6(ip)) => !Self::is_private_ip(IpAddr::V6(ip)),
            None => false,
        }
    }

    /// Resolve `host`, failing if any address it maps to is private
    pub async fn resolve_public(host: &str) -> Result<Vec<SocketAddr>, FetchError> {
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| FetchError::HttpError(format!("DNS lookup failed for {}: {}", host, e)))?
            .collect();

        if addrs.is_empty() {
            return Err(FetchError::HttpError(format!("No addresses for {}", host)));
        }
        if addrs.iter().any(|addr| Self::is_private_ip(addr.ip())) {
            return Err(FetchError::UnsafeUrl(host.to_string()));
        }
        Ok(addrs)
    }

    fn is_private_ip(ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => Self::is_private_v4(v4),
            IpAddr::V6(v6) => Self::is_private_v6(v6),
        }
    }

    fn is_private_v4(ip: Ipv4Addr) -> bool {
        ip.is_loopback()
            || ip.is_private()
            || ip.is_link_local()
            || ip.is_unspecified()
            || ip.is_broadcast()
    }

    fn is_private_v6(ip: Ipv6Addr) -> bool {
        if let Some(mapped) = ip.to_ipv4_mapped() {
            return Self::is_private_v4(mapped);
        }
        let first = ip.segments()[0];
        ip.is_loopback()
            || ip.is_unspecified()
            // fc00::/7 unique local, fe80::/10 link-local
            || (first & 0xfe00) == 0xfc00
            || (first & 0xffc0) == 0xfe80
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch(&self, url: &str, max_chars: usize) -> Option<RetrievedContent> {
        match self.fetch_content(url, max_chars).await {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Webpage content retrieval failed for {}: {}", url, e);
                None
            }
        }
    }
}
